//! View container tree
//!
//! A `View` is one HTML element with attributes, classes, inline styles,
//! content and ordered children. Components build their markup as a tree
//! of views and render it to an escaped HTML string.

use std::collections::BTreeMap;

/// Escape text content for HTML element bodies.
///
/// # Examples
///
/// ```
/// use trellis_ui::escape_html;
///
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// ```
pub fn escape_html(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			_ => out.push(c),
		}
	}
	out
}

/// Escape a value for use inside a double-quoted HTML attribute.
///
/// # Examples
///
/// ```
/// use trellis_ui::escape_attribute;
///
/// assert_eq!(escape_attribute("say \"hi\""), "say &quot;hi&quot;");
/// ```
pub fn escape_attribute(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(c),
		}
	}
	out
}

// Elements that must not get a closing tag.
const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

/// One element in the component tree.
#[derive(Debug, Clone, Default)]
pub struct View {
	element: String,
	attrs: BTreeMap<String, String>,
	classes: Vec<String>,
	styles: BTreeMap<String, String>,
	text: Option<String>,
	html: Option<String>,
	children: Vec<View>,
}

impl View {
	/// Create a view for the given element name.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_ui::View;
	///
	/// let v = View::new("div");
	/// assert_eq!(v.render(), "<div></div>");
	/// ```
	pub fn new(element: impl Into<String>) -> Self {
		Self {
			element: element.into(),
			..Self::default()
		}
	}

	/// Set an attribute, replacing any previous value.
	pub fn set_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.insert(name.into(), value.into());
		self
	}

	/// Append a CSS class.
	pub fn add_class(mut self, class: impl Into<String>) -> Self {
		self.classes.push(class.into());
		self
	}

	/// Set one inline style property.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_ui::View;
	///
	/// let v = View::new("input").set_style("display", "none");
	/// assert!(v.render().contains("style=\"display: none\""));
	/// ```
	pub fn set_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
		self.styles.insert(property.into(), value.into());
		self
	}

	/// Set escaped text content.
	pub fn set_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	/// Set raw HTML content. The caller is responsible for the markup
	/// being trusted; text from users goes through [`View::set_text`].
	pub fn set_html(mut self, html: impl Into<String>) -> Self {
		self.html = Some(html.into());
		self
	}

	/// Append a child view.
	pub fn add(mut self, child: View) -> Self {
		self.children.push(child);
		self
	}

	/// Append a child view through a mutable reference.
	pub fn push(&mut self, child: View) -> &mut Self {
		self.children.push(child);
		self
	}

	pub fn element(&self) -> &str {
		&self.element
	}

	pub fn children(&self) -> &[View] {
		&self.children
	}

	/// Render the view and its subtree to HTML.
	///
	/// Text content and attribute values are escaped; content set via
	/// [`View::set_html`] is emitted verbatim.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_ui::View;
	///
	/// let v = View::new("div")
	/// 	.add_class("ui")
	/// 	.add_class("header")
	/// 	.set_text("Contacts & friends");
	/// assert_eq!(v.render(), "<div class=\"ui header\">Contacts &amp; friends</div>");
	/// ```
	pub fn render(&self) -> String {
		let mut out = String::new();
		out.push('<');
		out.push_str(&self.element);

		if !self.classes.is_empty() {
			out.push_str(" class=\"");
			out.push_str(&escape_attribute(&self.classes.join(" ")));
			out.push('"');
		}
		for (name, value) in &self.attrs {
			out.push(' ');
			out.push_str(name);
			out.push_str("=\"");
			out.push_str(&escape_attribute(value));
			out.push('"');
		}
		if !self.styles.is_empty() {
			let style = self
				.styles
				.iter()
				.map(|(k, v)| format!("{}: {}", k, v))
				.collect::<Vec<_>>()
				.join("; ");
			out.push_str(" style=\"");
			out.push_str(&escape_attribute(&style));
			out.push('"');
		}

		if VOID_ELEMENTS.contains(&self.element.as_str()) {
			out.push_str(" />");
			return out;
		}
		out.push('>');

		if let Some(text) = &self.text {
			out.push_str(&escape_html(text));
		}
		if let Some(html) = &self.html {
			out.push_str(html);
		}
		for child in &self.children {
			out.push_str(&child.render());
		}

		out.push_str("</");
		out.push_str(&self.element);
		out.push('>');
		out
	}
}
