//! Named template store
//!
//! Runtime template rendering backed by Tera. The built-in templates are
//! embedded at compile time and registered when a store is created;
//! callers may register additional named templates at runtime.

use crate::error::{UiError, UiResult};
use serde::Serialize;
use tera::{Context, Tera};

const BUILTINS: &[(&str, &str)] = &[
	("form.html", include_str!("templates/form.html")),
	("form-success.html", include_str!("templates/form-success.html")),
];

/// Template store with the built-in component templates registered.
pub struct TemplateStore {
	tera: Tera,
}

impl TemplateStore {
	/// Create a store with the built-in templates.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_ui::TemplateStore;
	///
	/// let store = TemplateStore::new();
	/// assert!(store.has("form-success.html"));
	/// assert!(!store.has("missing.html"));
	/// ```
	pub fn new() -> Self {
		let mut tera = Tera::default();
		for (name, source) in BUILTINS {
			// Embedded sources are compiled into the binary; a parse
			// failure here is a build defect, not a runtime condition.
			tera.add_raw_template(name, source)
				.unwrap_or_else(|e| panic!("invalid built-in template {}: {}", name, e));
		}
		Self { tera }
	}

	/// Register an additional named template.
	pub fn add_raw(&mut self, name: &str, source: &str) -> UiResult<()> {
		self.tera
			.add_raw_template(name, source)
			.map_err(|source| UiError::Template {
				name: name.to_string(),
				source,
			})
	}

	pub fn has(&self, name: &str) -> bool {
		self.tera.get_template_names().any(|n| n == name)
	}

	/// Render a named template with a serializable context.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_ui::TemplateStore;
	/// use serde_json::json;
	///
	/// let store = TemplateStore::new();
	/// let html = store
	/// 	.render("form-success.html", &json!({"header": "Saved", "message": null}))
	/// 	.unwrap();
	/// assert!(html.contains("Saved"));
	/// assert!(!html.contains("<p>"));
	/// ```
	pub fn render<T: Serialize>(&self, name: &str, context: &T) -> UiResult<String> {
		if !self.has(name) {
			return Err(UiError::UnknownTemplate(name.to_string()));
		}
		tracing::debug!(template = name, "rendering template");
		let context = Context::from_serialize(context).map_err(|e| UiError::Context {
			name: name.to_string(),
			message: e.to_string(),
		})?;
		self.tera
			.render(name, &context)
			.map_err(|source| UiError::Template {
				name: name.to_string(),
				source,
			})
	}
}

impl Default for TemplateStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_success_template_with_sub_header() {
		let store = TemplateStore::new();
		let html = store
			.render(
				"form-success.html",
				&json!({"header": "Saved", "message": "Record 42 updated"}),
			)
			.unwrap();
		assert!(html.contains("<div class=\"header\">Saved</div>"));
		assert!(html.contains("<p>Record 42 updated</p>"));
	}

	#[rstest]
	fn test_success_template_drops_paragraph_when_absent() {
		let store = TemplateStore::new();
		let html = store
			.render("form-success.html", &json!({"header": "Saved", "message": null}))
			.unwrap();
		assert!(html.contains("Saved"));
		// The paragraph element is omitted entirely, not rendered empty.
		assert!(!html.contains("<p>"));
	}

	#[rstest]
	fn test_unknown_template_is_an_error() {
		let store = TemplateStore::new();
		let err = store.render("nope.html", &json!({})).unwrap_err();
		assert!(matches!(err, UiError::UnknownTemplate(_)));
	}

	#[rstest]
	fn test_custom_template_registration() {
		let mut store = TemplateStore::new();
		store.add_raw("banner.html", "<h1>{{ title }}</h1>").unwrap();
		let html = store.render("banner.html", &json!({"title": "Hi"})).unwrap();
		assert_eq!(html, "<h1>Hi</h1>");
	}
}
