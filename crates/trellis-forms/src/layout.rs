//! Form layout
//!
//! The layout is the child container arranging fields, headers, groups
//! and the save button. It is chosen through a tagged seed resolved by
//! a registry of constructors, so applications can plug their own
//! arrangements; the built-in `GenericLayout` stacks items vertically
//! with optional grouped sections.

use crate::decorators::Decorator;
use crate::error::{FormError, FormResult};
use crate::form::FieldRegistry;
use crate::model::DataModel;
use std::collections::HashMap;
use trellis_ui::View;

/// The submit button appended to every layout.
#[derive(Debug, Clone)]
pub struct Button {
	pub caption: String,
	pub class: String,
}

impl Button {
	pub fn new(caption: impl Into<String>) -> Self {
		Self {
			caption: caption.into(),
			class: "primary".to_string(),
		}
	}
}

/// One entry in the layout's arrangement.
#[derive(Debug)]
pub enum LayoutItem {
	/// A registered field, by name.
	Field(String),
	/// A dividing section header.
	Header(String),
	/// Open a grouped section; any open group is closed first.
	GroupOpen { title: Option<String> },
	GroupClose,
	Divider,
	/// An arbitrary view placed between fields.
	View(View),
}

/// What a layout needs from the form while rendering.
pub struct LayoutScope<'a> {
	pub form_name: &'a str,
	pub fields: &'a FieldRegistry,
	pub model: &'a dyn DataModel,
}

impl LayoutScope<'_> {
	/// Current value for a field: model value, else the field default.
	fn value_of(&self, name: &str) -> Option<serde_json::Value> {
		if let Some(value) = self.model.get(name) {
			if !value.is_null() {
				return Some(value);
			}
		}
		self.fields
			.get(name)
			.and_then(|d| d.base().field.default.clone())
	}
}

/// A pluggable field arrangement.
pub trait FormLayout: Send + std::fmt::Debug {
	fn add_item(&mut self, item: LayoutItem);

	fn items(&self) -> &[LayoutItem];

	fn set_button(&mut self, button: Button);

	fn button(&self) -> Option<&Button>;

	fn render(&self, scope: &LayoutScope<'_>) -> FormResult<String>;
}

/// The default vertical arrangement.
#[derive(Debug, Default)]
pub struct GenericLayout {
	items: Vec<LayoutItem>,
	button: Option<Button>,
}

impl GenericLayout {
	pub fn new() -> Self {
		Self::default()
	}
}

impl FormLayout for GenericLayout {
	fn add_item(&mut self, item: LayoutItem) {
		self.items.push(item);
	}

	fn items(&self) -> &[LayoutItem] {
		&self.items
	}

	fn set_button(&mut self, button: Button) {
		self.button = Some(button);
	}

	fn button(&self) -> Option<&Button> {
		self.button.as_ref()
	}

	fn render(&self, scope: &LayoutScope<'_>) -> FormResult<String> {
		let mut out = String::new();
		let mut group_open = false;

		let close_group = |out: &mut String, group_open: &mut bool| {
			if *group_open {
				out.push_str("</div>");
				*group_open = false;
			}
		};

		for item in &self.items {
			match item {
				LayoutItem::Field(name) => {
					let decorator = scope.fields.get(name).ok_or_else(|| {
						FormError::Config(format!("layout references unknown field '{}'", name))
					})?;
					let value = scope.value_of(name);
					out.push_str(&decorator.render_field(value.as_ref()).render());
				}
				LayoutItem::Header(title) => {
					close_group(&mut out, &mut group_open);
					out.push_str(
						&View::new("h4")
							.add_class("ui")
							.add_class("dividing")
							.add_class("header")
							.set_text(title.clone())
							.render(),
					);
				}
				LayoutItem::GroupOpen { title } => {
					close_group(&mut out, &mut group_open);
					out.push_str("<div class=\"grouped fields trellis-form-group\">");
					if let Some(title) = title {
						out.push_str(&View::new("label").set_text(title.clone()).render());
					}
					group_open = true;
				}
				LayoutItem::GroupClose => close_group(&mut out, &mut group_open),
				LayoutItem::Divider => {
					out.push_str("<div class=\"ui hidden divider\"></div>");
				}
				LayoutItem::View(view) => out.push_str(&view.render()),
			}
		}
		close_group(&mut out, &mut group_open);

		if let Some(button) = &self.button {
			out.push_str(
				&View::new("button")
					.add_class("ui")
					.add_class(button.class.clone())
					.add_class("button")
					.set_attr("id", format!("{}_save", scope.form_name))
					.set_attr("tabindex", "0")
					.set_text(button.caption.clone())
					.render(),
			);
		}
		Ok(out)
	}
}

type LayoutConstructor = Box<dyn Fn() -> Box<dyn FormLayout> + Send + Sync>;

/// Tagged layout choice resolved through [`LayoutRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LayoutSeed {
	#[default]
	Generic,
	Custom(String),
}

/// Registry mapping layout tags to constructors.
pub struct LayoutRegistry {
	constructors: HashMap<String, LayoutConstructor>,
}

impl LayoutRegistry {
	pub fn with_builtins() -> Self {
		let mut registry = Self {
			constructors: HashMap::new(),
		};
		registry.register("generic", || Box::new(GenericLayout::new()));
		registry
	}

	pub fn register<F>(&mut self, tag: impl Into<String>, constructor: F)
	where
		F: Fn() -> Box<dyn FormLayout> + Send + Sync + 'static,
	{
		self.constructors.insert(tag.into(), Box::new(constructor));
	}

	/// Resolve a seed to a layout instance. An unknown tag is a
	/// configuration error.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_forms::layout::{LayoutRegistry, LayoutSeed};
	///
	/// let registry = LayoutRegistry::with_builtins();
	/// assert!(registry.resolve(&LayoutSeed::Generic).is_ok());
	/// assert!(registry.resolve(&LayoutSeed::Custom("tabbed".into())).is_err());
	/// ```
	pub fn resolve(&self, seed: &LayoutSeed) -> FormResult<Box<dyn FormLayout>> {
		let tag = match seed {
			LayoutSeed::Generic => "generic",
			LayoutSeed::Custom(tag) => tag.as_str(),
		};
		let constructor = self
			.constructors
			.get(tag)
			.ok_or_else(|| FormError::Config(format!("unsupported form layout '{}'", tag)))?;
		Ok(constructor())
	}
}

impl Default for LayoutRegistry {
	fn default() -> Self {
		Self::with_builtins()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unknown_layout_tag_is_config_error() {
		let registry = LayoutRegistry::with_builtins();
		let err = registry
			.resolve(&LayoutSeed::Custom("three-column".into()))
			.unwrap_err();
		assert!(matches!(err, FormError::Config(_)));
		assert!(err.to_string().contains("three-column"));
	}

	#[rstest]
	fn test_custom_layout_resolves_after_registration() {
		let mut registry = LayoutRegistry::with_builtins();
		registry.register("stacked", || Box::new(GenericLayout::new()));
		assert!(registry.resolve(&LayoutSeed::Custom("stacked".into())).is_ok());
	}
}
