//! Field decorator widgets
//!
//! A decorator is the widget representing one model field on a form.
//! Each widget lives in its own module; all share `DecoratorBase` for
//! the field metadata and the editable/readonly/disabled flags, and the
//! `Decorator` trait for rendering.

pub mod calendar;
pub mod checkbox;
pub mod dropdown;
pub mod line;
pub mod money;
pub mod password;
pub mod textarea;

pub use calendar::Calendar;
pub use checkbox::Checkbox;
pub use dropdown::DropDown;
pub use line::Line;
pub use money::Money;
pub use password::Password;
pub use textarea::TextArea;

use crate::model::FieldDef;
use crate::seed::{DecoratorKind, SeedOptions};
use serde_json::Value;
use std::collections::BTreeMap;
use trellis_ui::View;

/// Render a field value for an HTML attribute or option comparison.
pub(crate) fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

/// State shared by every decorator: the backing field and the flags
/// controlling whether the submission pipeline writes it back.
#[derive(Debug, Clone)]
pub struct DecoratorBase {
	pub field: FieldDef,
	pub read_only: bool,
	pub disabled: bool,
	pub hint: Option<String>,
	pub placeholder: Option<String>,
	pub attrs: BTreeMap<String, Value>,
}

impl DecoratorBase {
	pub fn new(field: &FieldDef, options: &SeedOptions) -> Self {
		Self {
			field: field.clone(),
			read_only: field.read_only,
			disabled: false,
			hint: options.hint.clone(),
			placeholder: options.placeholder.clone(),
			attrs: options.attrs.clone(),
		}
	}

	/// The `id` attribute of the input element.
	pub fn input_id(&self) -> String {
		format!("id_{}", self.field.name)
	}

	/// Apply name, id, flag and pass-through attributes to an input view.
	pub(crate) fn apply_common(&self, mut view: View) -> View {
		view = view
			.set_attr("name", self.field.name.clone())
			.set_attr("id", self.input_id());
		if self.read_only {
			view = view.set_attr("readonly", "readonly");
		}
		if self.disabled {
			view = view.set_attr("disabled", "disabled");
		}
		for (name, value) in &self.attrs {
			view = view.set_attr(name.clone(), display_value(value));
		}
		view
	}
}

/// The widget representing one form field.
pub trait Decorator: Send + std::fmt::Debug {
	fn kind(&self) -> DecoratorKind;

	fn base(&self) -> &DecoratorBase;

	fn base_mut(&mut self) -> &mut DecoratorBase;

	/// Render the input element for the current value.
	fn render_input(&self, value: Option<&Value>) -> View;

	/// Render the labeled field container around the input.
	fn render_field(&self, value: Option<&Value>) -> View {
		let base = self.base();
		let mut field = View::new("div")
			.add_class("field")
			.set_attr("data-field", base.field.name.clone());
		if base.field.required {
			field = field.add_class("required");
		}
		if base.disabled {
			field = field.add_class("disabled");
		}
		field = field.add(
			View::new("label")
				.set_attr("for", base.input_id())
				.set_text(base.field.display_caption()),
		);
		field = field.add(self.render_input(value));
		if let Some(hint) = &base.hint {
			field = field.add(View::new("small").add_class("hint").set_text(hint.clone()));
		}
		field
	}

	fn name(&self) -> &str {
		&self.base().field.name
	}

	/// Whether the submission pipeline may write this field back.
	fn is_editable(&self) -> bool {
		let base = self.base();
		!base.read_only && !base.disabled
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::FieldType;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_render_field_wraps_label_input_and_hint() {
		let def = FieldDef::new("email", FieldType::String);
		let options = SeedOptions {
			hint: Some("We never share it".to_string()),
			..SeedOptions::default()
		};
		let line = Line::from_seed(&def, &options);
		let html = line.render_field(None).render();
		assert!(html.contains("data-field=\"email\""));
		assert!(html.contains("<label for=\"id_email\">Email</label>"));
		assert!(html.contains("<small class=\"hint\">We never share it</small>"));
	}

	#[rstest]
	fn test_readonly_flag_reaches_markup() {
		let def = FieldDef::new("code", FieldType::String).read_only();
		let line = Line::from_seed(&def, &SeedOptions::default());
		assert!(!line.is_editable());
		assert!(
			line.render_input(Some(&json!("x")))
				.render()
				.contains("readonly=\"readonly\"")
		);
	}

	#[rstest]
	fn test_required_field_class() {
		let def = FieldDef::new("name", FieldType::String).required();
		let line = Line::from_seed(&def, &SeedOptions::default());
		assert!(
			line.render_field(None)
				.render()
				.starts_with("<div class=\"field required\"")
		);
	}
}
