//! Boolean checkbox

use crate::decorators::{Decorator, DecoratorBase};
use crate::model::FieldDef;
use crate::seed::{DecoratorKind, SeedOptions};
use serde_json::Value;
use trellis_ui::View;

#[derive(Debug, Clone)]
pub struct Checkbox {
	pub base: DecoratorBase,
}

impl Checkbox {
	pub fn from_seed(field: &FieldDef, options: &SeedOptions) -> Self {
		Self {
			base: DecoratorBase::new(field, options),
		}
	}

	fn is_checked(value: Option<&Value>) -> bool {
		match value {
			Some(Value::Bool(b)) => *b,
			Some(Value::String(s)) => matches!(s.as_str(), "on" | "true" | "1" | "y"),
			Some(Value::Number(n)) => n.as_i64() == Some(1),
			_ => false,
		}
	}
}

impl Decorator for Checkbox {
	fn kind(&self) -> DecoratorKind {
		DecoratorKind::Checkbox
	}

	fn base(&self) -> &DecoratorBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut DecoratorBase {
		&mut self.base
	}

	fn render_input(&self, value: Option<&Value>) -> View {
		let mut input = View::new("input").set_attr("type", "checkbox");
		if Self::is_checked(value) {
			input = input.set_attr("checked", "checked");
		}
		self.base.apply_common(input)
	}

	// The checkbox carries its own label to the right of the box, so
	// the default label-above-input wrapper does not apply.
	fn render_field(&self, value: Option<&Value>) -> View {
		let mut field = View::new("div")
			.add_class("field")
			.set_attr("data-field", self.base.field.name.clone());
		if self.base.disabled {
			field = field.add_class("disabled");
		}
		let wrapper = View::new("div")
			.add_class("ui")
			.add_class("checkbox")
			.add(self.render_input(value))
			.add(
				View::new("label")
					.set_attr("for", self.base.input_id())
					.set_text(self.base.field.display_caption()),
			);
		field.add(wrapper)
	}
}
