//! Password input
//!
//! The current value is never echoed back into the markup.

use crate::decorators::{Decorator, DecoratorBase};
use crate::model::FieldDef;
use crate::seed::{DecoratorKind, SeedOptions};
use serde_json::Value;
use trellis_ui::View;

#[derive(Debug, Clone)]
pub struct Password {
	pub base: DecoratorBase,
}

impl Password {
	pub fn from_seed(field: &FieldDef, options: &SeedOptions) -> Self {
		Self {
			base: DecoratorBase::new(field, options),
		}
	}
}

impl Decorator for Password {
	fn kind(&self) -> DecoratorKind {
		DecoratorKind::Password
	}

	fn base(&self) -> &DecoratorBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut DecoratorBase {
		&mut self.base
	}

	fn render_input(&self, _value: Option<&Value>) -> View {
		let mut input = View::new("input").set_attr("type", "password");
		if let Some(placeholder) = &self.base.placeholder {
			input = input.set_attr("placeholder", placeholder.clone());
		}
		self.base.apply_common(input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::FieldType;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_password_value_never_rendered() {
		let def = FieldDef::new("secret", FieldType::Password);
		let pw = Password::from_seed(&def, &SeedOptions::default());
		let html = pw.render_input(Some(&json!("hunter2"))).render();
		assert!(html.contains("type=\"password\""));
		assert!(!html.contains("hunter2"));
	}
}
