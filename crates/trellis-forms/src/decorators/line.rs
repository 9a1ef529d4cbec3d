//! Single-line text input

use crate::decorators::{Decorator, DecoratorBase, display_value};
use crate::model::FieldDef;
use crate::seed::{DecoratorKind, SeedOptions};
use serde_json::Value;
use trellis_ui::View;

/// The default widget: a plain text line.
#[derive(Debug, Clone)]
pub struct Line {
	pub base: DecoratorBase,
	pub input_type: String,
}

impl Line {
	pub fn from_seed(field: &FieldDef, options: &SeedOptions) -> Self {
		Self {
			base: DecoratorBase::new(field, options),
			input_type: options
				.input_type
				.clone()
				.unwrap_or_else(|| "text".to_string()),
		}
	}
}

impl Decorator for Line {
	fn kind(&self) -> DecoratorKind {
		DecoratorKind::Line
	}

	fn base(&self) -> &DecoratorBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut DecoratorBase {
		&mut self.base
	}

	fn render_input(&self, value: Option<&Value>) -> View {
		let mut input = View::new("input").set_attr("type", self.input_type.clone());
		if let Some(placeholder) = &self.base.placeholder {
			input = input.set_attr("placeholder", placeholder.clone());
		}
		if let Some(value) = value {
			input = input.set_attr("value", display_value(value));
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
	fn test_line_renders_value_and_placeholder() {
		let def = FieldDef::new("city", FieldType::String);
		let options = SeedOptions {
			placeholder: Some("Town or city".to_string()),
			..SeedOptions::default()
		};
		let line = Line::from_seed(&def, &options);
		let html = line.render_input(Some(&json!("Riga"))).render();
		assert!(html.contains("type=\"text\""));
		assert!(html.contains("placeholder=\"Town or city\""));
		assert!(html.contains("value=\"Riga\""));
	}

	#[rstest]
	fn test_numeric_value_displayed_plainly() {
		let def = FieldDef::new("age", FieldType::Integer);
		let line = Line::from_seed(&def, &SeedOptions::default());
		assert!(
			line.render_input(Some(&json!(38)))
				.render()
				.contains("value=\"38\"")
		);
	}
}
