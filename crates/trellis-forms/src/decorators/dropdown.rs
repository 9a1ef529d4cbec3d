//! Selection dropdown

use crate::decorators::{Decorator, DecoratorBase, display_value};
use crate::model::FieldDef;
use crate::seed::{DecoratorKind, SeedOptions};
use serde_json::Value;
use trellis_ui::View;

/// A `<select>` over `(value, label)` pairs. The pairs come from the
/// resolved seed: an enum list, an explicit value list, or a reference's
/// choice rows.
#[derive(Debug, Clone)]
pub struct DropDown {
	pub base: DecoratorBase,
	pub values: Vec<(String, String)>,
	pub empty_label: Option<String>,
}

impl DropDown {
	pub fn from_seed(field: &FieldDef, options: &SeedOptions) -> Self {
		let empty_label = if field.required {
			None
		} else {
			Some("---".to_string())
		};
		Self {
			base: DecoratorBase::new(field, options),
			values: options.values.clone().unwrap_or_default(),
			empty_label,
		}
	}
}

impl Decorator for DropDown {
	fn kind(&self) -> DecoratorKind {
		DecoratorKind::DropDown
	}

	fn base(&self) -> &DecoratorBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut DecoratorBase {
		&mut self.base
	}

	fn render_input(&self, value: Option<&Value>) -> View {
		let current = value.map(display_value);
		let mut select = View::new("select").add_class("ui").add_class("dropdown");
		if let Some(label) = &self.empty_label {
			select = select.add(
				View::new("option")
					.set_attr("value", "")
					.set_text(label.clone()),
			);
		}
		for (option_value, label) in &self.values {
			let mut option = View::new("option")
				.set_attr("value", option_value.clone())
				.set_text(label.clone());
			if current.as_deref() == Some(option_value.as_str()) {
				option = option.set_attr("selected", "selected");
			}
			select = select.add(option);
		}
		self.base.apply_common(select)
	}
}
