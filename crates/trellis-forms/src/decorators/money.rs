//! Monetary amount input

use crate::decorators::{Decorator, DecoratorBase, display_value};
use crate::model::FieldDef;
use crate::seed::{DecoratorKind, SeedOptions};
use serde_json::Value;
use trellis_ui::View;

/// A labeled input with a currency tag.
#[derive(Debug, Clone)]
pub struct Money {
	pub base: DecoratorBase,
	pub currency: String,
}

impl Money {
	pub fn from_seed(field: &FieldDef, options: &SeedOptions) -> Self {
		let currency = options
			.attrs
			.get("currency")
			.and_then(|v| v.as_str())
			.unwrap_or("$")
			.to_string();
		let mut options = options.clone();
		options.attrs.remove("currency");
		Self {
			base: DecoratorBase::new(field, &options),
			currency,
		}
	}
}

impl Decorator for Money {
	fn kind(&self) -> DecoratorKind {
		DecoratorKind::Money
	}

	fn base(&self) -> &DecoratorBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut DecoratorBase {
		&mut self.base
	}

	fn render_input(&self, value: Option<&Value>) -> View {
		let mut input = View::new("input").set_attr("type", "text");
		if let Some(value) = value {
			input = input.set_attr("value", display_value(value));
		}
		View::new("div")
			.add_class("ui")
			.add_class("labeled")
			.add_class("input")
			.add(
				View::new("div")
					.add_class("ui")
					.add_class("label")
					.set_text(self.currency.clone()),
			)
			.add(self.base.apply_common(input))
	}
}
