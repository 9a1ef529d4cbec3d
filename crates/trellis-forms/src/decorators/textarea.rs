//! Multi-line text input

use crate::decorators::{Decorator, DecoratorBase, display_value};
use crate::model::FieldDef;
use crate::seed::{DecoratorKind, SeedOptions};
use serde_json::Value;
use trellis_ui::View;

#[derive(Debug, Clone)]
pub struct TextArea {
	pub base: DecoratorBase,
}

impl TextArea {
	pub fn from_seed(field: &FieldDef, options: &SeedOptions) -> Self {
		Self {
			base: DecoratorBase::new(field, options),
		}
	}
}

impl Decorator for TextArea {
	fn kind(&self) -> DecoratorKind {
		DecoratorKind::TextArea
	}

	fn base(&self) -> &DecoratorBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut DecoratorBase {
		&mut self.base
	}

	fn render_input(&self, value: Option<&Value>) -> View {
		let mut area = View::new("textarea");
		if let Some(placeholder) = &self.base.placeholder {
			area = area.set_attr("placeholder", placeholder.clone());
		}
		if let Some(value) = value {
			area = area.set_text(display_value(value));
		}
		self.base.apply_common(area)
	}
}
