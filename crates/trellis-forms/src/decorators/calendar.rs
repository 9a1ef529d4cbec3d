//! Date, time and datetime picker

use crate::decorators::{Decorator, DecoratorBase, display_value};
use crate::model::FieldDef;
use crate::seed::{CalendarFlavor, DecoratorKind, SeedOptions};
use serde_json::Value;
use trellis_ui::View;

#[derive(Debug, Clone)]
pub struct Calendar {
	pub base: DecoratorBase,
	pub flavor: CalendarFlavor,
	/// 12-hour clock for time inputs; the client picker reads this.
	pub ampm: bool,
}

impl Calendar {
	pub fn from_seed(field: &FieldDef, options: &SeedOptions) -> Self {
		Self {
			base: DecoratorBase::new(field, options),
			flavor: options.calendar.unwrap_or_default(),
			ampm: options.ampm.unwrap_or(true),
		}
	}

	fn input_type(&self) -> &'static str {
		match self.flavor {
			CalendarFlavor::Date => "date",
			CalendarFlavor::Time => "time",
			CalendarFlavor::DateTime => "datetime-local",
		}
	}
}

impl Decorator for Calendar {
	fn kind(&self) -> DecoratorKind {
		DecoratorKind::Calendar
	}

	fn base(&self) -> &DecoratorBase {
		&self.base
	}

	fn base_mut(&mut self) -> &mut DecoratorBase {
		&mut self.base
	}

	fn render_input(&self, value: Option<&Value>) -> View {
		let mut input = View::new("input")
			.set_attr("type", self.input_type())
			.add_class("trellis-calendar");
		if !self.ampm {
			input = input.set_attr("data-ampm", "false");
		}
		if let Some(value) = value {
			input = input.set_attr("value", display_value(value));
		}
		self.base.apply_common(input)
	}
}
