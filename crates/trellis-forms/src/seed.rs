//! Declarative widget configuration
//!
//! A seed names a decorator kind and carries widget options. Seeds are
//! resolved through an ordered fallback chain (caller seed, field UI
//! hint, type table, structural fallback): the first layer naming a
//! kind wins, and option slots fill from later layers only when still
//! unset, so later layers are defaults under explicit ones.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Decorator kinds resolvable through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecoratorKind {
	Line,
	TextArea,
	DropDown,
	Checkbox,
	Calendar,
	Money,
	Password,
	/// A tag registered by the application.
	Custom(String),
}

impl fmt::Display for DecoratorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DecoratorKind::Line => write!(f, "line"),
			DecoratorKind::TextArea => write!(f, "textarea"),
			DecoratorKind::DropDown => write!(f, "dropdown"),
			DecoratorKind::Checkbox => write!(f, "checkbox"),
			DecoratorKind::Calendar => write!(f, "calendar"),
			DecoratorKind::Money => write!(f, "money"),
			DecoratorKind::Password => write!(f, "password"),
			DecoratorKind::Custom(tag) => write!(f, "{}", tag),
		}
	}
}

/// Calendar widget flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarFlavor {
	#[default]
	DateTime,
	Date,
	Time,
}

/// Widget options carried by a seed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedOptions {
	/// `(value, label)` pairs for selection widgets.
	pub values: Option<Vec<(String, String)>>,
	pub calendar: Option<CalendarFlavor>,
	/// 12-hour clock for time calendars.
	pub ampm: Option<bool>,
	pub hint: Option<String>,
	pub placeholder: Option<String>,
	/// Override for the HTML input type.
	pub input_type: Option<String>,
	/// Arbitrary attributes passed through to the widget element.
	pub attrs: BTreeMap<String, Value>,
}

impl SeedOptions {
	/// Fill unset slots from a fallback layer. Set slots are kept.
	fn fill_from(&mut self, fallback: &SeedOptions) {
		if self.values.is_none() {
			self.values = fallback.values.clone();
		}
		if self.calendar.is_none() {
			self.calendar = fallback.calendar;
		}
		if self.ampm.is_none() {
			self.ampm = fallback.ampm;
		}
		if self.hint.is_none() {
			self.hint = fallback.hint.clone();
		}
		if self.placeholder.is_none() {
			self.placeholder = fallback.placeholder.clone();
		}
		if self.input_type.is_none() {
			self.input_type = fallback.input_type.clone();
		}
		for (name, value) in &fallback.attrs {
			self.attrs
				.entry(name.clone())
				.or_insert_with(|| value.clone());
		}
	}
}

/// A declarative widget spec: optional kind plus options.
///
/// # Examples
///
/// ```
/// use trellis_forms::seed::{DecoratorKind, DecoratorSeed};
///
/// let seed = DecoratorSeed::of(DecoratorKind::DropDown)
/// 	.with_values(vec![("y".into(), "Yes".into()), ("n".into(), "No".into())]);
/// assert_eq!(seed.kind, Some(DecoratorKind::DropDown));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecoratorSeed {
	pub kind: Option<DecoratorKind>,
	pub options: SeedOptions,
}

impl DecoratorSeed {
	pub fn of(kind: DecoratorKind) -> Self {
		Self {
			kind: Some(kind),
			options: SeedOptions::default(),
		}
	}

	/// A seed contributing options only, without naming a kind.
	pub fn options_only(options: SeedOptions) -> Self {
		Self {
			kind: None,
			options,
		}
	}

	pub fn with_values(mut self, values: Vec<(String, String)>) -> Self {
		self.options.values = Some(values);
		self
	}

	pub fn with_calendar(mut self, flavor: CalendarFlavor) -> Self {
		self.options.calendar = Some(flavor);
		self
	}

	pub fn with_ampm(mut self, ampm: bool) -> Self {
		self.options.ampm = Some(ampm);
		self
	}

	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.options.hint = Some(hint.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.options.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
		self.options.input_type = Some(input_type.into());
		self
	}

	pub fn with_attr(mut self, name: impl Into<String>, value: Value) -> Self {
		self.options.attrs.insert(name.into(), value);
		self
	}

	/// Merge ordered layers into one seed. The first layer naming a
	/// kind wins; options fill in layer order, earlier layers taking
	/// precedence slot by slot.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_forms::seed::{DecoratorKind, DecoratorSeed};
	///
	/// let explicit = DecoratorSeed::of(DecoratorKind::TextArea);
	/// let fallback = DecoratorSeed::of(DecoratorKind::Line).with_hint("fallback hint");
	/// let merged = DecoratorSeed::merge([Some(explicit), None, Some(fallback)]);
	/// assert_eq!(merged.kind, Some(DecoratorKind::TextArea));
	/// assert_eq!(merged.options.hint.as_deref(), Some("fallback hint"));
	/// ```
	pub fn merge(layers: impl IntoIterator<Item = Option<DecoratorSeed>>) -> DecoratorSeed {
		let mut merged = DecoratorSeed::default();
		for layer in layers.into_iter().flatten() {
			if merged.kind.is_none() {
				merged.kind = layer.kind.clone();
			}
			merged.options.fill_from(&layer.options);
		}
		merged
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_first_kind_wins() {
		let merged = DecoratorSeed::merge([
			None,
			Some(DecoratorSeed::of(DecoratorKind::DropDown)),
			Some(DecoratorSeed::of(DecoratorKind::Line)),
		]);
		assert_eq!(merged.kind, Some(DecoratorKind::DropDown));
	}

	#[rstest]
	fn test_earlier_options_take_precedence() {
		let merged = DecoratorSeed::merge([
			Some(DecoratorSeed::of(DecoratorKind::Line).with_placeholder("explicit")),
			Some(
				DecoratorSeed::options_only(SeedOptions::default())
					.with_placeholder("fallback")
					.with_hint("only here"),
			),
		]);
		assert_eq!(merged.options.placeholder.as_deref(), Some("explicit"));
		assert_eq!(merged.options.hint.as_deref(), Some("only here"));
	}

	#[rstest]
	fn test_attrs_augment_without_override() {
		let merged = DecoratorSeed::merge([
			Some(DecoratorSeed::of(DecoratorKind::Line).with_attr("rows", json!(4))),
			Some(
				DecoratorSeed::default()
					.with_attr("rows", json!(10))
					.with_attr("autocomplete", json!("off")),
			),
		]);
		assert_eq!(merged.options.attrs.get("rows"), Some(&json!(4)));
		assert_eq!(merged.options.attrs.get("autocomplete"), Some(&json!("off")));
	}

	#[rstest]
	fn test_options_only_layer_never_sets_kind() {
		let merged = DecoratorSeed::merge([
			Some(DecoratorSeed::options_only(SeedOptions::default())),
			Some(DecoratorSeed::of(DecoratorKind::Money)),
		]);
		assert_eq!(merged.kind, Some(DecoratorKind::Money));
	}
}
