//! Decorator factory
//!
//! Resolves a model field into a widget. Seed layers are consulted in
//! order: the caller's seed, the field's own UI form hint, the
//! type → kind table, and finally a structural fallback derived from
//! the field's enum/values/reference metadata. The first layer naming a
//! kind wins; later layers only contribute missing options.

use crate::decorators::{
	Calendar, Checkbox, Decorator, DropDown, Line, Money, Password, TextArea,
};
use crate::error::{FormError, FormResult};
use crate::model::{FieldDef, FieldType};
use crate::seed::{CalendarFlavor, DecoratorKind, DecoratorSeed, SeedOptions};
use std::collections::HashMap;

type Constructor = Box<dyn Fn(&FieldDef, &SeedOptions) -> Box<dyn Decorator> + Send + Sync>;

/// Registry mapping decorator kinds to constructors.
///
/// The built-in kinds are pre-registered; applications may add their
/// own under [`DecoratorKind::Custom`] tags.
pub struct DecoratorRegistry {
	constructors: HashMap<DecoratorKind, Constructor>,
}

impl DecoratorRegistry {
	/// Registry with all built-in widgets.
	pub fn with_builtins() -> Self {
		let mut registry = Self {
			constructors: HashMap::new(),
		};
		registry.register(DecoratorKind::Line, |f, o| Box::new(Line::from_seed(f, o)));
		registry.register(DecoratorKind::TextArea, |f, o| {
			Box::new(TextArea::from_seed(f, o))
		});
		registry.register(DecoratorKind::DropDown, |f, o| {
			Box::new(DropDown::from_seed(f, o))
		});
		registry.register(DecoratorKind::Checkbox, |f, o| {
			Box::new(Checkbox::from_seed(f, o))
		});
		registry.register(DecoratorKind::Calendar, |f, o| {
			Box::new(Calendar::from_seed(f, o))
		});
		registry.register(DecoratorKind::Money, |f, o| Box::new(Money::from_seed(f, o)));
		registry.register(DecoratorKind::Password, |f, o| {
			Box::new(Password::from_seed(f, o))
		});
		registry
	}

	/// Register a constructor for a kind, replacing any existing one.
	pub fn register<F>(&mut self, kind: DecoratorKind, constructor: F)
	where
		F: Fn(&FieldDef, &SeedOptions) -> Box<dyn Decorator> + Send + Sync + 'static,
	{
		self.constructors.insert(kind, Box::new(constructor));
	}

	/// Build a widget for the kind, or fail with a configuration error
	/// when the kind was never registered.
	pub fn construct(
		&self,
		kind: &DecoratorKind,
		field: &FieldDef,
		options: &SeedOptions,
	) -> FormResult<Box<dyn Decorator>> {
		let constructor = self.constructors.get(kind).ok_or_else(|| {
			FormError::Config(format!("no decorator registered for kind '{}'", kind))
		})?;
		Ok(constructor(field, options))
	}
}

impl Default for DecoratorRegistry {
	fn default() -> Self {
		Self::with_builtins()
	}
}

/// The type → kind lookup table. Types without an entry fall through
/// to the structural fallback; plain strings stay out of the table so
/// an enum, value list or reference on a string field still resolves
/// to a dropdown, with the plain line as the last default.
fn type_seed(field_type: FieldType) -> Option<DecoratorSeed> {
	match field_type {
		FieldType::Boolean => Some(DecoratorSeed::of(DecoratorKind::Checkbox)),
		FieldType::Text => Some(DecoratorSeed::of(DecoratorKind::TextArea)),
		FieldType::Password => Some(DecoratorSeed::of(DecoratorKind::Password)),
		FieldType::DateTime => Some(
			DecoratorSeed::of(DecoratorKind::Calendar).with_calendar(CalendarFlavor::DateTime),
		),
		FieldType::Date => {
			Some(DecoratorSeed::of(DecoratorKind::Calendar).with_calendar(CalendarFlavor::Date))
		}
		FieldType::Time => Some(
			DecoratorSeed::of(DecoratorKind::Calendar)
				.with_calendar(CalendarFlavor::Time)
				.with_ampm(false),
		),
		FieldType::Money => Some(DecoratorSeed::of(DecoratorKind::Money)),
		FieldType::String | FieldType::Integer | FieldType::Float => None,
	}
}

/// The structural fallback layer. Non-boolean fields with an enum, an
/// explicit value list or a reference become dropdowns; everything else
/// is a plain line. Boolean fields never become a dropdown here. The
/// field's hint/placeholder UI metadata is injected into this layer
/// only, so it never overrides explicit seeds.
fn structural_fallback(field: &FieldDef) -> DecoratorSeed {
	let mut seed = DecoratorSeed::of(DecoratorKind::Line);

	if field.field_type != FieldType::Boolean {
		if let Some(enum_values) = &field.enum_values {
			seed = DecoratorSeed::of(DecoratorKind::DropDown).with_values(
				enum_values
					.iter()
					.map(|v| (v.clone(), v.clone()))
					.collect(),
			);
		} else if let Some(values) = &field.values {
			seed = DecoratorSeed::of(DecoratorKind::DropDown).with_values(values.clone());
		} else if let Some(reference) = &field.reference {
			seed = DecoratorSeed::of(DecoratorKind::DropDown)
				.with_values(reference.choices.clone());
		}
	}

	if let Some(hint) = &field.ui.hint {
		seed = seed.with_hint(hint.clone());
	}
	if let Some(placeholder) = &field.ui.placeholder {
		seed = seed.with_placeholder(placeholder.clone());
	}
	seed
}

/// Resolve a field into a widget through the seed fallback chain.
///
/// # Examples
///
/// ```
/// use trellis_forms::decorators::Decorator;
/// use trellis_forms::factory::{DecoratorRegistry, resolve_decorator};
/// use trellis_forms::model::{FieldDef, FieldType};
/// use trellis_forms::seed::DecoratorKind;
///
/// let registry = DecoratorRegistry::with_builtins();
/// let def = FieldDef::new("status", FieldType::String).with_enum(["open", "closed"]);
/// let widget = resolve_decorator(&def, None, &registry).unwrap();
/// assert_eq!(widget.kind(), DecoratorKind::DropDown);
/// ```
pub fn resolve_decorator(
	field: &FieldDef,
	seed: Option<DecoratorSeed>,
	registry: &DecoratorRegistry,
) -> FormResult<Box<dyn Decorator>> {
	let merged = DecoratorSeed::merge([
		seed,
		field.ui.form.clone(),
		type_seed(field.field_type),
		Some(structural_fallback(field)),
	]);
	// The fallback layer always names a kind, so one is present here.
	let kind = merged.kind.unwrap_or(DecoratorKind::Line);
	tracing::debug!(field = %field.name, kind = %kind, "resolved decorator");
	registry.construct(&kind, field, &merged.options)
}
