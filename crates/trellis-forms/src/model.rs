//! Model binding seam
//!
//! The form does not own an ORM; it consumes a narrow contract: typed
//! field metadata, get/set by name, and a save operation. `FieldDef`
//! carries the per-field metadata the decorator factory reads (type,
//! enum, explicit values, reference, UI hints), and `ProxyModel` is the
//! placeholder store bound automatically when fields are added to a
//! form with no real model.

use crate::seed::DecoratorSeed;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Declared type of a model field, driving typecasting and the
/// type → widget lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
	#[default]
	String,
	Text,
	Boolean,
	Integer,
	Float,
	Money,
	Date,
	Time,
	DateTime,
	Password,
}

/// A foreign-key reference with its selectable rows already resolved
/// by the model layer: `(id, title)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reference {
	pub target: String,
	pub choices: Vec<(String, String)>,
}

impl Reference {
	pub fn new(target: impl Into<String>, choices: Vec<(String, String)>) -> Self {
		Self {
			target: target.into(),
			choices,
		}
	}
}

/// UI metadata a model field may carry for form rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiHints {
	/// Explicit decorator seed, consulted right after a caller seed.
	pub form: Option<DecoratorSeed>,
	/// Help text shown under the input; fallback-layer only.
	pub hint: Option<String>,
	/// Input placeholder; fallback-layer only.
	pub placeholder: Option<String>,
}

/// Metadata for one model field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDef {
	pub name: String,
	pub caption: Option<String>,
	pub field_type: FieldType,
	pub enum_values: Option<Vec<String>>,
	pub values: Option<Vec<(String, String)>>,
	pub reference: Option<Reference>,
	pub required: bool,
	pub read_only: bool,
	pub ui: UiHints,
	pub default: Option<Value>,
}

impl FieldDef {
	/// Create a field definition with the given name and type.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_forms::model::{FieldDef, FieldType};
	///
	/// let def = FieldDef::new("age", FieldType::Integer);
	/// assert_eq!(def.name, "age");
	/// assert!(!def.read_only);
	/// ```
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			..Self::default()
		}
	}

	pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
		self.caption = Some(caption.into());
		self
	}

	/// Restrict the field to a closed set of values.
	pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.enum_values = Some(values.into_iter().map(Into::into).collect());
		self
	}

	/// Attach an explicit `(value, label)` list.
	pub fn with_values(mut self, values: Vec<(String, String)>) -> Self {
		self.values = Some(values);
		self
	}

	pub fn with_reference(mut self, reference: Reference) -> Self {
		self.reference = Some(reference);
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}

	pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
		self.ui.hint = Some(hint.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.ui.placeholder = Some(placeholder.into());
		self
	}

	/// Attach an explicit decorator seed as the field's own UI hint.
	pub fn with_form_seed(mut self, seed: DecoratorSeed) -> Self {
		self.ui.form = Some(seed);
		self
	}

	pub fn with_default(mut self, value: Value) -> Self {
		self.default = Some(value);
		self
	}

	/// Human-readable caption, derived from the name when unset.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_forms::model::{FieldDef, FieldType};
	///
	/// let def = FieldDef::new("first_name", FieldType::String);
	/// assert_eq!(def.display_caption(), "First Name");
	/// ```
	pub fn display_caption(&self) -> String {
		if let Some(caption) = &self.caption {
			return caption.clone();
		}
		self.name
			.split('_')
			.filter(|part| !part.is_empty())
			.map(|part| {
				let mut chars = part.chars();
				match chars.next() {
					Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
					None => String::new(),
				}
			})
			.collect::<Vec<_>>()
			.join(" ")
	}
}

#[derive(Debug, Error)]
pub enum ModelError {
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("Invalid value for {field}: {message}")]
	Invalid { field: String, message: String },
	#[error("Save failed: {0}")]
	Save(String),
}

/// The contract the form consumes from the model layer.
pub trait DataModel: Send {
	/// Names of all fields, in declaration order.
	fn field_names(&self) -> Vec<String>;

	/// Metadata for one field.
	fn field_def(&self, name: &str) -> Option<&FieldDef>;

	/// Current value of a field.
	fn get(&self, name: &str) -> Option<Value>;

	/// Assign a typecast value into a field.
	fn set(&mut self, name: &str, value: Value) -> Result<(), ModelError>;

	/// Persist the record.
	fn save(&mut self) -> Result<(), ModelError>;

	/// Register a field created by the form. Only placeholder models
	/// accept this; real models own their schema.
	fn register_field(&mut self, def: FieldDef) -> Result<(), ModelError> {
		Err(ModelError::UnknownField(def.name))
	}

	/// True for the no-op placeholder bound when no model was set.
	fn is_placeholder(&self) -> bool {
		false
	}
}

/// No-op model used when fields are added before any real model is
/// bound, so every decorator still has a backing field.
///
/// # Examples
///
/// ```
/// use trellis_forms::model::{DataModel, FieldDef, FieldType, ProxyModel};
/// use serde_json::json;
///
/// let mut model = ProxyModel::new();
/// model.register_field(FieldDef::new("note", FieldType::String)).unwrap();
/// model.set("note", json!("hello")).unwrap();
/// assert_eq!(model.get("note"), Some(json!("hello")));
/// assert!(model.is_placeholder());
/// ```
#[derive(Debug, Default)]
pub struct ProxyModel {
	fields: Vec<FieldDef>,
	data: HashMap<String, Value>,
}

impl ProxyModel {
	pub fn new() -> Self {
		Self::default()
	}
}

impl DataModel for ProxyModel {
	fn field_names(&self) -> Vec<String> {
		self.fields.iter().map(|f| f.name.clone()).collect()
	}

	fn field_def(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.name == name)
	}

	fn get(&self, name: &str) -> Option<Value> {
		self.data.get(name).cloned()
	}

	fn set(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
		if self.field_def(name).is_none() {
			return Err(ModelError::UnknownField(name.to_string()));
		}
		self.data.insert(name.to_string(), value);
		Ok(())
	}

	fn save(&mut self) -> Result<(), ModelError> {
		// Placeholder store: nothing to persist.
		tracing::debug!("proxy model save is a no-op");
		Ok(())
	}

	fn register_field(&mut self, def: FieldDef) -> Result<(), ModelError> {
		if self.field_def(&def.name).is_some() {
			return Err(ModelError::Invalid {
				field: def.name,
				message: "field already registered".to_string(),
			});
		}
		self.fields.push(def);
		Ok(())
	}

	fn is_placeholder(&self) -> bool {
		true
	}
}
