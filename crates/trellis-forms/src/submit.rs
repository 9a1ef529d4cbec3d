//! Submission pipeline types
//!
//! A submission is one POST handled in isolation: the context carries
//! the posted values (no global request state), values are typecast per
//! field type and loaded into the model with per-field errors
//! accumulated, then user hooks run, and the outcome is always a
//! structured client response.

use crate::error::{FormError, FormResult};
use crate::model::{DataModel, FieldDef, FieldType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use trellis_ui::escape_html;

/// Explicit request context for one submission.
///
/// # Examples
///
/// ```
/// use trellis_forms::submit::SubmitContext;
///
/// let ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();
/// assert_eq!(ctx.value("name"), Some("Kristy"));
/// assert_eq!(ctx.value("missing"), None);
/// ```
#[derive(Debug, Default)]
pub struct SubmitContext {
	values: HashMap<String, String>,
	output: String,
}

impl SubmitContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse an `application/x-www-form-urlencoded` body.
	pub fn from_urlencoded(body: &str) -> FormResult<Self> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)
			.map_err(|e| FormError::Generic(format!("malformed form body: {}", e)))?;
		Ok(Self::from_pairs(pairs))
	}

	/// Build a context from already-decoded pairs (e.g. a multipart
	/// body parsed upstream).
	pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
		Self {
			values: pairs.into_iter().collect(),
			output: String::new(),
		}
	}

	pub fn value(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.values.insert(name.into(), value.into());
	}

	/// Write directly to the response stream. Submission hooks that do
	/// this instead of returning a response are flagged as defective by
	/// the pipeline.
	pub fn echo(&mut self, text: impl AsRef<str>) {
		self.output.push_str(text.as_ref());
	}

	pub(crate) fn take_output(&mut self) -> String {
		std::mem::take(&mut self.output)
	}
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
const DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M",
];

/// Typecast one posted value per the field's declared type.
///
/// Returns the JSON value to assign into the model, or the per-field
/// error message. Absent checkbox values mean `false`; absent values
/// for other types mean null.
///
/// # Examples
///
/// ```
/// use trellis_forms::model::{FieldDef, FieldType};
/// use trellis_forms::submit::typecast_value;
/// use serde_json::json;
///
/// let age = FieldDef::new("age", FieldType::Integer);
/// assert_eq!(typecast_value(&age, Some("38")).unwrap(), json!(38));
/// assert!(typecast_value(&age, Some("abc")).is_err());
/// ```
pub fn typecast_value(field: &FieldDef, raw: Option<&str>) -> Result<Value, String> {
	if field.field_type == FieldType::Boolean {
		return match raw.map(str::trim) {
			None | Some("") | Some("0") | Some("false") | Some("off") | Some("no") => {
				Ok(Value::Bool(false))
			}
			Some("on") | Some("1") | Some("true") | Some("yes") | Some("y") => {
				Ok(Value::Bool(true))
			}
			Some(other) => Err(format!("'{}' is not a boolean value", other)),
		};
	}

	let raw = match raw {
		Some(r) => r,
		None => return Ok(Value::Null),
	};

	match field.field_type {
		FieldType::String | FieldType::Text | FieldType::Password => {
			Ok(Value::String(raw.to_string()))
		}
		FieldType::Integer => {
			let trimmed = raw.trim();
			if trimmed.is_empty() {
				return Ok(Value::Null);
			}
			trimmed
				.parse::<i64>()
				.map(|n| json!(n))
				.map_err(|_| "Must be a whole number".to_string())
		}
		FieldType::Float => {
			let trimmed = raw.trim();
			if trimmed.is_empty() {
				return Ok(Value::Null);
			}
			trimmed
				.parse::<f64>()
				.map(|n| json!(n))
				.map_err(|_| "Must be numeric".to_string())
		}
		FieldType::Money => {
			let cleaned: String = raw
				.chars()
				.filter(|c| !matches!(c, '$' | '€' | '£' | ',' | ' '))
				.collect();
			if cleaned.is_empty() {
				return Ok(Value::Null);
			}
			cleaned
				.parse::<f64>()
				.map(|n| json!(n))
				.map_err(|_| "Must be a monetary amount".to_string())
		}
		FieldType::Date => {
			let trimmed = raw.trim();
			if trimmed.is_empty() {
				return Ok(Value::Null);
			}
			DATE_FORMATS
				.iter()
				.find_map(|f| NaiveDate::parse_from_str(trimmed, f).ok())
				.map(|d| json!(d.format("%Y-%m-%d").to_string()))
				.ok_or_else(|| "Must be a date".to_string())
		}
		FieldType::Time => {
			let trimmed = raw.trim();
			if trimmed.is_empty() {
				return Ok(Value::Null);
			}
			TIME_FORMATS
				.iter()
				.find_map(|f| NaiveTime::parse_from_str(trimmed, f).ok())
				.map(|t| json!(t.format("%H:%M:%S").to_string()))
				.ok_or_else(|| "Must be a time".to_string())
		}
		FieldType::DateTime => {
			let trimmed = raw.trim();
			if trimmed.is_empty() {
				return Ok(Value::Null);
			}
			DATETIME_FORMATS
				.iter()
				.find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
				.map(|dt| json!(dt.format("%Y-%m-%dT%H:%M:%S").to_string()))
				.ok_or_else(|| "Must be a date and time".to_string())
		}
		FieldType::Boolean => unreachable!("handled above"),
	}
}

/// One instruction for the client runtime.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ClientAction {
	/// Run a script.
	Eval { script: String },
	/// Replace the element's content with markup.
	ReplaceHtml { selector: String, html: String },
	/// Attach a validation prompt to a field.
	FieldError { field: String, message: String },
}

/// The JSON payload answered to every AJAX submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitResponse {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(rename = "useWindow", skip_serializing_if = "Option::is_none")]
	pub use_window: Option<bool>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub actions: Vec<ClientAction>,
}

impl SubmitResponse {
	/// A successful response carrying client instructions.
	pub fn with_actions(actions: Vec<ClientAction>) -> Self {
		Self {
			success: true,
			message: None,
			use_window: None,
			actions,
		}
	}

	/// Prompt instructions for accumulated per-field errors.
	pub fn validation_errors(errors: &BTreeMap<String, String>) -> Self {
		let actions = errors
			.iter()
			.map(|(field, message)| ClientAction::FieldError {
				field: field.clone(),
				message: message.clone(),
			})
			.collect();
		Self::with_actions(actions)
	}

	/// A fault payload. Framework faults carry rich detail and tell
	/// the client to block interaction behind an error window; generic
	/// faults carry the message only.
	pub fn fault(error: &FormError) -> Self {
		let (message, use_window) = match error {
			FormError::Framework { title, detail } => (
				format!(
					"<div class=\"header\">{}</div><div class=\"content\">{}</div>",
					escape_html(title),
					escape_html(detail)
				),
				true,
			),
			other => (escape_html(&other.to_string()), false),
		};
		Self {
			success: false,
			message: Some(message),
			use_window: Some(use_window),
			actions: vec![],
		}
	}

	/// The defect payload for a hook that wrote directly to the
	/// response stream.
	pub fn direct_output(output: &str) -> Self {
		Self {
			success: false,
			message: Some(format!(
				"<div class=\"header\">Direct Output Detected</div><div class=\"content\">{}</div>",
				escape_html(output)
			)),
			use_window: Some(false),
			actions: vec![],
		}
	}

	/// The diagnostic response when no hook handled the submission and
	/// only a placeholder model is bound.
	pub fn unhandled() -> Self {
		Self::with_actions(vec![ClientAction::Eval {
			script: "console.log(\"Form submission is not handled\")".to_string(),
		}])
	}

	pub fn to_json(&self) -> Value {
		json!(self)
	}
}

/// What a submission hook sees: the request context and the bound
/// model, borrowed for the duration of the call.
pub struct SubmitScope<'a> {
	pub context: &'a mut SubmitContext,
	pub model: &'a mut dyn DataModel,
}

/// A registered submission hook. Returning `Some` forwards that
/// response verbatim and skips the default save.
pub type SubmitHandler =
	Box<dyn Fn(&mut SubmitScope<'_>) -> FormResult<Option<SubmitResponse>> + Send + Sync>;
