//! Error taxonomy for the form component
//!
//! Construction-time problems are configuration errors and bubble up to
//! the caller. Submission-time problems never escape as raw faults: the
//! pipeline converts every kind into a structured client response.

use crate::model::ModelError;
use std::collections::BTreeMap;
use thiserror::Error;
use trellis_ui::UiError;

#[derive(Debug, Error)]
pub enum FormError {
	/// Bad layout seed, unknown decorator tag, duplicate field name.
	/// Raised during form construction and not recoverable.
	#[error("Configuration error: {0}")]
	Config(String),

	/// Per-field failures accumulated while loading posted values.
	/// Carries the full field name → message map; the model is never
	/// partially persisted when this is raised.
	#[error("Validation failed for {} field(s)", .0.len())]
	Validation(BTreeMap<String, String>),

	/// A fault raised by the toolkit itself. Rendered to the client
	/// with full detail and a blocking error window.
	#[error("{title}: {detail}")]
	Framework { title: String, detail: String },

	/// A fault from user code or an external layer. Rendered to the
	/// client with the message only.
	#[error("{0}")]
	Generic(String),
}

impl FormError {
	/// Validation failure for a single field.
	pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
		let mut errors = BTreeMap::new();
		errors.insert(name.into(), message.into());
		FormError::Validation(errors)
	}
}

impl From<ModelError> for FormError {
	fn from(err: ModelError) -> Self {
		match err {
			ModelError::Invalid { field, message } => FormError::field(field, message),
			other => FormError::Framework {
				title: "Model error".to_string(),
				detail: other.to_string(),
			},
		}
	}
}

impl From<UiError> for FormError {
	fn from(err: UiError) -> Self {
		FormError::Framework {
			title: "Rendering error".to_string(),
			detail: err.to_string(),
		}
	}
}

pub type FormResult<T> = Result<T, FormError>;
