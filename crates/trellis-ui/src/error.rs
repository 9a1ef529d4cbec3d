use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
	#[error("Template error in {name}: {source}")]
	Template {
		name: String,
		#[source]
		source: tera::Error,
	},
	#[error("Unknown template: {0}")]
	UnknownTemplate(String),
	#[error("Invalid context for template {name}: {message}")]
	Context { name: String, message: String },
}

pub type UiResult<T> = Result<T, UiError>;
