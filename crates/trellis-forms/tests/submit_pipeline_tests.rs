//! Submission pipeline tests
//!
//! End-to-end coverage of the AJAX submission flow: typecast loading,
//! per-field error accumulation, readonly handling, hook responses,
//! direct-output detection and fault conversion.

use rstest::rstest;
use serde_json::{Value, json};
use std::collections::HashMap;
use trellis_forms::model::{DataModel, FieldDef, FieldType, ModelError};
use trellis_forms::submit::{ClientAction, SubmitContext};
use trellis_forms::{Form, FormConfig, FormError, SubmitResponse};

/// In-memory contact record with a revision bumped on every save.
struct ContactModel {
	defs: Vec<FieldDef>,
	data: HashMap<String, Value>,
	revision: i64,
	fail_save: bool,
}

impl ContactModel {
	fn new() -> Self {
		let defs = vec![
			FieldDef::new("name", FieldType::String),
			FieldDef::new("age", FieldType::Integer),
			FieldDef::new("is_vip", FieldType::Boolean),
			FieldDef::new("ref_code", FieldType::String).read_only(),
		];
		let mut data = HashMap::new();
		data.insert("name".to_string(), json!("Unknown"));
		data.insert("ref_code".to_string(), json!("KEEP-7"));
		Self {
			defs,
			data,
			revision: 0,
			fail_save: false,
		}
	}

	fn failing_on_save() -> Self {
		let mut model = Self::new();
		model.fail_save = true;
		model
	}
}

impl DataModel for ContactModel {
	fn field_names(&self) -> Vec<String> {
		self.defs.iter().map(|d| d.name.clone()).collect()
	}

	fn field_def(&self, name: &str) -> Option<&FieldDef> {
		self.defs.iter().find(|d| d.name == name)
	}

	fn get(&self, name: &str) -> Option<Value> {
		if name == "revision" {
			return Some(json!(self.revision));
		}
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
		if self.fail_save {
			return Err(ModelError::Save("storage unavailable".to_string()));
		}
		self.revision += 1;
		Ok(())
	}
}

fn contact_form(model: ContactModel) -> Form {
	let mut form = Form::new(FormConfig::new("contact")).unwrap();
	form.set_model(Box::new(model), None).unwrap();
	form
}

#[rstest]
fn test_successful_submission_populates_model_and_saves() {
	let mut form = contact_form(ContactModel::new());
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38&is_vip=on").unwrap();

	let response = form.submit(&mut ctx);

	assert!(response.success);
	assert_eq!(form.model().get("name"), Some(json!("Kristy")));
	assert_eq!(form.model().get("age"), Some(json!(38)));
	assert_eq!(form.model().get("is_vip"), Some(json!(true)));
	assert_eq!(form.model().get("revision"), Some(json!(1)));
	match &response.actions[0] {
		ClientAction::ReplaceHtml { selector, html } => {
			assert_eq!(selector, "#contact");
			assert!(html.contains("Form data has been saved"));
		}
		other => panic!("expected a replaceHtml action, got {:?}", other),
	}
}

#[rstest]
fn test_invalid_number_rejected_with_exact_error_map() {
	let mut form = contact_form(ContactModel::new());
	let mut ctx = SubmitContext::from_urlencoded("name=Changed&age=abc").unwrap();

	let response = form.submit(&mut ctx);

	assert_eq!(
		response.actions,
		vec![ClientAction::FieldError {
			field: "age".to_string(),
			message: "Must be a whole number".to_string(),
		}]
	);
	// The rejected submission mutated nothing and saved nothing.
	assert_eq!(form.model().get("name"), Some(json!("Unknown")));
	assert_eq!(form.model().get("revision"), Some(json!(0)));
}

#[rstest]
fn test_readonly_field_survives_hostile_post() {
	let mut form = Form::new(FormConfig::new("contact")).unwrap();
	form.set_model(Box::new(ContactModel::new()), Some(&["name", "ref_code"]))
		.unwrap();
	let mut ctx = SubmitContext::from_urlencoded("name=Ann&ref_code=HACKED").unwrap();

	let response = form.submit(&mut ctx);

	assert!(response.success);
	assert_eq!(form.model().get("name"), Some(json!("Ann")));
	assert_eq!(form.model().get("ref_code"), Some(json!("KEEP-7")));
}

#[rstest]
fn test_unchecked_checkbox_means_false() {
	let mut form = contact_form(ContactModel::new());
	form.model_mut().set("is_vip", json!(true)).unwrap();
	// Browsers omit unchecked checkboxes from the POST entirely.
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();

	let response = form.submit(&mut ctx);

	assert!(response.success);
	assert_eq!(form.model().get("is_vip"), Some(json!(false)));
}

#[rstest]
fn test_hook_response_forwarded_verbatim_and_save_skipped() {
	let mut form = contact_form(ContactModel::new());
	form.on_submit(|_scope| {
		Ok(Some(SubmitResponse::with_actions(vec![ClientAction::Eval {
			script: "window.location.reload()".to_string(),
		}])))
	});
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();

	let response = form.submit(&mut ctx);

	assert_eq!(
		response.actions,
		vec![ClientAction::Eval {
			script: "window.location.reload()".to_string(),
		}]
	);
	assert_eq!(form.model().get("revision"), Some(json!(0)));
}

#[rstest]
fn test_hook_sees_loaded_model_and_context() {
	let mut form = contact_form(ContactModel::new());
	form.on_submit(|scope| {
		assert_eq!(scope.model.get("name"), Some(json!("Kristy")));
		assert_eq!(scope.context.value("age"), Some("38"));
		Ok(None)
	});
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();
	assert!(form.submit(&mut ctx).success);
}

#[rstest]
fn test_direct_output_is_flagged_as_defect() {
	let mut form = contact_form(ContactModel::new());
	form.on_submit(|scope| {
		scope.context.echo("debug leftovers");
		Ok(None)
	});
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();

	let response = form.submit(&mut ctx);

	assert!(!response.success);
	let message = response.message.as_deref().unwrap();
	assert!(message.contains("Direct Output Detected"));
	assert!(message.contains("debug leftovers"));
	// The defective submission never reaches the default save.
	assert_eq!(form.model().get("revision"), Some(json!(0)));
}

#[rstest]
fn test_hook_validation_error_becomes_prompt() {
	let mut form = contact_form(ContactModel::new());
	form.on_submit(|scope| {
		if scope.model.get("age") == Some(json!(12)) {
			return Err(FormError::field("age", "Must be an adult"));
		}
		Ok(None)
	});
	let mut ctx = SubmitContext::from_urlencoded("name=Kid&age=12").unwrap();

	let response = form.submit(&mut ctx);

	assert!(response.success);
	assert_eq!(
		response.actions,
		vec![ClientAction::FieldError {
			field: "age".to_string(),
			message: "Must be an adult".to_string(),
		}]
	);
}

#[rstest]
fn test_generic_fault_message_only() {
	let mut form = contact_form(ContactModel::new());
	form.on_submit(|_scope| Err(FormError::Generic("payment gateway down".to_string())));
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();

	let response = form.submit(&mut ctx);

	assert!(!response.success);
	assert_eq!(response.use_window, Some(false));
	assert_eq!(response.message.as_deref(), Some("payment gateway down"));
}

#[rstest]
fn test_framework_fault_rich_and_blocking() {
	let mut form = contact_form(ContactModel::new());
	form.on_submit(|_scope| {
		Err(FormError::Framework {
			title: "Reference integrity".to_string(),
			detail: "related record vanished".to_string(),
		})
	});
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();

	let response = form.submit(&mut ctx);

	assert!(!response.success);
	assert_eq!(response.use_window, Some(true));
	let message = response.message.as_deref().unwrap();
	assert!(message.contains("<div class=\"header\">Reference integrity</div>"));
	assert!(message.contains("related record vanished"));
}

#[rstest]
fn test_save_failure_converted_to_framework_fault() {
	let mut form = contact_form(ContactModel::failing_on_save());
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=38").unwrap();

	let response = form.submit(&mut ctx);

	assert!(!response.success);
	assert_eq!(response.use_window, Some(true));
	assert!(
		response
			.message
			.as_deref()
			.unwrap()
			.contains("storage unavailable")
	);
}

#[rstest]
fn test_placeholder_model_yields_noop_diagnostic() {
	let mut form = Form::new(FormConfig::new("quick")).unwrap();
	form.add_field("note").unwrap();
	let mut ctx = SubmitContext::from_urlencoded("note=hello").unwrap();

	let response = form.submit(&mut ctx);

	assert!(response.success);
	assert_eq!(
		response.actions,
		vec![ClientAction::Eval {
			script: "console.log(\"Form submission is not handled\")".to_string(),
		}]
	);
	// The posted value still reached the placeholder store.
	assert_eq!(form.model().get("note"), Some(json!("hello")));
}

#[rstest]
fn test_response_wire_format() {
	let mut form = contact_form(ContactModel::new());
	let mut ctx = SubmitContext::from_urlencoded("name=Kristy&age=abc").unwrap();

	let payload = form.submit(&mut ctx).to_json();

	assert_eq!(payload["success"], json!(true));
	assert_eq!(payload["actions"][0]["action"], json!("fieldError"));
	assert_eq!(payload["actions"][0]["field"], json!("age"));
}
