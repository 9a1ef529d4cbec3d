//! Form rendering tests
//!
//! Coverage of layout arrangement, widget auto-selection from model
//! metadata, wiring-script emission and conditional display rules.

use rstest::rstest;
use serde_json::{Value, json};
use std::collections::HashMap;
use trellis_forms::model::{DataModel, FieldDef, FieldType, ModelError, Reference};
use trellis_forms::{Decorator, DecoratorKind, DisplayRules, Form, FormConfig};

struct OrderModel {
	defs: Vec<FieldDef>,
	data: HashMap<String, Value>,
}

impl OrderModel {
	fn new() -> Self {
		let defs = vec![
			FieldDef::new("status", FieldType::String).with_enum(["draft", "sent", "paid"]),
			FieldDef::new("country", FieldType::Integer).with_reference(Reference::new(
				"country",
				vec![
					("1".to_string(), "Latvia".to_string()),
					("2".to_string(), "Estonia".to_string()),
				],
			)),
			FieldDef::new("notes", FieldType::Text).with_hint("Visible to the customer"),
			FieldDef::new("paid_on", FieldType::Date),
		];
		Self {
			defs,
			data: HashMap::new(),
		}
	}
}

impl DataModel for OrderModel {
	fn field_names(&self) -> Vec<String> {
		self.defs.iter().map(|d| d.name.clone()).collect()
	}

	fn field_def(&self, name: &str) -> Option<&FieldDef> {
		self.defs.iter().find(|d| d.name == name)
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
		Ok(())
	}
}

fn order_form() -> Form {
	let mut form = Form::new(FormConfig::new("order")).unwrap();
	form.set_model(Box::new(OrderModel::new()), None).unwrap();
	form
}

#[rstest]
fn test_widgets_selected_from_model_metadata() {
	let form = order_form();
	assert_eq!(
		form.get_field("status").unwrap().kind(),
		DecoratorKind::DropDown
	);
	assert_eq!(
		form.get_field("country").unwrap().kind(),
		DecoratorKind::DropDown
	);
	assert_eq!(
		form.get_field("notes").unwrap().kind(),
		DecoratorKind::TextArea
	);
	assert_eq!(
		form.get_field("paid_on").unwrap().kind(),
		DecoratorKind::Calendar
	);
}

#[rstest]
fn test_render_contains_every_field_in_order() {
	let html = order_form().render().unwrap();
	let status = html.find("data-field=\"status\"").unwrap();
	let country = html.find("data-field=\"country\"").unwrap();
	let notes = html.find("data-field=\"notes\"").unwrap();
	let paid_on = html.find("data-field=\"paid_on\"").unwrap();
	assert!(status < country && country < notes && notes < paid_on);
}

#[rstest]
fn test_enum_and_reference_options_rendered() {
	let html = order_form().render().unwrap();
	assert!(html.contains("<option value=\"draft\">draft</option>"));
	assert!(html.contains("<option value=\"1\">Latvia</option>"));
	assert!(html.contains("<option value=\"2\">Estonia</option>"));
}

#[rstest]
fn test_field_hint_rendered_below_input() {
	let html = order_form().render().unwrap();
	assert!(html.contains("<small class=\"hint\">Visible to the customer</small>"));
}

#[rstest]
fn test_model_values_prefill_inputs() {
	let mut form = order_form();
	form.model_mut().set("status", json!("sent")).unwrap();
	let html = form.render().unwrap();
	assert!(html.contains("<option value=\"sent\" selected=\"selected\">sent</option>"));
}

#[rstest]
fn test_headers_and_groups_arranged() {
	let mut form = Form::new(FormConfig::new("grp")).unwrap();
	form.add_header("Contact details");
	form.add_group(Some("Reachability"));
	form.add_field("phone").unwrap();
	form.add_field("email").unwrap();
	form.end_group();
	form.add_field("notes").unwrap();

	let html = form.render().unwrap();
	assert!(html.contains("<h4 class=\"ui dividing header\">Contact details</h4>"));
	assert!(html.contains("<label>Reachability</label>"));
	let group_open = html.find("trellis-form-group").unwrap();
	let phone = html.find("data-field=\"phone\"").unwrap();
	let notes = html.find("data-field=\"notes\"").unwrap();
	// Grouped fields follow the group opening; notes comes after the group.
	assert!(group_open < phone && phone < notes);
}

#[rstest]
fn test_no_display_rules_no_conditional_script() {
	let html = order_form().render().unwrap();
	assert!(!html.contains("conditionalForm"));
}

#[rstest]
fn test_display_rules_emitted_with_selector() {
	let mut form = order_form();
	form.set_display_rules(
		DisplayRules::from_json(&json!({"paid_on": {"status": ["isExactly[paid]"]}})).unwrap(),
	);
	let html = form.render().unwrap();
	assert!(html.contains("conditionalForm"));
	assert!(html.contains("\"selector\":\".field\""));
	assert!(html.contains("isExactly[paid]"));
}

#[rstest]
fn test_form_level_selector_override() {
	let mut form = Form::new(
		FormConfig::new("order").with_display_selector(".inline.field"),
	)
	.unwrap();
	form.set_model(Box::new(OrderModel::new()), None).unwrap();
	form.set_display_rules(
		DisplayRules::from_json(&json!({"paid_on": {"status": ["notEmpty"]}})).unwrap(),
	);
	let html = form.render().unwrap();
	assert!(html.contains("\"selector\":\".inline.field\""));
}

#[rstest]
fn test_visibility_follows_model_values() {
	let mut form = order_form();
	form.set_display_rules(
		DisplayRules::from_json(&json!({"paid_on": {"status": ["isExactly[paid]"]}})).unwrap(),
	);

	assert!(!form.is_field_visible("paid_on"));
	form.model_mut().set("status", json!("paid")).unwrap();
	assert!(form.is_field_visible("paid_on"));
	// Fields without rules stay visible.
	assert!(form.is_field_visible("notes"));
}

#[rstest]
fn test_or_branches_across_sources() {
	let mut form = order_form();
	form.set_display_rules(
		DisplayRules::from_json(
			&json!({"paid_on": [{"status": ["isExactly[paid]"]}, {"country": ["isExactly[5]"]}]}),
		)
		.unwrap(),
	);

	assert!(!form.is_field_visible("paid_on"));
	form.model_mut().set("country", json!(5)).unwrap();
	assert!(form.is_field_visible("paid_on"));
}

#[rstest]
fn test_success_sub_header_is_conditional() {
	let form = order_form();

	let with_sub = form.success("Saved", Some("Order 7 updated")).unwrap();
	let json_with = with_sub.to_json();
	let html = json_with["actions"][0]["html"].as_str().unwrap();
	assert!(html.contains("<p>Order 7 updated</p>"));

	let without_sub = form.success("Saved", None).unwrap();
	let json_without = without_sub.to_json();
	let html = json_without["actions"][0]["html"].as_str().unwrap();
	assert!(!html.contains("<p>"));
}

#[rstest]
fn test_form_config_passthrough_reaches_script() {
	let config = FormConfig::new("order")
		.merge_api_config([("loadingDuration".to_string(), json!(300))])
		.merge_form_config([("on".to_string(), json!("submit"))]);
	let mut form = Form::new(config).unwrap();
	form.set_model(Box::new(OrderModel::new()), None).unwrap();

	let html = form.render().unwrap();
	assert!(html.contains("\"loadingDuration\":300"));
	assert!(html.contains("\"on\":\"submit\""));
	assert!(!html.contains("\"on\":\"blur\""));
}
