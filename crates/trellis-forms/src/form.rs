//! The Form component
//!
//! A `Form` owns one layout, a registry of field decorators, a bound
//! data model (a no-op placeholder until a real one is set), optional
//! display rules and the submission hooks. Configuration is fixed at
//! construction through `FormConfig`; the field registry, model and
//! hooks are the mutable runtime state.

use crate::decorators::Decorator;
use crate::display::{DisplayRules, GROUP_SELECTOR};
use crate::error::{FormError, FormResult};
use crate::factory::{DecoratorRegistry, resolve_decorator};
use crate::layout::{Button, FormLayout, LayoutItem, LayoutRegistry, LayoutScope, LayoutSeed};
use crate::model::{DataModel, FieldDef, FieldType, ProxyModel};
use crate::seed::DecoratorSeed;
use crate::submit::{
	ClientAction, SubmitContext, SubmitHandler, SubmitResponse, SubmitScope, typecast_value,
};
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, HashMap};
use trellis_ui::{JsChain, JsExpression, TemplateStore, View};

/// Ordered registry of the decorators on a form. Field names are
/// unique within one form.
#[derive(Default)]
pub struct FieldRegistry {
	entries: Vec<(String, Box<dyn Decorator>)>,
}

impl FieldRegistry {
	pub fn get(&self, name: &str) -> Option<&dyn Decorator> {
		self.entries
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, d)| d.as_ref())
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Decorator + 'static)> {
		self.entries
			.iter_mut()
			.find(|(n, _)| n == name)
			.map(|(_, d)| d.as_mut())
	}

	pub(crate) fn insert(&mut self, name: String, decorator: Box<dyn Decorator>) -> FormResult<()> {
		if self.get(&name).is_some() {
			return Err(FormError::Config(format!(
				"field '{}' is already registered on this form",
				name
			)));
		}
		self.entries.push((name, decorator));
		Ok(())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Decorator)> {
		self.entries.iter().map(|(n, d)| (n.as_str(), d.as_ref()))
	}

	pub fn names(&self) -> Vec<String> {
		self.entries.iter().map(|(n, _)| n.clone()).collect()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Immutable form configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct FormConfig {
	/// HTML id of the form element; also prefixes derived element ids.
	pub name: String,
	/// Extra CSS classes on the form element.
	pub class: String,
	pub layout: LayoutSeed,
	/// Overrides the display-rule container selector for this form.
	pub display_selector: Option<String>,
	/// AJAX endpoint; derived from the submit trigger when unset.
	pub callback_url: Option<String>,
	pub success_template: String,
	/// Pass-through settings for the client AJAX call.
	pub api_config: Map<String, Value>,
	/// Pass-through settings for the client validation plugin.
	pub form_config: Map<String, Value>,
}

impl FormConfig {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			class: String::new(),
			layout: LayoutSeed::Generic,
			display_selector: None,
			callback_url: None,
			success_template: "form-success.html".to_string(),
			api_config: Map::new(),
			form_config: Map::new(),
		}
	}

	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.class = class.into();
		self
	}

	pub fn with_layout(mut self, layout: LayoutSeed) -> Self {
		self.layout = layout;
		self
	}

	pub fn with_display_selector(mut self, selector: impl Into<String>) -> Self {
		self.display_selector = Some(selector.into());
		self
	}

	pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
		self.callback_url = Some(url.into());
		self
	}

	pub fn with_success_template(mut self, name: impl Into<String>) -> Self {
		self.success_template = name.into();
		self
	}

	/// Merge entries into the AJAX pass-through settings; entries win
	/// over earlier ones and over the built-in defaults.
	pub fn merge_api_config(mut self, entries: impl IntoIterator<Item = (String, Value)>) -> Self {
		self.api_config.extend(entries);
		self
	}

	/// Merge entries into the validation-plugin pass-through settings.
	pub fn merge_form_config(mut self, entries: impl IntoIterator<Item = (String, Value)>) -> Self {
		self.form_config.extend(entries);
		self
	}
}

impl Default for FormConfig {
	fn default() -> Self {
		Self::new("form")
	}
}

/// A server-rendered form bound to a data model.
///
/// # Examples
///
/// ```
/// use trellis_forms::form::{Form, FormConfig};
///
/// let mut form = Form::new(FormConfig::new("contact")).unwrap();
/// form.add_field("email").unwrap();
/// let html = form.render().unwrap();
/// assert!(html.contains("id=\"contact\""));
/// assert!(html.contains("name=\"email\""));
/// ```
pub struct Form {
	config: FormConfig,
	layout: Box<dyn FormLayout>,
	fields: FieldRegistry,
	model: Box<dyn DataModel>,
	display_rules: Option<DisplayRules>,
	hooks: Vec<SubmitHandler>,
	decorators: DecoratorRegistry,
	templates: TemplateStore,
}

impl Form {
	/// Construct with the built-in decorator and layout registries.
	pub fn new(config: FormConfig) -> FormResult<Self> {
		Self::with_registries(
			config,
			DecoratorRegistry::with_builtins(),
			&LayoutRegistry::with_builtins(),
		)
	}

	/// Construct with custom registries. The layout seed is resolved
	/// here and the save button appended, wired on render.
	pub fn with_registries(
		config: FormConfig,
		decorators: DecoratorRegistry,
		layouts: &LayoutRegistry,
	) -> FormResult<Self> {
		let mut layout = layouts.resolve(&config.layout)?;
		layout.set_button(Button::new("Save"));
		Ok(Self {
			config,
			layout,
			fields: FieldRegistry::default(),
			model: Box::new(ProxyModel::new()),
			display_rules: None,
			hooks: vec![],
			decorators,
			templates: TemplateStore::new(),
		})
	}

	pub fn name(&self) -> &str {
		&self.config.name
	}

	pub fn config(&self) -> &FormConfig {
		&self.config
	}

	pub fn model(&self) -> &dyn DataModel {
		self.model.as_ref()
	}

	pub fn model_mut(&mut self) -> &mut dyn DataModel {
		self.model.as_mut()
	}

	/// Register an additional named template (e.g. a custom success
	/// template referenced by the configuration).
	pub fn add_template(&mut self, name: &str, source: &str) -> FormResult<()> {
		self.templates.add_raw(name, source)?;
		Ok(())
	}

	/// Bind a model and add its fields through the layout. With no
	/// explicit subset, every editable (non-read-only) field is added.
	pub fn set_model(
		&mut self,
		model: Box<dyn DataModel>,
		fields: Option<&[&str]>,
	) -> FormResult<()> {
		self.model = model;
		let names: Vec<String> = match fields {
			Some(subset) => subset.iter().map(|s| s.to_string()).collect(),
			None => self
				.model
				.field_names()
				.into_iter()
				.filter(|name| {
					self.model
						.field_def(name)
						.map(|def| !def.read_only)
						.unwrap_or(false)
				})
				.collect(),
		};
		for name in names {
			self.add_field(&name)?;
		}
		Ok(())
	}

	/// Add a field by name. The model's field metadata drives widget
	/// selection; a missing field is created on the placeholder model,
	/// and is a configuration error on a real one.
	pub fn add_field(&mut self, name: &str) -> FormResult<()> {
		self.add_field_seeded(name, None)
	}

	/// Add a field with an explicit decorator seed, consulted before
	/// every other seed layer.
	pub fn add_field_seeded(&mut self, name: &str, seed: Option<DecoratorSeed>) -> FormResult<()> {
		let def = match self.model.field_def(name) {
			Some(def) => def.clone(),
			None => {
				let def = FieldDef::new(name, FieldType::String);
				self.model.register_field(def.clone()).map_err(|e| {
					FormError::Config(format!("cannot add field '{}': {}", name, e))
				})?;
				def
			}
		};
		self.install_field(def, seed)
	}

	/// Add a field from a full definition, registering it on the model
	/// when it is not known there yet.
	pub fn add_field_def(&mut self, def: FieldDef, seed: Option<DecoratorSeed>) -> FormResult<()> {
		if self.model.field_def(&def.name).is_none() {
			self.model.register_field(def.clone()).map_err(|e| {
				FormError::Config(format!("cannot add field '{}': {}", def.name, e))
			})?;
		}
		self.install_field(def, seed)
	}

	fn install_field(&mut self, def: FieldDef, seed: Option<DecoratorSeed>) -> FormResult<()> {
		let name = def.name.clone();
		let decorator = resolve_decorator(&def, seed, &self.decorators)?;
		self.fields.insert(name.clone(), decorator)?;
		self.layout.add_item(LayoutItem::Field(name));
		Ok(())
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn Decorator> {
		self.fields.get(name)
	}

	pub fn get_field_mut(&mut self, name: &str) -> Option<&mut (dyn Decorator + 'static)> {
		self.fields.get_mut(name)
	}

	pub fn fields(&self) -> &FieldRegistry {
		&self.fields
	}

	/// Add a dividing section header.
	pub fn add_header(&mut self, title: impl Into<String>) {
		self.layout.add_item(LayoutItem::Header(title.into()));
	}

	/// Open a grouped section; following fields land inside it until
	/// [`Form::end_group`] or the next group.
	pub fn add_group(&mut self, title: Option<&str>) {
		self.layout.add_item(LayoutItem::GroupOpen {
			title: title.map(str::to_string),
		});
	}

	pub fn end_group(&mut self) {
		self.layout.add_item(LayoutItem::GroupClose);
	}

	/// Place an arbitrary view between fields, optionally followed by
	/// a divider.
	pub fn add_layout_view(&mut self, view: View, divider: bool) {
		self.layout.add_item(LayoutItem::View(view));
		if divider {
			self.layout.add_item(LayoutItem::Divider);
		}
	}

	/// Register a submission hook. The first hook returning a response
	/// forwards it verbatim and skips the default save.
	pub fn on_submit<F>(&mut self, handler: F)
	where
		F: Fn(&mut SubmitScope<'_>) -> FormResult<Option<SubmitResponse>> + Send + Sync + 'static,
	{
		self.hooks.push(Box::new(handler));
	}

	/// Set per-field display rules. The form-level selector override
	/// applies when configured.
	pub fn set_display_rules(&mut self, mut rules: DisplayRules) {
		if let Some(selector) = &self.config.display_selector {
			rules.set_selector(selector.clone());
		}
		self.display_rules = Some(rules);
	}

	/// Set display rules toggling whole group containers.
	pub fn set_group_display_rules(&mut self, mut rules: DisplayRules) {
		rules.set_selector(GROUP_SELECTOR);
		self.display_rules = Some(rules);
	}

	pub fn display_rules(&self) -> Option<&DisplayRules> {
		self.display_rules.as_ref()
	}

	/// Server-side visibility of a field against current model values.
	pub fn is_field_visible(&self, name: &str) -> bool {
		let Some(rules) = &self.display_rules else {
			return true;
		};
		let values: HashMap<String, Value> = self
			.fields
			.iter()
			.filter_map(|(n, _)| self.model.get(n).map(|v| (n.to_string(), v)))
			.collect();
		rules.is_visible(name, &values)
	}

	/// A prompt instruction attaching an error to one field.
	pub fn error(&self, field: impl Into<String>, message: impl Into<String>) -> SubmitResponse {
		SubmitResponse::with_actions(vec![ClientAction::FieldError {
			field: field.into(),
			message: message.into(),
		}])
	}

	/// A success instruction replacing the form contents with the
	/// rendered success template. The sub-header paragraph is omitted
	/// entirely when absent.
	pub fn success(&self, header: &str, sub_header: Option<&str>) -> FormResult<SubmitResponse> {
		let html = self.templates.render(
			&self.config.success_template,
			&json!({"header": header, "message": sub_header}),
		)?;
		Ok(SubmitResponse::with_actions(vec![ClientAction::ReplaceHtml {
			selector: format!("#{}", self.config.name),
			html,
		}]))
	}

	/// Chain targeting a field's container element.
	pub fn js_field(&self, name: &str) -> JsChain {
		JsChain::with_selector(format!(
			"#{} [data-field=\"{}\"]",
			self.config.name, name
		))
	}

	/// Chain targeting a field's input element.
	pub fn js_input(&self, name: &str) -> JsChain {
		self.js_field(name).call("find", vec![json!("input")])
	}

	fn trigger_name(&self) -> String {
		format!("{}_submit", self.config.name)
	}

	fn callback_url(&self) -> String {
		self.config
			.callback_url
			.clone()
			.unwrap_or_else(|| format!("?{}=ajax", self.trigger_name()))
	}

	/// Render the form element and its inline wiring script.
	pub fn render(&self) -> FormResult<String> {
		if let Some(rules) = &self.display_rules {
			rules.validate(&self.fields.names())?;
		}

		let scope = LayoutScope {
			form_name: &self.config.name,
			fields: &self.fields,
			model: self.model.as_ref(),
		};
		let mut content = self.layout.render(&scope)?;

		// Hidden trigger input so the POST identifies this form's
		// submission callback.
		content.push_str(
			&View::new("input")
				.set_attr("name", self.trigger_name())
				.set_attr("value", "submit")
				.set_style("display", "none")
				.render(),
		);

		let html = self.templates.render(
			"form.html",
			&json!({
				"id": self.config.name,
				"class": self.config.class,
				"content": content,
				"script": self.wiring_script(),
			}),
		)?;
		Ok(html)
	}

	fn wiring_script(&self) -> String {
		let form_selector = format!("#{}", self.config.name);
		let save_selector = format!("#{}_save", self.config.name);
		let mut statements: Vec<String> = vec![];

		// Save button submits on click and on Enter.
		let submit_call = JsChain::with_selector(form_selector.clone())
			.call("form", vec![json!("submit")])
			.render_statement();
		statements.push(format!(
			"$({}).on(\"click\", function () {{ {} }});",
			Value::String(save_selector.clone()),
			submit_call
		));
		statements.push(
			JsExpression::new(
				"$([save]).on(\"keypress\", function (event) { if (event.keyCode === 13){$([form]).form(\"submit\");} });",
			)
			.arg("save", json!(save_selector))
			.arg("form", json!(form_selector))
			.render(),
		);

		// AJAX endpoint and validation plugin, defaults under the
		// pass-through dictionaries.
		let mut api = Map::new();
		api.insert("url".to_string(), json!(self.callback_url()));
		api.insert("method".to_string(), json!("POST"));
		api.insert("serializeForm".to_string(), json!(true));
		api.extend(self.config.api_config.clone());

		let mut form_cfg = Map::new();
		form_cfg.insert("inline".to_string(), json!(true));
		form_cfg.insert("on".to_string(), json!("blur"));
		form_cfg.extend(self.config.form_config.clone());

		statements.push(
			JsChain::with_selector(form_selector.clone())
				.call("api", vec![Value::Object(api)])
				.call("form", vec![Value::Object(form_cfg)])
				.render_statement(),
		);

		// Editing a field clears its validation prompt.
		let form_quoted = Value::String(form_selector.clone()).to_string();
		statements.push(format!(
			"$({0}).on(\"change\", \"input\", function () {{ $({0}).form(\"remove prompt\", $(this).attr(\"name\")); }});",
			form_quoted
		));

		if let Some(rules) = &self.display_rules
			&& !rules.is_empty()
		{
			statements.push(
				JsChain::with_selector(form_selector)
					.call(
						"conditionalForm",
						vec![json!({
							"selector": rules.selector(),
							"rules": rules.to_client_json(),
						})],
					)
					.render_statement(),
			);
		}

		statements.join("\n")
	}

	/// Load posted values into the model. Every registered, editable
	/// field is read and typecast; failures accumulate and are raised
	/// together. Values are staged and assigned only once every cast
	/// succeeded, so a rejected submission mutates no field.
	pub fn load_post(&mut self, ctx: &SubmitContext) -> FormResult<()> {
		let mut staged: Vec<(String, Value)> = vec![];
		let mut errors = BTreeMap::new();
		for (name, decorator) in self.fields.iter() {
			if !decorator.is_editable() {
				continue;
			}
			match typecast_value(&decorator.base().field, ctx.value(name)) {
				Ok(value) => staged.push((name.to_string(), value)),
				Err(message) => {
					errors.insert(name.to_string(), message);
				}
			}
		}
		if errors.is_empty() {
			for (name, value) in staged {
				if let Err(e) = self.model.set(&name, value) {
					errors.insert(name, e.to_string());
				}
			}
		}
		if !errors.is_empty() {
			tracing::debug!(
				form = %self.config.name,
				fields = errors.len(),
				"posted values failed to load"
			);
			return Err(FormError::Validation(errors));
		}
		Ok(())
	}

	/// Handle one AJAX submission. Every outcome is a structured
	/// response; no error escapes as a raw fault.
	pub fn submit(&mut self, ctx: &mut SubmitContext) -> SubmitResponse {
		tracing::debug!(form = %self.config.name, "processing submission");
		match self.process_submit(ctx) {
			Ok(response) => response,
			Err(FormError::Validation(errors)) => SubmitResponse::validation_errors(&errors),
			Err(error) => SubmitResponse::fault(&error),
		}
	}

	fn process_submit(&mut self, ctx: &mut SubmitContext) -> FormResult<SubmitResponse> {
		self.load_post(ctx)?;

		let mut response: Option<SubmitResponse> = None;
		{
			let model = self.model.as_mut();
			let mut scope = SubmitScope {
				context: ctx,
				model,
			};
			for hook in &self.hooks {
				if let Some(hook_response) = hook(&mut scope)? {
					// The first hook response wins; later hooks still run.
					response.get_or_insert(hook_response);
				}
			}
		}

		let output = ctx.take_output();
		if !output.is_empty() {
			tracing::warn!(form = %self.config.name, "submit hook produced direct output");
			return Ok(SubmitResponse::direct_output(&output));
		}

		if let Some(response) = response {
			return Ok(response);
		}

		if self.model.is_placeholder() {
			tracing::debug!(
				form = %self.config.name,
				"submission not handled and no real model bound"
			);
			return Ok(SubmitResponse::unhandled());
		}

		self.model.save()?;
		self.success("Form data has been saved", None)
	}
}
