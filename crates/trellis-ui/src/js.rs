//! Client-script builders
//!
//! Components emit small inline scripts to wire client behavior. Two
//! builders cover the needs here: `JsExpression` for a JS template with
//! named placeholders, and `JsChain` for jQuery-style call chains.

use serde_json::Value;
use std::collections::BTreeMap;

/// A JS snippet template with `[name]` placeholders.
///
/// Placeholders are substituted with JSON-encoded argument values, so
/// strings arrive quoted and structures arrive as object literals.
///
/// # Examples
///
/// ```
/// use trellis_ui::JsExpression;
/// use serde_json::json;
///
/// let expr = JsExpression::new("if (event.keyCode === 13){$([name]).form([action]);}")
/// 	.arg("name", json!("#contact"))
/// 	.arg("action", json!("submit"));
/// assert_eq!(
/// 	expr.render(),
/// 	"if (event.keyCode === 13){$(\"#contact\").form(\"submit\");}"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JsExpression {
	template: String,
	args: BTreeMap<String, Value>,
}

impl JsExpression {
	pub fn new(template: impl Into<String>) -> Self {
		Self {
			template: template.into(),
			args: BTreeMap::new(),
		}
	}

	/// Bind a placeholder value. The value is JSON-encoded on render.
	pub fn arg(mut self, name: impl Into<String>, value: Value) -> Self {
		self.args.insert(name.into(), value);
		self
	}

	/// Substitute bound placeholders and return the script text.
	/// Placeholders with no bound value are left verbatim.
	pub fn render(&self) -> String {
		let mut out = self.template.clone();
		for (name, value) in &self.args {
			let token = format!("[{}]", name);
			let encoded = value.to_string();
			out = out.replace(&token, &encoded);
		}
		out
	}
}

/// A jQuery-style call chain: `$(selector).method(args)...`.
///
/// # Examples
///
/// ```
/// use trellis_ui::JsChain;
/// use serde_json::json;
///
/// let chain = JsChain::with_selector("#contact")
/// 	.call("form", vec![json!("submit")]);
/// assert_eq!(chain.render(), "$(\"#contact\").form(\"submit\")");
/// ```
#[derive(Debug, Clone)]
pub struct JsChain {
	selector: String,
	calls: Vec<(String, Vec<Value>)>,
}

impl JsChain {
	/// Start a chain on a CSS selector.
	pub fn with_selector(selector: impl Into<String>) -> Self {
		Self {
			selector: selector.into(),
			calls: vec![],
		}
	}

	/// Append a method call with JSON-encoded arguments.
	pub fn call(mut self, method: impl Into<String>, args: Vec<Value>) -> Self {
		self.calls.push((method.into(), args));
		self
	}

	/// Render the chain as a statement-less expression.
	pub fn render(&self) -> String {
		let mut out = format!("$({})", Value::String(self.selector.clone()));
		for (method, args) in &self.calls {
			let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
			out.push('.');
			out.push_str(method);
			out.push('(');
			out.push_str(&rendered.join(", "));
			out.push(')');
		}
		out
	}

	/// Render the chain as a terminated statement.
	pub fn render_statement(&self) -> String {
		let mut out = self.render();
		out.push(';');
		out
	}
}
