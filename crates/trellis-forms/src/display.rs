//! Conditional display engine
//!
//! A rule tree decides per-field visibility from sibling field values:
//! `target -> OR-list of branches`, each branch an AND-map of
//! `source -> [conditions]`. The tree is evaluated client-side on every
//! relevant change; the same predicates are evaluated server-side for
//! initial visibility and for tests.

use crate::error::{FormError, FormResult};
use regex::Regex;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Default container selector for per-field rules.
pub const FIELD_SELECTOR: &str = ".field";
/// Default container selector for group rules.
pub const GROUP_SELECTOR: &str = ".trellis-form-group";

// Condition grammar: a name plus an optional bracketed argument,
// e.g. `notEmpty` or `isExactly[5]`.
static CONDITION_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([a-zA-Z]+)(?:\[(.*)\])?$").expect("CONDITION_RE: invalid regex pattern")
});

/// A named visibility predicate over one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
	NotEmpty,
	Empty,
	Checked,
	NotChecked,
	IsNumber,
	IsInteger,
	/// Case-sensitive equality against the value's text form.
	IsExactly(String),
	/// Case-insensitive equality.
	Is(String),
	/// Case-insensitive substring match.
	Contains(String),
	MinLength(usize),
	MaxLength(usize),
}

fn value_text(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(s)) => s.clone(),
		Some(other) => other.to_string(),
	}
}

impl Condition {
	/// Parse the client rule grammar.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_forms::display::Condition;
	///
	/// assert_eq!(Condition::parse("notEmpty").unwrap(), Condition::NotEmpty);
	/// assert_eq!(
	/// 	Condition::parse("isExactly[5]").unwrap(),
	/// 	Condition::IsExactly("5".to_string())
	/// );
	/// assert!(Condition::parse("frobnicates").is_err());
	/// ```
	pub fn parse(spec: &str) -> FormResult<Self> {
		let captures = CONDITION_RE
			.captures(spec)
			.ok_or_else(|| FormError::Config(format!("malformed display condition '{}'", spec)))?;
		let name = &captures[1];
		let argument = captures.get(2).map(|m| m.as_str().to_string());

		let needs_argument = || {
			argument
				.clone()
				.ok_or_else(|| FormError::Config(format!("condition '{}' requires an argument", name)))
		};

		match name {
			"notEmpty" => Ok(Condition::NotEmpty),
			"empty" => Ok(Condition::Empty),
			"checked" => Ok(Condition::Checked),
			"notChecked" | "unchecked" => Ok(Condition::NotChecked),
			"number" | "isNumber" => Ok(Condition::IsNumber),
			"integer" | "isInteger" => Ok(Condition::IsInteger),
			"isExactly" => Ok(Condition::IsExactly(needs_argument()?)),
			"is" => Ok(Condition::Is(needs_argument()?)),
			"contains" => Ok(Condition::Contains(needs_argument()?)),
			"minLength" => {
				let n = needs_argument()?.parse().map_err(|_| {
					FormError::Config(format!("condition '{}' needs a numeric argument", name))
				})?;
				Ok(Condition::MinLength(n))
			}
			"maxLength" => {
				let n = needs_argument()?.parse().map_err(|_| {
					FormError::Config(format!("condition '{}' needs a numeric argument", name))
				})?;
				Ok(Condition::MaxLength(n))
			}
			other => Err(FormError::Config(format!(
				"unknown display condition '{}'",
				other
			))),
		}
	}

	/// The client grammar name of this condition.
	pub fn rule_name(&self) -> String {
		match self {
			Condition::NotEmpty => "notEmpty".to_string(),
			Condition::Empty => "empty".to_string(),
			Condition::Checked => "checked".to_string(),
			Condition::NotChecked => "notChecked".to_string(),
			Condition::IsNumber => "number".to_string(),
			Condition::IsInteger => "integer".to_string(),
			Condition::IsExactly(v) => format!("isExactly[{}]", v),
			Condition::Is(v) => format!("is[{}]", v),
			Condition::Contains(v) => format!("contains[{}]", v),
			Condition::MinLength(n) => format!("minLength[{}]", n),
			Condition::MaxLength(n) => format!("maxLength[{}]", n),
		}
	}

	/// Evaluate against a current field value.
	pub fn evaluate(&self, value: Option<&Value>) -> bool {
		let text = value_text(value);
		match self {
			Condition::NotEmpty => !text.is_empty(),
			Condition::Empty => text.is_empty(),
			Condition::Checked => {
				matches!(value, Some(Value::Bool(true)))
					|| matches!(text.as_str(), "on" | "true" | "1")
			}
			Condition::NotChecked => !Condition::Checked.evaluate(value),
			Condition::IsNumber => !text.is_empty() && text.trim().parse::<f64>().is_ok(),
			Condition::IsInteger => !text.is_empty() && text.trim().parse::<i64>().is_ok(),
			Condition::IsExactly(expected) => text == *expected,
			Condition::Is(expected) => text.eq_ignore_ascii_case(expected),
			Condition::Contains(needle) => {
				text.to_lowercase().contains(&needle.to_lowercase())
			}
			Condition::MinLength(n) => text.chars().count() >= *n,
			Condition::MaxLength(n) => text.chars().count() <= *n,
		}
	}
}

/// One OR-branch: every source must satisfy all of its conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleBranch {
	pub sources: Vec<(String, Vec<Condition>)>,
}

impl RuleBranch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn when(mut self, source: impl Into<String>, conditions: Vec<Condition>) -> Self {
		self.sources.push((source.into(), conditions));
		self
	}

	fn is_satisfied(&self, values: &HashMap<String, Value>) -> bool {
		self.sources.iter().all(|(source, conditions)| {
			let value = values.get(source);
			conditions.iter().all(|c| c.evaluate(value))
		})
	}
}

/// The per-form rule tree plus the container selector the client
/// plugin toggles.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRules {
	rules: Vec<(String, Vec<RuleBranch>)>,
	selector: String,
}

impl DisplayRules {
	/// Rules over field containers (selector `.field`).
	pub fn new() -> Self {
		Self {
			rules: vec![],
			selector: FIELD_SELECTOR.to_string(),
		}
	}

	/// Rules over group containers (selector `.trellis-form-group`).
	pub fn for_groups() -> Self {
		Self {
			rules: vec![],
			selector: GROUP_SELECTOR.to_string(),
		}
	}

	pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
		self.selector = selector.into();
		self
	}

	pub fn selector(&self) -> &str {
		&self.selector
	}

	pub fn set_selector(&mut self, selector: impl Into<String>) {
		self.selector = selector.into();
	}

	/// Add the OR-branches for one target field.
	pub fn rule(mut self, target: impl Into<String>, branches: Vec<RuleBranch>) -> Self {
		self.rules.push((target.into(), branches));
		self
	}

	/// Parse the declarative JSON form:
	/// `{target: {source: conditions}}` for a single branch, or
	/// `{target: [{source: conditions}, ...]}` for OR-branches, where
	/// conditions are a name string or a list of name strings.
	///
	/// # Examples
	///
	/// ```
	/// use trellis_forms::display::DisplayRules;
	/// use serde_json::json;
	///
	/// let rules =
	/// 	DisplayRules::from_json(&json!({"contact": {"method": ["notEmpty"]}})).unwrap();
	/// assert_eq!(rules.targets().collect::<Vec<_>>(), vec!["contact"]);
	/// ```
	pub fn from_json(spec: &Value) -> FormResult<Self> {
		let map = spec
			.as_object()
			.ok_or_else(|| FormError::Config("display rules must be an object".to_string()))?;
		let mut rules = DisplayRules::new();
		for (target, branches_spec) in map {
			let branches = match branches_spec {
				Value::Array(list) => list
					.iter()
					.map(Self::parse_branch)
					.collect::<FormResult<Vec<_>>>()?,
				Value::Object(_) => vec![Self::parse_branch(branches_spec)?],
				_ => {
					return Err(FormError::Config(format!(
						"rules for '{}' must be an object or an array of objects",
						target
					)));
				}
			};
			rules = rules.rule(target.clone(), branches);
		}
		Ok(rules)
	}

	fn parse_branch(spec: &Value) -> FormResult<RuleBranch> {
		let map = spec
			.as_object()
			.ok_or_else(|| FormError::Config("display rule branch must be an object".to_string()))?;
		let mut branch = RuleBranch::new();
		for (source, conditions_spec) in map {
			let conditions = match conditions_spec {
				Value::String(name) => vec![Condition::parse(name)?],
				Value::Array(names) => names
					.iter()
					.map(|n| {
						n.as_str()
							.ok_or_else(|| {
								FormError::Config("condition names must be strings".to_string())
							})
							.and_then(Condition::parse)
					})
					.collect::<FormResult<Vec<_>>>()?,
				_ => {
					return Err(FormError::Config(format!(
						"conditions for source '{}' must be a string or an array",
						source
					)));
				}
			};
			branch = branch.when(source.clone(), conditions);
		}
		Ok(branch)
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn targets(&self) -> impl Iterator<Item = &str> {
		self.rules.iter().map(|(target, _)| target.as_str())
	}

	/// A target is visible iff at least one OR-branch is fully
	/// satisfied. Fields without rules are always visible.
	pub fn is_visible(&self, target: &str, values: &HashMap<String, Value>) -> bool {
		match self.rules.iter().find(|(t, _)| t == target) {
			Some((_, branches)) => branches.iter().any(|b| b.is_satisfied(values)),
			None => true,
		}
	}

	/// Check that every target and source names a registered field.
	pub fn validate(&self, known_fields: &[String]) -> FormResult<()> {
		let known = |name: &str| known_fields.iter().any(|f| f == name);
		for (target, branches) in &self.rules {
			if !known(target) {
				tracing::warn!(target = %target, "display rule targets an unknown field");
				return Err(FormError::Config(format!(
					"display rule targets unknown field '{}'",
					target
				)));
			}
			for branch in branches {
				for (source, _) in &branch.sources {
					if !known(source) {
						tracing::warn!(source = %source, "display rule reads an unknown field");
						return Err(FormError::Config(format!(
							"display rule reads unknown field '{}'",
							source
						)));
					}
				}
			}
		}
		Ok(())
	}

	/// Serialize for the client plugin:
	/// `{target: [{source: ["notEmpty", ...]}]}`.
	pub fn to_client_json(&self) -> Value {
		let mut out = Map::new();
		for (target, branches) in &self.rules {
			let rendered: Vec<Value> = branches
				.iter()
				.map(|branch| {
					let mut branch_map = Map::new();
					for (source, conditions) in &branch.sources {
						let names: Vec<Value> = conditions
							.iter()
							.map(|c| Value::String(c.rule_name()))
							.collect();
						branch_map.insert(source.clone(), Value::Array(names));
					}
					Value::Object(branch_map)
				})
				.collect();
			out.insert(target.clone(), Value::Array(rendered));
		}
		json!(out)
	}
}
