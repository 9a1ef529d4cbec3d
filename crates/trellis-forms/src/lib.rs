//! Form handling for Trellis
//!
//! This crate provides the server-rendered form component:
//! - Model binding with typed field metadata and a placeholder model
//! - A pluggable layout arranging fields, headers, groups and the
//!   save button
//! - A decorator factory mapping field metadata to widgets through an
//!   ordered seed-merge fallback chain
//! - A conditional display engine evaluating per-field visibility
//!   rules over sibling values
//! - An AJAX submission pipeline that typecasts posted values into the
//!   model, runs user hooks and always answers structured JSON

pub mod decorators;
pub mod display;
pub mod error;
pub mod factory;
pub mod form;
pub mod layout;
pub mod model;
pub mod seed;
pub mod submit;

pub use decorators::{
	Calendar, Checkbox, Decorator, DecoratorBase, DropDown, Line, Money, Password, TextArea,
};
pub use display::{Condition, DisplayRules, RuleBranch};
pub use error::{FormError, FormResult};
pub use factory::{DecoratorRegistry, resolve_decorator};
pub use form::{FieldRegistry, Form, FormConfig};
pub use layout::{Button, FormLayout, GenericLayout, LayoutItem, LayoutRegistry, LayoutSeed};
pub use model::{DataModel, FieldDef, FieldType, ModelError, ProxyModel, Reference, UiHints};
pub use seed::{CalendarFlavor, DecoratorKind, DecoratorSeed, SeedOptions};
pub use submit::{ClientAction, SubmitContext, SubmitResponse, SubmitScope, typecast_value};
