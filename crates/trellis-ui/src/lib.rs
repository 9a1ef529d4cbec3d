//! UI substrate for Trellis components
//!
//! This crate carries the thin seams a server-rendered component needs:
//! - A `View` container tree rendered to escaped HTML
//! - Client-script builders (`JsChain`, `JsExpression`) for inline wiring
//! - A named template store backed by Tera

pub mod error;
pub mod js;
pub mod template;
pub mod view;

pub use error::{UiError, UiResult};
pub use js::{JsChain, JsExpression};
pub use template::TemplateStore;
pub use view::{View, escape_attribute, escape_html};
