//! View compilation.
//!
//! This module provides:
//! - Resolution of dotted view identifiers to files (`layout.header` → `layout/header.html`)
//! - Recursive expansion of `## include('partial') ##` directives
//! - Variable substitution for `## @name ##`, `## @name|default ##` and the
//!   HTML-escaping `## e@name ##` forms
//!
//! # Example
//!
//! ```ignore
//! let renderer = ViewRenderer::from_settings(&settings);
//!
//! // views/home.html:
//! //   ## include('layout.header') ##
//! //   <h1>Welcome, ## e@user|guest ##</h1>
//! let bindings = Bindings::new().with("user", "Ada");
//!
//! let html = renderer.render("home", &bindings)?;
//! ```
//!
//! Include directives whose partial does not exist are left in the output
//! unchanged. Unbound variables fall back to their default, or to nothing.

mod expander;
mod renderer;
mod resolver;
mod scanner;
mod substitution;
mod types;

pub use expander::IncludeExpander;
pub use renderer::ViewRenderer;
pub use resolver::ViewResolver;
pub use scanner::{include_directives, variable_directives, IncludeDirective, VariableDirective};
pub use substitution::substitute;
pub use types::{Bindings, ViewError, ViewResult};
