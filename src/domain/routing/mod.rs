//! Route registry.
//!
//! Keeps the list of routes an application declares and rejects duplicates.
//! Matching and dispatch live elsewhere; this module only records routes.
//!
//! # Example
//!
//! ```ignore
//! let registry = RouteRegistry::new(settings.messages.clone());
//!
//! registry.register_get("/", "HomeController@index", Some("home"))?;
//! registry.register_post("/users/{id}", "UserController@update", None)?;
//!
//! assert_eq!(registry.uri_for("home").as_deref(), Some("/"));
//! ```

mod registry;
mod types;

pub use registry::RouteRegistry;
pub use types::{Handler, HttpMethod, Route, RouteError, RouteResult};
