//! View types and error definitions

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// View-specific error type
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("{message}: {name}")]
    NotFound {
        name: String,
        message: String,
        code: i64,
    },

    #[error("Inclusion cycle detected: {}", format_chain(chain))]
    InclusionCycle { chain: Vec<PathBuf> },

    #[error("Maximum include depth of {limit} exceeded while including '{target}'")]
    MaxDepthExceeded { target: String, limit: usize },

    #[error("Failed to read view {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bindings: {0}")]
    InvalidBindings(String),
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl ViewError {
    /// Error code configured by the hosting application, if any
    pub fn code(&self) -> Option<i64> {
        match self {
            ViewError::NotFound { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ViewError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Variable bindings supplied to a single render call.
///
/// Values are stored as JSON so callers can pass numbers, booleans or nested
/// structures; they are converted to text when substituted. A `null` value is
/// treated as unbound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings(Map<String, Value>);

impl Bindings {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build bindings from a JSON value, which must be an object
    pub fn from_json(value: Value) -> ViewResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ViewError::InvalidBindings(
                "Variables must be an object".to_string(),
            )),
        }
    }

    /// Parse a `name=value` assignment as given on the command line
    pub fn parse_assignment(assignment: &str) -> ViewResult<(String, String)> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            ViewError::InvalidBindings(format!("Expected NAME=VALUE, got '{}'", assignment))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ViewError::InvalidBindings(format!(
                "Missing variable name in '{}'",
                assignment
            )));
        }

        Ok((name.to_string(), value.to_string()))
    }

    /// Bind a value, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style variant of [`Bindings::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Merge `other` into `self`; values in `other` win
    pub fn merge(&mut self, other: Bindings) {
        self.0.extend(other.0);
    }

    /// Text form of a bound value, `None` when unbound or `null`
    pub fn get_text(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.0.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            // For arrays and objects, use JSON representation
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
