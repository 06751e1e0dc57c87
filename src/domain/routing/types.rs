//! Route types and error definitions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Route-specific error type
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("{message}: {method} {pattern}")]
    AlreadyExists {
        method: HttpMethod,
        pattern: String,
        message: String,
        code: i64,
    },

    #[error("Invalid route handler: {0}")]
    InvalidHandler(String),

    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),
}

impl RouteError {
    /// Error code configured by the hosting application, if any
    pub fn code(&self) -> Option<i64> {
        match self {
            RouteError::AlreadyExists { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for route operations
pub type RouteResult<T> = Result<T, RouteError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// A `Controller@action` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handler {
    pub controller: String,
    pub action: String,
}

impl Handler {
    pub fn parse(handler: &str) -> RouteResult<Self> {
        match handler.split_once('@') {
            Some((controller, action))
                if !controller.is_empty() && !action.is_empty() && !action.contains('@') =>
            {
                Ok(Self {
                    controller: controller.to_string(),
                    action: action.to_string(),
                })
            }
            _ => Err(RouteError::InvalidHandler(format!(
                "expected Controller@action, got '{}'",
                handler
            ))),
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.controller, self.action)
    }
}

/// A registered route record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub method: HttpMethod,

    /// Pattern as registered, e.g. `/users/{id}`
    pub pattern: String,

    /// Pattern with its placeholder segments removed, e.g. `/users`
    pub uri: String,

    /// Placeholder names in order of appearance
    pub params: Vec<String>,

    pub handler: Handler,

    /// Optional route name used for reverse lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub registered_at: DateTime<Utc>,
}

impl Route {
    pub fn new(
        method: HttpMethod,
        pattern: &str,
        handler: &str,
        name: Option<&str>,
    ) -> RouteResult<Self> {
        let handler = Handler::parse(handler)?;
        let pattern = normalize_pattern(pattern)?;

        let mut static_segments = Vec::new();
        let mut params = Vec::new();
        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            match placeholder(segment)? {
                Some(param) => params.push(param.to_string()),
                None => static_segments.push(segment),
            }
        }

        let uri = format!("/{}", static_segments.join("/"));

        Ok(Self {
            method,
            pattern,
            uri,
            params,
            handler,
            name: name.map(str::to_string),
            registered_at: Utc::now(),
        })
    }

    pub fn params_count(&self) -> usize {
        self.params.len()
    }

    /// Whether `other` would be a duplicate of this route.
    ///
    /// Routes clash when method and URI match and, for GET, they take the same
    /// number of parameters, or for POST, the same parameters.
    pub fn conflicts_with(&self, other: &Route) -> bool {
        if self.uri != other.uri || self.method != other.method {
            return false;
        }

        match self.method {
            HttpMethod::Get => self.params_count() == other.params_count(),
            HttpMethod::Post => self.params == other.params,
        }
    }
}

fn normalize_pattern(pattern: &str) -> RouteResult<String> {
    let trimmed = pattern.trim();
    if trimmed.chars().any(char::is_whitespace) {
        return Err(RouteError::InvalidPattern(format!(
            "'{}' contains whitespace",
            pattern
        )));
    }

    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{}", trimmed))
    }
}

fn placeholder(segment: &str) -> RouteResult<Option<&str>> {
    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(name) if !name.is_empty() && !name.contains(['{', '}']) => Ok(Some(name)),
        Some(_) => Err(RouteError::InvalidPattern(format!(
            "malformed placeholder '{}'",
            segment
        ))),
        None if segment.contains(['{', '}']) => Err(RouteError::InvalidPattern(format!(
            "malformed placeholder '{}'",
            segment
        ))),
        None => Ok(None),
    }
}
