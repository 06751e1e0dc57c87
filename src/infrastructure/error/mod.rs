use thiserror::Error;

use crate::routing::RouteError;
use crate::telemetry::TelemetryError;
use crate::view::ViewError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl AppError {
    /// Stable, machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::View(ViewError::NotFound { .. }) => "VIEW_NOT_FOUND",
            AppError::View(ViewError::InclusionCycle { .. }) => "INCLUSION_CYCLE",
            AppError::View(ViewError::MaxDepthExceeded { .. }) => "MAX_DEPTH_EXCEEDED",
            AppError::View(ViewError::Io { .. }) => "VIEW_READ_ERROR",
            AppError::View(ViewError::InvalidBindings(_)) => "INVALID_BINDINGS",
            AppError::Route(RouteError::AlreadyExists { .. }) => "ROUTE_EXISTS",
            AppError::Route(RouteError::InvalidHandler(_)) => "INVALID_HANDLER",
            AppError::Route(RouteError::InvalidPattern(_)) => "INVALID_PATTERN",
            AppError::Telemetry(_) => "TELEMETRY_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "INVALID_JSON",
            AppError::Metrics(_) => "METRICS_ERROR",
        }
    }

    /// Process exit code for the command line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::Telemetry(_) => 78,
            AppError::View(ViewError::NotFound { .. }) => 66,
            AppError::View(ViewError::InvalidBindings(_)) | AppError::Json(_) => 65,
            AppError::View(ViewError::Io { .. }) | AppError::Io(_) => 74,
            _ => 70,
        }
    }

    /// Log the error with its code
    pub fn report(&self) {
        let external_code = match self {
            AppError::View(e) => e.code(),
            AppError::Route(e) => e.code(),
            _ => None,
        };

        tracing::error!(
            code = %self.code(),
            external_code = ?external_code,
            message = %self,
            "Render failed"
        );
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
