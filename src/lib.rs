// Infrastructure layer (shared components)
pub mod infrastructure;

// Re-export infrastructure modules for shorter paths
pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::metrics;

// Domain layer (view compilation and routes)
pub mod domain;

pub use domain::routing;
pub use domain::view;

// Supporting modules
pub mod telemetry;
