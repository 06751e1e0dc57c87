use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub views: ViewsConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewsConfig {
    /// Root directory that dotted view identifiers are resolved against
    #[serde(default = "default_views_path")]
    pub path: PathBuf,
    /// File extension appended to the last identifier segment
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Deepest partial nesting allowed before rendering fails
    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,
}

fn default_views_path() -> PathBuf {
    PathBuf::from("views")
}

fn default_extension() -> String {
    "html".to_string()
}

fn default_max_include_depth() -> usize {
    32
}

/// Error messages and codes surfaced to the hosting application
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_view_not_found_message")]
    pub view_not_found_message: String,
    #[serde(default = "default_view_not_found_code")]
    pub view_not_found_code: i64,
    #[serde(default = "default_route_already_exists_message")]
    pub route_already_exists_message: String,
    #[serde(default = "default_route_already_exists_code")]
    pub route_already_exists_code: i64,
}

fn default_view_not_found_message() -> String {
    "View not found".to_string()
}

fn default_view_not_found_code() -> i64 {
    404
}

fn default_route_already_exists_message() -> String {
    "Route already exists".to_string()
}

fn default_route_already_exists_code() -> i64 {
    409
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load settings, layering an explicit config file over the defaults
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Start with default values
            .set_default("views.path", "views")?
            .set_default("views.extension", "html")?
            .set_default("views.max_include_depth", 32)?
            .set_default("messages.view_not_found_message", "View not found")?
            .set_default("messages.view_not_found_code", 404)?
            .set_default("messages.route_already_exists_message", "Route already exists")?
            .set_default("messages.route_already_exists_code", 409)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Load from environment variables
        // ARA__VIEWS__PATH, ARA__VIEWS__EXTENSION, ARA__LOGGING__LEVEL, etc.
        builder = builder.add_source(
            Environment::with_prefix("ARA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            path: default_views_path(),
            extension: default_extension(),
            max_include_depth: default_max_include_depth(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            view_not_found_message: default_view_not_found_message(),
            view_not_found_code: default_view_not_found_code(),
            route_already_exists_message: default_route_already_exists_message(),
            route_already_exists_code: default_route_already_exists_code(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
