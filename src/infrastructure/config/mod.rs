mod settings;

pub use settings::{LogFormat, LoggingConfig, MessagesConfig, Settings, ViewsConfig};
