use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Hook directives, see [`crate::LogHooks`].
    #[serde(default)]
    pub hooks: String,

    /// Prefix hook lines with a timestamp and handler/resolver names.
    #[serde(default)]
    pub prefix: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            hooks: String::new(),
            prefix: false,
        }
    }
}

impl LoggingConfig {
    pub fn log_hooks(&self) -> crate::LogHooks {
        self.hooks.parse().unwrap_or_default()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
