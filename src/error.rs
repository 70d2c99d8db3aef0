use thiserror::Error;

/// Errors raised while reading or overriding analysis settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// `--set` key that is not a known threshold.
    #[error("unknown setting: {0}")]
    UnknownKey(String),
    /// Malformed `key=value` override.
    #[error("expected key=value, got '{0}'")]
    BadOverride(String),
    /// Threshold that is not a usable number.
    #[error("invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

/// Errors from the advisory services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("table must contain {} columns", .0.join(" and "))]
    MissingColumns(Vec<&'static str>),
    #[error("no valid amount values to forecast")]
    NoAmounts,
}
