use thiserror::Error;

/// Errors raised while loading or validating Keel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load keel configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section lacks fields a command needs (e.g. `[llm]` credentials for `keel ask`).
    #[error("[{section}] is missing {}; set it in .keel/config.toml or via the environment", missing.join(", "))]
    MissingFields {
        section: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
