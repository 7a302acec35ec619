use thiserror::Error;

/// Errors raised while loading configuration or static datasets.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read dataset {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    DatasetParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("dataset validation failed: {0}")]
    Validation(String),
}
