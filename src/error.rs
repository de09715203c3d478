use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Noise distribution error: {0}")]
    Noise(String),

    #[error("Worker failed: {0}")]
    Worker(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
