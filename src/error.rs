use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreenhouseError {
    #[error("Rule repository unavailable: {0}")]
    RepositoryUnavailable(String),

    #[error("Duplicate seed entry: {0}")]
    DuplicateSeed(String),

    #[error("Invalid membership range for {name}: ({left}, {peak}, {right})")]
    InvalidMembershipRange {
        name: String,
        left: f64,
        peak: f64,
        right: f64,
    },

    #[error("Unknown action label: {0}")]
    UnknownActionLabel(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// Storage faults must never read as "no rule found".
impl From<rusqlite::Error> for GreenhouseError {
    fn from(e: rusqlite::Error) -> Self {
        GreenhouseError::RepositoryUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GreenhouseError>;
