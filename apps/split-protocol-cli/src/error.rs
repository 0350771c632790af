use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] split_protocol_csvs::CsvError),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sdk(#[from] split_protocol_sdk::SdkError),

    #[error("Split program error: {0:?}")]
    Split(split_protocol::ErrorCode),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid pubkey: {0}")]
    InvalidPubkey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),
}

impl From<split_protocol::ErrorCode> for CliError {
    fn from(error: split_protocol::ErrorCode) -> Self {
        CliError::Split(error)
    }
}
