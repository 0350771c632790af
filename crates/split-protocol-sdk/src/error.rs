#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error(transparent)]
    Csv(#[from] split_protocol_csvs::CsvError),

    #[error(transparent)]
    Merkle(#[from] split_protocol_merkle::MerkleError),

    #[error("Split program error: {0:?}")]
    Split(split_protocol::ErrorCode),

    #[error(transparent)]
    Decimal(#[from] rust_decimal::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Proof does not verify for account {0}")]
    InvalidProof(solana_pubkey::Pubkey),

    #[error("Account {0} is not part of this split")]
    AccountNotFound(solana_pubkey::Pubkey),

    #[error("Claim for account {0} has no index but the split uses indexed leaves")]
    MissingLeafIndex(solana_pubkey::Pubkey),

    #[error("Scale must be greater than zero")]
    InvalidScale,
}

impl From<split_protocol::ErrorCode> for SdkError {
    fn from(error: split_protocol::ErrorCode) -> Self {
        SdkError::Split(error)
    }
}

pub type SdkResult<T> = std::result::Result<T, SdkError>;
