use anchor_lang::prelude::*;

pub type SplitResult<T> = std::result::Result<T, ErrorCode>;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid Merkle proof provided.")]
    InvalidMerkleProof,
    #[msg("This leaf has already claimed the given window.")]
    AlreadyClaimed,
    #[msg("Owner registry is already set up.")]
    AlreadyInitialized,
    #[msg("Caller is not an approved owner of this split.")]
    NotAnOwner,
    #[msg("Native transfer to the recipient failed.")]
    TransferFailed,
    #[msg("Window is not closed yet.")]
    InvalidWindow,
    #[msg("No new funds are available for a window.")]
    NoFundsAvailable,
    #[msg("A calculation resulted in a numeric overflow.")]
    NumericOverflow,
    #[msg("Scale must be greater than zero.")]
    InvalidScale,
    #[msg("Allocations do not sum to the split's scale.")]
    InvalidAllocationTotal,
    #[msg("Split balance does not cover its outstanding windows.")]
    InsufficientFunds,
    #[msg("Leaf scheme does not match the scheme of this split.")]
    LeafSchemeMismatch,
    #[msg("Owner address is not allowed.")]
    InvalidOwner,
    #[msg("Address is already an owner.")]
    DuplicateOwner,
    #[msg("Previous owner does not point to the owner being replaced.")]
    InvalidPrevOwner,
    #[msg("At least one owner must be provided.")]
    NoOwnersProvided,
    #[msg("The number of owners exceeds the maximum allowed.")]
    TooManyOwners,
    #[msg("Claim batch is empty, repeats a leaf, or does not match its accounts.")]
    MismatchedClaimBatch,
    #[msg("Recipient account does not match the leaf.")]
    RecipientMismatch,
    #[msg("Salt does not match the Merkle root.")]
    SaltMismatch,
    #[msg("Claim receipt account does not match its window and leaf.")]
    InvalidClaimReceipt,
    #[msg("Metadata string is too long.")]
    MetadataTooLong,
    #[msg("Token account has the wrong mint or owner.")]
    TokenAccountMismatch,
}
