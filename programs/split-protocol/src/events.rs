use anchor_lang::prelude::*;

#[event]
pub struct SplitCreated {
    pub split: Pubkey,
    pub factory: Pubkey,
    pub creator: Pubkey,
    pub merkle_root: [u8; 32],
    pub metadata: String,
}

#[event]
pub struct WindowIncremented {
    pub split: Pubkey,
    pub window: u64,
    pub amount: u64,
}

/// `window` is `None` when the payout covered several windows at once.
#[event]
pub struct TransferNative {
    pub split: Pubkey,
    pub account: Pubkey,
    pub amount: u64,
    pub window: Option<u64>,
    pub success: bool,
}

#[event]
pub struct TransferToken {
    pub split: Pubkey,
    pub mint: Pubkey,
    pub account: Pubkey,
    pub amount: u64,
    pub allocation: u64,
    pub success: bool,
}

#[event]
pub struct WrappedNativeFallback {
    pub split: Pubkey,
    pub account: Pubkey,
    pub token_account: Pubkey,
    pub amount: u64,
}

#[event]
pub struct OwnerSwapped {
    pub split: Pubkey,
    pub old_owner: Pubkey,
    pub new_owner: Pubkey,
}
