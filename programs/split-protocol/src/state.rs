use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::Hasher;
use serde::{Deserialize, Serialize};

use crate::allocation_leaf::{AllocationLeaf, LeafId, LeafScheme};
use crate::constants::{CLAIM_HASH_PREFIX, PERCENTAGE_SCALE};
use crate::error::{ErrorCode, SplitResult};
use crate::owners::OwnerRegistry;
use crate::proofs::verify_allocation_proof;
use crate::scaler::scale_amount;

/// Who may close a window.
#[derive(
    AnchorSerialize,
    AnchorDeserialize,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    InitSpace,
)]
#[serde(rename_all = "snake_case")]
pub enum WindowAccess {
    #[default]
    Open,
    OwnersOnly,
}

/// What a claim does when the recipient refuses native value.
#[derive(
    AnchorSerialize,
    AnchorDeserialize,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    InitSpace,
)]
#[serde(rename_all = "snake_case")]
pub enum TransferPolicy {
    /// Wrap the payout into the recipient's wrapped-native token account instead.
    #[default]
    WrapNative,
    /// Revert the whole claim, receipts included.
    RevertClaim,
}

/// Per-split configuration supplied at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SplitSetup {
    pub owners: Vec<Pubkey>,
    pub leaf_scheme: LeafScheme,
    pub scale: u64,
    pub window_access: WindowAccess,
    pub transfer_policy: TransferPolicy,
}

impl SplitSetup {
    pub fn new(owners: Vec<Pubkey>) -> Self {
        Self {
            owners,
            leaf_scheme: LeafScheme::default(),
            scale: PERCENTAGE_SCALE,
            window_access: WindowAccess::default(),
            transfer_policy: TransferPolicy::default(),
        }
    }

    pub fn with_leaf_scheme(mut self, leaf_scheme: LeafScheme) -> Self {
        self.leaf_scheme = leaf_scheme;
        self
    }

    pub fn with_scale(mut self, scale: u64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_window_access(mut self, window_access: WindowAccess) -> Self {
        self.window_access = window_access;
        self
    }

    pub fn with_transfer_policy(mut self, transfer_policy: TransferPolicy) -> Self {
        self.transfer_policy = transfer_policy;
        self
    }
}

/// Stable external identifier for a (window, leaf) claim. Also the last claim receipt seed.
pub fn claim_hash(window: u64, leaf_id: &LeafId) -> [u8; 32] {
    let mut hasher = Hasher::default();
    hasher.hash(CLAIM_HASH_PREFIX);
    hasher.hash(&window.to_le_bytes());
    match leaf_id {
        LeafId::Account(account) => {
            hasher.hash(&[0u8]);
            hasher.hash(account.as_ref());
        }
        LeafId::Index(index) => {
            hasher.hash(&[1u8]);
            hasher.hash(&index.to_le_bytes());
        }
    }
    hasher.result().to_bytes()
}

#[account] // seed [SPLIT_V0_SEED_PREFIX, salt, PROXY_CODE_HASH]
#[derive(InitSpace, Debug, Default)]
pub struct SplitV0 {
    /// Commitment to every allocation. Fixed at creation.
    pub merkle_root: [u8; 32],

    /// `SHA256(merkle_root)`, kept so later instructions can re-derive the PDA.
    pub salt: [u8; 32],

    pub creator: Pubkey,

    pub leaf_scheme: LeafScheme,

    /// Denominator for allocations.
    pub scale: u64,

    pub window_access: WindowAccess,

    pub transfer_policy: TransferPolicy,

    /// Sum of every closed window.
    pub deposited_in_windows: u64,

    /// Sum of every native payout made from closed windows.
    pub paid_from_windows: u64,

    pub owners: OwnerRegistry,

    /// Bump seed for the Split PDA.
    pub bump: u8,

    /// Native amount snapshotted by each closed window. Its length is the current window.
    /// The account grows by one `u64` per window.
    #[max_len(0)]
    pub balance_for_window: Vec<u64>,
}

impl SplitV0 {
    /// Account size holding `windows` closed windows, discriminator included.
    pub fn space(windows: usize) -> usize {
        8 + Self::INIT_SPACE + windows * std::mem::size_of::<u64>()
    }

    /// Number of closed windows, which is also the index the next window will take.
    pub fn current_window(&self) -> u64 {
        self.balance_for_window.len() as u64
    }

    pub fn balance_for_window(&self, window: u64) -> SplitResult<u64> {
        usize::try_from(window)
            .ok()
            .and_then(|index| self.balance_for_window.get(index).copied())
            .ok_or(ErrorCode::InvalidWindow)
    }

    /// Window amounts not yet paid out.
    pub fn outstanding(&self) -> SplitResult<u64> {
        self.deposited_in_windows
            .checked_sub(self.paid_from_windows)
            .ok_or(ErrorCode::NumericOverflow)
    }

    /// Native value no closed window has claimed yet, given what the split may spend.
    pub fn available_for_window(&self, spendable: u64) -> SplitResult<u64> {
        spendable
            .checked_sub(self.outstanding()?)
            .ok_or(ErrorCode::InsufficientFunds)
    }

    /// Close a window holding `amount`. Returns its index.
    pub fn record_window(&mut self, amount: u64) -> SplitResult<u64> {
        if amount == 0 {
            return Err(ErrorCode::NoFundsAvailable);
        }
        let window = self.current_window();
        self.deposited_in_windows = self
            .deposited_in_windows
            .checked_add(amount)
            .ok_or(ErrorCode::NumericOverflow)?;
        self.balance_for_window.push(amount);
        Ok(window)
    }

    pub fn record_payout(&mut self, amount: u64) -> SplitResult<()> {
        self.paid_from_windows = self
            .paid_from_windows
            .checked_add(amount)
            .ok_or(ErrorCode::NumericOverflow)?;
        Ok(())
    }

    /// Check a leaf against the split's scheme and root.
    pub fn verify_leaf(&self, leaf: &AllocationLeaf, proof: &[[u8; 32]]) -> SplitResult<()> {
        if leaf.scheme() != self.leaf_scheme {
            return Err(ErrorCode::LeafSchemeMismatch);
        }
        if !verify_allocation_proof(leaf, proof, &self.merkle_root) {
            return Err(ErrorCode::InvalidMerkleProof);
        }
        Ok(())
    }

    pub fn share_of_window(&self, leaf: &AllocationLeaf, window: u64) -> SplitResult<u64> {
        scale_amount(leaf.allocation(), self.balance_for_window(window)?, self.scale)
    }

    pub fn is_owner(&self, account: &Pubkey) -> bool {
        self.owners.is_owner(account)
    }

    pub fn ensure_can_increment(&self, caller: &Pubkey) -> SplitResult<()> {
        if self.window_access == WindowAccess::OwnersOnly && !self.is_owner(caller) {
            return Err(ErrorCode::NotAnOwner);
        }
        Ok(())
    }
}

#[account] // seed [CLAIM_RECEIPT_V0_SEED_PREFIX, split, claim_hash(window, leaf_id)]
#[derive(InitSpace, Debug)]
pub struct ClaimReceiptV0 {
    /// Pubkey of the Split account this receipt belongs to.
    pub split: Pubkey,

    pub window: u64,

    pub leaf_id: LeafId,

    /// Native amount paid for this window, or 0 when paid as part of a multi-window claim.
    pub amount: u64,

    /// Set once the window has been paid to this leaf.
    pub claimed: bool,

    /// Timestamp of when the claim was successfully processed.
    pub claimed_at_timestamp: i64,

    /// Bump seed for the ClaimReceipt PDA.
    pub bump: u8,
}
