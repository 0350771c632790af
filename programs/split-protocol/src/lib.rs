//! Merkle-committed value splits.
//!
//! A split is a PDA of this program, derived from its Merkle root and the proxy code
//! hash. Lamports sent to the split are snapshotted into windows, and each leaf of
//! the tree can claim its scaled share of every window exactly once. Claims are
//! recorded as receipt PDAs per (window, leaf).

pub mod allocation_leaf;
pub mod constants;
pub mod error;
pub mod events;
pub mod factory;
pub mod instructions;
pub mod owners;
pub mod proofs;
pub mod scaler;
pub mod state;

pub use allocation_leaf::{AllocationLeaf, AllocationLeafV1, AllocationLeafV2, LeafId, LeafScheme};
pub use constants::{
    CLAIM_RECEIPT_V0_SEED_PREFIX, MAX_METADATA_LEN, MAX_OWNERS, PERCENTAGE_SCALE, PROXY_CODE_HASH,
    SENTINEL_OWNERS, SPLIT_V0_SEED_PREFIX,
};
pub use error::{ErrorCode, SplitResult};
pub use events::*;
pub use factory::{find_split_address, proxy_code_hash, split_salt};
pub use instructions::*;
pub use owners::OwnerRegistry;
pub use proofs::{hash_internal_pair, verify_allocation_proof, AllocationProof};
pub use scaler::{scale_amount, validate_allocations};
pub use state::*;

pub use anchor_lang::prelude::Pubkey;

use anchor_lang::prelude::*;

declare_id!("SpLitVx7Qm3hR9cWk2TzYdN4fGaB8uEJwKs6PnHe5oL");

#[program]
pub mod split_protocol {
    use super::instructions;
    use super::*;

    // creator
    pub fn create_split_v0(
        ctx: Context<CreateSplitV0>,
        merkle_root: [u8; 32],
        salt: [u8; 32],
        setup: SplitSetup,
        metadata: String,
    ) -> Result<()> {
        instructions::handle_create_split_v0(ctx, merkle_root, salt, setup, metadata)
    }

    // anyone, or owners when the split restricts it
    pub fn increment_window_v0(ctx: Context<IncrementWindowV0>) -> Result<()> {
        instructions::handle_increment_window_v0(ctx)
    }

    // anyone
    pub fn claim_v0(
        ctx: Context<ClaimV0>,
        window: u64,
        leaf: AllocationLeaf,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::handle_claim_v0(ctx, window, leaf, proof)
    }

    // anyone
    pub fn claim_for_all_windows_v0<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimForAllWindowsV0<'info>>,
        leaf: AllocationLeaf,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::handle_claim_for_all_windows_v0(ctx, leaf, proof)
    }

    // anyone
    pub fn increment_then_claim_all_v0<'info>(
        ctx: Context<'_, '_, '_, 'info, IncrementThenClaimAllV0<'info>>,
        leaf: AllocationLeaf,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::handle_increment_then_claim_all_v0(ctx, leaf, proof)
    }

    // owners
    pub fn claim_token_for_all_v0<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimTokenForAllV0<'info>>,
        claims: Vec<TokenClaim>,
    ) -> Result<()> {
        instructions::handle_claim_token_for_all_v0(ctx, claims)
    }

    // owners
    pub fn swap_owner_v0(
        ctx: Context<SwapOwnerV0>,
        prev_owner: Pubkey,
        old_owner: Pubkey,
        new_owner: Pubkey,
    ) -> Result<()> {
        instructions::handle_swap_owner_v0(ctx, prev_owner, old_owner, new_owner)
    }
}
