use anchor_lang::prelude::*;
use anchor_lang::solana_program::system_program::ID as SYSTEM_PROGRAM_ID;
use anchor_spl::associated_token::{
    get_associated_token_address, ID as ASSOCIATED_TOKEN_PROGRAM_ID,
};
use anchor_spl::token::{spl_token, ID as TOKEN_PROGRAM_ID};
use split_protocol::{
    claim_hash, split_salt, LeafId, CLAIM_RECEIPT_V0_SEED_PREFIX, ID as SPLIT_PROGRAM_ID,
    PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX,
};

/// Precomputes every address the split program touches, for one program id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressFinder {
    pub program_id: Pubkey,

    pub associated_token_program_id: Pubkey,
    pub system_program_id: Pubkey,
    pub token_program_id: Pubkey,
}

impl Default for AddressFinder {
    fn default() -> Self {
        Self::new(SPLIT_PROGRAM_ID)
    }
}

impl AddressFinder {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            associated_token_program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            system_program_id: SYSTEM_PROGRAM_ID,
            token_program_id: TOKEN_PROGRAM_ID,
        }
    }

    pub fn find_split_v0_address(&self, merkle_root: &[u8; 32]) -> (Pubkey, u8) {
        let salt = split_salt(merkle_root);
        Pubkey::find_program_address(
            &[SPLIT_V0_SEED_PREFIX, salt.as_ref(), PROXY_CODE_HASH.as_ref()],
            &self.program_id,
        )
    }

    pub fn find_claim_receipt_v0_address(
        &self,
        split: &Pubkey,
        window: u64,
        leaf_id: &LeafId,
    ) -> (Pubkey, u8) {
        let claim = claim_hash(window, leaf_id);
        Pubkey::find_program_address(
            &[CLAIM_RECEIPT_V0_SEED_PREFIX, split.as_ref(), claim.as_ref()],
            &self.program_id,
        )
    }

    /// Receipts for windows `0..window_count`, in window order.
    pub fn find_claim_receipt_v0_addresses(
        &self,
        split: &Pubkey,
        leaf_id: &LeafId,
        window_count: u64,
    ) -> Vec<Pubkey> {
        (0..window_count)
            .map(|window| self.find_claim_receipt_v0_address(split, window, leaf_id).0)
            .collect()
    }

    pub fn find_token_account_address(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        get_associated_token_address(owner, mint)
    }

    /// The owner's wrapped-native token account, where refused lamports land.
    pub fn find_wrapped_native_address(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address(owner, &spl_token::native_mint::ID)
    }
}
