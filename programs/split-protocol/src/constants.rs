use anchor_lang::prelude::*;

/// Seed prefixes for PDA derivation
#[constant]
pub const SPLIT_V0_SEED_PREFIX: &[u8] = b"split_v0";

#[constant]
pub const CLAIM_RECEIPT_V0_SEED_PREFIX: &[u8] = b"claim_receipt_v0";

/// Domain separation prefix for leaf nodes
pub const LEAF_PREFIX: u8 = 0x00;

/// Domain separation prefix for internal nodes
pub const INTERNAL_PREFIX: u8 = 0x01;

/// Domain separation prefix for claim identifiers
pub const CLAIM_HASH_PREFIX: &[u8] = b"claim_v0";

/// Allocations are expressed in parts-per-million unless a split chooses its own scale.
#[constant]
pub const PERCENTAGE_SCALE: u64 = 1_000_000;

/// Maximum number of owners a split can carry.
pub const MAX_OWNERS: usize = 16;

/// Maximum length of the metadata string logged at creation.
pub const MAX_METADATA_LEN: usize = 256;

/// Marks the head of the owner list when naming the predecessor of the first owner.
pub const SENTINEL_OWNERS: Pubkey = Pubkey::new_from_array([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1,
]);

/// Canonical proxy code. Its SHA-256 digest is part of every split address.
pub const SPLIT_PROXY_CODE: &[u8] = b"split-protocol/proxy/v0:delegate-all";

/// `SHA256(SPLIT_PROXY_CODE)`, used as the last split seed.
pub const PROXY_CODE_HASH: [u8; 32] = [
    130, 23, 121, 192, 67, 147, 216, 163, 92, 245, 73, 172, 46, 21, 186, 93, 224, 214, 203, 0, 36,
    149, 52, 145, 227, 75, 249, 9, 106, 156, 59, 138,
];
