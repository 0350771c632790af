//! Deterministic split addresses.
//!
//! The program is the factory and the shared implementation: every split is a PDA of
//! the program, derived from the Merkle root and the proxy code hash.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::constants::{PROXY_CODE_HASH, SPLIT_PROXY_CODE, SPLIT_V0_SEED_PREFIX};

/// SHA-256 of the canonical proxy code.
pub fn proxy_code_hash() -> [u8; 32] {
    hash(SPLIT_PROXY_CODE).to_bytes()
}

/// `SHA256(borsh(merkle_root))`. The borsh encoding of a `[u8; 32]` is the bytes themselves.
pub fn split_salt(merkle_root: &[u8; 32]) -> [u8; 32] {
    hash(merkle_root).to_bytes()
}

/// Address a split with this root will have when created through `factory`.
///
/// Seeds: `[SPLIT_V0_SEED_PREFIX, salt, PROXY_CODE_HASH]`.
pub fn find_split_address(factory: &Pubkey, merkle_root: &[u8; 32]) -> (Pubkey, u8) {
    let salt = split_salt(merkle_root);
    Pubkey::find_program_address(&[SPLIT_V0_SEED_PREFIX, &salt, &PROXY_CODE_HASH], factory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_code_hash_constant() {
        assert_eq!(proxy_code_hash(), PROXY_CODE_HASH);
    }

    #[test]
    fn test_salt_matches_borsh_encoding() {
        let root = [0xABu8; 32];
        let mut encoded = Vec::new();
        root.serialize(&mut encoded).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(split_salt(&root), hash(&encoded).to_bytes());
    }

    #[test]
    fn test_split_address_is_deterministic() {
        let factory = Pubkey::new_unique();
        let root = [7u8; 32];

        let (first, bump) = find_split_address(&factory, &root);
        let (second, bump_again) = find_split_address(&factory, &root);
        assert_eq!(first, second);
        assert_eq!(bump, bump_again);
    }

    #[test]
    fn test_split_address_depends_on_root_and_factory() {
        let factory = Pubkey::new_unique();
        let root = [7u8; 32];
        let (base, _) = find_split_address(&factory, &root);
        assert_ne!(base, find_split_address(&factory, &[8u8; 32]).0);
        assert_ne!(base, find_split_address(&Pubkey::new_unique(), &root).0);
    }

    #[test]
    fn test_split_address_matches_manual_derivation() {
        let root = [3u8; 32];
        let salt = hash(&root).to_bytes();
        let code_hash = hash(b"split-protocol/proxy/v0:delegate-all").to_bytes();
        let (expected, _) =
            Pubkey::find_program_address(&[b"split_v0", &salt, &code_hash], &crate::ID);
        assert_eq!(find_split_address(&crate::ID, &root).0, expected);
    }
}
