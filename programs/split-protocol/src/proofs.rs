use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::Hasher;

use crate::allocation_leaf::AllocationLeaf;
use crate::constants::INTERNAL_PREFIX;

/// Hash two child digests into their parent: `SHA256(0x01 || min(a, b) || max(a, b))`.
///
/// Ordering the children makes the parent independent of sibling position, so a proof
/// needs no left/right flags.
pub fn hash_internal_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Hasher::default();
    hasher.hash(&[INTERNAL_PREFIX]);
    hasher.hash(lo);
    hasher.hash(hi);
    hasher.result().to_bytes()
}

/// Fold a leaf digest up through its proof.
pub fn fold_proof(leaf_hash: [u8; 32], proof: &[[u8; 32]]) -> [u8; 32] {
    proof
        .iter()
        .fold(leaf_hash, |computed, sibling| hash_internal_pair(&computed, sibling))
}

/// Check that `leaf` is committed to by `root`.
pub fn verify_allocation_proof(leaf: &AllocationLeaf, proof: &[[u8; 32]], root: &[u8; 32]) -> bool {
    fold_proof(leaf.to_hash(), proof) == *root
}

/// Sibling digests from a leaf up to the root.
///
/// Levels where the leaf's ancestor was carried up unpaired contribute no element,
/// so proofs for the same tree may differ in length.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AllocationProof(pub Vec<[u8; 32]>);

impl AllocationProof {
    pub fn new(proof: Vec<[u8; 32]>) -> Self {
        Self(proof)
    }

    pub fn as_slice(&self) -> &[[u8; 32]] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<[u8; 32]> {
        self.0
    }

    /// Verify the proof using SHA256 with domain separation.
    ///
    /// ## Security: Domain Separation
    /// - Leaf nodes are hashed as `SHA256(0x00 || scheme_tag || leaf_body)`
    /// - Internal nodes are hashed as `SHA256(0x01 || min || max)`
    ///
    /// The prefix bytes keep a leaf digest from ever being accepted as an internal node.
    pub fn verify(&self, root: &[u8; 32], leaf: &AllocationLeaf) -> bool {
        verify_allocation_proof(leaf, &self.0, root)
    }
}

impl From<Vec<[u8; 32]>> for AllocationProof {
    fn from(proof: Vec<[u8; 32]>) -> Self {
        Self(proof)
    }
}
