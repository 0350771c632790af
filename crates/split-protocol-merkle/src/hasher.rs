use rs_merkle::Hasher;
use sha2::{Digest, Sha256};
use split_protocol::constants::LEAF_PREFIX;
use split_protocol::hash_internal_pair;

/// `rs_merkle` hasher producing the same digests the split verifies against.
///
/// ## Hashing Scheme
/// - **Leaf nodes**: `SHA256(0x00 || leaf_data)`. Allocation leaves are hashed by
///   `AllocationLeaf::to_hash`, which puts the scheme tag in front of the body.
/// - **Internal nodes**: `SHA256(0x01 || min || max)`; children are ordered
///   lexicographically so proofs need no position bits.
/// - **Odd nodes**: a node without a sibling is carried up unchanged. It is never
///   paired with itself, and contributes no element to proofs passing through it.
#[derive(Clone, Debug)]
pub struct AllocationHasher;

impl Hasher for AllocationHasher {
    type Hash = [u8; 32];

    fn hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update([LEAF_PREFIX]);
        hasher.update(data);
        hasher.finalize().into()
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right) => hash_internal_pair(left, right),
            None => *left,
        }
    }

    fn hash_size() -> usize {
        32
    }
}
