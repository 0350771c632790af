use split_protocol::proofs::fold_proof;
use split_protocol::AllocationLeaf;

use crate::{AllocationTree, MerkleResult};

/// Verify a proof against a root. Needs nothing but the leaf and its proof.
pub fn verify_allocation_proof(proof: &[[u8; 32]], root: &[u8; 32], leaf: &AllocationLeaf) -> bool {
    split_protocol::verify_allocation_proof(leaf, proof, root)
}

/// Build a tree from `leaves` and return the proof for `target_leaf`.
pub fn generate_proof_for_leaf(
    leaves: &[AllocationLeaf],
    target_leaf: &AllocationLeaf,
) -> MerkleResult<Vec<[u8; 32]>> {
    AllocationTree::from_leaves(leaves.to_vec())?.proof_for_leaf(target_leaf)
}

/// Batch verify multiple proofs against the same root
pub fn batch_verify_proofs(proofs: &[(&[[u8; 32]], &AllocationLeaf)], root: &[u8; 32]) -> Vec<bool> {
    proofs
        .iter()
        .map(|(proof, leaf)| verify_allocation_proof(proof, root, leaf))
        .collect()
}

/// Root a proof folds up to (useful for testing)
pub fn extract_root_from_proof(proof: &[[u8; 32]], leaf: &AllocationLeaf) -> [u8; 32] {
    fold_proof(leaf.to_hash(), proof)
}
