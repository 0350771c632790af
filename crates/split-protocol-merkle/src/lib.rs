pub mod allocation_tree;
pub mod error;
pub mod hasher;
pub mod proof;

pub use allocation_tree::AllocationTree;
pub use error::{MerkleError, MerkleResult};
pub use hasher::AllocationHasher;
pub use proof::{
    batch_verify_proofs, extract_root_from_proof, generate_proof_for_leaf, verify_allocation_proof,
};

// Re-export leaf types from the split protocol
pub use split_protocol::{AllocationLeaf, AllocationProof, LeafId, LeafScheme};

// Re-export key types from rs-merkle for convenience
pub use rs_merkle::{MerkleProof, MerkleTree};
