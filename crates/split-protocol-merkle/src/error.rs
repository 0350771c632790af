use split_protocol::LeafId;
use thiserror::Error;

pub type MerkleResult<T> = Result<T, MerkleError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Cannot build a tree from an empty leaf set")]
    InvalidInput,

    #[error("Leaf {0:?} appears more than once")]
    DuplicateLeaf(LeafId),

    #[error("All leaves of a tree must use the same scheme")]
    MixedLeafSchemes,

    #[error("Leaf not found in the tree")]
    LeafNotFound,

    #[error("Tree has no root")]
    EmptyTree,
}
