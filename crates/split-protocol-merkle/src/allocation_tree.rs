use std::collections::HashMap;

use rs_merkle::MerkleTree;
use split_protocol::{AllocationLeaf, LeafId, LeafScheme, Pubkey};

use crate::{AllocationHasher, MerkleError, MerkleResult};

/// Merkle tree over allocation leaves.
///
/// Leaf digests are sorted before the tree is built, so the root depends only on
/// the set of leaves and not on the order they were supplied in.
#[derive(Clone)]
pub struct AllocationTree {
    /// The underlying merkle tree
    pub tree: MerkleTree<AllocationHasher>,
    /// Leaves in the order their digests appear at the bottom of the tree
    pub leaves: Vec<AllocationLeaf>,
    /// Mapping from leaf id to position in `leaves`
    pub leaf_position: HashMap<LeafId, usize>,
    pub scheme: LeafScheme,
}

impl AllocationTree {
    pub fn from_leaves(leaves: Vec<AllocationLeaf>) -> MerkleResult<Self> {
        let scheme = leaves.first().ok_or(MerkleError::InvalidInput)?.scheme();
        if leaves.iter().any(|leaf| leaf.scheme() != scheme) {
            return Err(MerkleError::MixedLeafSchemes);
        }

        let mut hashed: Vec<([u8; 32], AllocationLeaf)> =
            leaves.into_iter().map(|leaf| (leaf.to_hash(), leaf)).collect();
        hashed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut leaf_position = HashMap::with_capacity(hashed.len());
        for (position, (_, leaf)) in hashed.iter().enumerate() {
            if leaf_position.insert(leaf.leaf_id(), position).is_some() {
                return Err(MerkleError::DuplicateLeaf(leaf.leaf_id()));
            }
        }

        let digests: Vec<[u8; 32]> = hashed.iter().map(|(digest, _)| *digest).collect();
        let tree = MerkleTree::<AllocationHasher>::from_leaves(&digests);

        Ok(Self {
            tree,
            leaves: hashed.into_iter().map(|(_, leaf)| leaf).collect(),
            leaf_position,
            scheme,
        })
    }

    pub fn root(&self) -> MerkleResult<[u8; 32]> {
        self.tree.root().ok_or(MerkleError::EmptyTree)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    fn proof_at(&self, position: usize) -> Vec<[u8; 32]> {
        self.tree.proof(&[position]).proof_hashes().to_vec()
    }

    /// Proof for an exact leaf. A leaf whose id is in the tree but whose contents
    /// differ is reported as not found.
    pub fn proof_for_leaf(&self, leaf: &AllocationLeaf) -> MerkleResult<Vec<[u8; 32]>> {
        let position = *self
            .leaf_position
            .get(&leaf.leaf_id())
            .ok_or(MerkleError::LeafNotFound)?;
        if self.leaves[position] != *leaf {
            return Err(MerkleError::LeafNotFound);
        }
        Ok(self.proof_at(position))
    }

    pub fn leaf_for_id(&self, leaf_id: &LeafId) -> MerkleResult<&AllocationLeaf> {
        self.leaf_position
            .get(leaf_id)
            .and_then(|position| self.leaves.get(*position))
            .ok_or(MerkleError::LeafNotFound)
    }

    /// Scheme V1 lookup.
    pub fn proof_for_account(&self, account: &Pubkey) -> MerkleResult<Vec<[u8; 32]>> {
        let leaf = *self.leaf_for_id(&LeafId::Account(*account))?;
        self.proof_for_leaf(&leaf)
    }

    /// Scheme V2 lookup.
    pub fn proof_for_index(&self, index: u64) -> MerkleResult<Vec<[u8; 32]>> {
        let leaf = *self.leaf_for_id(&LeafId::Index(index))?;
        self.proof_for_leaf(&leaf)
    }

    /// Every leaf paired with its proof.
    pub fn proofs_for_all(&self) -> Vec<(AllocationLeaf, Vec<[u8; 32]>)> {
        self.leaves
            .iter()
            .enumerate()
            .map(|(position, leaf)| (*leaf, self.proof_at(position)))
            .collect()
    }

    pub fn verify_proof(&self, leaf: &AllocationLeaf, proof: &[[u8; 32]]) -> bool {
        self.root()
            .map(|root| split_protocol::verify_allocation_proof(leaf, proof, &root))
            .unwrap_or(false)
    }
}
