use std::io::{self, Write};

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::Hasher;
use serde::{Deserialize, Serialize};

use crate::constants::LEAF_PREFIX;

/// Versioned leaf encodings. A split commits to exactly one scheme for its lifetime.
#[derive(
    AnchorSerialize,
    AnchorDeserialize,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    InitSpace,
)]
#[serde(rename_all = "lowercase")]
pub enum LeafScheme {
    /// `{ account, allocation }`, one leaf per account.
    #[default]
    V1,
    /// `{ index, account, allocation }`, one leaf per index. An account may appear more than once.
    V2,
}

impl LeafScheme {
    /// Tag byte hashed in front of the leaf body.
    pub const fn tag(self) -> u8 {
        match self {
            LeafScheme::V1 => 1,
            LeafScheme::V2 => 2,
        }
    }
}

/// Leaf of the original scheme: the account itself identifies the claim.
///
/// ## Borsh layout (immutable)
/// ```text
/// account: Pubkey   // 32 bytes, offset 0
/// allocation: u64   //  8 bytes, offset 32
/// ```
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AllocationLeafV1 {
    pub account: Pubkey,
    pub allocation: u64,
}

/// Indexed leaf: the index identifies the claim.
///
/// ## Borsh layout (immutable)
/// ```text
/// index: u64        //  8 bytes, offset 0
/// account: Pubkey   // 32 bytes, offset 8
/// allocation: u64   //  8 bytes, offset 40
/// ```
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AllocationLeafV2 {
    pub index: u64,
    pub account: Pubkey,
    pub allocation: u64,
}

/// A recipient's committed share of a split.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllocationLeaf {
    V1(AllocationLeafV1),
    V2(AllocationLeafV2),
}

/// What makes a claim unique within a window.
#[derive(
    AnchorSerialize,
    AnchorDeserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    InitSpace,
)]
pub enum LeafId {
    Account(Pubkey),
    Index(u64),
}

impl AllocationLeaf {
    pub fn v1(account: Pubkey, allocation: u64) -> Self {
        Self::V1(AllocationLeafV1 {
            account,
            allocation,
        })
    }

    pub fn v2(index: u64, account: Pubkey, allocation: u64) -> Self {
        Self::V2(AllocationLeafV2 {
            index,
            account,
            allocation,
        })
    }

    pub fn scheme(&self) -> LeafScheme {
        match self {
            AllocationLeaf::V1(_) => LeafScheme::V1,
            AllocationLeaf::V2(_) => LeafScheme::V2,
        }
    }

    pub fn account(&self) -> Pubkey {
        match self {
            AllocationLeaf::V1(leaf) => leaf.account,
            AllocationLeaf::V2(leaf) => leaf.account,
        }
    }

    pub fn allocation(&self) -> u64 {
        match self {
            AllocationLeaf::V1(leaf) => leaf.allocation,
            AllocationLeaf::V2(leaf) => leaf.allocation,
        }
    }

    pub fn leaf_id(&self) -> LeafId {
        match self {
            AllocationLeaf::V1(leaf) => LeafId::Account(leaf.account),
            AllocationLeaf::V2(leaf) => LeafId::Index(leaf.index),
        }
    }

    /// Hash this leaf for Merkle tree construction:
    /// `SHA256(0x00 || scheme_tag || borsh(leaf body))`.
    ///
    /// The body is the borsh encoding of the inner struct, without the enum discriminant.
    pub fn to_hash(&self) -> [u8; 32] {
        let mut writer = HashWriter::default();
        writer.0.hash(&[LEAF_PREFIX, self.scheme().tag()]);
        let written = match self {
            AllocationLeaf::V1(leaf) => leaf.serialize(&mut writer),
            AllocationLeaf::V2(leaf) => leaf.serialize(&mut writer),
        };
        // HashWriter never reports an error.
        debug_assert!(written.is_ok());
        writer.0.result().to_bytes()
    }
}

/// Streams borsh output straight into a SHA-256 hasher.
#[derive(Default)]
struct HashWriter(Hasher);

impl Write for HashWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.hash(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl From<AllocationLeafV1> for AllocationLeaf {
    fn from(leaf: AllocationLeafV1) -> Self {
        Self::V1(leaf)
    }
}

impl From<AllocationLeafV2> for AllocationLeaf {
    fn from(leaf: AllocationLeafV2) -> Self {
        Self::V2(leaf)
    }
}
