/*!
# CSV Schema Definitions

Row types for allocation lists and claim sheets, with the serde helpers that
keep public keys in base58 and digests in hex.
*/

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use std::str::FromStr;

/// Current schema version for all CSV formats
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

// ================================================================================================
// Allocations CSV Schema
// ================================================================================================

/// Expected headers for a scheme v1 allocations.csv in exact order
pub const ALLOCATIONS_CSV_HEADERS: &[&str] = &["account", "allocation"];

/// Expected headers for a scheme v2 allocations.csv in exact order
pub const INDEXED_ALLOCATIONS_CSV_HEADERS: &[&str] = &["index", "account", "allocation"];

/// Row of a scheme v1 allocation list. Each account appears once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationCsvRow {
    /// Recipient's public key in base58 format
    #[serde(
        deserialize_with = "deserialize_pubkey",
        serialize_with = "serialize_pubkey"
    )]
    pub account: Pubkey,

    /// Share of the split in units of its scale
    pub allocation: u64,
}

/// Row of a scheme v2 allocation list. Each index appears once; accounts may repeat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexedAllocationCsvRow {
    pub index: u64,

    #[serde(
        deserialize_with = "deserialize_pubkey",
        serialize_with = "serialize_pubkey"
    )]
    pub account: Pubkey,

    pub allocation: u64,
}

/// A parsed allocation list. The variant follows from the file's headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationRows {
    V1(Vec<AllocationCsvRow>),
    V2(Vec<IndexedAllocationCsvRow>),
}

impl AllocationRows {
    pub fn len(&self) -> usize {
        match self {
            AllocationRows::V1(rows) => rows.len(),
            AllocationRows::V2(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(index, account, allocation)` for every row; `index` is `None` for v1 rows.
    pub fn entries(&self) -> Vec<(Option<u64>, Pubkey, u64)> {
        match self {
            AllocationRows::V1(rows) => rows
                .iter()
                .map(|row| (None, row.account, row.allocation))
                .collect(),
            AllocationRows::V2(rows) => rows
                .iter()
                .map(|row| (Some(row.index), row.account, row.allocation))
                .collect(),
        }
    }

    pub fn total_allocation(&self) -> u128 {
        self.entries()
            .iter()
            .map(|(_, _, allocation)| u128::from(*allocation))
            .sum()
    }
}

// ================================================================================================
// Claims CSV Schema
// ================================================================================================

/// Expected headers for claims.csv in exact order
pub const CLAIMS_CSV_HEADERS: &[&str] = &["index", "account", "allocation", "proof"];

/// A leaf of a compiled split with its proof.
///
/// **File**: `claims.csv`
/// **Producer**: `compile-split` command
/// **Consumers**: `verify-claim` command, claimants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimCsvRow {
    /// Leaf index for scheme v2, empty for scheme v1
    pub index: Option<u64>,

    #[serde(
        deserialize_with = "deserialize_pubkey",
        serialize_with = "serialize_pubkey"
    )]
    pub account: Pubkey,

    pub allocation: u64,

    /// Sibling digests from leaf to root, hex encoded and joined by `:`
    #[serde(
        deserialize_with = "deserialize_proof",
        serialize_with = "serialize_proof"
    )]
    pub proof: Vec<[u8; 32]>,
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

/// Deserialize base58 string to Pubkey
fn deserialize_pubkey<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Pubkey::from_str(&s).map_err(serde::de::Error::custom)
}

/// Serialize Pubkey to base58 string
fn serialize_pubkey<S>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&pubkey.to_string())
}

/// Parse a 32-byte hex digest (without 0x prefix)
pub fn parse_digest(s: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(s).map_err(|e| e.to_string())?;
    if bytes.len() != 32 {
        return Err(format!("Expected 32 bytes, got {}", bytes.len()));
    }
    let mut array = [0u8; 32];
    array.copy_from_slice(&bytes);
    Ok(array)
}

fn deserialize_proof<'de, D>(deserializer: D) -> Result<Vec<[u8; 32]>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(':')
        .map(|digest| parse_digest(digest).map_err(serde::de::Error::custom))
        .collect()
}

#[allow(clippy::ptr_arg)]
fn serialize_proof<S>(proof: &Vec<[u8; 32]>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let joined = proof.iter().map(hex::encode).collect::<Vec<_>>().join(":");
    serializer.serialize_str(&joined)
}
