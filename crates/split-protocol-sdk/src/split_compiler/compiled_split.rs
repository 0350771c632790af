use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use split_protocol::{verify_allocation_proof, AllocationLeaf, LeafScheme};
use split_protocol_csvs::{write_claims_csv, ClaimCsvRow};

use crate::serde_helpers::{hex_digest, hex_digests, pubkey_string};
use crate::{SdkError, SdkResult};

/// One recipient's leaf and proof.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompiledClaim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,

    #[serde(with = "pubkey_string")]
    pub account: Pubkey,

    pub allocation: u64,

    #[serde(with = "hex_digests")]
    pub proof: Vec<[u8; 32]>,
}

impl CompiledClaim {
    pub fn from_leaf(leaf: &AllocationLeaf, proof: Vec<[u8; 32]>) -> Self {
        let index = match leaf {
            AllocationLeaf::V1(_) => None,
            AllocationLeaf::V2(leaf) => Some(leaf.index),
        };
        Self {
            index,
            account: leaf.account(),
            allocation: leaf.allocation(),
            proof,
        }
    }

    pub fn leaf(&self, scheme: LeafScheme) -> SdkResult<AllocationLeaf> {
        match scheme {
            LeafScheme::V1 => Ok(AllocationLeaf::v1(self.account, self.allocation)),
            LeafScheme::V2 => {
                let index = self.index.ok_or(SdkError::MissingLeafIndex(self.account))?;
                Ok(AllocationLeaf::v2(index, self.account, self.allocation))
            }
        }
    }

    pub fn to_csv_row(&self) -> ClaimCsvRow {
        ClaimCsvRow {
            index: self.index,
            account: self.account,
            allocation: self.allocation,
            proof: self.proof.clone(),
        }
    }
}

/// Output of `compile_split`: what gets deployed and what claimants need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompiledSplit {
    #[serde(with = "pubkey_string")]
    pub factory: Pubkey,

    #[serde(with = "pubkey_string")]
    pub split_address: Pubkey,

    #[serde(with = "hex_digest")]
    pub merkle_root: [u8; 32],

    pub leaf_scheme: LeafScheme,

    pub scale: u64,

    pub claims: Vec<CompiledClaim>,
}

impl CompiledSplit {
    /// First claim for `account`. Scheme v2 splits may hold several.
    pub fn claim_for_account(&self, account: &Pubkey) -> SdkResult<&CompiledClaim> {
        self.claims
            .iter()
            .find(|claim| claim.account == *account)
            .ok_or(SdkError::AccountNotFound(*account))
    }

    pub fn claims_for_account(&self, account: &Pubkey) -> Vec<&CompiledClaim> {
        self.claims
            .iter()
            .filter(|claim| claim.account == *account)
            .collect()
    }

    pub fn verify_claim(&self, claim: &CompiledClaim) -> SdkResult<()> {
        let leaf = claim.leaf(self.leaf_scheme)?;
        if !verify_allocation_proof(&leaf, &claim.proof, &self.merkle_root) {
            return Err(SdkError::InvalidProof(claim.account));
        }
        Ok(())
    }

    pub fn verify_all(&self) -> SdkResult<()> {
        self.claims
            .iter()
            .try_for_each(|claim| self.verify_claim(claim))
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> SdkResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> SdkResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_claims_csv<P: AsRef<Path>>(&self, path: P) -> SdkResult<()> {
        let rows: Vec<ClaimCsvRow> = self.claims.iter().map(CompiledClaim::to_csv_row).collect();
        write_claims_csv(path, &rows)?;
        Ok(())
    }
}
