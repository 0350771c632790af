mod compiled_split;

use solana_pubkey::Pubkey;
use split_protocol::AllocationLeaf;
use split_protocol_csvs::{validate_allocation_rows, AllocationRows};
use split_protocol_merkle::AllocationTree;
use tracing::info;

use crate::{AddressFinder, SdkResult};

pub use compiled_split::{CompiledClaim, CompiledSplit};

/// Turn an allocation list into everything needed to deploy and claim a split:
/// the Merkle root, the split's future address, and a proof for every leaf.
pub fn compile_split(
    factory: Pubkey,
    rows: &AllocationRows,
    scale: u64,
) -> SdkResult<CompiledSplit> {
    validate_allocation_rows(rows, scale)?; // fail fast if the allocations are invalid

    let leaves = leaves_from_rows(rows);
    let tree = AllocationTree::from_leaves(leaves)?;
    let merkle_root = tree.root()?;

    let address_finder = AddressFinder::new(factory);
    let (split_address, _) = address_finder.find_split_v0_address(&merkle_root);

    let claims = tree
        .proofs_for_all()
        .into_iter()
        .map(|(leaf, proof)| CompiledClaim::from_leaf(&leaf, proof))
        .collect();

    info!(
        split = %split_address,
        recipients = tree.len(),
        root = %hex::encode(merkle_root),
        "Compiled split"
    );

    Ok(CompiledSplit {
        factory,
        split_address,
        merkle_root,
        leaf_scheme: tree.scheme,
        scale,
        claims,
    })
}

/// Leaves in file order; the tree sorts them itself.
pub fn leaves_from_rows(rows: &AllocationRows) -> Vec<AllocationLeaf> {
    match rows {
        AllocationRows::V1(rows) => rows
            .iter()
            .map(|row| AllocationLeaf::v1(row.account, row.allocation))
            .collect(),
        AllocationRows::V2(rows) => rows
            .iter()
            .map(|row| AllocationLeaf::v2(row.index, row.account, row.allocation))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use split_protocol::{LeafScheme, PERCENTAGE_SCALE};
    use split_protocol_csvs::{AllocationCsvRow, IndexedAllocationCsvRow};
    use std::str::FromStr;

    fn test_rows() -> AllocationRows {
        AllocationRows::V1(vec![
            AllocationCsvRow {
                account: Pubkey::from_str("11111111111111111111111111111112").unwrap(),
                allocation: 100_000,
            },
            AllocationCsvRow {
                account: Pubkey::from_str("11111111111111111111111111111113").unwrap(),
                allocation: 300_000,
            },
            AllocationCsvRow {
                account: Pubkey::from_str("11111111111111111111111111111114").unwrap(),
                allocation: 600_000,
            },
        ])
    }

    #[test]
    fn test_compile_split() {
        let factory = Pubkey::new_unique();
        let compiled = compile_split(factory, &test_rows(), PERCENTAGE_SCALE).unwrap();

        assert_eq!(compiled.claims.len(), 3);
        assert_eq!(compiled.leaf_scheme, LeafScheme::V1);
        assert_eq!(
            compiled.split_address,
            split_protocol::find_split_address(&factory, &compiled.merkle_root).0
        );
        compiled.verify_all().unwrap();
    }

    #[test]
    fn test_compile_is_order_independent() {
        let factory = Pubkey::new_unique();
        let AllocationRows::V1(mut rows) = test_rows() else {
            unreachable!()
        };
        let first = compile_split(factory, &AllocationRows::V1(rows.clone()), PERCENTAGE_SCALE)
            .unwrap();
        rows.reverse();
        let second = compile_split(factory, &AllocationRows::V1(rows), PERCENTAGE_SCALE).unwrap();

        assert_eq!(first.merkle_root, second.merkle_root);
        assert_eq!(first.split_address, second.split_address);
    }

    #[test]
    fn test_compile_rejects_bad_totals() {
        let result = compile_split(Pubkey::new_unique(), &test_rows(), 2 * PERCENTAGE_SCALE);
        assert!(matches!(result, Err(crate::SdkError::Csv(_))));
    }

    #[test]
    fn test_compile_indexed_split() {
        let account = Pubkey::new_unique();
        let rows = AllocationRows::V2(vec![
            IndexedAllocationCsvRow {
                index: 0,
                account,
                allocation: 1,
            },
            IndexedAllocationCsvRow {
                index: 1,
                account,
                allocation: 2,
            },
        ]);
        let compiled = compile_split(Pubkey::new_unique(), &rows, 3).unwrap();
        assert_eq!(compiled.leaf_scheme, LeafScheme::V2);
        assert_eq!(compiled.claims_for_account(&account).len(), 2);
        compiled.verify_all().unwrap();
    }
}
