use std::path::PathBuf;

use rand::{rngs::StdRng, Rng, SeedableRng};
use solana_pubkey::Pubkey;
use split_protocol_csvs::{
    write_allocations_csv, AllocationCsvRow, AllocationRows, IndexedAllocationCsvRow,
};

use crate::error::{CliError, CliResult};

/// Write `count` random allocations that sum to exactly `scale`.
pub fn execute(count: u64, seed: u64, scale: u64, indexed: bool, output: PathBuf) -> CliResult<()> {
    if count == 0 || count > scale {
        return Err(CliError::InvalidConfig(format!(
            "count must be between 1 and the scale ({})",
            scale
        )));
    }

    println!("🎲 Generating {} allocations (seed {})...", count, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let shares = random_shares(&mut rng, count, scale);

    let rows = if indexed {
        AllocationRows::V2(
            (0u64..)
                .zip(shares)
                .map(|(index, allocation)| IndexedAllocationCsvRow {
                    index,
                    account: Pubkey::new_from_array(rng.gen()),
                    allocation,
                })
                .collect(),
        )
    } else {
        AllocationRows::V1(
            shares
                .into_iter()
                .map(|allocation| AllocationCsvRow {
                    account: Pubkey::new_from_array(rng.gen()),
                    allocation,
                })
                .collect(),
        )
    };

    write_allocations_csv(&output, &rows)?;
    println!("✅ Wrote {} rows to {}", rows.len(), output.display());
    Ok(())
}

/// `count` positive shares summing to `scale`, from distinct random cut points.
fn random_shares<R: Rng>(rng: &mut R, count: u64, scale: u64) -> Vec<u64> {
    let mut cuts = std::collections::BTreeSet::new();
    while (cuts.len() as u64) < count - 1 {
        cuts.insert(rng.gen_range(1..scale));
    }

    let mut shares = Vec::with_capacity(count as usize);
    let mut last = 0;
    for cut in cuts.into_iter().chain(std::iter::once(scale)) {
        shares.push(cut - last);
        last = cut;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use split_protocol_csvs::{read_allocations_csv, validate_allocation_rows};

    #[test]
    fn test_generated_allocations_validate() {
        let dir = tempfile::tempdir().unwrap();
        for indexed in [false, true] {
            let path = dir.path().join(format!("alloc_{}.csv", indexed));
            execute(40, 7, 1_000_000, indexed, path.clone()).unwrap();

            let rows = read_allocations_csv(&path).unwrap();
            assert_eq!(rows.len(), 40);
            validate_allocation_rows(&rows, 1_000_000).unwrap();
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(1);
        assert_eq!(random_shares(&mut a, 10, 100), random_shares(&mut b, 10, 100));
        assert_eq!(random_shares(&mut a, 1, 100), vec![100]);
    }
}
