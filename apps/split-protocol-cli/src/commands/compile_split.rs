use std::path::PathBuf;

use split_protocol_csvs::read_allocations_csv;
use split_protocol_sdk::{compile_split, preview_payouts};

use crate::config::parse_pubkey;
use crate::error::CliResult;

/// Compile an allocations CSV into a split: root, address and every proof.
///
/// Writes `compiled_split.json` and `claims.csv` into `output_dir`.
pub fn execute(
    allocations: PathBuf,
    factory: String,
    scale: u64,
    output_dir: PathBuf,
) -> CliResult<()> {
    let factory = parse_pubkey(&factory)?;

    println!("📖 Reading allocations from {}...", allocations.display());
    let rows = read_allocations_csv(&allocations)?;
    println!("✅ Loaded {} allocations", rows.len());

    println!("🌳 Building allocation tree...");
    let compiled = compile_split(factory, &rows, scale)?;
    compiled.verify_all()?;

    println!("✅ Split compiled");
    println!("   Merkle root: {}", hex::encode(compiled.merkle_root));
    println!("   Split address: {}", compiled.split_address);
    println!("   Leaf scheme: {:?}", compiled.leaf_scheme);
    println!("   Scale: {}", compiled.scale);

    println!("\n📊 Shares:");
    for preview in preview_payouts(&compiled, 0)? {
        match preview.index {
            Some(index) => println!("   #{} {} {}%", index, preview.account, preview.percent),
            None => println!("   {} {}%", preview.account, preview.percent),
        }
    }

    std::fs::create_dir_all(&output_dir)?;
    let json_path = output_dir.join("compiled_split.json");
    let claims_path = output_dir.join("claims.csv");
    compiled.write_json(&json_path)?;
    compiled.write_claims_csv(&claims_path)?;

    println!("\n💾 Wrote {}", json_path.display());
    println!("💾 Wrote {}", claims_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_pubkey::Pubkey;
    use split_protocol_csvs::{write_allocations_csv, AllocationCsvRow, AllocationRows};
    use split_protocol_sdk::CompiledSplit;

    #[test]
    fn test_compile_split_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let allocations = dir.path().join("allocations.csv");
        let rows = AllocationRows::V1(vec![
            AllocationCsvRow {
                account: Pubkey::new_unique(),
                allocation: 400_000,
            },
            AllocationCsvRow {
                account: Pubkey::new_unique(),
                allocation: 600_000,
            },
        ]);
        write_allocations_csv(&allocations, &rows).unwrap();

        let factory = Pubkey::new_unique();
        let out = dir.path().join("out");
        execute(allocations, factory.to_string(), 1_000_000, out.clone()).unwrap();

        let compiled = CompiledSplit::read_json(out.join("compiled_split.json")).unwrap();
        assert_eq!(compiled.factory, factory);
        assert_eq!(compiled.claims.len(), 2);
        assert!(out.join("claims.csv").exists());
    }
}
