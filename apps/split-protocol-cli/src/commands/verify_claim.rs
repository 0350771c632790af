use std::path::PathBuf;

use split_protocol::{verify_allocation_proof, AllocationLeaf};
use split_protocol_csvs::read_claims_csv;

use crate::config::{parse_pubkey, parse_root};
use crate::error::{CliError, CliResult};

/// Check every claims-CSV row for `account` against `merkle_root`.
pub fn execute(claims: PathBuf, account: String, merkle_root: String) -> CliResult<()> {
    let account = parse_pubkey(&account)?;
    let merkle_root = parse_root(&merkle_root)?;

    println!("📖 Reading claims from {}...", claims.display());
    let rows: Vec<_> = read_claims_csv(&claims)?
        .into_iter()
        .filter(|row| row.account == account)
        .collect();

    if rows.is_empty() {
        println!("❌ No claims for {}", account);
        return Err(CliError::CommandExecution(format!(
            "account {} has no claims",
            account
        )));
    }

    let mut failures = 0;
    for row in &rows {
        let leaf = match row.index {
            Some(index) => AllocationLeaf::v2(index, row.account, row.allocation),
            None => AllocationLeaf::v1(row.account, row.allocation),
        };
        let label = row
            .index
            .map(|index| format!("leaf #{}", index))
            .unwrap_or_else(|| "leaf".to_string());

        if verify_allocation_proof(&leaf, &row.proof, &merkle_root) {
            println!("✅ {} (allocation {}) verifies", label, row.allocation);
        } else {
            failures += 1;
            println!("❌ {} (allocation {}) does NOT verify", label, row.allocation);
        }
    }

    if failures > 0 {
        return Err(CliError::CommandExecution(format!(
            "{} of {} proofs failed",
            failures,
            rows.len()
        )));
    }
    println!("🎉 All {} proof(s) verified", rows.len());
    Ok(())
}
