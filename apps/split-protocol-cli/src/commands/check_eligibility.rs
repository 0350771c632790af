use std::path::PathBuf;

use rust_decimal::Decimal;
use split_protocol_sdk::{allocation_percent, preview_payouts, CompiledSplit};

use crate::config::parse_pubkey;
use crate::error::CliResult;

/// Show an account's leaves in a compiled split and what they would earn from
/// a window holding `balance`.
pub fn execute(compiled: PathBuf, account: String, balance: u64) -> CliResult<()> {
    let account = parse_pubkey(&account)?;
    let compiled = CompiledSplit::read_json(&compiled)?;

    println!("🔍 Checking eligibility for {}", account);
    println!("   Split: {}", compiled.split_address);

    let previews: Vec<_> = preview_payouts(&compiled, balance)?
        .into_iter()
        .filter(|preview| preview.account == account)
        .collect();

    if previews.is_empty() {
        println!("❌ {} is not part of this split", account);
        return Ok(());
    }

    let mut total_allocation = 0u64;
    let mut total_amount = 0u64;
    for (i, preview) in previews.iter().enumerate() {
        println!("{}. Allocation: {} ({}%)", i + 1, preview.allocation, preview.percent);
        if let Some(index) = preview.index {
            println!("   Leaf index: {}", index);
        }
        println!("   Payout from {}: {}", balance, preview.amount);
        total_allocation = total_allocation.saturating_add(preview.allocation);
        total_amount = total_amount.saturating_add(preview.amount);
    }

    if previews.len() > 1 {
        let percent: Decimal = allocation_percent(total_allocation, compiled.scale)?;
        println!("\n📊 Total: {}% → {}", percent, total_amount);
    }

    for claim in compiled.claims_for_account(&account) {
        compiled.verify_claim(claim)?;
    }
    println!("✅ Proofs verify against {}", hex::encode(compiled.merkle_root));
    Ok(())
}
