use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use solana_pubkey::Pubkey;
use split_protocol::{
    find_split_address, split_salt, ErrorCode, LeafId, OwnerRegistry, SplitV0, TransferPolicy,
};
use split_protocol_csvs::read_allocations_csv;
use split_protocol_sdk::{compile_split, CompiledClaim, CompiledSplit};

use crate::config::SplitConfig;
use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationReport {
    pub split_name: String,
    pub split_address: String,
    pub merkle_root: String,
    pub windows: Vec<u64>,
    pub payouts: Vec<PayoutReport>,
    /// Native value left in the split after every leaf claimed.
    pub remaining: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutReport {
    pub account: String,
    pub index: Option<u64>,
    pub allocation: u64,
    pub claimed: u64,
    pub native_balance: u64,
    pub wrapped_balance: u64,
    pub error: Option<String>,
}

/// Offline model of one split: the account state plus the value it holds above rent.
struct Simulation {
    state: SplitV0,
    balance: u64,
    claimed: BTreeSet<(u64, LeafId)>,
}

impl Simulation {
    fn deposit_and_close(&mut self, caller: &Pubkey, deposit: u64) -> CliResult<u64> {
        self.balance = self
            .balance
            .checked_add(deposit)
            .ok_or(ErrorCode::NumericOverflow)?;
        self.state.ensure_can_increment(caller)?;
        let amount = self.state.available_for_window(self.balance)?;
        if amount == 0 {
            return Err(ErrorCode::NoFundsAvailable.into());
        }
        Ok(self.state.record_window(amount)?)
    }

    /// Same order as an on-chain claim-all: verify, total, record, pay.
    fn claim_all(
        &mut self,
        compiled: &CompiledSplit,
        claim: &CompiledClaim,
        refuses_native: bool,
    ) -> CliResult<u64> {
        let leaf = claim.leaf(compiled.leaf_scheme)?;
        self.state.verify_leaf(&leaf, &claim.proof)?;

        let leaf_id = leaf.leaf_id();
        let unclaimed: Vec<u64> = (0..self.state.current_window())
            .filter(|window| !self.claimed.contains(&(*window, leaf_id)))
            .collect();
        if unclaimed.is_empty() {
            return Err(ErrorCode::AlreadyClaimed.into());
        }

        let mut total: u64 = 0;
        for window in &unclaimed {
            let share = self.state.share_of_window(&leaf, *window)?;
            total = total.checked_add(share).ok_or(ErrorCode::NumericOverflow)?;
        }

        if refuses_native && self.state.transfer_policy == TransferPolicy::RevertClaim {
            return Err(ErrorCode::TransferFailed.into());
        }

        self.state.record_payout(total)?;
        self.balance = self
            .balance
            .checked_sub(total)
            .ok_or(ErrorCode::InsufficientFunds)?;
        self.claimed
            .extend(unclaimed.into_iter().map(|window| (window, leaf_id)));
        Ok(total)
    }
}

/// Deploy the configured split in memory, run every deposit through a window,
/// then let every leaf claim all windows.
pub fn execute(config: PathBuf, output: Option<PathBuf>) -> CliResult<()> {
    println!("📖 Loading split config from {}...", config.display());
    let config = SplitConfig::load(&config)?;

    let report = run(&config)?;

    if let Some(output) = output {
        std::fs::write(&output, serde_json::to_string_pretty(&report)?)?;
        println!("\n💾 Wrote report to {}", output.display());
    }
    Ok(())
}

pub fn run(config: &SplitConfig) -> CliResult<SimulationReport> {
    let factory = config.factory()?;
    let rows = read_allocations_csv(&config.allocations_file)?;
    let compiled = compile_split(factory, &rows, config.scale)?;
    println!(
        "🌳 Compiled '{}': {} leaves, root {}",
        config.split_name,
        compiled.claims.len(),
        hex::encode(compiled.merkle_root)
    );

    let owners = config.owner_keys()?;
    let creator = owners
        .first()
        .copied()
        .ok_or_else(|| CliError::InvalidConfig("at least one owner is required".into()))?;
    let setup = config.setup()?.with_leaf_scheme(compiled.leaf_scheme);
    let (split, bump) = find_split_address(&factory, &compiled.merkle_root);

    let mut simulation = Simulation {
        state: SplitV0 {
            merkle_root: compiled.merkle_root,
            salt: split_salt(&compiled.merkle_root),
            creator,
            leaf_scheme: setup.leaf_scheme,
            scale: setup.scale,
            window_access: setup.window_access,
            transfer_policy: setup.transfer_policy,
            owners: OwnerRegistry::new(setup.owners)?,
            bump,
            ..SplitV0::default()
        },
        balance: 0,
        claimed: BTreeSet::new(),
    };
    println!("🚀 Split modelled at {}", split);

    let rejecting = config.rejecting_keys()?;
    for account in &rejecting {
        println!("   {} refuses native transfers", account);
    }

    // Windows
    let mut windows = Vec::with_capacity(config.deposits.len());
    for deposit in &config.deposits {
        let window = simulation.deposit_and_close(&creator, *deposit)?;
        println!("🪟 Window {} closed over {}", window, deposit);
        windows.push(*deposit);
    }

    // Claims
    println!("\n💸 Claiming...");
    let mut payouts = Vec::with_capacity(compiled.claims.len());
    for claim in &compiled.claims {
        let refuses_native = rejecting.contains(&claim.account);
        let (claimed, error) = match simulation.claim_all(&compiled, claim, refuses_native) {
            Ok(amount) => {
                println!("✅ {} claimed {}", claim.account, amount);
                (amount, None)
            }
            Err(err) => {
                println!("❌ {} failed: {}", claim.account, err);
                (0, Some(err.to_string()))
            }
        };

        let (native_balance, wrapped_balance) = if refuses_native {
            (0, claimed)
        } else {
            (claimed, 0)
        };
        payouts.push(PayoutReport {
            account: claim.account.to_string(),
            index: claim.index,
            allocation: claim.allocation,
            claimed,
            native_balance,
            wrapped_balance,
            error,
        });
    }

    let remaining = simulation.balance;
    let total: u64 = config.deposits.iter().sum();
    println!(
        "\n📊 Deposited {}, paid {}, left in split {}",
        total,
        simulation.state.paid_from_windows,
        remaining
    );

    Ok(SimulationReport {
        split_name: config.split_name.clone(),
        split_address: split.to_string(),
        merkle_root: hex::encode(compiled.merkle_root),
        windows,
        payouts,
        remaining,
    })
}
