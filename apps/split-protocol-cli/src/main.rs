use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use error::CliResult;
use split_protocol::PERCENTAGE_SCALE;

#[derive(Parser)]
#[command(name = "split-protocol")]
#[command(about = "Split Protocol CLI - Merkle-committed value splits")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random allocations CSV for testing
    GenerateAllocations {
        /// Number of recipients to generate
        #[arg(short, long)]
        count: u64,

        /// Seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Units the allocations sum to
        #[arg(long, default_value_t = PERCENTAGE_SCALE)]
        scale: u64,

        /// Write the indexed (index,account,allocation) layout
        #[arg(long)]
        indexed: bool,

        /// Output file path
        #[arg(short, long, default_value = "allocations.csv")]
        output: PathBuf,
    },

    /// Compile an allocations CSV into a Merkle root, split address and proofs
    CompileSplit {
        /// Allocations CSV file
        allocations: PathBuf,

        /// Factory address (base58)
        #[arg(short, long)]
        factory: String,

        /// Units the allocations sum to
        #[arg(long, default_value_t = PERCENTAGE_SCALE)]
        scale: u64,

        /// Output directory for compiled_split.json and claims.csv
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Derive the deterministic address of a split
    SplitAddress {
        /// Factory address (base58)
        #[arg(short, long)]
        factory: String,

        /// Merkle root (hex string)
        #[arg(short, long)]
        merkle_root: String,
    },

    /// Verify an account's proofs from a claims CSV against a root
    VerifyClaim {
        /// Claims CSV file
        claims: PathBuf,

        /// Account to verify (base58)
        #[arg(short, long)]
        account: String,

        /// Merkle root (hex string)
        #[arg(short, long)]
        merkle_root: String,
    },

    /// Show an account's shares in a compiled split
    CheckEligibility {
        /// compiled_split.json file
        compiled: PathBuf,

        /// Account to check (base58)
        #[arg(short, long)]
        account: String,

        /// Window balance to preview payouts from
        #[arg(short, long, default_value = "0")]
        balance: u64,
    },

    /// Run a split described by a YAML config offline, without a cluster
    Simulate {
        /// Split configuration file
        config: PathBuf,

        /// Write a JSON report here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateAllocations {
            count,
            seed,
            scale,
            indexed,
            output,
        } => commands::generate_allocations::execute(count, seed, scale, indexed, output),

        Commands::CompileSplit {
            allocations,
            factory,
            scale,
            output_dir,
        } => commands::compile_split::execute(allocations, factory, scale, output_dir),

        Commands::SplitAddress {
            factory,
            merkle_root,
        } => commands::split_address::execute(factory, merkle_root),

        Commands::VerifyClaim {
            claims,
            account,
            merkle_root,
        } => commands::verify_claim::execute(claims, account, merkle_root),

        Commands::CheckEligibility {
            compiled,
            account,
            balance,
        } => commands::check_eligibility::execute(compiled, account, balance),

        Commands::Simulate { config, output } => commands::simulate::execute(config, output),
    }
}
