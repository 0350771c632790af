mod split_snapshot;
mod test_fixture;

pub use split_snapshot::{AccountChange, SplitSnapshot};
pub use test_fixture::TestFixture;

use {
    anchor_lang::error::ERROR_CODE_OFFSET,
    litesvm::{types::FailedTransactionMetadata, LiteSVM},
    litesvm_token::spl_token::solana_program::native_token::LAMPORTS_PER_SOL,
    rand::Rng,
    sha2::{Digest, Sha256},
    solana_instruction::error::InstructionError,
    solana_pubkey::Pubkey,
    solana_sdk::signature::{Keypair, SeedDerivable},
    solana_signer::Signer as _,
    solana_transaction_error::TransactionError,
    split_protocol::{ErrorCode, PERCENTAGE_SCALE},
};

/// Standard test constants
pub const TEST_DEPOSIT: u64 = LAMPORTS_PER_SOL * 100;
pub const TEST_MINT_SUPPLY: u64 = 1_000_000;
pub const TEST_MINT_DECIMALS: u8 = 6;

/// Load the compiled program into the SVM. `build.rs` produces the binary.
pub fn load_split_protocol(svm: &mut LiteSVM) {
    let program_path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../target/deploy/split_protocol.so"
    );
    svm.add_program_from_file(split_protocol::ID, program_path)
        .unwrap_or_else(|e| panic!("Failed to load {program_path}: {e:?}"));
}

/// Stable keypair for a name, so tests can refer to "account1" across calls.
pub fn deterministic_keypair(identifier: &str) -> Keypair {
    let seed = Sha256::digest(identifier.as_bytes());
    Keypair::from_seed(&seed).expect("SHA256 output should always be valid seed")
}

pub fn deterministic_pubkey(identifier: &str) -> Pubkey {
    deterministic_keypair(identifier).pubkey()
}

/// Assert that a transaction failed with the given program error.
pub fn demand_split_error<T: std::fmt::Debug>(
    result: Result<T, FailedTransactionMetadata>,
    expected: ErrorCode,
) {
    let name = format!("{expected:?}");
    let expected_code = ERROR_CODE_OFFSET + expected as u32;
    demand_instruction_error(result, InstructionError::Custom(expected_code));
    println!("✅ Failed with {} ({})", name, expected_code);
}

/// Assert that a transaction failed with the given instruction error.
pub fn demand_instruction_error<T: std::fmt::Debug>(
    result: Result<T, FailedTransactionMetadata>,
    expected: InstructionError,
) {
    match result {
        Ok(value) => panic!("Expected {expected:?}, but the transaction succeeded: {value:?}"),
        Err(failed_meta) => match failed_meta.err {
            TransactionError::InstructionError(_, actual) => {
                assert_eq!(actual, expected, "Unexpected instruction error");
            }
            other => panic!("Expected {expected:?}, got: {other:?}"),
        },
    }
}

/// The 10% / 30% / 60% split used throughout the tests.
pub fn standard_allocations() -> Vec<(Pubkey, u64)> {
    vec![
        (deterministic_pubkey("account1"), 100_000),
        (deterministic_pubkey("account2"), 300_000),
        (deterministic_pubkey("account3"), 600_000),
    ]
}

/// `count` positive allocations that add up to exactly `scale`.
pub fn random_allocations<R: Rng>(rng: &mut R, count: usize, scale: u64) -> Vec<u64> {
    assert!(count > 0 && (count as u64) <= scale);

    let mut cuts: Vec<u64> = Vec::with_capacity(count + 1);
    cuts.push(0);
    while cuts.len() < count {
        let cut = rng.gen_range(1..scale);
        if !cuts.contains(&cut) {
            cuts.push(cut);
        }
    }
    cuts.push(scale);
    cuts.sort_unstable();

    cuts.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Random allocations at the default scale, keyed by fresh accounts.
pub fn random_recipients<R: Rng>(rng: &mut R, count: usize) -> Vec<(Pubkey, u64)> {
    random_allocations(rng, count, PERCENTAGE_SCALE)
        .into_iter()
        .map(|allocation| (Pubkey::new_unique(), allocation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_keypair() {
        assert_eq!(deterministic_pubkey("a"), deterministic_pubkey("a"));
        assert_ne!(deterministic_pubkey("a"), deterministic_pubkey("b"));
        assert_eq!(
            deterministic_keypair("a").pubkey(),
            deterministic_pubkey("a")
        );
    }

    #[test]
    fn test_random_allocations_sum_to_scale() {
        let mut rng = rand::thread_rng();
        for count in [1, 2, 7, 50] {
            let allocations = random_allocations(&mut rng, count, PERCENTAGE_SCALE);
            assert_eq!(allocations.len(), count);
            assert!(allocations.iter().all(|a| *a > 0));
            assert_eq!(allocations.iter().sum::<u64>(), PERCENTAGE_SCALE);
        }
    }
}
