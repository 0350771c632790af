use std::collections::HashMap;

use solana_pubkey::Pubkey;

use crate::TestFixture;

/// Split state for before/after comparisons
///
/// Captures:
/// - The split's lamports and window bookkeeping
/// - Owners
/// - Balances of any accounts the test cares about
///
/// **Use cases:**
/// - Verify a failed operation changed nothing
/// - Verify a claim moved exactly the expected amounts
#[derive(Clone, PartialEq)]
pub struct SplitSnapshot {
    pub split_balance: u64,
    pub balance_for_window: Vec<u64>,
    pub deposited_in_windows: u64,
    pub paid_from_windows: u64,
    pub owners: Vec<Pubkey>,
    pub tracked_accounts: HashMap<Pubkey, u64>,
}

impl std::fmt::Debug for SplitSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let owners: Vec<String> = self.owners.iter().map(Pubkey::to_string).collect();
        f.debug_struct("SplitSnapshot")
            .field("split_balance", &self.split_balance)
            .field("balance_for_window", &self.balance_for_window)
            .field("deposited_in_windows", &self.deposited_in_windows)
            .field("paid_from_windows", &self.paid_from_windows)
            .field("owners", &owners)
            .field("tracked_accounts", &self.tracked_accounts)
            .finish()
    }
}

/// An expected balance movement between two snapshots.
#[derive(Debug, Clone, Copy)]
pub enum AccountChange {
    Split { delta: i128 },
    Account { pubkey: Pubkey, delta: i128 },
}

impl SplitSnapshot {
    pub fn capture(test: &TestFixture, split: &Pubkey) -> Self {
        Self::capture_with_accounts(test, split, &[])
    }

    pub fn capture_with_accounts(test: &TestFixture, split: &Pubkey, accounts: &[Pubkey]) -> Self {
        let state = test.split_state(split);
        Self {
            split_balance: test.balance(split),
            balance_for_window: state.balance_for_window.clone(),
            deposited_in_windows: state.deposited_in_windows,
            paid_from_windows: state.paid_from_windows,
            owners: state.owners.owners().to_vec(),
            tracked_accounts: accounts
                .iter()
                .map(|account| (*account, test.balance(account)))
                .collect(),
        }
    }

    pub fn tracked_balance(&self, account: &Pubkey) -> u64 {
        self.tracked_accounts.get(account).copied().unwrap_or(0)
    }

    pub fn total_tracked(&self) -> u128 {
        self.tracked_accounts.values().map(|b| u128::from(*b)).sum()
    }

    /// Window funds not yet paid out.
    pub fn outstanding(&self) -> u64 {
        self.deposited_in_windows - self.paid_from_windows
    }

    /// Assert that exactly these movements happened between `self` and `after`.
    /// Tracked accounts not listed must be unchanged.
    pub fn assert_changes(&self, after: &Self, expected_changes: &[AccountChange]) {
        let mut expected_split = 0i128;
        let mut expected_accounts: HashMap<Pubkey, i128> = HashMap::new();
        for change in expected_changes {
            match change {
                AccountChange::Split { delta } => expected_split += delta,
                AccountChange::Account { pubkey, delta } => {
                    *expected_accounts.entry(*pubkey).or_insert(0) += delta
                }
            }
        }

        let split_delta = i128::from(after.split_balance) - i128::from(self.split_balance);
        assert_eq!(split_delta, expected_split, "Split balance delta mismatch");

        for account in self.tracked_accounts.keys() {
            let delta =
                i128::from(after.tracked_balance(account)) - i128::from(self.tracked_balance(account));
            let expected = expected_accounts.get(account).copied().unwrap_or(0);
            assert_eq!(delta, expected, "Account {} delta mismatch", account);
        }
    }
}
