use litesvm_token::spl_token::solana_program::native_token::LAMPORTS_PER_SOL;
use split_protocol::ErrorCode as SplitError;
use split_protocol_testing::{demand_split_error, deterministic_pubkey, TestFixture};

/// Test claiming several windows in one call
///
/// **Test flow:**
/// 1. Deploy the standard split
/// 2. Close two windows of 5 SOL each
/// 3. account3 (60%) claims all windows and receives 6 SOL
/// 4. A second claim-all finds nothing left, and so does a per-window claim
/// 5. A third window is closed and claim-all picks up only that one
#[test]
fn test_claim_for_all_windows() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    let account3 = deterministic_pubkey("account3");
    let window_amount = 5 * LAMPORTS_PER_SOL;

    // 2. Two windows
    assert_eq!(test.fund_window(&split, window_amount), 0);
    assert_eq!(test.fund_window(&split, window_amount), 1);
    assert_eq!(
        test.split_state(&split).balance_for_window,
        vec![window_amount, window_amount]
    );

    // 3. Claim all
    let paid = test
        .try_claim_for_all_windows(&compiled, &account3)
        .expect("claim-all should succeed");
    assert_eq!(paid, 6 * LAMPORTS_PER_SOL);
    assert_eq!(test.balance(&account3), 6 * LAMPORTS_PER_SOL);

    let leaf_id = compiled
        .claim_for_account(&account3)
        .unwrap()
        .leaf(compiled.leaf_scheme)
        .unwrap()
        .leaf_id();
    assert!(test.is_claimed(&split, 0, &leaf_id));
    assert!(test.is_claimed(&split, 1, &leaf_id));
    println!("✅ account3 claimed 6 SOL across two windows");

    // 4. Nothing left
    let result = test.try_claim_for_all_windows(&compiled, &account3);
    demand_split_error(result, SplitError::AlreadyClaimed);

    let result = test.try_claim(&compiled, &account3, 1);
    demand_split_error(result, SplitError::AlreadyClaimed);

    // 5. New window only
    assert_eq!(test.fund_window(&split, 10 * LAMPORTS_PER_SOL), 2);
    let paid = test
        .try_claim_for_all_windows(&compiled, &account3)
        .expect("new window should be claimable");
    assert_eq!(paid, 6 * LAMPORTS_PER_SOL);
    assert_eq!(test.balance(&account3), 12 * LAMPORTS_PER_SOL);
    assert!(test.is_claimed(&split, 2, &leaf_id));

    println!("🎉 Claim for all windows completed");
}

/// A per-window claim followed by claim-all only pays the remaining windows.
#[test]
fn test_claim_for_all_windows_skips_claimed_windows() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    let account2 = deterministic_pubkey("account2");

    test.fund_window(&split, 10 * LAMPORTS_PER_SOL);
    test.fund_window(&split, 20 * LAMPORTS_PER_SOL);

    assert_eq!(
        test.try_claim(&compiled, &account2, 1).unwrap(),
        6 * LAMPORTS_PER_SOL
    );
    assert_eq!(
        test.try_claim_for_all_windows(&compiled, &account2).unwrap(),
        3 * LAMPORTS_PER_SOL
    );
    assert_eq!(test.balance(&account2), 9 * LAMPORTS_PER_SOL);
    println!("✅ Claim-all paid only window 0");
}

/// Claim-all before any window exists is rejected.
#[test]
fn test_claim_for_all_windows_without_windows() {
    let mut test = TestFixture::new();
    let (compiled, _) = test.deploy_standard_split();
    let account1 = deterministic_pubkey("account1");

    let result = test.try_claim_for_all_windows(&compiled, &account1);
    demand_split_error(result, SplitError::InvalidWindow);
    println!("✅ Claim-all with no windows rejected");
}
