use litesvm_token::spl_token::solana_program::native_token::LAMPORTS_PER_SOL;
use split_protocol::ErrorCode as SplitError;
use split_protocol_testing::{demand_split_error, deterministic_pubkey, TestFixture};

/// Test a split whose allocations are expressed out of 100 instead of the default scale
///
/// **Test flow:**
/// 1. Compile allocations 10 / 30 / 60 with scale 100 and deploy
/// 2. Close a window of 100 lamports; a claims 10
/// 3. Replaying a's claim fails with AlreadyClaimed
/// 4. Close a second window of 100; b claims all windows and receives 60
#[test]
fn test_custom_scale() {
    let mut test = TestFixture::new();
    let a = deterministic_pubkey("scale_a");
    let b = deterministic_pubkey("scale_b");
    let c = deterministic_pubkey("scale_c");

    // Rent-exempt recipients accept payouts this small
    for account in [a, b, c] {
        test.airdrop(&account, LAMPORTS_PER_SOL);
    }

    // 1. Compile and deploy
    let compiled = test.compile_with_scale(&[(a, 10), (b, 30), (c, 60)], 100);
    assert_eq!(compiled.scale, 100);
    let split = test.deploy(&compiled).unwrap();
    assert_eq!(test.split_state(&split).scale, 100);

    // 2. Window 0
    assert_eq!(test.fund_window(&split, 100), 0);
    assert_eq!(test.try_claim(&compiled, &a, 0).unwrap(), 10);
    println!("✅ a received 10 of 100");

    // 3. Replay
    let result = test.try_claim(&compiled, &a, 0);
    demand_split_error(result, SplitError::AlreadyClaimed);

    // 4. Window 1, then b claims both
    assert_eq!(test.fund_window(&split, 100), 1);
    assert_eq!(test.try_claim_for_all_windows(&compiled, &b).unwrap(), 60);
    assert_eq!(test.balance(&b), LAMPORTS_PER_SOL + 60);

    let state = test.split_state(&split);
    assert_eq!(state.balance_for_window, vec![100, 100]);
    assert_eq!(state.paid_from_windows, 70);

    println!("🎉 Scale 100 split verified");
}

/// Allocations that do not add up to the scale never compile.
#[test]
fn test_custom_scale_rejects_mismatched_total() {
    let test = TestFixture::new();
    let rows = split_protocol_csvs::AllocationRows::V1(vec![
        split_protocol_csvs::AllocationCsvRow {
            account: deterministic_pubkey("scale_a"),
            allocation: 10,
        },
        split_protocol_csvs::AllocationCsvRow {
            account: deterministic_pubkey("scale_b"),
            allocation: 30,
        },
    ]);
    let result = split_protocol_sdk::compile_split(test.address_finder.program_id, &rows, 100);
    assert!(result.is_err());
    println!("✅ Allocations summing to 40 of 100 rejected");
}
