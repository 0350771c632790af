use litesvm_token::spl_token::solana_program::native_token::LAMPORTS_PER_SOL;
use solana_signer::Signer as _;
use spl_token::native_mint;
use split_protocol::{ErrorCode as SplitError, TransferPolicy};
use split_protocol_sdk::build_claim_v0_ix;
use split_protocol_testing::{
    demand_split_error, deterministic_keypair, deterministic_pubkey, standard_allocations,
    AccountChange, SplitSnapshot, TestFixture, TEST_MINT_DECIMALS,
};

/// Small enough that a fresh account1 (10%) cannot hold its share rent-exempt.
const SMALL_DEPOSIT: u64 = 1_000_000;
const ACCOUNT1_SHARE: u64 = SMALL_DEPOSIT / 10;

/// Test the default policy: a refused native payout is delivered as wrapped tokens
///
/// **Test flow:**
/// 1. Deploy the standard split and close a small window
/// 2. Create account1's wrapped-native token account
/// 3. account1 claims window 0; its system account refuses the lamports
/// 4. Verify account1 holds wrapped tokens and the claim is recorded
#[test]
fn test_refused_payout_is_wrapped() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    test.fund_window(&split, SMALL_DEPOSIT);

    let account1 = deterministic_pubkey("account1");
    assert!(ACCOUNT1_SHARE < test.rent_minimum(0));

    // 2. Wrapped-native account
    let wrapped = test.create_wrapped_native_account(&account1);
    assert_eq!(test.token_balance(&account1, &native_mint::ID), 0);

    // 3. Claim
    let before = SplitSnapshot::capture_with_accounts(&test, &split, &[account1, wrapped]);
    let paid = test
        .try_claim(&compiled, &account1, 0)
        .expect("claim should succeed through wrapping");
    assert_eq!(paid, 0, "no lamports reach the refusing account");

    // 4. Wrapped instead
    let after = SplitSnapshot::capture_with_accounts(&test, &split, &[account1, wrapped]);
    before.assert_changes(
        &after,
        &[
            AccountChange::Split {
                delta: -(ACCOUNT1_SHARE as i128),
            },
            AccountChange::Account {
                pubkey: wrapped,
                delta: ACCOUNT1_SHARE as i128,
            },
        ],
    );
    assert_eq!(
        test.token_balance(&account1, &native_mint::ID),
        ACCOUNT1_SHARE
    );
    assert_eq!(after.paid_from_windows, ACCOUNT1_SHARE);

    let leaf_id = compiled
        .claim_for_account(&account1)
        .unwrap()
        .leaf(compiled.leaf_scheme)
        .unwrap()
        .leaf_id();
    assert!(test.is_claimed(&split, 0, &leaf_id));

    println!("🎉 Refused payout delivered as wrapped tokens");
}

/// Without a wrapped-native account the fallback cannot run and the claim reverts.
#[test]
fn test_refused_payout_without_wrapped_account() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    test.fund_window(&split, SMALL_DEPOSIT);

    let account1 = deterministic_pubkey("account1");
    let before = SplitSnapshot::capture_with_accounts(&test, &split, &[account1]);
    let result = test.try_claim(&compiled, &account1, 0);
    demand_split_error(result, SplitError::TransferFailed);

    let after = SplitSnapshot::capture_with_accounts(&test, &split, &[account1]);
    assert_eq!(before, after, "Reverted claim must leave no trace");
    println!("✅ Claim reverted when wrapping is unavailable");
}

/// The fallback account must hold wrapped native value and belong to the recipient.
#[test]
fn test_refused_payout_rejects_foreign_token_account() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    test.fund_window(&split, SMALL_DEPOSIT);

    let account1 = deterministic_pubkey("account1");
    let mint = deterministic_keypair("other_mint");
    test.create_mint(&mint, TEST_MINT_DECIMALS).unwrap();
    let wrong_mint_account = test.create_token_account(&account1, &mint.pubkey());
    let someone_elses_wrapped =
        test.create_wrapped_native_account(&deterministic_pubkey("account2"));

    let claim = compiled.claim_for_account(&account1).unwrap();
    for token_account in [wrong_mint_account, someone_elses_wrapped] {
        let (ix, _, _) = build_claim_v0_ix(
            &test.address_finder,
            test.payer.pubkey(),
            &compiled,
            claim,
            0,
            Some(token_account),
        )
        .unwrap();
        let result = test.send_instructions(&[ix]);
        demand_split_error(result, SplitError::TokenAccountMismatch);
    }
    println!("✅ Foreign token accounts rejected");
}

/// Test the strict policy: a refused native payout reverts the claim
///
/// **Test flow:**
/// 1. Deploy the standard split with the RevertClaim policy
/// 2. account1 claims a share it cannot hold rent-exempt
/// 3. Verify TransferFailed and no state change, even with a wrapped account present
/// 4. Once account1 is rent-exempt the same claim succeeds
#[test]
fn test_refused_payout_reverts_claim() {
    let mut test = TestFixture::new();
    let compiled = test.compile(&standard_allocations());
    let setup = test
        .default_setup(&compiled)
        .with_transfer_policy(TransferPolicy::RevertClaim);
    let split = test.try_deploy(&compiled, setup).unwrap();
    test.fund_window(&split, SMALL_DEPOSIT);

    let account1 = deterministic_pubkey("account1");
    test.create_wrapped_native_account(&account1);

    // 2-3. Refused
    let before = SplitSnapshot::capture_with_accounts(&test, &split, &[account1]);
    let result = test.try_claim(&compiled, &account1, 0);
    demand_split_error(result, SplitError::TransferFailed);
    let after = SplitSnapshot::capture_with_accounts(&test, &split, &[account1]);
    assert_eq!(before, after, "Reverted claim must leave no trace");
    assert_eq!(test.token_balance(&account1, &native_mint::ID), 0);
    println!("✅ Refused payout reverted the claim");

    // 4. Retry
    test.airdrop(&account1, LAMPORTS_PER_SOL);
    assert_eq!(test.try_claim(&compiled, &account1, 0).unwrap(), ACCOUNT1_SHARE);
    println!("🎉 Claim succeeded after the recipient became rent-exempt");
}
