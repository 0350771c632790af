use litesvm_token::spl_token::solana_program::native_token::LAMPORTS_PER_SOL;
use split_protocol::{ErrorCode as SplitError, LeafScheme};
use split_protocol_testing::{demand_split_error, deterministic_pubkey, TestFixture};

/// Test splits keyed by leaf index, where one account may hold several leaves
///
/// **Test flow:**
/// 1. Compile a scheme v2 split where alice holds leaves 0 and 2
/// 2. Deploy, fund and close a window
/// 3. Each leaf claims independently
/// 4. Verify alice received both shares and a leaf cannot claim twice
#[test]
fn test_indexed_allocations() {
    let mut test = TestFixture::new();
    let alice = deterministic_pubkey("alice");
    let bob = deterministic_pubkey("bob");
    let deposit = 4 * LAMPORTS_PER_SOL;

    // 1. Compile
    let compiled = test.compile_indexed(&[(alice, 250_000), (bob, 500_000), (alice, 250_000)]);
    assert_eq!(compiled.leaf_scheme, LeafScheme::V2);
    assert_eq!(compiled.claims_for_account(&alice).len(), 2);

    // 2. Deploy
    let split = test.deploy(&compiled).unwrap();
    assert_eq!(test.split_state(&split).leaf_scheme, LeafScheme::V2);
    test.fund_window(&split, deposit);

    // 3. Claim each leaf
    for claim in compiled.claims.clone() {
        let paid = test
            .try_claim_leaf(&compiled, &claim, 0)
            .expect("each leaf should claim once");
        assert_eq!(paid, claim.allocation * deposit / 1_000_000);

        // 4. Once per leaf
        let result = test.try_claim_leaf(&compiled, &claim, 0);
        demand_split_error(result, SplitError::AlreadyClaimed);

        let leaf_id = claim.leaf(LeafScheme::V2).unwrap().leaf_id();
        assert!(test.is_claimed(&split, 0, &leaf_id));
    }

    assert_eq!(test.balance(&alice), 2 * LAMPORTS_PER_SOL);
    assert_eq!(test.balance(&bob), 2 * LAMPORTS_PER_SOL);
    assert_eq!(test.split_state(&split).paid_from_windows, deposit);

    println!("🎉 Indexed leaves claimed independently");
}

/// An account-keyed leaf cannot claim against an indexed split.
#[test]
fn test_indexed_split_rejects_account_leaves() {
    let mut test = TestFixture::new();
    let alice = deterministic_pubkey("alice");
    let compiled = test.compile_indexed(&[(alice, 1_000_000)]);
    let split = test.deploy(&compiled).unwrap();
    test.fund_window(&split, LAMPORTS_PER_SOL);

    let claim = compiled.claim_for_account(&alice).unwrap();
    let result = test.try_claim_with_leaf(
        &split,
        0,
        claim.leaf(LeafScheme::V1).unwrap(),
        claim.proof.clone(),
    );
    demand_split_error(result, SplitError::LeafSchemeMismatch);
}
