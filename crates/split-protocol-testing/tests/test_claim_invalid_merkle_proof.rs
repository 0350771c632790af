use split_protocol::{AllocationLeaf, ErrorCode as SplitError, LeafScheme};
use split_protocol_testing::{
    demand_split_error, deterministic_pubkey, SplitSnapshot, TestFixture, TEST_DEPOSIT,
};

/// Test that claims are bound to the committed allocations
///
/// **Test flow:**
/// 1. Deploy and fund the standard split
/// 2. Claim with an inflated allocation and a valid proof
/// 3. Claim as an account that is not in the tree
/// 4. Claim with a corrupted proof
/// 5. Claim with an indexed leaf against an account-keyed split
/// 6. Verify nothing changed
#[test]
fn test_claim_invalid_merkle_proof() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    test.fund_window(&split, TEST_DEPOSIT);

    let account1 = deterministic_pubkey("account1");
    let outsider = deterministic_pubkey("outsider");
    let claim = compiled.claim_for_account(&account1).unwrap().clone();
    let before = SplitSnapshot::capture_with_accounts(&test, &split, &[account1, outsider]);

    // 2. Inflated allocation
    let result = test.try_claim_with_leaf(
        &split,
        0,
        AllocationLeaf::v1(account1, 900_000),
        claim.proof.clone(),
    );
    demand_split_error(result, SplitError::InvalidMerkleProof);
    println!("✅ Inflated allocation rejected");

    // 3. Outsider reusing account1's proof
    let result = test.try_claim_with_leaf(
        &split,
        0,
        AllocationLeaf::v1(outsider, claim.allocation),
        claim.proof.clone(),
    );
    demand_split_error(result, SplitError::InvalidMerkleProof);
    println!("✅ Outsider rejected");

    // 4. Corrupted proof
    let mut proof = claim.proof.clone();
    proof[0][0] ^= 0xff;
    let result = test.try_claim_with_leaf(&split, 0, claim.leaf(LeafScheme::V1).unwrap(), proof);
    demand_split_error(result, SplitError::InvalidMerkleProof);
    println!("✅ Corrupted proof rejected");

    // 5. Wrong scheme
    let result = test.try_claim_with_leaf(
        &split,
        0,
        AllocationLeaf::v2(0, account1, claim.allocation),
        claim.proof.clone(),
    );
    demand_split_error(result, SplitError::LeafSchemeMismatch);
    println!("✅ Scheme mismatch rejected");

    // 6. Untouched
    let after = SplitSnapshot::capture_with_accounts(&test, &split, &[account1, outsider]);
    assert_eq!(before, after);

    println!("🎉 Invalid proofs rejected without side effects");
}
