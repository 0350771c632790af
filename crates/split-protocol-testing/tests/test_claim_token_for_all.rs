use anchor_lang::InstructionData as _;
use solana_instruction::AccountMeta;
use solana_keypair::Keypair;
use solana_signer::Signer as _;
use split_protocol::ErrorCode as SplitError;
use split_protocol_sdk::{build_claim_token_for_all_v0_ix, CompiledSplit};
use split_protocol_testing::{
    demand_split_error, deterministic_keypair, deterministic_pubkey, SplitSnapshot, TestFixture,
    TEST_MINT_DECIMALS, TEST_MINT_SUPPLY,
};

/// Mint `TEST_MINT_SUPPLY` into the split's token account and create every
/// recipient's token account.
fn fund_split_with_tokens(test: &mut TestFixture, compiled: &CompiledSplit) -> Keypair {
    let mint = deterministic_keypair("reward_mint");
    test.create_mint(&mint, TEST_MINT_DECIMALS)
        .expect("Mint creation should succeed");

    let split_token_account = test.create_token_account(&compiled.split_address, &mint.pubkey());
    test.mint_to(&mint.pubkey(), &split_token_account, TEST_MINT_SUPPLY)
        .expect("Minting to the split should succeed");

    for claim in &compiled.claims {
        test.create_token_account(&claim.account, &mint.pubkey());
    }
    mint
}

/// Test distributing a token balance across all leaves at once
///
/// **Test flow:**
/// 1. Deploy the standard split and mint tokens to it
/// 2. A non-owner cannot distribute
/// 3. The owner distributes the whole batch
/// 4. Verify shares and that native balances are untouched
#[test]
fn test_claim_token_for_all() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    let owner = test.creator.insecure_clone();

    // 1. Mint
    let mint = fund_split_with_tokens(&mut test, &compiled).pubkey();
    assert_eq!(test.token_balance(&split, &mint), TEST_MINT_SUPPLY);

    // 2. Non-owner
    let account1 = test.funded_keypair("account1");
    let result = test.try_claim_token_for_all(&compiled, &account1, &mint);
    demand_split_error(result, SplitError::NotAnOwner);
    println!("✅ Non-owner rejected");

    // 3. Owner
    let before = SplitSnapshot::capture(&test, &split);
    test.try_claim_token_for_all(&compiled, &owner, &mint)
        .expect("owner distribution should succeed");

    // 4. Shares
    for (name, share) in [("account1", 100_000), ("account2", 300_000), ("account3", 600_000)] {
        let account = deterministic_pubkey(name);
        assert_eq!(test.token_balance(&account, &mint), share);
    }
    assert_eq!(test.token_balance(&split, &mint), 0);

    let after = SplitSnapshot::capture(&test, &split);
    assert_eq!(before, after, "Token batches must not touch native accounting");

    println!("🎉 Token batch distributed");
}

/// Batches must be non-empty, name each leaf once and pay the leaf's own token account.
#[test]
fn test_claim_token_for_all_rejects_bad_batches() {
    let mut test = TestFixture::new();
    let (compiled, split) = test.deploy_standard_split();
    let owner = test.creator.insecure_clone();
    let mint = fund_split_with_tokens(&mut test, &compiled).pubkey();

    let (template, accounts, data) =
        build_claim_token_for_all_v0_ix(&test.address_finder, owner.pubkey(), &compiled, mint)
            .unwrap();
    let fixed_accounts = template.accounts.len() - compiled.claims.len();
    let token_account_metas: Vec<AccountMeta> = compiled
        .claims
        .iter()
        .map(|claim| {
            AccountMeta::new(
                test.address_finder
                    .find_token_account_address(&claim.account, &mint),
                false,
            )
        })
        .collect();

    // Empty batch
    let mut empty = template.clone();
    empty.accounts.truncate(fixed_accounts);
    empty.data = split_protocol::instruction::ClaimTokenForAllV0 { claims: vec![] }.data();
    let result = test.send_instructions_with_signers(&[empty], &[&owner]);
    demand_split_error(result, SplitError::MismatchedClaimBatch);

    // The same leaf twice
    let first = data.claims[0].clone();
    let mut duplicated = template.clone();
    duplicated.accounts.truncate(fixed_accounts);
    duplicated.accounts.push(token_account_metas[0].clone());
    duplicated.accounts.push(token_account_metas[0].clone());
    duplicated.data = split_protocol::instruction::ClaimTokenForAllV0 {
        claims: vec![first.clone(), first],
    }
    .data();
    let result = test.send_instructions_with_signers(&[duplicated], &[&owner]);
    demand_split_error(result, SplitError::MismatchedClaimBatch);

    // The first leaf's share routed to the second leaf's token account
    let mut redirected = template;
    redirected.accounts[fixed_accounts] = token_account_metas[1].clone();
    let result = test.send_instructions_with_signers(&[redirected], &[&owner]);
    demand_split_error(result, SplitError::TokenAccountMismatch);

    assert_eq!(accounts.split, split);
    assert_eq!(test.token_balance(&split, &mint), TEST_MINT_SUPPLY);
    println!("✅ Bad batches rejected");
}
