use solana_signer::Signer as _;
use split_protocol::{ErrorCode as SplitError, SENTINEL_OWNERS};
use split_protocol_testing::{demand_split_error, standard_allocations, TestFixture};

/// Test replacing owners in place
///
/// **Test flow:**
/// 1. Deploy a split owned by [creator, second]
/// 2. Reject swaps from non-owners and with bad arguments
/// 3. creator swaps second for third
/// 4. third swaps creator out using the sentinel as predecessor
/// 5. Verify order, membership and that the removed owner lost its rights
#[test]
fn test_owner_swap() {
    let mut test = TestFixture::new();
    let creator = test.creator.insecure_clone();
    let second = test.funded_keypair("second_owner");
    let third = test.funded_keypair("third_owner");
    let fourth = test.funded_keypair("fourth_owner");
    let stranger = test.funded_keypair("stranger");

    // 1. Two owners
    let compiled = test.compile(&standard_allocations());
    let mut setup = test.default_setup(&compiled);
    setup.owners = vec![creator.pubkey(), second.pubkey()];
    let split = test.try_deploy(&compiled, setup).unwrap();
    assert_eq!(
        test.split_state(&split).owners.owners(),
        &[creator.pubkey(), second.pubkey()]
    );

    // 2. Rejections
    let result = test.try_swap_owner(
        &split,
        &stranger,
        &creator.pubkey(),
        &second.pubkey(),
        &third.pubkey(),
    );
    demand_split_error(result, SplitError::NotAnOwner);

    let result = test.try_swap_owner(
        &split,
        &creator,
        &creator.pubkey(),
        &second.pubkey(),
        &creator.pubkey(),
    );
    demand_split_error(result, SplitError::DuplicateOwner);

    let result = test.try_swap_owner(
        &split,
        &creator,
        &creator.pubkey(),
        &second.pubkey(),
        &SENTINEL_OWNERS,
    );
    demand_split_error(result, SplitError::InvalidOwner);

    let result = test.try_swap_owner(
        &split,
        &creator,
        &creator.pubkey(),
        &stranger.pubkey(),
        &third.pubkey(),
    );
    demand_split_error(result, SplitError::NotAnOwner);

    let result = test.try_swap_owner(
        &split,
        &creator,
        &SENTINEL_OWNERS,
        &second.pubkey(),
        &third.pubkey(),
    );
    demand_split_error(result, SplitError::InvalidPrevOwner);
    println!("✅ Invalid swaps rejected");

    // 3. Swap second -> third
    test.try_swap_owner(
        &split,
        &creator,
        &creator.pubkey(),
        &second.pubkey(),
        &third.pubkey(),
    )
    .expect("swap should succeed");
    assert_eq!(
        test.split_state(&split).owners.owners(),
        &[creator.pubkey(), third.pubkey()]
    );

    // 4. Swap creator -> fourth, called by the new owner
    test.try_swap_owner(
        &split,
        &third,
        &SENTINEL_OWNERS,
        &creator.pubkey(),
        &fourth.pubkey(),
    )
    .expect("swap of the first owner should succeed");

    // 5. Final set
    let owners = test.split_state(&split).owners;
    assert_eq!(owners.owners(), &[fourth.pubkey(), third.pubkey()]);
    assert!(!owners.is_owner(&creator.pubkey()));
    assert!(!owners.is_owner(&second.pubkey()));

    let result = test.try_swap_owner(
        &split,
        &creator,
        &fourth.pubkey(),
        &third.pubkey(),
        &second.pubkey(),
    );
    demand_split_error(result, SplitError::NotAnOwner);

    println!("🎉 Owner swaps verified");
}
