use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::InstructionData as _;
use split_protocol::{SplitSetup, TokenClaim};

use crate::{AddressFinder, CompiledClaim, CompiledSplit, SdkResult};

pub fn build_create_split_v0_ix(
    address_finder: &AddressFinder,
    creator: Pubkey,
    merkle_root: [u8; 32],
    setup: SplitSetup,
    metadata: String,
) -> SdkResult<(
    Instruction,
    split_protocol::accounts::CreateSplitV0,
    split_protocol::instruction::CreateSplitV0,
)> {
    let (split, _) = address_finder.find_split_v0_address(&merkle_root);

    let ix_accounts = split_protocol::accounts::CreateSplitV0 {
        creator,
        split,
        system_program: address_finder.system_program_id,
    };

    let ix_data = split_protocol::instruction::CreateSplitV0 {
        merkle_root,
        salt: split_protocol::split_salt(&merkle_root),
        setup,
        metadata,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_increment_window_v0_ix(
    address_finder: &AddressFinder,
    caller: Pubkey,
    split: Pubkey,
) -> SdkResult<(
    Instruction,
    split_protocol::accounts::IncrementWindowV0,
    split_protocol::instruction::IncrementWindowV0,
)> {
    let ix_accounts = split_protocol::accounts::IncrementWindowV0 {
        caller,
        split,
        system_program: address_finder.system_program_id,
    };

    let ix_data = split_protocol::instruction::IncrementWindowV0 {};

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

/// `recipient_wrapped_account` is only needed when the recipient may refuse lamports
/// under `TransferPolicy::WrapNative`.
pub fn build_claim_v0_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    split: &CompiledSplit,
    claim: &CompiledClaim,
    window: u64,
    recipient_wrapped_account: Option<Pubkey>,
) -> SdkResult<(
    Instruction,
    split_protocol::accounts::ClaimV0,
    split_protocol::instruction::ClaimV0,
)> {
    let leaf = claim.leaf(split.leaf_scheme)?;
    let (claim_receipt, _) =
        address_finder.find_claim_receipt_v0_address(&split.split_address, window, &leaf.leaf_id());

    let ix_accounts = split_protocol::accounts::ClaimV0 {
        payer,
        split: split.split_address,
        recipient: leaf.account(),
        claim_receipt,
        recipient_wrapped_account,
        token_program: recipient_wrapped_account.map(|_| address_finder.token_program_id),
        system_program: address_finder.system_program_id,
    };

    let ix_data = split_protocol::instruction::ClaimV0 {
        window,
        leaf,
        proof: claim.proof.clone(),
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

/// `window_count` is the number of closed windows; one receipt per window is appended.
pub fn build_claim_for_all_windows_v0_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    split: &CompiledSplit,
    claim: &CompiledClaim,
    window_count: u64,
    recipient_wrapped_account: Option<Pubkey>,
) -> SdkResult<(
    Instruction,
    split_protocol::accounts::ClaimForAllWindowsV0,
    split_protocol::instruction::ClaimForAllWindowsV0,
)> {
    let leaf = claim.leaf(split.leaf_scheme)?;

    let ix_accounts = split_protocol::accounts::ClaimForAllWindowsV0 {
        payer,
        split: split.split_address,
        recipient: leaf.account(),
        recipient_wrapped_account,
        token_program: recipient_wrapped_account.map(|_| address_finder.token_program_id),
        system_program: address_finder.system_program_id,
    };

    let ix_data = split_protocol::instruction::ClaimForAllWindowsV0 {
        leaf,
        proof: claim.proof.clone(),
    };

    let mut accounts = ix_accounts.to_account_metas(None);
    accounts.extend(receipt_metas(
        address_finder,
        &split.split_address,
        &leaf.leaf_id(),
        window_count,
    ));

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts,
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

/// `window_count` is the number of closed windows after the optional increment.
pub fn build_increment_then_claim_all_v0_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    split: &CompiledSplit,
    claim: &CompiledClaim,
    window_count: u64,
    recipient_wrapped_account: Option<Pubkey>,
) -> SdkResult<(
    Instruction,
    split_protocol::accounts::IncrementThenClaimAllV0,
    split_protocol::instruction::IncrementThenClaimAllV0,
)> {
    let leaf = claim.leaf(split.leaf_scheme)?;

    let ix_accounts = split_protocol::accounts::IncrementThenClaimAllV0 {
        payer,
        split: split.split_address,
        recipient: leaf.account(),
        recipient_wrapped_account,
        token_program: recipient_wrapped_account.map(|_| address_finder.token_program_id),
        system_program: address_finder.system_program_id,
    };

    let ix_data = split_protocol::instruction::IncrementThenClaimAllV0 {
        leaf,
        proof: claim.proof.clone(),
    };

    let mut accounts = ix_accounts.to_account_metas(None);
    accounts.extend(receipt_metas(
        address_finder,
        &split.split_address,
        &leaf.leaf_id(),
        window_count,
    ));

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts,
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

/// Token batch covering every leaf of the split. Each recipient's associated token
/// account for `mint` is appended in claim order.
pub fn build_claim_token_for_all_v0_ix(
    address_finder: &AddressFinder,
    caller: Pubkey,
    split: &CompiledSplit,
    mint: Pubkey,
) -> SdkResult<(
    Instruction,
    split_protocol::accounts::ClaimTokenForAllV0,
    split_protocol::instruction::ClaimTokenForAllV0,
)> {
    let claims = split
        .claims
        .iter()
        .map(|claim| {
            Ok(TokenClaim {
                leaf: claim.leaf(split.leaf_scheme)?,
                proof: claim.proof.clone(),
            })
        })
        .collect::<SdkResult<Vec<_>>>()?;

    let ix_accounts = split_protocol::accounts::ClaimTokenForAllV0 {
        caller,
        split: split.split_address,
        mint,
        split_token_account: address_finder
            .find_token_account_address(&split.split_address, &mint),
        token_program: address_finder.token_program_id,
    };

    let mut accounts = ix_accounts.to_account_metas(None);
    accounts.extend(claims.iter().map(|claim| {
        AccountMeta::new(
            address_finder.find_token_account_address(&claim.leaf.account(), &mint),
            false,
        )
    }));

    let ix_data = split_protocol::instruction::ClaimTokenForAllV0 { claims };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts,
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_swap_owner_v0_ix(
    address_finder: &AddressFinder,
    caller: Pubkey,
    split: Pubkey,
    prev_owner: Pubkey,
    old_owner: Pubkey,
    new_owner: Pubkey,
) -> SdkResult<(
    Instruction,
    split_protocol::accounts::SwapOwnerV0,
    split_protocol::instruction::SwapOwnerV0,
)> {
    let ix_accounts = split_protocol::accounts::SwapOwnerV0 { caller, split };

    let ix_data = split_protocol::instruction::SwapOwnerV0 {
        prev_owner,
        old_owner,
        new_owner,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

fn receipt_metas(
    address_finder: &AddressFinder,
    split: &Pubkey,
    leaf_id: &split_protocol::LeafId,
    window_count: u64,
) -> Vec<AccountMeta> {
    address_finder
        .find_claim_receipt_v0_addresses(split, leaf_id, window_count)
        .into_iter()
        .map(|receipt| AccountMeta::new(receipt, false))
        .collect()
}
