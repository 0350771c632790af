use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::allocation_leaf::AllocationLeaf;
use crate::constants::{PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX};
use crate::error::ErrorCode;
use crate::instructions::claim_common::{
    inspect_claim_receipt, pay_native, write_claim_receipt, PayoutAccounts,
};
use crate::state::{ClaimReceiptV0, SplitV0};

/// Remaining accounts: the claim receipt PDA of every closed window, in window order.
#[derive(Accounts)]
#[instruction(leaf: AllocationLeaf)]
pub struct ClaimForAllWindowsV0<'info> {
    /// Pays for any receipts created.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [
            SPLIT_V0_SEED_PREFIX,
            split.salt.as_ref(),
            PROXY_CODE_HASH.as_ref(),
        ],
        bump = split.bump,
    )]
    pub split: Box<Account<'info, SplitV0>>,

    /// CHECK: Only credited. Must be the account named by the leaf.
    #[account(
        mut,
        address = leaf.account() @ ErrorCode::RecipientMismatch,
    )]
    pub recipient: UncheckedAccount<'info>,

    #[account(mut)]
    pub recipient_wrapped_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

pub fn handle_claim_for_all_windows_v0<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimForAllWindowsV0<'info>>,
    leaf: AllocationLeaf,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let recipient = accounts.recipient.to_account_info();
    let payout = PayoutAccounts {
        recipient: &recipient,
        wrapped_account: accounts.recipient_wrapped_account.as_deref(),
        token_program: accounts.token_program.as_ref(),
    };
    claim_all_windows(
        &accounts.payer,
        &mut accounts.split,
        &accounts.system_program,
        &payout,
        ctx.remaining_accounts,
        &leaf,
        &proof,
    )?;
    Ok(())
}

/// Claim every closed window the leaf has not claimed yet, paying the total once.
pub(crate) fn claim_all_windows<'info>(
    payer: &Signer<'info>,
    split: &mut Account<'info, SplitV0>,
    system_program: &Program<'info, System>,
    payout: &PayoutAccounts<'_, 'info>,
    receipts: &[AccountInfo<'info>],
    leaf: &AllocationLeaf,
    proof: &[[u8; 32]],
) -> Result<u64> {
    let current_window = split.current_window();
    require!(current_window > 0, ErrorCode::InvalidWindow);
    require!(
        receipts.len() as u64 == current_window,
        ErrorCode::InvalidClaimReceipt
    );

    split.verify_leaf(leaf, proof)?;

    // 1. Collect unclaimed windows
    let split_key = split.key();
    let leaf_id = leaf.leaf_id();
    let mut unclaimed = Vec::new();
    let mut total: u64 = 0;
    for (window, receipt) in (0u64..).zip(receipts.iter()) {
        let (bump, claimed) = inspect_claim_receipt(&split_key, receipt, window, &leaf_id)?;
        if claimed {
            continue;
        }
        let amount = split.share_of_window(leaf, window)?;
        total = total.checked_add(amount).ok_or(ErrorCode::NumericOverflow)?;
        unclaimed.push((receipt, window, amount, bump));
    }
    require!(!unclaimed.is_empty(), ErrorCode::AlreadyClaimed);

    // 2. Record every claim before paying
    let claimed_at_timestamp = Clock::get()?.unix_timestamp;
    let windows = unclaimed.len();
    for (receipt, window, amount, bump) in unclaimed {
        write_claim_receipt(
            payer,
            receipt,
            system_program,
            &ClaimReceiptV0 {
                split: split_key,
                window,
                leaf_id,
                amount,
                claimed: true,
                claimed_at_timestamp,
                bump,
            },
        )?;
    }
    split.record_payout(total)?;

    // 3. Pay once
    pay_native(split, payout, total, None)?;

    msg!(
        "Claimed {} windows for {}: {} lamports",
        windows,
        leaf.account(),
        total
    );

    Ok(total)
}
