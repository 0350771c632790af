use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::allocation_leaf::AllocationLeaf;
use crate::constants::{PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX};
use crate::error::ErrorCode;
use crate::instructions::claim_common::{available_for_window, open_window, PayoutAccounts};
use crate::instructions::claim_for_all_windows_v0::claim_all_windows;
use crate::state::SplitV0;

/// Remaining accounts: the claim receipt PDA of every window that will be closed
/// once this instruction has run, in window order.
#[derive(Accounts)]
#[instruction(leaf: AllocationLeaf)]
pub struct IncrementThenClaimAllV0<'info> {
    /// Pays for the new window slot and any receipts created.
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

/// Close a window if new funds arrived, then claim everything owed to the leaf.
pub fn handle_increment_then_claim_all_v0<'info>(
    ctx: Context<'_, '_, '_, 'info, IncrementThenClaimAllV0<'info>>,
    leaf: AllocationLeaf,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;

    if available_for_window(&accounts.split)? > 0 {
        open_window(&accounts.payer, &mut accounts.split, &accounts.system_program)?;
    }

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
