use anchor_lang::prelude::*;

use crate::constants::{PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX};
use crate::instructions::claim_common::open_window;
use crate::state::SplitV0;

#[derive(Accounts)]
pub struct IncrementWindowV0<'info> {
    /// Pays the rent for the extra window slot.
    #[account(mut)]
    pub caller: Signer<'info>,

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

    pub system_program: Program<'info, System>,
}

/// Snapshot every unallocated lamport into a new window.
pub fn handle_increment_window_v0(ctx: Context<IncrementWindowV0>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    open_window(&accounts.caller, &mut accounts.split, &accounts.system_program)?;
    Ok(())
}
