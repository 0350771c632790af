use anchor_lang::prelude::*;

use crate::constants::{PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX};
use crate::events::OwnerSwapped;
use crate::state::SplitV0;

#[derive(Accounts)]
pub struct SwapOwnerV0<'info> {
    /// Must be a current owner; checked by the registry.
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
}

pub fn handle_swap_owner_v0(
    ctx: Context<SwapOwnerV0>,
    prev_owner: Pubkey,
    old_owner: Pubkey,
    new_owner: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    let split = &mut ctx.accounts.split;

    split
        .owners
        .swap_owner(&caller, &prev_owner, &old_owner, &new_owner)?;

    emit!(OwnerSwapped {
        split: split.key(),
        old_owner,
        new_owner,
    });
    msg!("Owner {} replaced by {}", old_owner, new_owner);

    Ok(())
}
