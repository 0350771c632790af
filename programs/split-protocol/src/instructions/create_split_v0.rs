use anchor_lang::prelude::*;

use crate::constants::{MAX_METADATA_LEN, PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX};
use crate::error::ErrorCode;
use crate::events::SplitCreated;
use crate::factory::split_salt;
use crate::owners::OwnerRegistry;
use crate::state::{SplitSetup, SplitV0};

#[derive(Accounts)]
#[instruction(
    merkle_root: [u8; 32],
    salt: [u8; 32], // SHA256(merkle_root), checked in the handler
)]
pub struct CreateSplitV0<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    /// A second split with the same root lands on this address and fails to init.
    #[account(
        init,
        payer = creator,
        space = SplitV0::space(0),
        seeds = [
            SPLIT_V0_SEED_PREFIX,
            salt.as_ref(),
            PROXY_CODE_HASH.as_ref(),
        ],
        bump
    )]
    pub split: Box<Account<'info, SplitV0>>,

    pub system_program: Program<'info, System>,
}

pub fn handle_create_split_v0(
    ctx: Context<CreateSplitV0>,
    merkle_root: [u8; 32],
    salt: [u8; 32],
    setup: SplitSetup,
    metadata: String,
) -> Result<()> {
    require!(salt == split_salt(&merkle_root), ErrorCode::SaltMismatch);
    require!(setup.scale > 0, ErrorCode::InvalidScale);
    require!(
        metadata.len() <= MAX_METADATA_LEN,
        ErrorCode::MetadataTooLong
    );

    let owners = OwnerRegistry::new(setup.owners)?;
    let creator = ctx.accounts.creator.key();
    let split_key = ctx.accounts.split.key();

    ctx.accounts.split.set_inner(SplitV0 {
        merkle_root,
        salt,
        creator,
        leaf_scheme: setup.leaf_scheme,
        scale: setup.scale,
        window_access: setup.window_access,
        transfer_policy: setup.transfer_policy,
        deposited_in_windows: 0,
        paid_from_windows: 0,
        owners,
        bump: ctx.bumps.split,
        balance_for_window: Vec::new(),
    });

    emit!(SplitCreated {
        split: split_key,
        factory: crate::ID,
        creator,
        merkle_root,
        metadata,
    });
    msg!("Split {} created by {}", split_key, creator);

    Ok(())
}
