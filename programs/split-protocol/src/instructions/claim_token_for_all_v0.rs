use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::allocation_leaf::AllocationLeaf;
use crate::constants::{PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX};
use crate::error::ErrorCode;
use crate::events::TransferToken;
use crate::scaler::scale_amount;
use crate::state::SplitV0;

/// One `(leaf, proof)` pair in a token batch.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenClaim {
    pub leaf: AllocationLeaf,
    pub proof: Vec<[u8; 32]>,
}

/// Remaining accounts: each claim's recipient token account for `mint`, in claim order.
#[derive(Accounts)]
pub struct ClaimTokenForAllV0<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [
            SPLIT_V0_SEED_PREFIX,
            split.salt.as_ref(),
            PROXY_CODE_HASH.as_ref(),
        ],
        bump = split.bump,
        constraint = split.is_owner(&caller.key()) @ ErrorCode::NotAnOwner,
    )]
    pub split: Box<Account<'info, SplitV0>>,

    pub mint: Box<Account<'info, Mint>>,

    /// The split's token account for `mint`.
    #[account(
        mut,
        token::mint = mint,
        token::authority = split,
    )]
    pub split_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Split the split's whole balance of `mint` across the given leaves.
///
/// Every share is computed from the balance held when the call starts. Tokens are
/// not windowed; leaves left out of the batch simply receive nothing this time.
pub fn handle_claim_token_for_all_v0<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimTokenForAllV0<'info>>,
    claims: Vec<TokenClaim>,
) -> Result<()> {
    require!(!claims.is_empty(), ErrorCode::MismatchedClaimBatch);
    require!(
        claims.len() == ctx.remaining_accounts.len(),
        ErrorCode::MismatchedClaimBatch
    );

    let split = &ctx.accounts.split;
    let mint = ctx.accounts.mint.key();
    let balance = ctx.accounts.split_token_account.amount;

    // 1. Validate the whole batch before moving anything
    let mut seen = BTreeSet::new();
    let mut payouts = Vec::with_capacity(claims.len());
    for (claim, recipient_info) in claims.iter().zip(ctx.remaining_accounts.iter()) {
        split.verify_leaf(&claim.leaf, &claim.proof)?;
        require!(
            seen.insert(claim.leaf.leaf_id()),
            ErrorCode::MismatchedClaimBatch
        );

        require_keys_eq!(
            *recipient_info.owner,
            token::ID,
            ErrorCode::TokenAccountMismatch
        );
        let recipient_account =
            TokenAccount::try_deserialize(&mut &recipient_info.try_borrow_data()?[..])?;
        require!(
            recipient_account.mint == mint && recipient_account.owner == claim.leaf.account(),
            ErrorCode::TokenAccountMismatch
        );

        let amount = scale_amount(claim.leaf.allocation(), balance, split.scale)?;
        payouts.push((recipient_info, claim.leaf, amount));
    }

    // 2. Transfer, signing as the split
    let split_key = split.key();
    let split_seeds = &[
        SPLIT_V0_SEED_PREFIX,
        split.salt.as_ref(),
        PROXY_CODE_HASH.as_ref(),
        &[split.bump],
    ];
    let signer_seeds = &[&split_seeds[..]];

    let mut total: u64 = 0;
    for (recipient_info, leaf, amount) in payouts {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.split_token_account.to_account_info(),
                    to: recipient_info.clone(),
                    authority: split.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
        emit!(TransferToken {
            split: split_key,
            mint,
            account: leaf.account(),
            amount,
            allocation: leaf.allocation(),
            success: true,
        });
        total = total.checked_add(amount).ok_or(ErrorCode::NumericOverflow)?;
    }

    msg!(
        "Distributed {} of mint {} across {} recipients",
        total,
        mint,
        claims.len()
    );

    Ok(())
}
