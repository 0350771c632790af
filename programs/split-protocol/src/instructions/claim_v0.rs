use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::allocation_leaf::AllocationLeaf;
use crate::constants::{CLAIM_RECEIPT_V0_SEED_PREFIX, PROXY_CODE_HASH, SPLIT_V0_SEED_PREFIX};
use crate::error::ErrorCode;
use crate::instructions::claim_common::{pay_native, PayoutAccounts};
use crate::state::{claim_hash, ClaimReceiptV0, SplitV0};

#[derive(Accounts)]
#[instruction(window: u64, leaf: AllocationLeaf)]
pub struct ClaimV0<'info> {
    /// Pays for the claim receipt. Need not be the recipient.
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

    /// CHECK: Only credited. Must be the account named by the leaf, so a claim can
    /// never be redirected.
    #[account(
        mut,
        address = leaf.account() @ ErrorCode::RecipientMismatch,
    )]
    pub recipient: UncheckedAccount<'info>,

    /// One receipt per (window, leaf). A claimed receipt blocks replays.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ClaimReceiptV0::INIT_SPACE,
        seeds = [
            CLAIM_RECEIPT_V0_SEED_PREFIX,
            split.key().as_ref(),
            claim_hash(window, &leaf.leaf_id()).as_ref(),
        ],
        bump
    )]
    pub claim_receipt: Box<Account<'info, ClaimReceiptV0>>,

    /// Recipient's wrapped-native account, only needed under `TransferPolicy::WrapNative`.
    #[account(mut)]
    pub recipient_wrapped_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

pub fn handle_claim_v0(
    ctx: Context<ClaimV0>,
    window: u64,
    leaf: AllocationLeaf,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;

    // 1. Only closed windows can be claimed
    require!(
        window < accounts.split.current_window(),
        ErrorCode::InvalidWindow
    );

    // 2. Leaf must be committed to by the root
    accounts.split.verify_leaf(&leaf, &proof)?;

    // 3. One claim per leaf per window
    require!(!accounts.claim_receipt.claimed, ErrorCode::AlreadyClaimed);

    // 4. Share of the window snapshot
    let amount = accounts.split.share_of_window(&leaf, window)?;

    // 5. Record the claim before paying
    accounts.claim_receipt.set_inner(ClaimReceiptV0 {
        split: accounts.split.key(),
        window,
        leaf_id: leaf.leaf_id(),
        amount,
        claimed: true,
        claimed_at_timestamp: Clock::get()?.unix_timestamp,
        bump: ctx.bumps.claim_receipt,
    });
    accounts.split.record_payout(amount)?;

    // 6. Pay
    let recipient = accounts.recipient.to_account_info();
    let payout = PayoutAccounts {
        recipient: &recipient,
        wrapped_account: accounts.recipient_wrapped_account.as_deref(),
        token_program: accounts.token_program.as_ref(),
    };
    pay_native(&accounts.split, &payout, amount, Some(window))?;

    msg!(
        "Claimed window {} for {}: {} lamports",
        window,
        leaf.account(),
        amount
    );

    Ok(())
}
