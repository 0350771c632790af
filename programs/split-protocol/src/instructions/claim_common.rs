use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount};
use anchor_spl::token::{self, spl_token, SyncNative, Token, TokenAccount};

use crate::allocation_leaf::LeafId;
use crate::constants::CLAIM_RECEIPT_V0_SEED_PREFIX;
use crate::error::ErrorCode;
use crate::events::{TransferNative, WindowIncremented, WrappedNativeFallback};
use crate::state::{claim_hash, ClaimReceiptV0, SplitV0, TransferPolicy};

/// Accounts a native payout may touch.
pub(crate) struct PayoutAccounts<'a, 'info> {
    pub recipient: &'a AccountInfo<'info>,
    /// Recipient's wrapped-native token account, used when the recipient refuses lamports.
    pub wrapped_account: Option<&'a Account<'info, TokenAccount>>,
    pub token_program: Option<&'a Program<'info, Token>>,
}

/// Lamports in the split above its rent-exempt minimum.
pub(crate) fn spendable_lamports(split: &AccountInfo) -> Result<u64> {
    let rent_minimum = Rent::get()?.minimum_balance(split.data_len());
    Ok(split.lamports().saturating_sub(rent_minimum))
}

/// Native value held by the split that no closed window has claimed yet.
pub(crate) fn available_for_window(split: &Account<SplitV0>) -> Result<u64> {
    let spendable = spendable_lamports(&split.to_account_info())?;
    Ok(split.available_for_window(spendable)?)
}

/// Snapshot the available balance into a new window, growing the split by one slot.
pub(crate) fn open_window<'info>(
    caller: &Signer<'info>,
    split: &mut Account<'info, SplitV0>,
    system_program: &Program<'info, System>,
) -> Result<u64> {
    split.ensure_can_increment(caller.key)?;

    // 1. Measure before the account grows
    let amount = available_for_window(split)?;
    require!(amount > 0, ErrorCode::NoFundsAvailable);

    // 2. Caller covers the rent for the new slot
    let split_info = split.to_account_info();
    let old_len = split_info.data_len();
    let new_len = old_len + std::mem::size_of::<u64>();
    let rent = Rent::get()?;
    let top_up = rent
        .minimum_balance(new_len)
        .saturating_sub(rent.minimum_balance(old_len));
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                system_program::Transfer {
                    from: caller.to_account_info(),
                    to: split_info.clone(),
                },
            ),
            top_up,
        )?;
    }
    split_info.realloc(new_len, false)?;

    // 3. Record
    let window = split.record_window(amount)?;

    emit!(WindowIncremented {
        split: split.key(),
        window,
        amount,
    });
    msg!("Window {} closed with {} lamports", window, amount);

    Ok(window)
}

/// Deliver a native payout from the split, applying its transfer policy if the
/// recipient refuses.
///
/// A recipient refuses when it is executable or would be left below the rent-exempt
/// minimum for its data. Callers must have recorded the claim before calling this.
pub(crate) fn pay_native<'info>(
    split: &Account<'info, SplitV0>,
    payout: &PayoutAccounts<'_, 'info>,
    amount: u64,
    window: Option<u64>,
) -> Result<()> {
    let split_key = split.key();
    let account = payout.recipient.key();

    if amount == 0 {
        emit!(TransferNative {
            split: split_key,
            account,
            amount,
            window,
            success: true,
        });
        return Ok(());
    }

    let split_info = split.to_account_info();
    if accepts_native(payout.recipient, amount)? {
        move_lamports(&split_info, payout.recipient, amount)?;
        emit!(TransferNative {
            split: split_key,
            account,
            amount,
            window,
            success: true,
        });
        return Ok(());
    }

    msg!("Recipient {} refused {} lamports", account, amount);
    match split.transfer_policy {
        TransferPolicy::RevertClaim => err!(ErrorCode::TransferFailed),
        TransferPolicy::WrapNative => {
            let (Some(wrapped_account), Some(token_program)) =
                (payout.wrapped_account, payout.token_program)
            else {
                return err!(ErrorCode::TransferFailed);
            };
            require!(
                wrapped_account.mint == spl_token::native_mint::ID
                    && wrapped_account.owner == account,
                ErrorCode::TokenAccountMismatch
            );

            emit!(TransferNative {
                split: split_key,
                account,
                amount,
                window,
                success: false,
            });

            let wrapped_info = wrapped_account.to_account_info();
            move_lamports(&split_info, &wrapped_info, amount)?;
            token::sync_native(CpiContext::new(
                token_program.to_account_info(),
                SyncNative {
                    account: wrapped_info,
                },
            ))?;

            emit!(WrappedNativeFallback {
                split: split_key,
                account,
                token_account: wrapped_account.key(),
                amount,
            });
            Ok(())
        }
    }
}

fn accepts_native(recipient: &AccountInfo, amount: u64) -> Result<bool> {
    if recipient.executable {
        return Ok(false);
    }
    let after = recipient
        .lamports()
        .checked_add(amount)
        .ok_or(ErrorCode::NumericOverflow)?;
    Ok(Rent::get()?.is_exempt(after, recipient.data_len()))
}

/// Debit a program-owned account and credit any other.
fn move_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    let remaining = from
        .lamports()
        .checked_sub(amount)
        .ok_or(ErrorCode::InsufficientFunds)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(ErrorCode::NumericOverflow)?;
    **from.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

/// Check that `receipt` is the claim receipt PDA for `(split, window, leaf_id)`.
/// Returns its bump and whether that window was already claimed.
pub(crate) fn inspect_claim_receipt(
    split: &Pubkey,
    receipt: &AccountInfo,
    window: u64,
    leaf_id: &LeafId,
) -> Result<(u8, bool)> {
    let claim = claim_hash(window, leaf_id);
    let (expected, bump) = Pubkey::find_program_address(
        &[CLAIM_RECEIPT_V0_SEED_PREFIX, split.as_ref(), claim.as_ref()],
        &crate::ID,
    );
    require_keys_eq!(receipt.key(), expected, ErrorCode::InvalidClaimReceipt);

    if receipt.owner != &crate::ID || receipt.data_is_empty() {
        return Ok((bump, false));
    }
    let existing = ClaimReceiptV0::try_deserialize(&mut &receipt.try_borrow_data()?[..])?;
    Ok((bump, existing.claimed))
}

/// Create the receipt PDA if needed and store `receipt_data` in it.
pub(crate) fn write_claim_receipt<'info>(
    payer: &Signer<'info>,
    receipt: &AccountInfo<'info>,
    system_program: &Program<'info, System>,
    receipt_data: &ClaimReceiptV0,
) -> Result<()> {
    if receipt.owner != &crate::ID {
        let claim = claim_hash(receipt_data.window, &receipt_data.leaf_id);
        let receipt_seeds = &[
            CLAIM_RECEIPT_V0_SEED_PREFIX,
            receipt_data.split.as_ref(),
            claim.as_ref(),
            &[receipt_data.bump],
        ];
        let signer_seeds = &[&receipt_seeds[..]];
        create_receipt_account(payer, receipt, system_program, signer_seeds)?;
    }

    let mut data = receipt.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    receipt_data.try_serialize(&mut writer)?;
    Ok(())
}

/// Same steps as an `init` constraint, including the case where someone has
/// already sent lamports to the address.
fn create_receipt_account<'info>(
    payer: &Signer<'info>,
    receipt: &AccountInfo<'info>,
    system_program: &Program<'info, System>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let space = 8 + ClaimReceiptV0::INIT_SPACE;
    let required = Rent::get()?.minimum_balance(space);
    let current = receipt.lamports();

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.to_account_info(),
                CreateAccount {
                    from: payer.to_account_info(),
                    to: receipt.clone(),
                },
                signer_seeds,
            ),
            required,
            space as u64,
            &crate::ID,
        );
    }

    let shortfall = required.saturating_sub(current);
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                system_program::Transfer {
                    from: payer.to_account_info(),
                    to: receipt.clone(),
                },
            ),
            shortfall,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Allocate {
                account_to_allocate: receipt.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Assign {
                account_to_assign: receipt.clone(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}
