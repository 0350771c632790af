/*!
# Share Previews

Human-readable view of what each recipient of a compiled split would receive from
a given balance. Payout amounts come from the same scaler the split uses, so the
preview never disagrees with an actual claim; percentages use `rust_decimal` for
display only.
*/

use rust_decimal::prelude::*;
use solana_pubkey::Pubkey;
use split_protocol::scale_amount;

use crate::{CompiledSplit, SdkError, SdkResult};

/// Allocation as a percentage of `scale`, rounded to four decimal places.
pub fn allocation_percent(allocation: u64, scale: u64) -> SdkResult<Decimal> {
    if scale == 0 {
        return Err(SdkError::InvalidScale);
    }
    let percent = Decimal::from(allocation)
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(rust_decimal::Error::ExceedsMaximumPossibleValue)?
        .checked_div(Decimal::from(scale))
        .ok_or(rust_decimal::Error::ExceedsMaximumPossibleValue)?;
    Ok(percent.round_dp(4))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePreview {
    pub index: Option<u64>,
    pub account: Pubkey,
    pub allocation: u64,
    pub percent: Decimal,
    pub amount: u64,
}

/// What every leaf would be paid from a window holding `balance`.
pub fn preview_payouts(split: &CompiledSplit, balance: u64) -> SdkResult<Vec<SharePreview>> {
    split
        .claims
        .iter()
        .map(|claim| {
            Ok(SharePreview {
                index: claim.index,
                account: claim.account,
                allocation: claim.allocation,
                percent: allocation_percent(claim.allocation, split.scale)?,
                amount: scale_amount(claim.allocation, balance, split.scale)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile_split;
    use split_protocol_csvs::{AllocationCsvRow, AllocationRows};

    #[test]
    fn test_allocation_percent() {
        assert_eq!(allocation_percent(100_000, 1_000_000).unwrap(), dec!(10));
        assert_eq!(allocation_percent(1, 3).unwrap(), dec!(33.3333));
        assert!(matches!(
            allocation_percent(1, 0),
            Err(SdkError::InvalidScale)
        ));
    }

    #[test]
    fn test_preview_never_exceeds_balance() {
        let rows = AllocationRows::V1(
            (0..3)
                .map(|_| AllocationCsvRow {
                    account: Pubkey::new_unique(),
                    allocation: 1,
                })
                .collect(),
        );
        let compiled = compile_split(Pubkey::new_unique(), &rows, 3).unwrap();

        let previews = preview_payouts(&compiled, 100).unwrap();
        assert!(previews.iter().all(|p| p.amount == 33));
        assert!(previews.iter().map(|p| p.amount).sum::<u64>() <= 100);
        assert!(previews.iter().all(|p| p.percent == dec!(33.3333)));
    }
}
