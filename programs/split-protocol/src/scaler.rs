use crate::error::{ErrorCode, SplitResult};

/// Scale a balance by an allocation: `allocation * balance / scale`, rounded down.
///
/// The product is formed in `u128` so it cannot overflow. Any remainder stays with
/// the payer. For allocations summing to `scale`, the scaled amounts never exceed
/// `balance` in total.
pub fn scale_amount(allocation: u64, balance: u64, scale: u64) -> SplitResult<u64> {
    if scale == 0 {
        return Err(ErrorCode::InvalidScale);
    }
    let scaled = u128::from(allocation) * u128::from(balance) / u128::from(scale);
    u64::try_from(scaled).map_err(|_| ErrorCode::NumericOverflow)
}

/// Check that a set of allocations adds up to exactly `scale`.
pub fn validate_allocations<I>(allocations: I, scale: u64) -> SplitResult<()>
where
    I: IntoIterator<Item = u64>,
{
    if scale == 0 {
        return Err(ErrorCode::InvalidScale);
    }
    let total: u128 = allocations.into_iter().map(u128::from).sum();
    if total != u128::from(scale) {
        return Err(ErrorCode::InvalidAllocationTotal);
    }
    Ok(())
}
