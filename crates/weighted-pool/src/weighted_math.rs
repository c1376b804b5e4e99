//! Pure math for weighted two-asset pools.
//!
//! All functions take raw token amounts together with the per-asset scaling
//! factor (`10^(9 - decimals)`) and operate on the common 9-decimal basis.
//! Rounding is toward zero wherever an amount leaves the pool's favor, so
//! neither share issuance nor counter-amount computation can leak value out
//! of the pool.

use crate::{
    error::Error,
    fixed_point::{BPS, Fixed9},
};

/// Writes a raw token amount onto the common 9-decimal basis.
fn normalized(amount: u64, scaling_factor: u64) -> Result<u128, Error> {
    u128::from(amount)
        .checked_mul(u128::from(scaling_factor))
        .ok_or(Error::Overflow)
}

/// Bootstrap share issuance for the first deposit into an empty pool.
///
/// Shares are the weighted geometric mean of the normalized deposit amounts,
/// `nx^(wx/10000) · ny^(wy/10000)`, expressed in 9-decimal share units. The
/// caller must reject results at or below the locked-minimum threshold.
pub fn compute_initial_shares(
    weight_x: u64,
    weight_y: u64,
    scale_x: u64,
    scale_y: u64,
    amount_x: u64,
    amount_y: u64,
) -> Result<u128, Error> {
    if weight_x.checked_add(weight_y) != Some(BPS) {
        return Err(Error::WeightsSumInvalid);
    }

    let normalized_x = Fixed9::from_raw(normalized(amount_x, scale_x)?);
    let normalized_y = Fixed9::from_raw(normalized(amount_y, scale_y)?);

    let value_x = normalized_x.pow_frac(weight_x)?;
    let value_y = normalized_y.pow_frac(weight_y)?;
    Ok(value_x.mul_down(value_y)?.as_raw())
}

/// Proportional share issuance for a deposit into a non-empty pool.
///
/// Returns `floor(supply · normalized_amount / normalized_reserve)` for one
/// side of the deposit. The weights cancel for a price-preserving deposit
/// (the counter amount already fixes `dy/dx = ry/rx`); they remain in the
/// signature so both sides of the split stay validated at the call site.
pub fn compute_incremental_shares(
    current_supply: u128,
    amount_added: u64,
    weight_self: u64,
    weight_other: u64,
    scale_self: u64,
    reserve_self: u64,
) -> Result<u128, Error> {
    if weight_self.checked_add(weight_other) != Some(BPS) {
        return Err(Error::WeightsSumInvalid);
    }

    let amount = normalized(amount_added, scale_self)?;
    let reserve = normalized(reserve_self, scale_self)?;
    if reserve == 0 {
        return Err(Error::ZeroDivision);
    }

    Ok(current_supply.checked_mul(amount).ok_or(Error::Overflow)? / reserve)
}

/// Amount of the counter asset required to deposit `amount_self_desired`
/// without shifting the pool's weighted price.
///
/// Preserving `((ry+dy)/wy) / ((rx+dx)/wx) == (ry/wy) / (rx/wx)` reduces to
/// `dy/dx == ry/rx` on the normalized basis; the result is rounded down both
/// in the normalized domain and when scaled back to raw units.
pub fn optimal_counter_amount(
    amount_self_desired: u64,
    reserve_self: u64,
    weight_self: u64,
    scale_self: u64,
    reserve_other: u64,
    weight_other: u64,
    scale_other: u64,
) -> Result<u64, Error> {
    if weight_self.checked_add(weight_other) != Some(BPS) {
        return Err(Error::WeightsSumInvalid);
    }

    let amount = normalized(amount_self_desired, scale_self)?;
    let reserve_self = normalized(reserve_self, scale_self)?;
    let reserve_other = normalized(reserve_other, scale_other)?;
    if reserve_self == 0 {
        return Err(Error::ZeroDivision);
    }

    let counter = amount
        .checked_mul(reserve_other)
        .ok_or(Error::Overflow)?
        / reserve_self;
    u64::try_from(counter / u128::from(scale_other)).map_err(|_| Error::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed_point::ONE;

    #[test]
    fn initial_shares_even_weights_are_geometric_mean() {
        // 1.0 of a 6-decimal asset and 1.0 of a 9-decimal asset.
        let shares = compute_initial_shares(5_000, 5_000, 1_000, 1, 1_000_000, 1_000_000_000)
            .unwrap();
        assert_eq!(shares, ONE);
    }

    #[test]
    fn initial_shares_scale_with_deposit_size() {
        // 4.0 and 1.0 at even weights: sqrt(4) * sqrt(1) = 2.
        let shares = compute_initial_shares(5_000, 5_000, 1_000, 1, 4_000_000, 1_000_000_000)
            .unwrap();
        assert_eq!(shares, 2 * ONE);
    }

    #[test]
    fn initial_shares_skewed_weights() {
        // 16.0 at weight 2500 contributes 16^0.25 = 2 exactly.
        let shares = compute_initial_shares(2_500, 7_500, 1, 1, 16_000_000_000, 1_000_000_000)
            .unwrap();
        assert_eq!(shares, 2 * ONE);
    }

    #[test]
    fn initial_shares_reject_bad_weight_sum() {
        assert_eq!(
            compute_initial_shares(5_000, 4_000, 1, 1, 1, 1).unwrap_err(),
            Error::WeightsSumInvalid
        );
    }

    #[test]
    fn incremental_shares_proportional() {
        // Supply 10^9, depositing 10% of reserves mints 10% of supply.
        let shares =
            compute_incremental_shares(ONE, 100_000, 5_000, 5_000, 1_000, 1_000_000).unwrap();
        assert_eq!(shares, ONE / 10);
    }

    #[test]
    fn incremental_shares_round_down() {
        let shares = compute_incremental_shares(1_000, 1, 5_000, 5_000, 1, 3).unwrap();
        // floor(1000 * 1 / 3) = 333
        assert_eq!(shares, 333);
    }

    #[test]
    fn incremental_shares_zero_reserve_rejected() {
        assert_eq!(
            compute_incremental_shares(ONE, 1, 5_000, 5_000, 1, 0).unwrap_err(),
            Error::ZeroDivision
        );
    }

    #[test]
    fn incremental_shares_overflow_rejected() {
        assert_eq!(
            compute_incremental_shares(u128::MAX, u64::MAX, 5_000, 5_000, 1_000_000_000, 1)
                .unwrap_err(),
            Error::Overflow
        );
    }

    #[test]
    fn counter_amount_preserves_reserve_ratio() {
        // Reserves 1.0 : 1.0 across differing decimals.
        let counter =
            optimal_counter_amount(100_000, 1_000_000, 5_000, 1_000, 1_000_000_000, 5_000, 1)
                .unwrap();
        assert_eq!(counter, 100_000_000);
    }

    #[test]
    fn counter_amount_symmetric_direction() {
        let counter =
            optimal_counter_amount(100_000_000, 1_000_000_000, 5_000, 1, 1_000_000, 5_000, 1_000)
                .unwrap();
        assert_eq!(counter, 100_000);
    }

    #[test]
    fn counter_amount_rounds_down() {
        // dx=1, rx=3, ry=5 (all scale 1): floor(1 * 5 / 3) = 1.
        let counter = optimal_counter_amount(1, 3, 5_000, 1, 5, 5_000, 1).unwrap();
        assert_eq!(counter, 1);
    }

    #[test]
    fn counter_amount_zero_self_reserve_rejected() {
        assert_eq!(
            optimal_counter_amount(1, 0, 5_000, 1, 5, 5_000, 1).unwrap_err(),
            Error::ZeroDivision
        );
    }
}
