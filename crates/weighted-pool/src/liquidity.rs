//! The liquidity-provisioning engine.
//!
//! A deposit runs to completion or aborts with no partial state: every check
//! and computation happens against a staged copy of the pool, which replaces
//! the live pool only once all of them have passed.

use crate::{
    error::Error,
    pool::{MAX_POOL_VALUE, MINIMUM_LIQUIDITY, Pool},
    weighted_math,
};

/// Result of a successful deposit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProvideOutcome {
    /// Shares credited to the caller. Excludes the permanently locked
    /// minimum on the bootstrap deposit.
    pub shares_minted: u64,
    /// Amount of asset X actually absorbed into the reserves.
    pub used_x: u64,
    /// Amount of asset Y actually absorbed into the reserves.
    pub used_y: u64,
    /// Portion of the desired X amount returned to the caller unmodified.
    pub refund_x: u64,
    /// Portion of the desired Y amount returned to the caller unmodified.
    pub refund_y: u64,
}

/// Deposits up to `amount_x_in`/`amount_y_in` into `pool`, preserving its
/// weighted price.
///
/// The first deposit into an empty pool is accepted as supplied and seeds
/// the share supply from the weighted invariant, permanently locking
/// [`MINIMUM_LIQUIDITY`] shares. Steady-state deposits are trimmed to the
/// pool's current price: X is satisfied in full and Y solved for first; only
/// if the caller brought too little Y is the search retried in the other
/// direction. Unused amounts are refunded, never absorbed.
///
/// Only reachable through [`crate::registry::PoolRegistry::provide`], which
/// owns the paused gate.
pub(crate) fn provide(
    pool: &mut Pool,
    amount_x_in: u64,
    min_x: u64,
    amount_y_in: u64,
    min_y: u64,
) -> Result<ProvideOutcome, Error> {
    if amount_x_in == 0 || amount_y_in == 0 {
        return Err(Error::ZeroAmount);
    }

    let mut staged = pool.clone();
    let (weight_x, weight_y) = (staged.weight_x, staged.weight_y);
    let (scale_x, scale_y) = (staged.scaling_factor_x, staged.scaling_factor_y);

    let (optimal_x, optimal_y) = if staged.is_empty() {
        (amount_x_in, amount_y_in)
    } else {
        let candidate_y = weighted_math::optimal_counter_amount(
            amount_x_in,
            staged.reserve_x,
            weight_x,
            scale_x,
            staged.reserve_y,
            weight_y,
            scale_y,
        )?;
        if candidate_y <= amount_y_in {
            if candidate_y < min_y {
                return Err(Error::InsufficientAmountY);
            }
            (amount_x_in, candidate_y)
        } else {
            let candidate_x = weighted_math::optimal_counter_amount(
                amount_y_in,
                staged.reserve_y,
                weight_y,
                scale_y,
                staged.reserve_x,
                weight_x,
                scale_x,
            )?;
            if candidate_x > amount_x_in {
                return Err(Error::OverLimit);
            }
            if candidate_x < min_x {
                return Err(Error::InsufficientAmountX);
            }
            (candidate_x, amount_y_in)
        }
    };

    let minted = if staged.share_supply == 0 {
        let shares = weighted_math::compute_initial_shares(
            weight_x, weight_y, scale_x, scale_y, optimal_x, optimal_y,
        )?;
        if shares <= MINIMUM_LIQUIDITY {
            return Err(Error::BootstrapLiquidityTooLow);
        }
        staged.share_supply = shares;
        staged.locked_shares = MINIMUM_LIQUIDITY;
        shares - MINIMUM_LIQUIDITY
    } else {
        let x_shares = weighted_math::compute_incremental_shares(
            staged.share_supply,
            optimal_x,
            weight_x,
            weight_y,
            scale_x,
            staged.reserve_x,
        )?;
        let y_shares = weighted_math::compute_incremental_shares(
            staged.share_supply,
            optimal_y,
            weight_y,
            weight_x,
            scale_y,
            staged.reserve_y,
        )?;
        let minted = x_shares.min(y_shares);
        if minted == 0 {
            return Err(Error::InsufficientLiquidityMinted);
        }
        staged.share_supply = staged
            .share_supply
            .checked_add(minted)
            .ok_or(Error::Overflow)?;
        minted
    };
    let shares_minted = u64::try_from(minted).map_err(|_| Error::Overflow)?;

    staged.reserve_x = staged
        .reserve_x
        .checked_add(optimal_x)
        .ok_or(Error::Overflow)?;
    staged.reserve_y = staged
        .reserve_y
        .checked_add(optimal_y)
        .ok_or(Error::Overflow)?;
    if staged.reserve_x >= MAX_POOL_VALUE || staged.reserve_y >= MAX_POOL_VALUE {
        return Err(Error::PoolValueExceedsCap);
    }

    let outcome = ProvideOutcome {
        shares_minted,
        used_x: optimal_x,
        used_y: optimal_y,
        refund_x: amount_x_in - optimal_x,
        refund_y: amount_y_in - optimal_y,
    };
    tracing::debug!(
        "pool {}: minted {} shares for {}/{}, refunded {}/{}",
        staged.pair.lp_key(),
        shares_minted,
        optimal_x,
        optimal_y,
        outcome.refund_x,
        outcome.refund_y,
    );
    *pool = staged;
    Ok(outcome)
}
