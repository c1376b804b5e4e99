//! The weighted two-asset pool data model.

use crate::{error::Error, fixed_point::BPS};
use model::AssetPair;
use serde::{Deserialize, Serialize};

/// Upper bound on either reserve. Reserves stay a factor of 10_000 below the
/// integer width so downstream fee and weight multiplications cannot
/// overflow.
pub const MAX_POOL_VALUE: u64 = u64::MAX / 10_000;

/// Share quantity permanently locked on the first deposit. Prevents the
/// share supply from returning to zero and deters low-liquidity price
/// manipulation.
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Decimal precision of the common basis all reserves are normalized onto.
pub const BASE_DECIMALS: u8 = 9;

/// Returns the scaling factor `10^(9 - decimals)` writing a raw amount of an
/// asset with the given declared precision onto the common 9-decimal basis.
pub fn scaling_factor_from_decimals(decimals: u8) -> Result<u64, Error> {
    if decimals > BASE_DECIMALS {
        return Err(Error::DecimalsInvalid);
    }
    Ok(10u64.pow(u32::from(BASE_DECIMALS - decimals)))
}

/// Reserve snapshot returned by [`Pool::reserves`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PoolReserves {
    pub reserve_x: u64,
    pub reserve_y: u64,
    /// Wider than the reserve amounts on purpose: bootstrap issuance is
    /// denominated on the normalized 9-decimal basis and the accumulated
    /// supply can exceed `u64` for large-reserve pools, even though each
    /// individual mint narrows to `u64`.
    pub share_supply: u128,
}

/// One weighted two-asset reserve with its share supply.
///
/// Weights are fixed at registration and immutable afterwards; reserves and
/// the share supply are mutated only through the liquidity engine.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub(crate) registry_id: u64,
    pub(crate) pair: AssetPair,
    pub(crate) reserve_x: u64,
    pub(crate) reserve_y: u64,
    pub(crate) weight_x: u64,
    pub(crate) weight_y: u64,
    pub(crate) scaling_factor_x: u64,
    pub(crate) scaling_factor_y: u64,
    pub(crate) share_supply: u128,
    pub(crate) locked_shares: u128,
}

impl Pool {
    /// Weights must be non-zero and sum to exactly [`BPS`]: a zero-weight
    /// side would contribute `x^0 = 1` to the invariant and leave that
    /// reserve unpriced.
    pub(crate) fn try_new(
        registry_id: u64,
        pair: AssetPair,
        weight_x: u64,
        weight_y: u64,
        decimals_x: u8,
        decimals_y: u8,
    ) -> Result<Self, Error> {
        if weight_x == 0 || weight_y == 0 || weight_x.checked_add(weight_y) != Some(BPS) {
            return Err(Error::WeightsSumInvalid);
        }
        Ok(Self {
            registry_id,
            pair,
            reserve_x: 0,
            reserve_y: 0,
            weight_x,
            weight_y,
            scaling_factor_x: scaling_factor_from_decimals(decimals_x)?,
            scaling_factor_y: scaling_factor_from_decimals(decimals_y)?,
            share_supply: 0,
            locked_shares: 0,
        })
    }

    /// Identity of the owning registry.
    pub fn registry_id(&self) -> u64 {
        self.registry_id
    }

    pub fn pair(&self) -> &AssetPair {
        &self.pair
    }

    pub fn weights(&self) -> (u64, u64) {
        (self.weight_x, self.weight_y)
    }

    pub fn scaling_factors(&self) -> (u64, u64) {
        (self.scaling_factor_x, self.scaling_factor_y)
    }

    /// Shares locked out of circulation by the bootstrap deposit.
    pub fn locked_shares(&self) -> u128 {
        self.locked_shares
    }

    pub fn reserves(&self) -> PoolReserves {
        PoolReserves {
            reserve_x: self.reserve_x,
            reserve_y: self.reserve_y,
            share_supply: self.share_supply,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reserve_x == 0 && self.reserve_y == 0
    }
}
