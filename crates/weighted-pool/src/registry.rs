//! In-memory registry of weighted pools.
//!
//! The registry stores every pool under its canonical pair key, gates
//! registration behind a whitelist, and carries the global operational flags
//! (paused, fee multiplier). Administrative mutations require possession of
//! the [`AdminCap`] created together with the registry; there is no ambient
//! authority and no way to forge a second credential for the same registry.

use crate::{
    error::Error,
    liquidity::{self, ProvideOutcome},
    pool::Pool,
};
use model::{Account, AssetId, AssetPair};
use serde::Deserialize;
use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicU64, Ordering},
};

/// Inclusive lower bound on the fee multiplier, 0.1%.
pub const MIN_FEE_BPS: u64 = 10;
/// Exclusive upper bound on the fee multiplier, 10%.
pub const MAX_FEE_BPS: u64 = 1_000;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

/// Startup configuration for a registry.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Swap fee multiplier in basis points, consumed by the exchange path.
    pub fee_multiplier_bps: u64,
    /// Accounts initially permitted to register pools.
    pub whitelist: Vec<Account>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fee_multiplier_bps: 30,
            whitelist: Vec::new(),
        }
    }
}

/// Unforgeable administrative credential for one registry.
///
/// Created exactly once by [`PoolRegistry::initialize`]; deliberately not
/// `Clone`. Transferring administration means moving this value.
#[derive(Debug)]
pub struct AdminCap {
    registry_id: u64,
}

/// Keyed collection of weighted pools with registration gating and global
/// operational flags.
#[derive(Debug)]
pub struct PoolRegistry {
    id: u64,
    pools: HashMap<AssetPair, Pool>,
    whitelist: HashSet<Account>,
    paused: bool,
    fee_multiplier_bps: u64,
}

impl PoolRegistry {
    /// Creates the registry and its administrative credential.
    pub fn initialize(config: RegistryConfig) -> Result<(Self, AdminCap), Error> {
        if !fee_in_bounds(config.fee_multiplier_bps) {
            return Err(Error::FeeOutOfBounds);
        }
        let id = NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            "initialized pool registry {} with fee multiplier {} bps",
            id,
            config.fee_multiplier_bps,
        );
        Ok((
            Self {
                id,
                pools: HashMap::new(),
                whitelist: config.whitelist.into_iter().collect(),
                paused: false,
                fee_multiplier_bps: config.fee_multiplier_bps,
            },
            AdminCap { registry_id: id },
        ))
    }

    /// Registers a new pool for `(asset_x, asset_y)` under its canonical key.
    ///
    /// The caller must be whitelisted and must supply the pair already in
    /// canonical order; the weight split and decimal precisions are validated
    /// before the pool is created with zero reserves and supply.
    pub fn register(
        &mut self,
        caller: &Account,
        asset_x: AssetId,
        asset_y: AssetId,
        weight_x: u64,
        weight_y: u64,
        decimals_x: u8,
        decimals_y: u8,
    ) -> Result<AssetPair, Error> {
        if !self.whitelist.contains(caller) {
            return Err(Error::Unauthorized);
        }
        if asset_x == asset_y {
            return Err(Error::SameAsset);
        }
        if !AssetPair::is_canonical_order(&asset_x, &asset_y) {
            return Err(Error::PairMustBeOrdered);
        }
        // Equality and order were checked above.
        let pair = AssetPair::new(asset_x, asset_y).ok_or(Error::SameAsset)?;
        if self.pools.contains_key(&pair) {
            return Err(Error::PoolAlreadyRegistered);
        }

        let pool = Pool::try_new(self.id, pair.clone(), weight_x, weight_y, decimals_x, decimals_y)?;
        tracing::debug!(
            "registered pool {} with weights {}/{}",
            pair.lp_key(),
            weight_x,
            weight_y,
        );
        self.pools.insert(pair.clone(), pool);
        Ok(pair)
    }

    /// Resolves an exclusive mutable handle to the pool for the supplied
    /// pair, which must already be in canonical order.
    pub fn resolve_mut(
        &mut self,
        asset_x: &AssetId,
        asset_y: &AssetId,
    ) -> Result<&mut Pool, Error> {
        if asset_x == asset_y {
            return Err(Error::SameAsset);
        }
        if !AssetPair::is_canonical_order(asset_x, asset_y) {
            return Err(Error::PairMustBeOrdered);
        }
        let pair = AssetPair::new(asset_x.clone(), asset_y.clone()).ok_or(Error::SameAsset)?;
        self.pools.get_mut(&pair).ok_or(Error::PoolNotRegistered)
    }

    /// Pure lookup; canonicalizes the pair on behalf of the caller.
    pub fn pool(&self, asset_a: &AssetId, asset_b: &AssetId) -> Option<&Pool> {
        let pair = AssetPair::new(asset_a.clone(), asset_b.clone())?;
        self.pools.get(&pair)
    }

    /// Whether a pool exists for the pair, in either argument order.
    pub fn is_registered(&self, asset_a: &AssetId, asset_b: &AssetId) -> bool {
        self.pool(asset_a, asset_b).is_some()
    }

    /// Deposits liquidity into the pool for `(asset_x, asset_y)`.
    ///
    /// See [`liquidity`] for the full algorithm; the registry contributes the
    /// paused gate and the exclusive pool handle.
    pub fn provide(
        &mut self,
        asset_x: &AssetId,
        asset_y: &AssetId,
        amount_x_in: u64,
        min_x: u64,
        amount_y_in: u64,
        min_y: u64,
    ) -> Result<ProvideOutcome, Error> {
        if self.paused {
            return Err(Error::Paused);
        }
        let pool = self.resolve_mut(asset_x, asset_y)?;
        liquidity::provide(pool, amount_x_in, min_x, amount_y_in, min_y)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn fee_multiplier(&self) -> u64 {
        self.fee_multiplier_bps
    }

    pub fn is_whitelisted(&self, account: &Account) -> bool {
        self.whitelist.contains(account)
    }

    /// Rejects deposits until [`Self::resume`] is called.
    pub fn pause(&mut self, cap: &AdminCap) -> Result<(), Error> {
        self.check_cap(cap)?;
        self.paused = true;
        Ok(())
    }

    pub fn resume(&mut self, cap: &AdminCap) -> Result<(), Error> {
        self.check_cap(cap)?;
        self.paused = false;
        Ok(())
    }

    /// Updates the fee multiplier, bounded to `[10, 1000)` basis points.
    pub fn set_fee_multiplier(&mut self, cap: &AdminCap, fee_bps: u64) -> Result<(), Error> {
        self.check_cap(cap)?;
        if !fee_in_bounds(fee_bps) {
            return Err(Error::FeeOutOfBounds);
        }
        self.fee_multiplier_bps = fee_bps;
        Ok(())
    }

    pub fn whitelist_add(&mut self, cap: &AdminCap, account: Account) -> Result<(), Error> {
        self.check_cap(cap)?;
        self.whitelist.insert(account);
        Ok(())
    }

    pub fn whitelist_remove(&mut self, cap: &AdminCap, account: &Account) -> Result<(), Error> {
        self.check_cap(cap)?;
        self.whitelist.remove(account);
        Ok(())
    }

    fn check_cap(&self, cap: &AdminCap) -> Result<(), Error> {
        if cap.registry_id != self.id {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}

fn fee_in_bounds(fee_bps: u64) -> bool {
    (MIN_FEE_BPS..MAX_FEE_BPS).contains(&fee_bps)
}
