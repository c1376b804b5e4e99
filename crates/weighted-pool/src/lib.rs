//! Weighted two-asset pool accounting and liquidity provisioning.
//!
//! Liquidity providers deposit two asset reserves into a pool governed by
//! fixed basis-point weights and receive a fungible share claim priced by a
//! weighted constant-value invariant. This crate implements the pool
//! registry (canonical pair identity, registration gating), the
//! reserve/weight/decimal-scaling data model, and the deposit engine that
//! decides how much of each asset is accepted, how many shares are minted,
//! and how excess deposit is refunded.
//!
//! The library has no I/O of its own; a host execution environment
//! serializes all calls into a single total order and each call either fully
//! succeeds or fully aborts.

pub mod error;
pub mod fixed_point;
pub mod liquidity;
pub mod pool;
pub mod registry;
pub mod weighted_math;

pub use error::Error;
pub use liquidity::ProvideOutcome;
pub use pool::{MAX_POOL_VALUE, MINIMUM_LIQUIDITY, Pool, PoolReserves};
pub use registry::{AdminCap, PoolRegistry, RegistryConfig};
