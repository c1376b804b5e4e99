//! Contains the asset-identity models shared between the pool registry and
//! its host environment.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

/// Stable identifier of an asset, supplied by the caller.
///
/// Assets are identified by an explicit runtime tag (for example `"USDC"` or
/// a fully qualified on-chain type path) rather than a reflective type
/// descriptor. The `Ord` implementation on the tag decides which asset of a
/// pair is canonically first.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a caller interacting with the registry.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(String);

impl Account {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Asset pair specified by two asset identifiers.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct AssetPair(AssetId, AssetId);

impl AssetPair {
    /// Create a new asset pair from two identifiers.
    /// The identifiers must not be equal.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> Option<Self> {
        match asset_a.cmp(&asset_b) {
            Ordering::Less => Some(Self(asset_a, asset_b)),
            Ordering::Equal => None,
            Ordering::Greater => Some(Self(asset_b, asset_a)),
        }
    }

    /// Whether `(a, b)` is already supplied in canonical order.
    ///
    /// Registration and mutable resolution require callers to pre-sort their
    /// pair; only pure lookups canonicalize on behalf of the caller.
    pub fn is_canonical_order(asset_a: &AssetId, asset_b: &AssetId) -> bool {
        asset_a < asset_b
    }

    /// Used to determine if `asset` is among the pair.
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.0 == *asset || self.1 == *asset
    }

    /// Returns the asset in the pair which is not the one passed in, or None
    /// if the asset passed in is not part of the pair.
    pub fn other(&self, asset: &AssetId) -> Option<&AssetId> {
        if &self.0 == asset {
            Some(&self.1)
        } else if &self.1 == asset {
            Some(&self.0)
        } else {
            None
        }
    }

    /// The first identifier is always the lower one.
    /// The identifiers are never equal.
    pub fn get(&self) -> (&AssetId, &AssetId) {
        (&self.0, &self.1)
    }

    /// The canonical share key for this pair.
    ///
    /// The format `LP-<first>-<second>` is stable and must be reproduced
    /// byte-exactly for persistence and lookup compatibility.
    pub fn lp_key(&self) -> String {
        format!("LP-{}-{}", self.0, self.1)
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(tag: &str) -> AssetId {
        AssetId::new(tag)
    }

    #[test]
    fn asset_pair_contains() {
        let pair = AssetPair::new(asset("AAA"), asset("BBB")).unwrap();

        assert!(pair.contains(&asset("AAA")));
        assert!(pair.contains(&asset("BBB")));
        assert!(!pair.contains(&asset("CCC")));
    }

    #[test]
    fn asset_pair_other() {
        let pair = AssetPair::new(asset("AAA"), asset("BBB")).unwrap();

        assert_eq!(pair.other(&asset("AAA")), Some(&asset("BBB")));
        assert_eq!(pair.other(&asset("BBB")), Some(&asset("AAA")));
        assert_eq!(pair.other(&asset("CCC")), None);
    }

    #[test]
    fn asset_pair_is_sorted() {
        let pair_0 = AssetPair::new(asset("AAA"), asset("BBB")).unwrap();
        let pair_1 = AssetPair::new(asset("BBB"), asset("AAA")).unwrap();
        assert_eq!(pair_0, pair_1);
        assert_eq!(pair_0.get(), pair_1.get());
        assert_eq!(pair_0.get().0, &asset("AAA"));
    }

    #[test]
    fn equal_assets_rejected() {
        assert!(AssetPair::new(asset("AAA"), asset("AAA")).is_none());
    }

    #[test]
    fn lp_key_is_order_independent() {
        let pair_0 = AssetPair::new(asset("APT"), asset("USDC")).unwrap();
        let pair_1 = AssetPair::new(asset("USDC"), asset("APT")).unwrap();
        assert_eq!(pair_0.lp_key(), "LP-APT-USDC");
        assert_eq!(pair_1.lp_key(), "LP-APT-USDC");
    }

    #[test]
    fn asset_id_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&asset("USDC")).unwrap(), "\"USDC\"");
        let parsed: AssetId = serde_json::from_str("\"USDC\"").unwrap();
        assert_eq!(parsed, asset("USDC"));
    }

    #[test]
    fn canonical_order() {
        assert!(AssetPair::is_canonical_order(&asset("AAA"), &asset("BBB")));
        assert!(!AssetPair::is_canonical_order(&asset("BBB"), &asset("AAA")));
        assert!(!AssetPair::is_canonical_order(&asset("AAA"), &asset("AAA")));
    }
}
