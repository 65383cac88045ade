//! Asset selectors.
//!
//! A promise accepts donations in exactly one asset: either the platform's
//! native value, or one fungible asset identified by an [`AssetId`] on the
//! external asset ledger. The selector is fixed when the promise is created
//! and never changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a fungible asset on the external asset ledger.
///
/// Opaque to the engine; only the ledger knows what it denotes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    /// Create an asset identifier from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty — the zero identifier is reserved to
    /// mean "native" and is expressed as [`AssetKind::Native`] instead.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(!s.is_empty(), "asset identifier must not be empty");
        Self(s)
    }

    /// Return the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which asset a promise accepts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// The platform's native transferable value.
    Native,
    /// A specific fungible asset on the external ledger.
    Token(AssetId),
}

impl AssetKind {
    /// Whether this is the native kind.
    pub fn is_native(&self) -> bool {
        matches!(self, AssetKind::Native)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Native => write!(f, "native"),
            AssetKind::Token(id) => write!(f, "token:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_compare_exactly() {
        let a = AssetKind::Token(AssetId::new("usd-anchor"));
        let b = AssetKind::Token(AssetId::new("usd-anchor"));
        let c = AssetKind::Token(AssetId::new("eur-anchor"));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, AssetKind::Native);
    }

    #[test]
    #[should_panic]
    fn empty_asset_id_is_rejected() {
        AssetId::new("");
    }
}
