//! Caller principal type.
//!
//! A principal is whatever opaque identity string the embedding platform
//! authenticated the caller as. The engine never inspects it beyond equality
//! and map keying; verifying that a caller really is a given principal is the
//! platform's job, before the engine is ever invoked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated caller identity, opaque to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal(String);

impl Principal {
    /// Create a principal from a raw identity string.
    ///
    /// # Panics
    /// Panics if the string is empty — an empty identity can never have been
    /// authenticated.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(!s.is_empty(), "principal must not be empty");
        Self(s)
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principals_compare_by_identity_string() {
        let a = Principal::new("alice");
        let b = Principal::new("alice");
        let c = Principal::new("bob");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    #[should_panic]
    fn empty_principal_is_rejected() {
        Principal::new("");
    }
}
