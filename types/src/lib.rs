//! Fundamental types for the PLEDGE promise-funding engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: caller principals, asset selectors, timestamps, and engine
//! parameters.
//!
//! All monetary amounts in the workspace are raw `u128` values in an asset's
//! smallest unit; arithmetic on them is always checked at the point of use.

pub mod asset;
pub mod params;
pub mod principal;
pub mod time;

pub use asset::{AssetId, AssetKind};
pub use params::EngineParams;
pub use principal::Principal;
pub use time::Timestamp;
