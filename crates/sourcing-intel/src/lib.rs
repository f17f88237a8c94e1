//! Buyer-side sourcing intelligence for coffee cooperatives.
//!
//! The [`sourcing`] module holds the scoring and risk engine plus the orchestrator that persists
//! its results; [`regions`] covers region-level growing-conditions intelligence.

pub mod config;
pub mod error;
pub mod regions;
pub mod sourcing;
pub mod telemetry;
