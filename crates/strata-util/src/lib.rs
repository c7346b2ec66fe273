//! Shared utilities for the Strata dependency resolver.
//!
//! This crate provides cross-cutting concerns used by the other Strata crates:
//! the unified error type and Cargo-style terminal status lines.

pub mod errors;
pub mod progress;
