//! Core data types for the Strata dependency resolver.
//!
//! This crate defines the values the resolution engine operates on:
//! versioned module identifiers, dependency requirement nodes with their
//! rejection state, the serialisable requirement tree description, and
//! global configuration.
//!
//! This crate is intentionally free of resolution logic.

pub mod config;
pub mod node;
pub mod requirements;
pub mod version;
