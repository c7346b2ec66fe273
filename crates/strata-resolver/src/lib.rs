//! Dependency resolution engine: collapses a raw requirement tree into a
//! minimal, non-contradictory dependency set.
//!
//! Passes run in a fixed order: cycle detection (advisory), manual
//! exclusions, rationalization, then reachability optimization repeated
//! until it reports no change. [`resolver::resolve`] drives the whole
//! sequence; each pass is also callable on its own.

pub mod breach;
pub mod cycle;
pub mod exclusion;
pub mod graph;
pub mod optimize;
pub mod rationalize;
pub mod report;
pub mod resolver;

pub use graph::{NodeId, ResolutionGraph};
