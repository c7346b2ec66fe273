//! Semantic version breaches: rationalization outcomes that cross a major
//! version boundary and therefore need a human decision.

use std::fmt;

use serde::Serialize;
use strata_core::version::VersionIdentifier;

use crate::graph::NodeId;

/// One side of a breach: which node, and what it demanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRef {
    pub id: NodeId,
    pub identifier: VersionIdentifier,
}

/// The winner of a module's rationalization and a rejected member whose
/// major version differs from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breach {
    pub accepted: NodeRef,
    pub rejected: NodeRef,
}

/// All breaches produced by the latest rationalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BreachReport {
    pub breaches: Vec<Breach>,
}

impl BreachReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, breach: Breach) {
        self.breaches.push(breach);
    }

    pub fn is_empty(&self) -> bool {
        self.breaches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.breaches.len()
    }
}

impl fmt::Display for BreachReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.breaches.is_empty() {
            return write!(f, "No semantic version breaches.");
        }
        writeln!(f, "Semantic version breaches ({}):", self.breaches.len())?;
        for b in &self.breaches {
            writeln!(f, "  {b}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: accepted {} over {} (major {} vs {})",
            self.accepted.identifier.module_name(),
            self.accepted.identifier.version(),
            self.rejected.identifier.version(),
            self.accepted.identifier.major(),
            self.rejected.identifier.major(),
        )
    }
}
