//! Read-only queries over the current rejection state.

use std::collections::BTreeSet;

use serde::Serialize;
use strata_core::node::{DependencyNode, RejectionReason};
use strata_core::version::VersionIdentifier;

use crate::breach::Breach;
use crate::cycle::{detect_cycles, CircularReference};
use crate::graph::{NodeId, ResolutionGraph};

/// A rejected node and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedDependency {
    pub identifier: VersionIdentifier,
    pub reason: RejectionReason,
}

/// Serialisable snapshot of a resolution, for reports and downstream tools.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionSummary {
    pub root: VersionIdentifier,
    pub accepted: Vec<VersionIdentifier>,
    pub rejected: Vec<RejectedDependency>,
    pub breaches: Vec<Breach>,
    pub circular_references: Vec<String>,
}

impl ResolutionGraph {
    /// Every node, rejected or not, as identifier strings in pre-order.
    pub fn all_dependencies(&self) -> Vec<String> {
        self.visit()
            .iter()
            .map(|v| v.node.identifier().to_string())
            .collect()
    }

    /// Distinct module names, sorted.
    pub fn module_names(&self) -> Vec<String> {
        self.visit()
            .iter()
            .map(|v| v.node.module_name())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn accepted_dependencies(&self) -> Vec<&DependencyNode> {
        self.filtered(|n| !n.is_rejected())
    }

    pub fn rejected_dependencies(&self) -> Vec<&DependencyNode> {
        self.filtered(DependencyNode::is_rejected)
    }

    /// Every occurrence of `name`, highest version first; equal versions keep pre-order.
    pub fn find_by_module_name(&self, name: &str) -> Vec<&DependencyNode> {
        let mut found = self.filtered(|n| n.module_name() == name);
        found.sort_by(|a, b| b.identifier().compare(a.identifier()));
        found
    }

    /// Ids of every occurrence of `name`, in pre-order.
    pub fn occurrences(&self, name: &str) -> Vec<NodeId> {
        self.visit()
            .iter()
            .filter(|v| v.node.module_name() == name)
            .map(|v| v.id)
            .collect()
    }

    /// Breaches from the latest [`Self::rationalize`] call.
    pub fn breaches(&self) -> &[Breach] {
        &self.breaches.breaches
    }

    pub fn circular_references(&self) -> Vec<CircularReference> {
        detect_cycles(self.root())
    }

    pub fn summary(&self) -> ResolutionSummary {
        ResolutionSummary {
            root: self.root().identifier().clone(),
            accepted: self
                .accepted_dependencies()
                .iter()
                .map(|n| n.identifier().clone())
                .collect(),
            rejected: self
                .rejected_dependencies()
                .iter()
                .filter_map(|n| {
                    Some(RejectedDependency {
                        identifier: n.identifier().clone(),
                        reason: n.rejection_reason()?,
                    })
                })
                .collect(),
            breaches: self.breaches().to_vec(),
            circular_references: self
                .circular_references()
                .iter()
                .map(CircularReference::verbose)
                .collect(),
        }
    }

    fn filtered(&self, keep: impl Fn(&DependencyNode) -> bool) -> Vec<&DependencyNode> {
        self.visit()
            .into_iter()
            .map(|v| v.node)
            .filter(|n| keep(n))
            .collect()
    }
}
