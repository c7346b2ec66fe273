//! Manual exclusions declared by developers.

use std::collections::BTreeMap;

use serde::Serialize;
use strata_core::node::RejectionReason;

use crate::graph::{ancestors, NodeId, ResolutionGraph};

/// "Drop `module` wherever `when_dependency_of` pulls it in", as declared on some node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionRule {
    pub module: String,
    pub when_dependency_of: String,
    pub declared_by: NodeId,
}

impl ResolutionGraph {
    /// Reject every `excluded_module` node that has a `when_dependency_of`
    /// ancestor at any depth. Returns how many nodes changed.
    ///
    /// A rule matching nothing is a no-op.
    pub fn reject(&mut self, excluded_module: &str, when_dependency_of: &str) -> usize {
        let decisions: BTreeMap<NodeId, RejectionReason> = {
            let visits = self.visit();
            visits
                .iter()
                .filter(|v| v.node.module_name() == excluded_module && !v.node.is_rejected())
                .filter(|v| {
                    ancestors(&visits, v.id).any(|a| a.node.module_name() == when_dependency_of)
                })
                .map(|v| (v.id, RejectionReason::Manual))
                .collect()
        };
        let changed = self.apply(&decisions);
        tracing::debug!(
            "exclude {excluded_module} <- {when_dependency_of}: {changed} node(s) rejected"
        );
        changed
    }

    /// Every rule declared anywhere in the tree, in pre-order.
    pub fn declared_exclusions(&self) -> Vec<ExclusionRule> {
        self.visit()
            .iter()
            .flat_map(|v| {
                v.node
                    .exclusion_rules()
                    .iter()
                    .map(move |(module, when)| ExclusionRule {
                        module: module.clone(),
                        when_dependency_of: when.clone(),
                        declared_by: v.id,
                    })
            })
            .collect()
    }

    /// Collect every declared rule and apply each once.
    pub fn apply_declared_exclusions(&mut self) -> usize {
        self.declared_exclusions()
            .iter()
            .map(|rule| self.reject(&rule.module, &rule.when_dependency_of))
            .sum()
    }
}
