//! Reachability optimization.
//!
//! One call is exactly one sweep: every accepted non-root node whose parent
//! is rejected becomes [`RejectionReason::Unreachable`]. Decisions are taken
//! against the state at the start of the sweep, so a node rejected now only
//! affects its children on the next call. Callers repeat until `false`.

use std::collections::BTreeMap;

use strata_core::node::RejectionReason;

use crate::graph::{NodeId, ResolutionGraph};

impl ResolutionGraph {
    /// Run one sweep. Returns `true` if any node changed.
    pub fn optimize(&mut self) -> bool {
        let decisions: BTreeMap<NodeId, RejectionReason> = {
            let visits = self.visit();
            visits
                .iter()
                .filter(|v| !v.node.is_rejected())
                .filter_map(|v| {
                    let parent = v.parent?;
                    visits[parent.index()]
                        .node
                        .is_rejected()
                        .then_some((v.id, RejectionReason::Unreachable))
                })
                .collect()
        };
        let changed = self.apply(&decisions);
        tracing::debug!("optimize sweep: {changed} node(s) now unreachable");
        changed > 0
    }

    /// Call [`Self::optimize`] until it reports no change, at most `max_rounds` times.
    ///
    /// Returns the number of calls made, including the final one that changed
    /// nothing, or `None` if the cap was reached first.
    pub fn optimize_to_fixpoint(&mut self, max_rounds: usize) -> Option<usize> {
        for round in 1..=max_rounds {
            if !self.optimize() {
                return Some(round);
            }
        }
        None
    }
}
