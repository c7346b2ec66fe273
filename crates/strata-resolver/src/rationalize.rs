//! Rationalization: pick one version per module name across the whole tree.
//!
//! Members of a module's group are every node with that name that is not
//! manually rejected, regardless of position. The highest version wins;
//! among equal highest versions the first in pre-order wins. Every other
//! member is rejected as a duplicate (same identifier) or rationalized
//! (different version), and a breach is recorded whenever the winner's major
//! version differs from a member's.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use strata_core::node::RejectionReason;

use crate::breach::{Breach, BreachReport, NodeRef};
use crate::graph::{ResolutionGraph, Visit};

impl ResolutionGraph {
    /// Run one rationalization pass. Returns how many nodes changed.
    ///
    /// Groups are recomputed from scratch on every call and the breach list
    /// is replaced, so calling this twice in a row changes nothing.
    pub fn rationalize(&mut self) -> usize {
        let (decisions, breaches) = {
            let visits = self.visit();
            let mut groups: BTreeMap<&str, Vec<&Visit<'_>>> = BTreeMap::new();
            for v in visits.iter().filter(|v| !v.node.is_manually_rejected()) {
                groups.entry(v.node.module_name()).or_default().push(v);
            }

            let mut decisions = BTreeMap::new();
            let mut breaches = BreachReport::new();
            for members in groups.values().filter(|m| m.len() > 1) {
                let winner = select_winner(members);
                let accepted = winner.node.identifier();
                for member in members.iter().filter(|m| m.id != winner.id) {
                    let identifier = member.node.identifier();
                    let reason = if identifier == accepted {
                        RejectionReason::DuplicateVersion
                    } else {
                        RejectionReason::Rationalized
                    };
                    decisions.insert(member.id, reason);

                    if identifier.major() != accepted.major() {
                        tracing::warn!(
                            "{} accepted over incompatible {}",
                            accepted,
                            identifier
                        );
                        breaches.add(Breach {
                            accepted: NodeRef {
                                id: winner.id,
                                identifier: accepted.clone(),
                            },
                            rejected: NodeRef {
                                id: member.id,
                                identifier: identifier.clone(),
                            },
                        });
                    }
                }
            }
            (decisions, breaches)
        };

        self.breaches = breaches;
        let changed = self.apply(&decisions);
        tracing::info!(
            "rationalized: {changed} node(s) rejected, {} breach(es)",
            self.breaches.len()
        );
        changed
    }
}

/// Highest version; the earliest member wins ties.
fn select_winner<'v, 'a>(members: &[&'v Visit<'a>]) -> &'v Visit<'a> {
    let mut winner = members[0];
    for &member in &members[1..] {
        if member.node.identifier().compare(winner.node.identifier()) == Ordering::Greater {
            winner = member;
        }
    }
    winner
}
