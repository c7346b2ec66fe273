//! Cycle detection.
//!
//! A single depth-first walk tracks the identifiers on the active path. A
//! child whose identifier (module and version) is already on that path
//! closes a cycle: it is recorded and its own children are not walked.
//! Detection never touches rejection state.

use std::fmt;

use serde::Serialize;
use strata_core::node::DependencyNode;
use strata_core::version::VersionIdentifier;

use crate::graph::NodeId;

/// A re-entrant occurrence of an identifier already on its own path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircularReference {
    /// The node that closes the cycle.
    pub closing_node: NodeId,
    /// From the repeated ancestor down to the re-entrant node.
    pub cycle: Vec<VersionIdentifier>,
    /// From the root down to the re-entrant node.
    pub path: Vec<VersionIdentifier>,
}

impl CircularReference {
    /// Module names around the cycle: `a ~> b ~> a`.
    pub fn terse(&self) -> String {
        self.cycle
            .iter()
            .map(|id| id.module_name())
            .collect::<Vec<_>>()
            .join(" ~> ")
    }

    /// Full identifiers from the root: `root-1.0.0-0 ~> a-1.0.0-0 ~> ...`.
    pub fn verbose(&self) -> String {
        self.path
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ~> ")
    }
}

impl fmt::Display for CircularReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terse())
    }
}

/// Find every circular reference below `root`.
pub fn detect_cycles(root: &DependencyNode) -> Vec<CircularReference> {
    let mut found = Vec::new();
    let mut active = vec![root.identifier()];
    let mut next = 1;
    walk(root, &mut active, &mut next, &mut found);
    found
}

fn walk<'a>(
    node: &'a DependencyNode,
    active: &mut Vec<&'a VersionIdentifier>,
    next: &mut usize,
    found: &mut Vec<CircularReference>,
) {
    for child in node.children() {
        let id = NodeId::new(*next);
        let identifier = child.identifier();

        if let Some(start) = active.iter().position(|a| *a == identifier) {
            let mut path: Vec<VersionIdentifier> = active.iter().map(|a| (*a).clone()).collect();
            path.push(identifier.clone());
            let reference = CircularReference {
                closing_node: id,
                cycle: path[start..].to_vec(),
                path,
            };
            tracing::debug!("circular reference: {}", reference.verbose());
            found.push(reference);
            // Skip the closing node's subtree but keep ids in pre-order.
            *next += child.subtree_len();
            continue;
        }

        *next += 1;
        active.push(identifier);
        walk(child, active, next, found);
        active.pop();
    }
}
