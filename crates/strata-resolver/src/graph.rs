//! The resolution graph: exclusive owner of the requirement tree.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use strata_core::node::{DependencyNode, RejectionReason};

use crate::breach::BreachReport;

/// Pre-order position of a node in the tree.
///
/// Stable for the lifetime of a [`ResolutionGraph`] because the tree shape
/// never changes once the graph owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node as seen from a pre-order walk, with its position in the tree.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub node: &'a DependencyNode,
}

/// Owns the whole requirement tree for one resolution attempt.
///
/// Only rejection state changes after construction, and only through the
/// exclusion, rationalization and optimization passes.
#[derive(Debug, Clone)]
pub struct ResolutionGraph {
    root: DependencyNode,
    pub(crate) breaches: BreachReport,
}

impl ResolutionGraph {
    pub fn new(root: DependencyNode) -> Self {
        Self {
            root,
            breaches: BreachReport::new(),
        }
    }

    pub fn root(&self) -> &DependencyNode {
        &self.root
    }

    /// Give the tree back, e.g. to hand it to a later resolution attempt.
    pub fn into_root(self) -> DependencyNode {
        self.root
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.subtree_len()
    }

    /// Length of the longest root-to-leaf path, in edges. A lone root has depth 0.
    pub fn depth(&self) -> usize {
        self.visit().iter().map(|v| v.depth).max().unwrap_or(0)
    }

    /// Walk the tree in pre-order. `visits[i].id == NodeId(i)`.
    pub fn visit(&self) -> Vec<Visit<'_>> {
        let mut visits = Vec::new();
        let mut stack = vec![(&self.root, None, 0usize)];
        while let Some((node, parent, depth)) = stack.pop() {
            let id = NodeId(visits.len());
            visits.push(Visit {
                id,
                parent,
                depth,
                node,
            });
            for child in node.children().iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }
        visits
    }

    pub fn node(&self, id: NodeId) -> Option<&DependencyNode> {
        self.visit().get(id.0).map(|v| v.node)
    }

    /// Nodes from the root down to `id`, inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<&DependencyNode> {
        let visits = self.visit();
        if id.0 >= visits.len() {
            return Vec::new();
        }
        let mut path: Vec<&DependencyNode> =
            ancestors(&visits, id).map(|v| v.node).collect();
        path.reverse();
        path.push(visits[id.0].node);
        path
    }

    /// Render [`Self::path_to`] as `root ~> ... ~> node`.
    pub fn render_path(&self, id: NodeId) -> String {
        self.path_to(id)
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" ~> ")
    }

    /// Whether some ancestor of `id`, at any depth, belongs to `module`.
    pub fn is_dependency_of(&self, id: NodeId, module: &str) -> bool {
        let visits = self.visit();
        id.0 < visits.len() && ancestors(&visits, id).any(|v| v.node.module_name() == module)
    }

    /// Write rejection decisions keyed by node id; returns how many nodes changed.
    ///
    /// Already-rejected nodes keep their original reason.
    pub(crate) fn apply(&mut self, decisions: &BTreeMap<NodeId, RejectionReason>) -> usize {
        if decisions.is_empty() {
            return 0;
        }
        let mut next = 0;
        let mut changed = 0;
        apply_rec(&mut self.root, &mut next, decisions, &mut changed);
        changed
    }
}

fn apply_rec(
    node: &mut DependencyNode,
    next: &mut usize,
    decisions: &BTreeMap<NodeId, RejectionReason>,
    changed: &mut usize,
) {
    let id = NodeId(*next);
    *next += 1;
    if let Some(&reason) = decisions.get(&id) {
        if node.reject(reason) {
            tracing::debug!("{} rejected: {reason}", node.identifier());
            *changed += 1;
        }
    }
    for child in node.children_mut() {
        apply_rec(child, next, decisions, changed);
    }
}

/// Walk parent links upwards from `id`, nearest ancestor first.
pub(crate) fn ancestors<'v, 'a>(
    visits: &'v [Visit<'a>],
    id: NodeId,
) -> impl Iterator<Item = &'v Visit<'a>> {
    let mut current = visits[id.0].parent;
    std::iter::from_fn(move || {
        let visit = &visits[current?.0];
        current = visit.parent;
        Some(visit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(s: &str) -> DependencyNode {
        DependencyNode::parse(s).unwrap()
    }

    fn sample() -> ResolutionGraph {
        // root
        // ├── d
        // │   └── z.d
        // └── e
        //     └── z.e
        //         └── f
        ResolutionGraph::new(
            node("a.b.c-1.0.0-0")
                .with_dependency(node("a.b.d-1.0.0-0").with_dependency(node("a.z.d-1.0.0-0")))
                .with_dependency(
                    node("a.b.e-1.0.0-0").with_dependency(
                        node("a.z.e-1.0.0-0").with_dependency(node("a.b.f-1.0.0-0")),
                    ),
                ),
        )
    }

    #[test]
    fn depth_is_longest_path() {
        assert_eq!(sample().depth(), 3);
        assert_eq!(ResolutionGraph::new(node("a-1.0.0-0")).depth(), 0);
    }

    #[test]
    fn visit_is_pre_order() {
        let g = sample();
        let names: Vec<&str> = g.visit().iter().map(|v| v.node.module_name()).collect();
        assert_eq!(
            names,
            ["a.b.c", "a.b.d", "a.z.d", "a.b.e", "a.z.e", "a.b.f"]
        );
        assert_eq!(g.node_count(), 6);
    }

    #[test]
    fn visit_records_parent_and_depth() {
        let g = sample();
        let visits = g.visit();
        assert_eq!(visits[0].parent, None);
        assert_eq!(visits[4].parent, Some(NodeId(3)));
        assert_eq!(visits[5].depth, 3);
        assert!(visits.iter().enumerate().all(|(i, v)| v.id.index() == i));
    }

    #[test]
    fn path_to_runs_from_root() {
        let g = sample();
        assert_eq!(
            g.render_path(NodeId(5)),
            "a.b.c-1.0.0-0 ~> a.b.e-1.0.0-0 ~> a.z.e-1.0.0-0 ~> a.b.f-1.0.0-0"
        );
        assert!(g.path_to(NodeId(99)).is_empty());
    }

    #[test]
    fn is_dependency_of_checks_any_depth() {
        let g = sample();
        assert!(g.is_dependency_of(NodeId(5), "a.z.e"));
        assert!(g.is_dependency_of(NodeId(5), "a.b.c"));
        assert!(!g.is_dependency_of(NodeId(5), "a.b.d"));
        assert!(!g.is_dependency_of(NodeId::ROOT, "a.b.c"));
    }

    #[test]
    fn apply_targets_ids_and_keeps_first_reason() {
        let mut g = sample();
        let mut decisions = BTreeMap::new();
        decisions.insert(NodeId(2), RejectionReason::Manual);
        assert_eq!(g.apply(&decisions), 1);
        assert_eq!(
            g.node(NodeId(2)).unwrap().rejection_reason(),
            Some(RejectionReason::Manual)
        );

        decisions.insert(NodeId(2), RejectionReason::Unreachable);
        assert_eq!(g.apply(&decisions), 0);
        assert_eq!(
            g.node(NodeId(2)).unwrap().rejection_reason(),
            Some(RejectionReason::Manual)
        );
    }
}
