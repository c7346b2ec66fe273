//! A single requirement occurrence in the dependency tree.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strata_util::errors::ParseIdentifierError;

use crate::version::VersionIdentifier;

/// Why a node was dropped from the final dependency set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// Excluded by a developer-declared rule.
    Manual,
    /// The same module and version was selected at another position.
    DuplicateVersion,
    /// A higher version of the module was selected elsewhere.
    Rationalized,
    /// An ancestor was rejected, so nothing pulls this node in any more.
    Unreachable,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "MANUAL",
            Self::DuplicateVersion => "DUPLICATE_VERSION",
            Self::Rationalized => "RATIONALIZED",
            Self::Unreachable => "UNREACHABLE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectionReason,
    pub manual: bool,
}

/// One module+version demanded at one position in the tree.
///
/// Children are owned exclusively; the same identifier may occur at several
/// positions as distinct nodes. Rejection is monotonic: once set it is never
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    identifier: VersionIdentifier,
    children: Vec<DependencyNode>,
    rejection: Option<Rejection>,
    /// Excluded module name -> module that must be an ancestor for the rule to apply.
    exclusion_rules: BTreeMap<String, String>,
}

impl DependencyNode {
    pub fn new(identifier: VersionIdentifier) -> Self {
        Self {
            identifier,
            children: Vec::new(),
            rejection: None,
            exclusion_rules: BTreeMap::new(),
        }
    }

    /// Build a node from a `module-major.minor.patch-build` token.
    pub fn parse(text: &str) -> Result<Self, ParseIdentifierError> {
        text.parse().map(Self::new)
    }

    pub fn with_dependency(mut self, child: DependencyNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_dependency(&mut self, child: DependencyNode) {
        self.children.push(child);
    }

    /// Declare that `module` must be dropped wherever `when_dependency_of` pulls it in.
    pub fn with_exclusion(
        mut self,
        module: impl Into<String>,
        when_dependency_of: impl Into<String>,
    ) -> Self {
        self.add_exclusion(module, when_dependency_of);
        self
    }

    pub fn add_exclusion(
        &mut self,
        module: impl Into<String>,
        when_dependency_of: impl Into<String>,
    ) {
        self.exclusion_rules
            .insert(module.into(), when_dependency_of.into());
    }

    pub fn identifier(&self) -> &VersionIdentifier {
        &self.identifier
    }

    pub fn module_name(&self) -> &str {
        self.identifier.module_name()
    }

    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    pub fn exclusion_rules(&self) -> &BTreeMap<String, String> {
        &self.exclusion_rules
    }

    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        self.rejection.map(|r| r.reason)
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    pub fn is_manually_rejected(&self) -> bool {
        self.rejection.is_some_and(|r| r.manual)
    }

    /// Mark this node rejected unless it already is.
    ///
    /// Returns `true` if the state changed. An existing rejection is kept as is.
    pub fn reject(&mut self, reason: RejectionReason) -> bool {
        if self.rejection.is_some() {
            return false;
        }
        self.rejection = Some(Rejection {
            reason,
            manual: reason == RejectionReason::Manual,
        });
        true
    }

    /// Mutable access to children, for passes that write rejection state.
    pub fn children_mut(&mut self) -> &mut [DependencyNode] {
        &mut self.children
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rejection {
            Some(r) => write!(f, "{} ({})", self.identifier, r.reason),
            None => write!(f, "{}", self.identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_tree() {
        let root = DependencyNode::parse("a.b.c-1.0.0-0")
            .unwrap()
            .with_dependency(DependencyNode::parse("a.b.d-1.0.0-0").unwrap())
            .with_dependency(
                DependencyNode::parse("a.b.e-1.0.0-0")
                    .unwrap()
                    .with_dependency(DependencyNode::parse("a.z.e-1.0.0-0").unwrap()),
            );
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.subtree_len(), 4);
        assert_eq!(root.children()[1].children()[0].module_name(), "a.z.e");
    }

    #[test]
    fn rejection_is_monotonic() {
        let mut node = DependencyNode::parse("a.b.c-1.0.0-0").unwrap();
        assert!(!node.is_rejected());
        assert!(node.reject(RejectionReason::Rationalized));
        assert!(!node.reject(RejectionReason::Manual));
        assert_eq!(node.rejection_reason(), Some(RejectionReason::Rationalized));
        assert!(!node.is_manually_rejected());
    }

    #[test]
    fn manual_rejection_sets_flag() {
        let mut node = DependencyNode::parse("a.b.c-1.0.0-0").unwrap();
        node.reject(RejectionReason::Manual);
        assert!(node.is_manually_rejected());
    }

    #[test]
    fn display_includes_reason() {
        let mut node = DependencyNode::parse("a.b.c-1.0.0-0").unwrap();
        assert_eq!(node.to_string(), "a.b.c-1.0.0-0");
        node.reject(RejectionReason::DuplicateVersion);
        assert_eq!(node.to_string(), "a.b.c-1.0.0-0 (DUPLICATE_VERSION)");
    }

    #[test]
    fn later_exclusion_for_same_module_replaces_earlier() {
        let node = DependencyNode::parse("a.b.c-1.0.0-0")
            .unwrap()
            .with_exclusion("a.b.f", "a.z.e")
            .with_exclusion("a.b.f", "a.z.q");
        assert_eq!(node.exclusion_rules().len(), 1);
        assert_eq!(node.exclusion_rules()["a.b.f"], "a.z.q");
    }

    #[test]
    fn parse_failure_propagates() {
        assert!(DependencyNode::parse("not a node").is_err());
    }
}
