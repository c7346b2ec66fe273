//! Serialisable description of an already-populated requirement tree.
//!
//! ```toml
//! [root]
//! id = "a.b.c-1.0.0-0"
//! exclude = { "a.b.f" = "a.z.e" }
//!
//! [[root.requires]]
//! id = "a.b.d-1.0.0-0"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use strata_util::errors::ParseIdentifierError;

use crate::config::ResolveOverrides;
use crate::node::DependencyNode;

/// A requirement file: the root requirement plus optional resolution policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementFile {
    pub root: Requirement,

    #[serde(default)]
    pub resolve: ResolveOverrides,
}

/// One requirement and, recursively, what it requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// `module-major.minor.patch-build`
    pub id: String,

    /// Excluded module name -> module that must be an ancestor for the rule to apply.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub exclude: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Requirement>,
}

impl RequirementFile {
    /// Load and parse a requirement file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            strata_util::errors::StrataError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::parse(&content).map_err(|e| {
            strata_util::errors::StrataError::Manifest {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize the requirement file to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Requirement {
    /// Build the owned node tree, failing on the first malformed identifier.
    pub fn to_node(&self) -> Result<DependencyNode, ParseIdentifierError> {
        let mut node = DependencyNode::parse(&self.id)?;
        for (module, when_dependency_of) in &self.exclude {
            node.add_exclusion(module, when_dependency_of);
        }
        for child in &self.requires {
            node.add_dependency(child.to_node()?);
        }
        Ok(node)
    }
}

impl From<&DependencyNode> for Requirement {
    fn from(node: &DependencyNode) -> Self {
        Self {
            id: node.identifier().to_string(),
            exclude: node.exclusion_rules().clone(),
            requires: node.children().iter().map(Requirement::from).collect(),
        }
    }
}
