pub mod ops_resolve;
pub mod ops_tree;

use std::path::Path;

use strata_core::requirements::RequirementFile;
use strata_resolver::ResolutionGraph;
use strata_util::errors::StrataError;

/// Read a requirement file and build the graph it describes.
pub fn load_graph(path: &Path) -> miette::Result<(RequirementFile, ResolutionGraph)> {
    let file = RequirementFile::from_path(path)?;
    let root = file.root.to_node().map_err(StrataError::from)?;
    tracing::debug!("loaded {} nodes from {}", root.subtree_len(), path.display());
    Ok((file, ResolutionGraph::new(root)))
}
