//! Handler for `strata tree`.

use std::path::Path;

use miette::Result;

use strata_ops::ops_tree::{self, TreeOptions};
use strata_util::errors::StrataError;

pub fn exec(file: &Path, depth: Option<u32>, resolved: bool, why: Option<String>) -> Result<()> {
    if !file.is_file() {
        return Err(StrataError::Manifest {
            message: format!("No requirement file at {}", file.display()),
        }
        .into());
    }

    let opts = TreeOptions {
        depth: depth.map(|d| d as usize),
        resolved,
        why,
    };
    ops_tree::tree(file, &opts)
}
