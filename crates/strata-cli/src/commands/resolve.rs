//! Handler for `strata resolve`.

use std::path::Path;

use miette::Result;

use strata_ops::ops_resolve::{self, OutputFormat, ResolveOptions};

use crate::cli::Format;

pub fn exec(file: &Path, format: Format, allow_cycles: bool, allow_breaches: bool) -> Result<()> {
    let opts = ResolveOptions {
        allow_cycles,
        allow_breaches,
        format: match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        },
    };
    ops_resolve::resolve(file, &opts)
}
