//! Operation: resolve a requirement tree and report the outcome.

use std::fmt::Write;
use std::path::Path;

use strata_core::config::{GlobalConfig, ResolveConfig};
use strata_core::requirements::RequirementFile;
use strata_resolver::resolver::{self, ResolutionOutcome};
use strata_util::errors::StrataError;
use strata_util::progress::{status, status_info, status_warn};

/// How `strata resolve` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options for `strata resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    pub allow_cycles: bool,
    pub allow_breaches: bool,
    pub format: OutputFormat,
}

/// Resolve the requirement file at `path` and print the accepted and rejected sets.
pub fn resolve(path: &Path, opts: &ResolveOptions) -> miette::Result<()> {
    let (file, graph) = crate::load_graph(path)?;
    let config = effective_config(GlobalConfig::load()?.resolve, &file, opts);

    status("Resolving", &graph.root().identifier().to_string());
    let outcome = resolver::resolve(graph, &config)?;

    for cycle in &outcome.cycles {
        status_warn("Cycle", &cycle.verbose());
    }
    for breach in outcome.graph.breaches() {
        status_warn("Breach", &breach.to_string());
    }

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.summary()).map_err(|e| {
                StrataError::Generic {
                    message: format!("Failed to serialize resolution summary: {e}"),
                }
            })?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_text(&outcome)),
    }

    status_info(
        "Resolved",
        &format!(
            "{} accepted, {} rejected",
            outcome.graph.accepted_dependencies().len(),
            outcome.graph.rejected_dependencies().len()
        ),
    );
    Ok(())
}

/// Global config, then the file's `[resolve]` table, then CLI flags.
pub fn effective_config(
    global: ResolveConfig,
    file: &RequirementFile,
    opts: &ResolveOptions,
) -> ResolveConfig {
    let mut config = global.with_overrides(&file.resolve);
    if opts.allow_cycles {
        config.fail_on_cycle = false;
    }
    if opts.allow_breaches {
        config.fail_on_breach = false;
    }
    config
}

/// Plain-text report: accepted, rejected with reasons, then any breaches and cycles.
pub fn render_text(outcome: &ResolutionOutcome) -> String {
    let graph = &outcome.graph;
    let mut out = String::new();

    let _ = writeln!(out, "Accepted:");
    for node in graph.accepted_dependencies() {
        let _ = writeln!(out, "  {}", node.identifier());
    }

    let rejected = graph.rejected_dependencies();
    if !rejected.is_empty() {
        let _ = writeln!(out, "Rejected:");
        for node in rejected {
            let _ = writeln!(out, "  {node}");
        }
    }

    if !graph.breaches().is_empty() {
        let _ = writeln!(out, "Breaches:");
        for breach in graph.breaches() {
            let _ = writeln!(out, "  {breach}");
        }
    }

    if !outcome.cycles.is_empty() {
        let _ = writeln!(out, "Circular dependencies:");
        for cycle in &outcome.cycles {
            let _ = writeln!(out, "  {}", cycle.verbose());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::node::DependencyNode;
    use strata_resolver::ResolutionGraph;

    fn node(s: &str) -> DependencyNode {
        DependencyNode::parse(s).unwrap()
    }

    fn file(toml: &str) -> RequirementFile {
        RequirementFile::parse(toml).unwrap()
    }

    #[test]
    fn flags_override_file_and_global() {
        let f = file("[resolve]\nfail-on-cycle = true\n\n[root]\nid = \"a-1.0.0-0\"\n");
        let opts = ResolveOptions {
            allow_cycles: true,
            ..Default::default()
        };
        let config = effective_config(ResolveConfig::default(), &f, &opts);
        assert!(!config.fail_on_cycle);
        assert!(config.fail_on_breach);
    }

    #[test]
    fn file_overrides_global() {
        let f = file("[resolve]\nmax-optimize-rounds = 7\n\n[root]\nid = \"a-1.0.0-0\"\n");
        let config = effective_config(ResolveConfig::default(), &f, &ResolveOptions::default());
        assert_eq!(config.max_optimize_rounds, 7);
    }

    #[test]
    fn text_report_lists_sections() {
        let graph = ResolutionGraph::new(
            node("app-1.0.0-0")
                .with_dependency(node("x-1.0.0-0"))
                .with_dependency(node("x-2.0.0-0")),
        );
        let config = ResolveConfig {
            fail_on_breach: false,
            ..ResolveConfig::default()
        };
        let outcome = resolver::resolve(graph, &config).unwrap();
        let text = render_text(&outcome);
        assert!(text.contains("Accepted:\n  app-1.0.0-0\n  x-2.0.0-0\n"));
        assert!(text.contains("Rejected:\n  x-1.0.0-0 (RATIONALIZED)\n"));
        assert!(text.contains("Breaches:\n  x: accepted 2.0.0-0 over 1.0.0-0 (major 2 vs 1)\n"));
        assert!(!text.contains("Circular"));
    }
}
