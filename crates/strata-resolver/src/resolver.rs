//! The resolution pipeline: detect cycles, apply exclusions, rationalize,
//! then optimize to a fixpoint.

use strata_core::config::ResolveConfig;
use strata_util::errors::{StrataError, StrataResult};

use crate::cycle::CircularReference;
use crate::graph::ResolutionGraph;
use crate::report::ResolutionSummary;

/// The output of a successful resolution.
#[derive(Debug)]
pub struct ResolutionOutcome {
    pub graph: ResolutionGraph,
    /// Cycles found before any pass ran; non-empty only when cycles are tolerated.
    pub cycles: Vec<CircularReference>,
    /// Number of rules applied from the tree's declared exclusions.
    pub exclusions_applied: usize,
    /// How many `optimize` calls it took to settle, including the last no-op call.
    pub optimize_rounds: usize,
}

impl ResolutionOutcome {
    pub fn summary(&self) -> ResolutionSummary {
        self.graph.summary()
    }
}

/// Run every pass in order over `graph`.
///
/// Cycles and breaches are errors only when `config` says so; otherwise they
/// are logged and left in the outcome for the caller to report.
pub fn resolve(mut graph: ResolutionGraph, config: &ResolveConfig) -> StrataResult<ResolutionOutcome> {
    tracing::info!(
        "resolving {} ({} nodes)",
        graph.root().identifier(),
        graph.node_count()
    );

    let cycles = graph.circular_references();
    for cycle in &cycles {
        tracing::warn!("circular dependency: {}", cycle.verbose());
    }
    if !cycles.is_empty() && config.fail_on_cycle {
        return Err(StrataError::CircularDependency {
            count: cycles.len(),
            cycles: render_lines(cycles.iter().map(CircularReference::verbose)),
        }
        .into());
    }

    let rules = graph.declared_exclusions();
    for rule in &rules {
        let hits = graph.reject(&rule.module, &rule.when_dependency_of);
        tracing::info!(
            "exclusion '{}' <- '{}' (declared at {}): {hits} node(s)",
            rule.module,
            rule.when_dependency_of,
            rule.declared_by
        );
    }

    graph.rationalize();

    // One sweep per level plus the final no-op sweep always reaches the fixpoint.
    let depth_bound = graph.depth() + 1;
    let max_rounds = config.max_optimize_rounds.max(depth_bound);
    if max_rounds > config.max_optimize_rounds {
        tracing::debug!(
            "raising optimize cap from {} to {max_rounds} for a tree of depth {}",
            config.max_optimize_rounds,
            depth_bound - 1
        );
    }
    let optimize_rounds = graph
        .optimize_to_fixpoint(max_rounds)
        .ok_or_else(|| StrataError::Resolution {
            message: format!("reachability pruning did not settle within {max_rounds} rounds"),
        })?;
    tracing::info!("optimized in {optimize_rounds} round(s)");

    let breaches = graph.breaches();
    if !breaches.is_empty() && config.fail_on_breach {
        return Err(StrataError::SemanticVersionBreach {
            count: breaches.len(),
            breaches: render_lines(breaches.iter().map(ToString::to_string)),
        }
        .into());
    }

    Ok(ResolutionOutcome {
        exclusions_applied: rules.len(),
        graph,
        cycles,
        optimize_rounds,
    })
}

fn render_lines(lines: impl Iterator<Item = String>) -> String {
    lines
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}
