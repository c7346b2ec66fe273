//! Operation: display the requirement tree.

use std::path::Path;

use strata_core::config::GlobalConfig;
use strata_core::node::DependencyNode;
use strata_resolver::resolver;
use strata_resolver::ResolutionGraph;

/// Options for `strata tree`.
#[derive(Debug, Default)]
pub struct TreeOptions {
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Run the resolution passes first and annotate rejected nodes.
    pub resolved: bool,
    /// Show the path from the root to every occurrence of this module instead.
    pub why: Option<String>,
}

/// Display the requirement tree described by the file at `path`.
pub fn tree(path: &Path, opts: &TreeOptions) -> miette::Result<()> {
    let (_, mut graph) = crate::load_graph(path)?;

    if opts.resolved {
        // Annotate whatever the passes decide; cycles and breaches are shown, not fatal.
        let mut config = GlobalConfig::load()?.resolve;
        config.fail_on_cycle = false;
        config.fail_on_breach = false;
        graph = resolver::resolve(graph, &config)?.graph;
    }

    if let Some(ref module) = opts.why {
        print!("{}", render_why(&graph, module));
        return Ok(());
    }

    print!("{}", render_tree(&graph, opts.depth));
    Ok(())
}

/// Box-drawing rendering of the whole tree, optionally cut at `max_depth`.
pub fn render_tree(graph: &ResolutionGraph, max_depth: Option<usize>) -> String {
    let mut output = String::new();
    let root = graph.root();
    output.push_str(&format!("{root}\n"));
    if max_depth == Some(0) {
        return output;
    }

    let count = root.children().len();
    for (i, child) in root.children().iter().enumerate() {
        print_subtree(&mut output, child, "", i == count - 1, 1, max_depth);
    }
    output
}

fn print_subtree(
    output: &mut String,
    node: &DependencyNode,
    prefix: &str,
    is_last: bool,
    depth: usize,
    max_depth: Option<usize>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    output.push_str(&format!("{prefix}{connector}{node}\n"));

    if let Some(max) = max_depth {
        if depth >= max {
            return;
        }
    }

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let count = node.children().len();
    for (i, child) in node.children().iter().enumerate() {
        print_subtree(output, child, &child_prefix, i == count - 1, depth + 1, max_depth);
    }
}

/// Every path from the root to an occurrence of `module`, one indented block each.
pub fn render_why(graph: &ResolutionGraph, module: &str) -> String {
    let occurrences = graph.occurrences(module);
    if occurrences.is_empty() {
        return format!("Module '{module}' not found in the tree.\n");
    }

    let mut output = String::new();
    for id in occurrences {
        output.push_str(&format!("Path to {module} ({id}):\n"));
        for (i, node) in graph.path_to(id).iter().enumerate() {
            let indent = "  ".repeat(i + 1);
            output.push_str(&format!("{indent}{node}\n"));
        }
    }
    output
}
