use strata_core::node::{DependencyNode, RejectionReason};
use strata_resolver::{NodeId, ResolutionGraph};

fn node(s: &str) -> DependencyNode {
    DependencyNode::parse(s).unwrap()
}

fn identifiers(nodes: &[&DependencyNode]) -> Vec<String> {
    nodes.iter().map(|n| n.identifier().to_string()).collect()
}

#[test]
fn test_lone_root_has_no_cycles() {
    let g = ResolutionGraph::new(node("a.b.c-1.0.0-0"));
    assert!(g.circular_references().is_empty());
}

#[test]
fn test_single_layer_has_no_cycles() {
    let g = ResolutionGraph::new(
        node("a.b.c-1.0.0-0")
            .with_dependency(node("a.b.d-1.0.0-0"))
            .with_dependency(node("a.b.e-1.0.0-0"))
            .with_dependency(node("a.b.f-1.0.0-0")),
    );
    assert!(g.circular_references().is_empty());
}

#[test]
fn test_two_layers_have_no_cycles() {
    let g = ResolutionGraph::new(
        node("a.b.c-1.0.0-0")
            .with_dependency(node("a.b.d-1.0.0-0").with_dependency(node("a.z.d-1.0.0-0")))
            .with_dependency(node("a.b.e-1.0.0-0").with_dependency(node("a.z.e-1.0.0-0")))
            .with_dependency(node("a.b.f-1.0.0-0").with_dependency(node("a.z.f-1.0.0-0"))),
    );
    assert!(g.circular_references().is_empty());
}

#[test]
fn test_minor_versions_rationalize_to_highest() {
    let mut g = ResolutionGraph::new(
        node("a.b.c-1.0.0-0")
            .with_dependency(node("a.b.d-1.0.0-0"))
            .with_dependency(node("a.b.e-1.0.0-0").with_dependency(node("a.b.d-1.2.0-0")))
            .with_dependency(node("a.b.f-1.0.0-0").with_dependency(node("a.b.d-1.2.4-0"))),
    );
    g.rationalize();

    let found = g.find_by_module_name("a.b.d");
    assert_eq!(
        identifiers(&found),
        ["a.b.d-1.2.4-0", "a.b.d-1.2.0-0", "a.b.d-1.0.0-0"]
    );
    assert!(!found[0].is_rejected());
    assert_eq!(found[1].rejection_reason(), Some(RejectionReason::Rationalized));
    assert_eq!(found[2].rejection_reason(), Some(RejectionReason::Rationalized));
    assert!(g.breaches().is_empty());
}

#[test]
fn test_major_version_change_is_a_breach() {
    let mut g = ResolutionGraph::new(
        node("a.b.c-1.0.0-0")
            .with_dependency(node("a.b.d-1.9.0-0"))
            .with_dependency(node("a.b.e-1.2.4-21"))
            .with_dependency(node("a.b.f-1.0.0-0").with_dependency(node("a.b.d-2.2.0-0"))),
    );
    g.rationalize();

    assert_eq!(identifiers(&g.rejected_dependencies()), ["a.b.d-1.9.0-0"]);
    assert_eq!(g.accepted_dependencies().len(), 4);

    let breaches = g.breaches();
    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].accepted.identifier.to_string(), "a.b.d-2.2.0-0");
    assert_eq!(breaches[0].rejected.identifier.to_string(), "a.b.d-1.9.0-0");
    assert_eq!(
        g.find_by_module_name("a.b.d")[1].rejection_reason(),
        Some(RejectionReason::Rationalized)
    );
}

#[test]
fn test_same_dependencies_across_positions() {
    let mut g = ResolutionGraph::new(
        node("a.b.c-1.0.0-0")
            .with_dependency(node("a.b.d-1.0.0-0"))
            .with_dependency(node("a.b.e-1.2.4-21"))
            .with_dependency(
                node("a.b.f-1.0.0-0")
                    .with_dependency(node("a.b.d-1.2.0-0"))
                    .with_dependency(
                        node("a.b.e-1.2.4-20").with_dependency(node("a.b.d-1.2.4-0")),
                    ),
            ),
    );
    g.rationalize();
    assert_eq!(g.rejected_dependencies().len(), 3);
    assert_eq!(g.accepted_dependencies().len(), 4);

    // The winning a.b.d hangs below a rationalized a.b.e, so pruning drops it too.
    assert!(g.optimize());
    assert!(!g.optimize());
    assert_eq!(
        g.find_by_module_name("a.b.d")[0].rejection_reason(),
        Some(RejectionReason::Unreachable)
    );
}

#[test]
fn test_exclusion_then_optimize() {
    let mut g = ResolutionGraph::new(
        node("a.b.c-1.0.0-0")
            .with_exclusion("a.b.f", "a.z.e")
            .with_dependency(node("a.b.d-1.0.0-0"))
            .with_dependency(
                node("a.b.e-1.0.0-0").with_dependency(
                    node("a.z.e-1.0.0-0").with_dependency(
                        node("b.z.e-1.0.0-0").with_dependency(node("a.b.f-1.2.0-40")),
                    ),
                ),
            )
            .with_dependency(node("a.b.f-1.0.0-0")),
    );
    assert!(g.circular_references().is_empty());

    let found = g.find_by_module_name("a.b.c");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].module_name(), "a.b.c");

    let found = g.find_by_module_name("a.b.f");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|n| !n.is_rejected()));

    g.apply_declared_exclusions();

    let found = g.find_by_module_name("a.b.f");
    assert_eq!(found.len(), 2);
    assert!(found[0].is_rejected());
    assert!(!found[1].is_rejected());

    // The excluded node is a leaf, so nothing else becomes unreachable.
    assert!(!g.optimize());
}

#[test]
fn test_manual_rejection_prunes_child_after_one_sweep() {
    let mut g = ResolutionGraph::new(
        node("r-1.0.0-0")
            .with_dependency(node("x-1.0.0-0").with_dependency(node("y-1.0.0-0"))),
    );
    g.reject("x", "r");
    let y = NodeId::new(2);
    assert!(!g.node(y).unwrap().is_rejected());

    assert!(g.optimize());
    assert_eq!(
        g.node(y).unwrap().rejection_reason(),
        Some(RejectionReason::Unreachable)
    );
    assert!(!g.optimize());
}

#[test]
fn test_chain_cycle_stops_at_closing_node() {
    // root ─ A ─ B ─ A' (same identifier as A) ─ D
    let mut g = ResolutionGraph::new(
        node("r-1.0.0-0").with_dependency(
            node("a-1.0.0-0").with_dependency(
                node("b-1.0.0-0")
                    .with_dependency(node("a-1.0.0-0").with_dependency(node("a-1.0.0-0"))),
            ),
        ),
    );
    let cycles = g.circular_references();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].terse(), "a ~> b ~> a");
    assert_eq!(
        cycles[0].verbose(),
        "r-1.0.0-0 ~> a-1.0.0-0 ~> b-1.0.0-0 ~> a-1.0.0-0"
    );
    assert_eq!(cycles[0].closing_node, NodeId::new(3));

    // Advisory only.
    assert!(g.rejected_dependencies().is_empty());
    assert!(!g.optimize());
}

#[test]
fn test_circular_dependencies_in_two_branches() {
    let g = ResolutionGraph::new(
        node("a.b.c-1.0.0-0")
            .with_dependency(node("a.b.d-1.0.0-0").with_dependency(node("a.z.d-1.0.0-0")))
            .with_dependency(
                node("a.b.f-1.0.0-0")
                    .with_dependency(node("a.z.f-1.0.0-0").with_dependency(node("a.b.f-1.0.0-0"))),
            )
            .with_dependency(
                node("a.b.e-1.0.0-0").with_dependency(
                    node("a.z.e-1.0.0-0").with_dependency(
                        node("b.z.e-1.0.0-0").with_dependency(node("a.b.e-1.0.0-0")),
                    ),
                ),
            ),
    );

    assert_eq!(g.all_dependencies().len(), 10);
    assert_eq!(g.module_names().len(), 8);

    let terse: Vec<String> = g.circular_references().iter().map(|c| c.terse()).collect();
    assert_eq!(
        terse,
        ["a.b.f ~> a.z.f ~> a.b.f", "a.b.e ~> a.z.e ~> b.z.e ~> a.b.e"]
    );
}
