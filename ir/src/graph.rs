use std::collections::HashMap;

use depsort_parser::Symbol;

use crate::ClassifiedDeclaration;

/// The graph of remaining dependencies between declarations.
///
/// Every declaration is a node, in registry order. Dependencies which are not declared in the
/// module appear as nodes with no outgoing edges.
pub type DependencyGraph = petgraph::graphmap::DiGraphMap<Symbol, DependencyKind>;

/// Represents the type of edges in the dependency graph
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DependencyKind {
    /// Depends on the type of a property
    Field,
    /// Depends on the supertype named in an `extends` clause
    Parent,
}

pub(crate) fn build_graph(declarations: &[ClassifiedDeclaration]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for declaration in declarations {
        graph.add_node(declaration.name());
    }
    for declaration in declarations {
        let name = declaration.name();
        let parent = declaration.declaration.parent.map(|id| id.name());
        for &dependency in declaration.classification.remaining.iter() {
            let kind = if parent == Some(dependency) {
                DependencyKind::Parent
            } else {
                DependencyKind::Field
            };
            graph.add_edge(name, dependency, kind);
        }
    }
    graph
}

/// Returns the groups of mutually dependent declarations in `graph`.
///
/// A group is either two or more declarations which reach each other, or a single declaration
/// which depends on itself. Groups and their members are ordered by when they were added to
/// the graph.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<Symbol>> {
    let position: HashMap<Symbol, usize> = graph
        .nodes()
        .enumerate()
        .map(|(index, node)| (node, index))
        .collect();

    let mut cycles: Vec<Vec<Symbol>> = petgraph::algo::tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .collect();
    for cycle in cycles.iter_mut() {
        cycle.sort_by_key(|node| position[node]);
    }
    cycles.sort_by_key(|cycle| position[&cycle[0]]);
    cycles
}
