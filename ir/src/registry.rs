use std::collections::HashMap;

use depsort_parser::{ast::Declaration, Symbol};

use crate::{
    graph::{build_graph, find_cycles},
    DependencyClassification, DependencyGraph,
};

/// A [Declaration] together with the classification of its dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedDeclaration {
    pub declaration: Declaration,
    pub classification: DependencyClassification,
}
impl ClassifiedDeclaration {
    #[inline]
    pub fn name(&self) -> Symbol {
        self.declaration.name.name()
    }

    #[inline]
    pub fn has_parent(&self) -> bool {
        self.declaration.has_parent()
    }
}

/// Every declaration of a module with its dependencies classified, in registry order.
///
/// The registry is immutable once built. It is the input of the [Rank](crate::Rank) pass.
#[derive(Debug, Default)]
pub struct Registry {
    declarations: Vec<ClassifiedDeclaration>,
    index: HashMap<Symbol, usize>,
    graph: DependencyGraph,
    cycles: Vec<Vec<Symbol>>,
}
impl Registry {
    /// Builds a registry from declarations with unique names
    pub fn new(declarations: Vec<ClassifiedDeclaration>) -> Self {
        let index = declarations
            .iter()
            .enumerate()
            .map(|(i, declaration)| (declaration.name(), i))
            .collect();
        let graph = build_graph(&declarations);
        let cycles = find_cycles(&graph);
        Self {
            declarations,
            index,
            graph,
            cycles,
        }
    }

    pub fn get(&self, name: Symbol) -> Option<&ClassifiedDeclaration> {
        self.index.get(&name).map(|&i| &self.declarations[i])
    }

    /// Returns true if `name` is declared in the module
    #[inline]
    pub fn contains(&self, name: Symbol) -> bool {
        self.index.contains_key(&name)
    }

    /// The remaining dependencies of `name`, or nothing if `name` is not declared
    pub fn remaining(&self, name: Symbol) -> &[Symbol] {
        self.get(name)
            .map(|declaration| declaration.classification.remaining.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedDeclaration> + '_ {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    #[inline]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Groups of declarations which depend on each other, see [find_cycles]
    #[inline]
    pub fn cycles(&self) -> &[Vec<Symbol>] {
        self.cycles.as_slice()
    }

    pub(crate) fn into_parts(self) -> (Vec<ClassifiedDeclaration>, Vec<Vec<Symbol>>) {
        (self.declarations, self.cycles)
    }
}
