use std::collections::HashSet;

use depsort_parser::Symbol;

use crate::Registry;

/// The transitive closure of the remaining dependencies of one declaration
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClosureResult {
    /// Every name reachable through remaining dependencies, in depth-first order
    pub total: Vec<Symbol>,
    /// True if some name in `total` is not declared in the module
    pub has_external_reachable: bool,
}
impl ClosureResult {
    #[inline]
    pub fn len(&self) -> usize {
        self.total.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }
}

/// Expands the remaining dependencies of `name` depth first, in the order each declaration
/// lists them.
///
/// A name is recorded and expanded at most once, which is what makes cycles terminate.
/// `name` itself is not part of the closure unless some dependency leads back to it.
pub fn compute_closure(name: Symbol, registry: &Registry) -> ClosureResult {
    let mut visited = HashSet::new();
    let mut total = vec![];
    let mut stack: Vec<Symbol> = registry.remaining(name).iter().rev().copied().collect();
    while let Some(next) = stack.pop() {
        if !visited.insert(next) {
            continue;
        }
        total.push(next);
        stack.extend(
            registry
                .remaining(next)
                .iter()
                .rev()
                .filter(|dependency| !visited.contains(*dependency)),
        );
    }

    let has_external_reachable = total.iter().any(|&name| !registry.contains(name));
    ClosureResult {
        total,
        has_external_reachable,
    }
}
