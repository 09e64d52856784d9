use std::collections::HashSet;

use depsort_parser::{ast::ImportEntry, Symbol};

/// The names a module imports, split by whether they come from a sibling module or from an
/// external package.
#[derive(Debug, Default, Clone)]
pub struct ImportTable {
    internal: HashSet<Symbol>,
    external: HashSet<Symbol>,
}
impl ImportTable {
    pub fn new<'a, I>(imports: I) -> Self
    where
        I: IntoIterator<Item = &'a ImportEntry>,
    {
        let mut table = Self::default();
        for entry in imports {
            let names = entry.names.iter().map(|id| id.name());
            if entry.is_internal {
                table.internal.extend(names);
            } else {
                table.external.extend(names);
            }
        }
        table
    }

    /// Returns true if `name` is imported from a sibling module
    #[inline]
    pub fn is_internal(&self, name: Symbol) -> bool {
        self.internal.contains(&name)
    }

    /// Returns true if `name` is imported from an external package
    #[inline]
    pub fn is_external(&self, name: Symbol) -> bool {
        self.external.contains(&name)
    }

    pub fn internal_names(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.internal.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.internal.len() + self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}
