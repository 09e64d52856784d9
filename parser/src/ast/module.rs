use std::collections::{HashMap, HashSet};

use super::*;

/// The parse tree of one analyzed source: its imports, and a registry of its declarations.
///
/// Declarations are keyed by name. Declaring a name a second time replaces the earlier
/// declaration but keeps its position, so the registry order is the order in which names
/// were first seen.
#[derive(Debug, Default, Clone)]
pub struct Module {
    pub imports: Vec<ImportEntry>,
    declarations: Vec<Declaration>,
    index: HashMap<Symbol, usize>,
}
impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `declaration` to the registry, returning the declaration it replaced, if any.
    pub fn declare(&mut self, declaration: Declaration) -> Option<Declaration> {
        let name = declaration.name.name();
        match self.index.get(&name) {
            Some(&index) => Some(core::mem::replace(
                &mut self.declarations[index],
                declaration,
            )),
            None => {
                self.index.insert(name, self.declarations.len());
                self.declarations.push(declaration);
                None
            }
        }
    }

    /// Returns the declarations in registry order
    #[inline]
    pub fn declarations(&self) -> &[Declaration] {
        self.declarations.as_slice()
    }

    pub fn get(&self, name: Symbol) -> Option<&Declaration> {
        self.index.get(&name).map(|&index| &self.declarations[index])
    }

    #[inline]
    pub fn contains(&self, name: Symbol) -> bool {
        self.index.contains_key(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// The names of every declaration in the module, classes, enums and namespaces alike.
    ///
    /// This is the set references are resolved against, so it is only meaningful once the
    /// whole source has been parsed.
    pub fn known_names(&self) -> HashSet<Symbol> {
        self.index.keys().copied().collect()
    }

    /// Consumes the module, returning its imports and its declarations in registry order
    pub fn into_parts(self) -> (Vec<ImportEntry>, Vec<Declaration>) {
        (self.imports, self.declarations)
    }
}
impl Eq for Module {}
impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.imports == other.imports && self.declarations == other.declarations
    }
}
