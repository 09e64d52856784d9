use miden_diagnostics::{SourceSpan, Spanned};

use super::*;

/// Import paths starting with this prefix refer to sibling modules of the analyzed module
pub const SIBLING_PREFIX: &str = "./";

/// One import statement.
///
/// `names` are the local bindings the statement introduces, e.g. `{ A as B }` binds `B`.
/// A side-effect import (`import "./polyfill"`) has no names.
#[derive(Debug, Clone, Spanned)]
pub struct ImportEntry {
    #[span]
    pub span: SourceSpan,
    pub names: Vec<Identifier>,
    pub path: Symbol,
    /// True when `path` refers to a sibling module rather than an external package
    pub is_internal: bool,
}
impl ImportEntry {
    pub fn new(span: SourceSpan, names: Vec<Identifier>, path: Symbol) -> Self {
        let is_internal = path.as_str().starts_with(SIBLING_PREFIX);
        Self {
            span,
            names,
            path,
            is_internal,
        }
    }

    /// Returns true if this statement binds `name`
    pub fn imports(&self, name: Symbol) -> bool {
        self.names.iter().any(|id| id.name() == name)
    }
}
impl Eq for ImportEntry {}
impl PartialEq for ImportEntry {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
            && self.path == other.path
            && self.is_internal == other.is_internal
    }
}
