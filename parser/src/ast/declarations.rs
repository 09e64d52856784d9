//! Declarations are the units being ordered: classes and interfaces, which reference other
//! types through their properties and supertype, and enums/namespaces, which only contribute
//! a name.
use core::fmt;

use miden_diagnostics::{SourceSpan, Spanned};

use super::*;

/// The kind of block a [Declaration] was parsed from
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Namespace,
}
impl DeclarationKind {
    /// Enums and namespaces are declared names without a dependency list
    #[inline]
    pub fn is_enum_or_namespace(&self) -> bool {
        matches!(self, Self::Enum | Self::Namespace)
    }
}
impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Interface => f.write_str("interface"),
            Self::Enum => f.write_str("enum"),
            Self::Namespace => f.write_str("namespace"),
        }
    }
}

/// A single top-level declaration.
///
/// `dependencies` holds every type name referenced by a property of the declaration, in
/// source order, followed by the supertype named in its `extends` clause, if any. Names are
/// kept exactly as written, duplicates included; deduplication happens during classification.
#[derive(Debug, Clone, Spanned)]
pub struct Declaration {
    #[span]
    pub span: SourceSpan,
    pub kind: DeclarationKind,
    pub name: Identifier,
    pub parent: Option<Identifier>,
    pub dependencies: Vec<Identifier>,
}
impl Declaration {
    /// Creates a class-like declaration, appending `parent` to the property dependencies so
    /// that inheritance is tracked like any other reference.
    pub fn new(
        span: SourceSpan,
        kind: DeclarationKind,
        name: Identifier,
        parent: Option<Identifier>,
        mut dependencies: Vec<Identifier>,
    ) -> Self {
        debug_assert!(!kind.is_enum_or_namespace());
        dependencies.extend(parent);
        Self {
            span,
            kind,
            name,
            parent,
            dependencies,
        }
    }

    /// Creates an enum or namespace declaration, which never has dependencies
    pub fn named_block(span: SourceSpan, kind: DeclarationKind, name: Identifier) -> Self {
        debug_assert!(kind.is_enum_or_namespace());
        Self {
            span,
            kind,
            name,
            parent: None,
            dependencies: vec![],
        }
    }

    #[inline]
    pub fn is_enum_or_namespace(&self) -> bool {
        self.kind.is_enum_or_namespace()
    }

    #[inline]
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }
}
impl Eq for Declaration {}
impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.parent == other.parent
            && self.dependencies == other.dependencies
    }
}
