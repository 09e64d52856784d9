//! The lightweight parse tree produced for a declaration source.
//!
//! Only the structure needed to order declarations is kept: import statements, and for each
//! top-level class, interface, enum or namespace, its name, supertype and the type names its
//! properties reference. Everything else in the source is skipped by the parser.
mod declarations;
mod imports;
mod module;

pub use self::declarations::*;
pub use self::imports::*;
pub use self::module::*;

use core::{cmp::Ordering, fmt, hash};

use miden_diagnostics::{SourceSpan, Spanned};

use crate::Symbol;

/// A spanned, interned name.
///
/// Dotted type paths such as `Render.Graphic` are represented by a single [Identifier], as the
/// path as a whole is what gets matched against declaration and import names.
///
/// Equality, ordering and hashing only consider the name, never the span.
#[derive(Copy, Clone)]
pub struct Identifier {
    span: SourceSpan,
    name: Symbol,
}
impl Identifier {
    pub const fn new(span: SourceSpan, name: Symbol) -> Self {
        Self { span, name }
    }

    /// Returns the interned name of this identifier
    #[inline]
    pub fn name(&self) -> Symbol {
        self.name
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.name.as_str()
    }
}
impl Spanned for Identifier {
    fn span(&self) -> SourceSpan {
        self.span
    }
}
impl Eq for Identifier {}
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl PartialEq<Symbol> for Identifier {
    fn eq(&self, other: &Symbol) -> bool {
        self.name == *other
    }
}
impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
impl hash::Hash for Identifier {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Identifier({})", self.name)
    }
}
impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}
