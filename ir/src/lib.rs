//! Orders the declarations of a parsed module by how much unported work blocks them.
//!
//! The analysis runs as two passes over a [Module](depsort_parser::ast::Module):
//!
//! * [Classify] resolves every dependency against the names the module declares or imports,
//!   producing a [Registry].
//! * [Rank] computes the transitive closure of each declaration's remaining dependencies and
//!   sorts the registry by closure size, producing a [RankedReport].
mod classify;
mod closure;
mod config;
mod graph;
mod imports;
mod rank;
mod registry;
mod report;
#[cfg(test)]
mod tests;

pub use self::classify::{Classify, DependencyClassification};
pub use self::closure::{compute_closure, ClosureResult};
pub use self::config::AnalysisConfig;
pub use self::graph::{find_cycles, DependencyGraph, DependencyKind};
pub use self::imports::ImportTable;
pub use self::rank::{Rank, RankedEntry, RankedReport};
pub use self::registry::{ClassifiedDeclaration, Registry};

use core::convert::Infallible;

use miden_diagnostics::{Diagnostic, ToDiagnostic};

/// Errors which stop an analysis. The passes themselves never fail, only obtaining the source
/// can.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] depsort_parser::ParseError),
}
impl From<Infallible> for AnalysisError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
impl ToDiagnostic for AnalysisError {
    fn to_diagnostic(self) -> Diagnostic {
        match self {
            Self::Parse(err) => err.to_diagnostic(),
        }
    }
}
