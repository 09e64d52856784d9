use core::convert::Infallible;

use depsort_parser::{ast::Declaration, Symbol};
use depsort_pass::Pass;

use crate::{
    compute_closure, AnalysisConfig, ClosureResult, DependencyClassification,
    Registry,
};

/// A declaration in its final position, with everything computed about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub declaration: Declaration,
    pub classification: DependencyClassification,
    pub closure: ClosureResult,
}
impl RankedEntry {
    #[inline]
    pub fn name(&self) -> Symbol {
        self.declaration.name.name()
    }

    /// True if nothing this declaration transitively depends on lives outside the module
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.closure.has_external_reachable
    }

    /// True if this declaration has no parent, no external dependencies, and every
    /// dependency it has is already imported.
    pub fn is_leaf(&self) -> bool {
        !self.declaration.has_parent()
            && !self.classification.has_external()
            && !self.classification.has_remaining_internal()
    }
}

/// The declarations of a module, ordered by how many remaining dependencies block them.
#[derive(Debug, Default, Clone)]
pub struct RankedReport {
    entries: Vec<RankedEntry>,
    cycles: Vec<Vec<Symbol>>,
    config: AnalysisConfig,
}
impl RankedReport {
    /// Every declaration in rank order
    #[inline]
    pub fn ranked(&self) -> &[RankedEntry] {
        self.entries.as_slice()
    }

    /// Declarations whose closure reaches nothing outside the module, in rank order
    pub fn ready(&self) -> impl Iterator<Item = &RankedEntry> + '_ {
        self.entries.iter().filter(|entry| entry.is_ready())
    }

    /// Declarations which are not [ready](Self::ready), in rank order
    pub fn rest(&self) -> impl Iterator<Item = &RankedEntry> + '_ {
        self.entries.iter().filter(|entry| !entry.is_ready())
    }

    /// Declarations with no parent and nothing left to port, in rank order
    pub fn leaves(&self) -> impl Iterator<Item = &RankedEntry> + '_ {
        self.entries.iter().filter(|entry| entry.is_leaf())
    }

    /// Groups of mutually dependent declarations
    #[inline]
    pub fn cycles(&self) -> &[Vec<Symbol>] {
        self.cycles.as_slice()
    }

    pub fn get(&self, name: Symbol) -> Option<&RankedEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    #[inline]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes the closure of every declaration in a [Registry] and sorts them by closure size.
///
/// The sort is stable: declarations with closures of the same size keep their registry order.
#[derive(Debug, Default)]
pub struct Rank {
    config: AnalysisConfig,
}
impl Rank {
    /// Create a new instance of this pass
    #[inline]
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}
impl Pass for Rank {
    type Input = Registry;
    type Output = RankedReport;
    type Error = Infallible;

    fn name(&self) -> &'static str {
        "rank"
    }

    fn run(&mut self, registry: Self::Input) -> Result<Self::Output, Self::Error> {
        let closures: Vec<ClosureResult> = registry
            .iter()
            .map(|declaration| compute_closure(declaration.name(), &registry))
            .collect();

        let (declarations, cycles) = registry.into_parts();
        let mut entries: Vec<RankedEntry> = declarations
            .into_iter()
            .zip(closures)
            .map(|(classified, closure)| {
                log::trace!(
                    "'{}' is blocked by {} declarations",
                    classified.declaration.name,
                    closure.len()
                );
                RankedEntry {
                    declaration: classified.declaration,
                    classification: classified.classification,
                    closure,
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.closure.len());

        let report = RankedReport {
            entries,
            cycles,
            config: self.config,
        };
        log::debug!(
            "ranked {} declarations, {} ready",
            report.len(),
            report.ready().count()
        );
        Ok(report)
    }
}
