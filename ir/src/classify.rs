use core::convert::Infallible;
use std::collections::HashSet;

use depsort_parser::{
    ast::{Declaration, Module},
    Symbol,
};
use depsort_pass::Pass;
use miden_diagnostics::{DiagnosticsHandler, Severity, Spanned};

use crate::{ClassifiedDeclaration, ImportTable, Registry};

/// How the dependencies of one declaration resolve.
///
/// Every list is free of duplicates and keeps the order in which names first appear in the
/// declaration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyClassification {
    /// Dependencies declared in the module, or imported from a sibling module
    pub internal: Vec<Symbol>,
    /// Dependencies the module knows nothing about
    pub external: Vec<Symbol>,
    /// Internal dependencies which are not imported from a sibling module
    pub remaining_internal: Vec<Symbol>,
    /// External dependencies which are not imported from an external package
    pub remaining_external: Vec<Symbol>,
    /// `remaining_external` followed by `remaining_internal`
    pub remaining: Vec<Symbol>,
}
impl DependencyClassification {
    /// Classifies the dependencies of `declaration` against the names the module knows about.
    ///
    /// `known` must contain every name declared anywhere in the module, since a dependency may
    /// refer to a declaration which comes later in the source.
    pub fn new(declaration: &Declaration, known: &HashSet<Symbol>, imports: &ImportTable) -> Self {
        let mut seen = HashSet::new();
        let mut classification = Self::default();
        for dependency in declaration.dependencies.iter().map(|id| id.name()) {
            if !seen.insert(dependency) {
                continue;
            }
            if known.contains(&dependency) {
                classification.internal.push(dependency);
                if !imports.is_internal(dependency) {
                    classification.remaining_internal.push(dependency);
                }
            } else {
                classification.external.push(dependency);
                if !imports.is_external(dependency) {
                    classification.remaining_external.push(dependency);
                }
            }
        }
        classification.remaining = classification
            .remaining_external
            .iter()
            .chain(classification.remaining_internal.iter())
            .copied()
            .collect();
        classification
    }

    #[inline]
    pub fn has_external(&self) -> bool {
        !self.external.is_empty()
    }

    #[inline]
    pub fn has_remaining_internal(&self) -> bool {
        !self.remaining_internal.is_empty()
    }

    #[inline]
    pub fn has_remaining_external(&self) -> bool {
        !self.remaining_external.is_empty()
    }
}

/// Resolves the dependencies of every declaration in a [Module], producing a [Registry].
///
/// Mutually dependent declarations are reported as warnings. They are not an error, but none
/// of them can be ported before the others, and each ends up in its own closure when
/// [Rank](crate::Rank) runs.
pub struct Classify<'a> {
    diagnostics: &'a DiagnosticsHandler,
}
impl<'a> Classify<'a> {
    /// Create a new instance of this pass
    #[inline]
    pub fn new(diagnostics: &'a DiagnosticsHandler) -> Self {
        Self { diagnostics }
    }

    fn warn_cycles(&self, registry: &Registry) {
        for cycle in registry.cycles() {
            let names = cycle
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            log::debug!("dependency cycle between {names}");

            let mut members = cycle.iter().filter_map(|name| registry.get(*name));
            let Some(first) = members.next() else {
                continue;
            };
            let message = if cycle.len() == 1 {
                format!("'{names}' depends on itself")
            } else {
                format!("dependency cycle between {names}")
            };
            let mut diagnostic = self
                .diagnostics
                .diagnostic(Severity::Warning)
                .with_message(message)
                .with_primary_label(
                    first.declaration.name.span(),
                    "this declaration is part of its own dependency closure",
                );
            for other in members {
                diagnostic = diagnostic
                    .with_secondary_label(other.declaration.name.span(), "also in this cycle");
            }
            diagnostic.emit();
        }
    }
}
impl<'p> Pass for Classify<'p> {
    type Input = Module;
    type Output = Registry;
    type Error = Infallible;

    fn name(&self) -> &'static str {
        "classify"
    }

    fn run(&mut self, module: Self::Input) -> Result<Self::Output, Self::Error> {
        let (imports, declarations) = module.into_parts();
        let imports = ImportTable::new(&imports);

        let mut known: HashSet<Symbol> = declarations
            .iter()
            .map(|declaration| declaration.name.name())
            .collect();
        known.extend(imports.internal_names());

        let classified = declarations
            .into_iter()
            .map(|declaration| {
                let classification = DependencyClassification::new(&declaration, &known, &imports);
                log::trace!(
                    "'{}' has {} internal and {} external dependencies, {} remaining",
                    declaration.name,
                    classification.internal.len(),
                    classification.external.len(),
                    classification.remaining.len()
                );
                ClassifiedDeclaration {
                    declaration,
                    classification,
                }
            })
            .collect();

        let registry = Registry::new(classified);
        log::debug!(
            "classified {} declarations against {} imported names",
            registry.len(),
            imports.len()
        );
        self.warn_cycles(&registry);
        Ok(registry)
    }
}
