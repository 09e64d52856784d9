use std::{path::Path, sync::Arc};

use depsort_pass::Pass;
use miden_diagnostics::{
    CaptureEmitter, CodeMap, DiagnosticsConfig, DiagnosticsHandler, Verbosity,
};

// EXPORTS
// ================================================================================================

/// Parse methods to build the declaration tree of a source
pub use depsort_parser::{ast, parse, parse_file, ParseError, Symbol};

/// Classification, closure and ranking of declarations
pub use depsort_ir::{
    AnalysisConfig, AnalysisError, ClosureResult, DependencyClassification, RankedEntry,
    RankedReport,
};

// ANALYZER
// ================================================================================================

/// Runs the whole analysis, from source text to [RankedReport].
///
/// Problems found along the way are reported to the diagnostics handler as warnings. Only
/// reading a file from disk can make the analysis fail.
pub struct Analyzer {
    codemap: Arc<CodeMap>,
    diagnostics: Arc<DiagnosticsHandler>,
    config: AnalysisConfig,
}
impl Analyzer {
    pub fn new(
        diagnostics: Arc<DiagnosticsHandler>,
        codemap: Arc<CodeMap>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            codemap,
            diagnostics,
            config,
        }
    }

    /// Analyzes `source`. Malformed input degrades to fewer declarations, never to an error.
    pub fn analyze(&self, source: &str) -> RankedReport {
        let module = match parse(&self.diagnostics, self.codemap.clone(), source) {
            Ok(module) => module,
            Err(err) => {
                self.diagnostics.emit(err);
                ast::Module::default()
            }
        };
        self.rank(module)
    }

    /// Reads the source at `path` and analyzes it
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<RankedReport, AnalysisError> {
        let module = parse_file(&self.diagnostics, self.codemap.clone(), path)?;
        Ok(self.rank(module))
    }

    fn rank(&self, module: ast::Module) -> RankedReport {
        let mut pipeline = depsort_ir::Classify::new(&self.diagnostics)
            .chain(depsort_ir::Rank::new(self.config));
        match pipeline.run(module) {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }
}

/// Analyzes `source` with the default configuration, discarding any warnings
pub fn analyze(source: &str) -> RankedReport {
    analyze_with(source, AnalysisConfig::default())
}

/// Analyzes `source` with the given configuration, discarding any warnings
pub fn analyze_with(source: &str, config: AnalysisConfig) -> RankedReport {
    let codemap = Arc::new(CodeMap::new());
    let emitter = Arc::new(CaptureEmitter::default());
    let diagnostics = Arc::new(DiagnosticsHandler::new(
        DiagnosticsConfig {
            verbosity: Verbosity::Warning,
            warnings_as_errors: false,
            no_warn: true,
            display: Default::default(),
        },
        codemap.clone(),
        emitter,
    ));
    Analyzer::new(diagnostics, codemap, config).analyze(source)
}
