mod closures;

use std::sync::Arc;

use depsort_parser::Symbol;
use depsort_pass::Pass;
use miden_diagnostics::{CodeMap, DiagnosticsConfig, DiagnosticsHandler, Verbosity};

use crate::{AnalysisConfig, AnalysisError, Classify, Rank, RankedReport, Registry};

/// Runs the whole analysis on `source`, which is expected to always succeed
#[track_caller]
pub fn analyze(source: &str) -> RankedReport {
    analyze_with(source, AnalysisConfig::default())
}

#[track_caller]
pub fn analyze_with(source: &str, config: AnalysisConfig) -> RankedReport {
    let pipeline = Pipeline::default();
    match pipeline.analyze(source, config) {
        Ok(report) => report,
        Err(err) => {
            pipeline.emitter.print_captured_to_stderr();
            panic!("expected analysis to succeed, but it failed with: {err}")
        }
    }
}

/// Parses and classifies `source`, stopping before ranking
#[track_caller]
pub fn classify(source: &str) -> Registry {
    let pipeline = Pipeline::default();
    match pipeline.classify(source) {
        Ok(registry) => registry,
        Err(err) => panic!("expected classification to succeed, but it failed with: {err}"),
    }
}

/// Analyzes `source` and asserts that a diagnostic containing `expected` was emitted
#[track_caller]
pub fn expect_diagnostic(source: &str, expected: &str) -> RankedReport {
    let pipeline = Pipeline::default();
    let report = match pipeline.analyze(source, AnalysisConfig::default()) {
        Ok(report) => report,
        Err(err) => panic!("expected analysis to succeed, but it failed with: {err}"),
    };
    let found = pipeline.emitter.captured().contains(expected);
    if !found {
        pipeline.emitter.print_captured_to_stderr();
    }
    assert!(
        found,
        "expected diagnostic output to contain the string: '{}'",
        expected
    );
    report
}

pub fn names(symbols: &[Symbol]) -> Vec<&'static str> {
    symbols.iter().map(|symbol| symbol.as_str()).collect()
}

pub fn order<'a, I>(entries: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a crate::RankedEntry>,
{
    entries
        .into_iter()
        .map(|entry| entry.name().as_str())
        .collect()
}

#[inline]
pub fn sym(name: &str) -> Symbol {
    Symbol::intern(name)
}

struct Pipeline {
    codemap: Arc<CodeMap>,
    emitter: Arc<SplitEmitter>,
    diagnostics: Arc<DiagnosticsHandler>,
}
impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DiagnosticsConfig {
            verbosity: Verbosity::Warning,
            warnings_as_errors: false,
            no_warn: false,
            display: Default::default(),
        })
    }
}
impl Pipeline {
    pub fn new(config: DiagnosticsConfig) -> Self {
        let codemap = Arc::new(CodeMap::new());
        let emitter = Arc::new(SplitEmitter::new());
        let diagnostics = Arc::new(DiagnosticsHandler::new(
            config,
            codemap.clone(),
            emitter.clone(),
        ));

        Self {
            codemap,
            emitter,
            diagnostics,
        }
    }

    pub fn classify(&self, source: &str) -> Result<Registry, AnalysisError> {
        depsort_parser::parse(&self.diagnostics, self.codemap.clone(), source)
            .map_err(AnalysisError::Parse)
            .and_then(|module| Ok(Classify::new(&self.diagnostics).run(module)?))
    }

    pub fn analyze(
        &self,
        source: &str,
        config: AnalysisConfig,
    ) -> Result<RankedReport, AnalysisError> {
        depsort_parser::parse(&self.diagnostics, self.codemap.clone(), source)
            .map_err(AnalysisError::Parse)
            .and_then(|module| {
                let mut pipeline = Classify::new(&self.diagnostics).chain(Rank::new(config));
                Ok(pipeline.run(module)?)
            })
    }
}

struct SplitEmitter {
    capture: miden_diagnostics::CaptureEmitter,
    default: miden_diagnostics::DefaultEmitter,
}
impl SplitEmitter {
    #[inline]
    pub fn new() -> Self {
        use miden_diagnostics::term::termcolor::ColorChoice;

        Self {
            capture: Default::default(),
            default: miden_diagnostics::DefaultEmitter::new(ColorChoice::Auto),
        }
    }

    pub fn captured(&self) -> String {
        self.capture.captured()
    }

    pub fn print_captured_to_stderr(&self) {
        use miden_diagnostics::Emitter;
        use std::io::Write;

        let mut copy = self.default.buffer();
        let captured = self.capture.captured();
        copy.write_all(captured.as_bytes()).unwrap();
        self.default.print(copy).unwrap();
    }
}
impl miden_diagnostics::Emitter for SplitEmitter {
    #[inline]
    fn buffer(&self) -> miden_diagnostics::term::termcolor::Buffer {
        self.capture.buffer()
    }

    #[inline]
    fn print(&self, buffer: miden_diagnostics::term::termcolor::Buffer) -> std::io::Result<()> {
        self.capture.print(buffer)
    }
}
