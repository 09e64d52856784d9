use std::sync::Arc;

use miden_diagnostics::{CodeMap, DiagnosticsConfig, DiagnosticsHandler, Emitter, Verbosity};
use pretty_assertions::assert_eq;

use crate::{
    ast::Module,
    parser::{ParseError, Parser},
};

/// Forwards diagnostics to the terminal while keeping a copy that tests can inspect
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
}
impl Emitter for SplitEmitter {
    #[inline]
    fn buffer(&self) -> miden_diagnostics::term::termcolor::Buffer {
        self.capture.buffer()
    }

    #[inline]
    fn print(&self, buffer: miden_diagnostics::term::termcolor::Buffer) -> std::io::Result<()> {
        use std::io::Write;

        let mut copy = self.capture.buffer();
        copy.write_all(buffer.as_slice())?;
        self.capture.print(buffer)?;
        self.default.print(copy)
    }
}

// TEST HANDLER
// ================================================================================================

/// [ParseTest] parses a source string into a [Module] and checks the result, along with the
/// warnings emitted while parsing it.
pub struct ParseTest {
    diagnostics: Arc<DiagnosticsHandler>,
    emitter: Arc<SplitEmitter>,
    parser: Parser,
}

impl ParseTest {
    /// Creates a new test harness with a fresh code map.
    pub fn new() -> Self {
        let codemap = Arc::new(CodeMap::new());
        let emitter = Arc::new(SplitEmitter::new());
        let config = DiagnosticsConfig {
            verbosity: Verbosity::Warning,
            warnings_as_errors: false,
            no_warn: false,
            display: Default::default(),
        };
        let diagnostics = Arc::new(DiagnosticsHandler::new(
            config,
            codemap.clone(),
            emitter.clone(),
        ));
        let parser = Parser::new((), codemap);
        Self {
            diagnostics,
            emitter,
            parser,
        }
    }

    pub fn parse(&self, source: &str) -> Result<Module, ParseError> {
        self.parser
            .parse_string::<Module, _, _>(&self.diagnostics, source)
    }

    /// Parses `source`, which is expected to always succeed
    #[track_caller]
    pub fn module(&self, source: &str) -> Module {
        match self.parse(source) {
            Ok(module) => module,
            Err(err) => panic!("expected parsing to succeed, but it failed with: {err}"),
        }
    }

    /// Returns everything emitted to the diagnostics handler so far
    pub fn diagnostics(&self) -> String {
        self.emitter.captured()
    }

    // TEST METHODS
    // --------------------------------------------------------------------------------------------

    /// Parses the source and asserts that it produces the expected module, without warnings.
    #[track_caller]
    pub fn expect_module(&self, source: &str, expected: Module) {
        let module = self.module(source);
        assert_eq!(module, expected);
        let captured = self.diagnostics();
        assert!(
            captured.is_empty(),
            "expected no diagnostics, but got: {captured}"
        );
    }

    /// Parses the source and asserts that a diagnostic containing `expected` was emitted.
    #[track_caller]
    pub fn expect_diagnostic(&self, source: &str, expected: &str) -> Module {
        let module = self.module(source);
        assert!(
            self.diagnostics().contains(expected),
            "expected diagnostic output to contain the string: '{}'",
            expected
        );
        module
    }
}
