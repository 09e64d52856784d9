pub mod ast;

mod lexer;
mod parser;
mod symbols;

pub use crate::lexer::{Lexed, Lexer, LexicalError, Token};
pub use crate::parser::{ModuleParser, ParseError, Parser};
pub use crate::symbols::Symbol;

use std::{path::Path, sync::Arc};

use miden_diagnostics::{CodeMap, DiagnosticsHandler};

/// Parses the provided source and returns its parse tree.
///
/// Malformed input never makes this fail: it is reported to `diagnostics` as warnings and
/// skipped.
pub fn parse(
    diagnostics: &DiagnosticsHandler,
    codemap: Arc<CodeMap>,
    source: &str,
) -> Result<ast::Module, ParseError> {
    let parser = Parser::new((), codemap);
    parser.parse_string::<ast::Module, _, _>(diagnostics, source)
}

/// Reads and parses the source file at `path`. Fails only if the file cannot be read.
pub fn parse_file<P: AsRef<Path>>(
    diagnostics: &DiagnosticsHandler,
    codemap: Arc<CodeMap>,
    path: P,
) -> Result<ast::Module, ParseError> {
    let parser = Parser::new((), codemap);
    parser.parse_file::<ast::Module, _, _>(diagnostics, path)
}
