mod grammar;

pub use self::grammar::ModuleParser;

use std::sync::Arc;

use miden_diagnostics::{CodeMap, Diagnostic, DiagnosticsHandler, ToDiagnostic};
use miden_parsing::{Scanner, Source};

use crate::{
    ast,
    lexer::{Lexed, Lexer, LexicalError},
};

pub type Parser = miden_parsing::Parser<()>;

/// Errors which may be produced while obtaining a parse tree.
///
/// Lexical errors only travel alongside the tokens: [ModuleParser] reports them as warnings
/// and skips the offending input. Only reading a file from disk fails outright.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexer(#[from] LexicalError),
    #[error("error reading {path:?}: {source}")]
    FileError {
        source: std::io::Error,
        path: std::path::PathBuf,
    },
}
impl Eq for ParseError {}
impl PartialEq for ParseError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Lexer(l), Self::Lexer(r)) => l == r,
            (Self::FileError { path: l, .. }, Self::FileError { path: r, .. }) => l == r,
            _ => false,
        }
    }
}
impl ToDiagnostic for ParseError {
    fn to_diagnostic(self) -> Diagnostic {
        match self {
            Self::Lexer(err) => err.to_diagnostic(),
            err => Diagnostic::error().with_message(err.to_string()),
        }
    }
}

impl miden_parsing::Parse for ast::Module {
    type Parser = ModuleParser;
    type Error = ParseError;
    type Config = ();
    type Token = Lexed;

    fn root_file_error(source: std::io::Error, path: std::path::PathBuf) -> Self::Error {
        ParseError::FileError { source, path }
    }

    fn parse<S>(
        parser: &Parser,
        diagnostics: &DiagnosticsHandler,
        source: S,
    ) -> Result<Self, Self::Error>
    where
        S: Source,
    {
        let scanner = Scanner::new(source);
        let lexer = Lexer::new(scanner);
        Self::parse_tokens(diagnostics, parser.codemap.clone(), lexer)
    }

    fn parse_tokens<S: IntoIterator<Item = Lexed>>(
        diagnostics: &DiagnosticsHandler,
        _codemap: Arc<CodeMap>,
        tokens: S,
    ) -> Result<Self, Self::Error> {
        Ok(ModuleParser::new().parse(diagnostics, tokens))
    }
}

#[cfg(test)]
mod tests;
