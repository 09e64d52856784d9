
use core::fmt;

use miden_diagnostics::{Diagnostic, SourceIndex, SourceSpan, ToDiagnostic};
use miden_parsing::{Scanner, Source};

use crate::{parser::ParseError, Symbol};

/// The value produced by the Lexer when iterated
pub type Lexed = Result<(SourceIndex, Token, SourceIndex), ParseError>;

/// Errors that may occur during lexing of the source
#[derive(Clone, Debug, thiserror::Error)]
pub enum LexicalError {
    #[error("encountered unexpected character '{found}'")]
    UnexpectedCharacter { start: SourceIndex, found: char },
    #[error("unterminated {kind}")]
    Unterminated {
        span: SourceSpan,
        kind: &'static str,
    },
}
impl Eq for LexicalError {}
impl PartialEq for LexicalError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::UnexpectedCharacter { found: lhs, .. },
                Self::UnexpectedCharacter { found: rhs, .. },
            ) => lhs == rhs,
            (Self::Unterminated { kind: lhs, .. }, Self::Unterminated { kind: rhs, .. }) => {
                lhs == rhs
            }
            _ => false,
        }
    }
}
impl LexicalError {
    pub fn span(&self) -> SourceSpan {
        match self {
            Self::UnexpectedCharacter { start, .. } => SourceSpan::new(*start, *start),
            Self::Unterminated { span, .. } => *span,
        }
    }
}
impl ToDiagnostic for LexicalError {
    fn to_diagnostic(self) -> Diagnostic {
        use miden_diagnostics::Label;

        let span = self.span();
        match self {
            Self::UnexpectedCharacter { found, .. } => Diagnostic::warning()
                .with_message("unexpected character")
                .with_labels(vec![Label::primary(span.source_id(), span)
                    .with_message(format!("'{}' was ignored", found.escape_default()))]),
            Self::Unterminated { kind, .. } => Diagnostic::warning()
                .with_message(format!("unterminated {kind}"))
                .with_labels(vec![Label::primary(span.source_id(), span)
                    .with_message("the rest of the input was ignored")]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Eof,
    Error(LexicalError),
    Comment,
    // PRIMITIVES
    // --------------------------------------------------------------------------------------------
    /// Identifiers start with a letter, `_` or `$`, followed by any number of alphanumeric
    /// characters, `_` or `$`.
    Ident(Symbol),
    /// The contents of a string literal, without its quotes.
    Str(Symbol),
    /// Numeric literals only matter for skipping, their value is not kept.
    Num,

    // KEYWORDS
    // --------------------------------------------------------------------------------------------
    Import,
    Export,
    From,
    As,
    Class,
    Interface,
    Abstract,
    Extends,
    Implements,
    Enum,
    Const,
    Namespace,
    Module,
    Declare,
    Default,
    Type,
    Function,

    // PUNCTUATION
    // --------------------------------------------------------------------------------------------
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    Colon,
    SemiColon,
    Comma,
    Dot,
    Ellipsis,
    Question,
    Bang,
    Equal,
    FatArrow,
    Star,
    Bar,
    Ampersand,
    At,
    Hash,
    /// Operators that never affect structure, e.g. `+` or `/`
    Punct(char),
}
impl Token {
    pub fn from_keyword_or_ident(s: &str) -> Self {
        match s {
            "import" => Self::Import,
            "export" => Self::Export,
            "from" => Self::From,
            "as" => Self::As,
            "class" => Self::Class,
            "interface" => Self::Interface,
            "abstract" => Self::Abstract,
            "extends" => Self::Extends,
            "implements" => Self::Implements,
            "enum" => Self::Enum,
            "const" => Self::Const,
            "namespace" => Self::Namespace,
            "module" => Self::Module,
            "declare" => Self::Declare,
            "default" => Self::Default,
            "type" => Self::Type,
            "function" => Self::Function,
            other => Self::Ident(Symbol::intern(other)),
        }
    }

    /// Contextual keywords may appear wherever a name is expected, e.g. a property
    /// called `type` or a module called `module`. Returns the name they spell.
    pub fn as_name(&self) -> Option<Symbol> {
        match self {
            Self::Ident(id) => Some(*id),
            Self::From
            | Self::As
            | Self::Abstract
            | Self::Namespace
            | Self::Module
            | Self::Declare
            | Self::Type
            | Self::Default => Some(Symbol::intern(self.to_string())),
            _ => None,
        }
    }
}
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "EOF"),
            Self::Error(_) => write!(f, "ERROR"),
            Self::Comment => write!(f, "COMMENT"),
            Self::Ident(ref id) => write!(f, "{}", id),
            Self::Str(ref s) => write!(f, "\"{}\"", s),
            Self::Num => write!(f, "NUMBER"),
            Self::Import => write!(f, "import"),
            Self::Export => write!(f, "export"),
            Self::From => write!(f, "from"),
            Self::As => write!(f, "as"),
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Abstract => write!(f, "abstract"),
            Self::Extends => write!(f, "extends"),
            Self::Implements => write!(f, "implements"),
            Self::Enum => write!(f, "enum"),
            Self::Const => write!(f, "const"),
            Self::Namespace => write!(f, "namespace"),
            Self::Module => write!(f, "module"),
            Self::Declare => write!(f, "declare"),
            Self::Default => write!(f, "default"),
            Self::Type => write!(f, "type"),
            Self::Function => write!(f, "function"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::LAngle => write!(f, "<"),
            Self::RAngle => write!(f, ">"),
            Self::Colon => write!(f, ":"),
            Self::SemiColon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Ellipsis => write!(f, "..."),
            Self::Question => write!(f, "?"),
            Self::Bang => write!(f, "!"),
            Self::Equal => write!(f, "="),
            Self::FatArrow => write!(f, "=>"),
            Self::Star => write!(f, "*"),
            Self::Bar => write!(f, "|"),
            Self::Ampersand => write!(f, "&"),
            Self::At => write!(f, "@"),
            Self::Hash => write!(f, "#"),
            Self::Punct(c) => write!(f, "{}", c),
        }
    }
}

macro_rules! pop {
    ($lex:ident, $code:expr) => {{
        $lex.skip();
        $code
    }};
}

macro_rules! pop2 {
    ($lex:ident, $code:expr) => {{
        $lex.skip();
        $lex.skip();
        $code
    }};
}

/// The lexer used to split declaration sources into tokens. It implements `Iterator`, so
/// retrieving the tokens is a matter of iterating over it.
///
/// # Errors
///
/// Lexical errors never stop the lexer. An error is produced in place of the offending
/// character (or unterminated literal) and lexing resumes right after it, leaving it to the
/// parser to decide how much of the surrounding input is still usable.
pub struct Lexer<S> {
    /// The scanner produces a sequence of chars + location, and can be controlled
    scanner: Scanner<S>,

    /// The most recent token to be lexed.
    /// At the start and end, this should be Token::Eof
    token: Token,

    /// The position in the input where the current token starts
    token_start: SourceIndex,

    /// The position in the input where the current token ends
    token_end: SourceIndex,

    /// Set once the scanner reports end of input
    eof: bool,
}
impl<S> Lexer<S>
where
    S: Source,
{
    /// Produces an instance of the lexer over the given scanner. No lexical analysis occurs
    /// until the lexer has been iterated over.
    pub fn new(scanner: Scanner<S>) -> Self {
        use miden_diagnostics::ByteOffset;

        let start = scanner.start();
        let mut lexer = Lexer {
            scanner,
            token: Token::Eof,
            token_start: start + ByteOffset(0),
            token_end: start + ByteOffset(0),
            eof: false,
        };
        lexer.advance();
        lexer
    }

    pub fn lex(&mut self) -> Option<<Self as Iterator>::Item> {
        if self.eof && self.token == Token::Eof {
            return None;
        }

        let token = core::mem::replace(&mut self.token, Token::Eof);
        let start = self.token_start;
        let end = self.token_end;
        self.advance();
        match token {
            Token::Error(err) => Some(Err(err.into())),
            token => Some(Ok((start, token, end))),
        }
    }

    fn advance(&mut self) {
        self.advance_start();
        self.token = self.tokenize();
    }

    #[inline]
    fn advance_start(&mut self) {
        let mut position: SourceIndex;
        loop {
            let (pos, c) = self.scanner.read();

            position = pos;

            if c == '\0' && self.at_end() {
                self.eof = true;
                return;
            }

            if c.is_whitespace() {
                self.scanner.advance();
                continue;
            }

            break;
        }

        self.token_start = position;
        self.token_end = position;
    }

    /// Returns true once the scanner is out of input. A NUL character read from the source
    /// itself is followed by another position, the end of input repeats the same one.
    #[inline]
    fn at_end(&self) -> bool {
        let (pos, c) = self.scanner.read();
        c == '\0' && (pos == SourceIndex::UNKNOWN || pos == self.scanner.peek().0)
    }

    #[inline]
    fn pop(&mut self) -> char {
        use miden_diagnostics::ByteOffset;

        let (pos, c) = self.scanner.pop();
        self.token_end = pos + ByteOffset::from_char_len(c);
        c
    }

    #[inline]
    fn peek(&mut self) -> char {
        let (_, c) = self.scanner.peek();
        c
    }

    #[inline]
    fn read(&mut self) -> char {
        let (_, c) = self.scanner.read();
        c
    }

    #[inline]
    fn skip(&mut self) {
        self.pop();
    }

    /// Get the span for the current token in `Source`.
    #[inline]
    fn span(&self) -> SourceSpan {
        SourceSpan::new(self.token_start, self.token_end)
    }

    /// Get a string slice of the current token.
    #[inline]
    fn slice(&self) -> &str {
        self.scanner.slice(self.span())
    }

    fn tokenize(&mut self) -> Token {
        if self.eof {
            return Token::Eof;
        }

        match self.read() {
            '\0' if self.at_end() => {
                self.eof = true;
                Token::Eof
            }
            '/' => match self.peek() {
                '/' => self.lex_line_comment(),
                '*' => self.lex_block_comment(),
                _ => pop!(self, Token::Punct('/')),
            },
            '"' | '\'' | '`' => self.lex_string(),
            '{' => pop!(self, Token::LBrace),
            '}' => pop!(self, Token::RBrace),
            '(' => pop!(self, Token::LParen),
            ')' => pop!(self, Token::RParen),
            '[' => pop!(self, Token::LBracket),
            ']' => pop!(self, Token::RBracket),
            '<' => pop!(self, Token::LAngle),
            '>' => pop!(self, Token::RAngle),
            ':' => pop!(self, Token::Colon),
            ';' => pop!(self, Token::SemiColon),
            ',' => pop!(self, Token::Comma),
            '.' => self.lex_dot(),
            '?' => pop!(self, Token::Question),
            '!' => pop!(self, Token::Bang),
            '=' => match self.peek() {
                '>' => pop2!(self, Token::FatArrow),
                _ => pop!(self, Token::Equal),
            },
            '*' => pop!(self, Token::Star),
            '|' => pop!(self, Token::Bar),
            '&' => pop!(self, Token::Ampersand),
            '@' => pop!(self, Token::At),
            '#' => pop!(self, Token::Hash),
            c @ ('+' | '-' | '%' | '^' | '~' | '\\') => pop!(self, Token::Punct(c)),
            '0'..='9' => self.lex_number(),
            c if c == '_' || c == '$' || c.is_alphabetic() => self.lex_keyword_or_ident(),
            c => {
                let start = self.span().start();
                self.skip();
                Token::Error(LexicalError::UnexpectedCharacter { start, found: c })
            }
        }
    }

    fn lex_line_comment(&mut self) -> Token {
        loop {
            match self.read() {
                '\n' => break,
                '\0' if self.at_end() => {
                    self.eof = true;
                    break;
                }
                _ => self.skip(),
            }
        }

        Token::Comment
    }

    fn lex_block_comment(&mut self) -> Token {
        // Consume the opening `/*`
        self.skip();
        self.skip();
        loop {
            match self.read() {
                '*' if self.peek() == '/' => {
                    self.skip();
                    self.skip();
                    return Token::Comment;
                }
                '\0' if self.at_end() => {
                    self.eof = true;
                    return Token::Error(LexicalError::Unterminated {
                        span: self.span(),
                        kind: "block comment",
                    });
                }
                _ => self.skip(),
            }
        }
    }

    fn lex_string(&mut self) -> Token {
        let quote = self.pop();
        loop {
            match self.read() {
                '\\' => {
                    self.skip();
                    if !self.at_end() {
                        self.skip();
                    }
                }
                '\0' if self.at_end() => {
                    self.eof = true;
                    return Token::Error(LexicalError::Unterminated {
                        span: self.span(),
                        kind: "string literal",
                    });
                }
                c if c == quote => {
                    self.skip();
                    break;
                }
                _ => self.skip(),
            }
        }

        let raw = self.slice();
        Token::Str(Symbol::intern(&raw[1..raw.len() - 1]))
    }

    fn lex_dot(&mut self) -> Token {
        self.skip();
        if self.read() == '.' && self.peek() == '.' {
            self.skip();
            self.skip();
            return Token::Ellipsis;
        }
        Token::Dot
    }

    #[inline]
    fn lex_keyword_or_ident(&mut self) -> Token {
        self.skip();
        loop {
            match self.read() {
                '_' | '$' => self.skip(),
                c if c.is_alphanumeric() => self.skip(),
                _ => break,
            }
        }

        Token::from_keyword_or_ident(self.slice())
    }

    #[inline]
    fn lex_number(&mut self) -> Token {
        // Covers decimal, hex and exponent forms well enough to skip them
        loop {
            match self.read() {
                '_' | '.' => self.skip(),
                c if c.is_ascii_alphanumeric() => self.skip(),
                _ => break,
            }
        }

        Token::Num
    }
}

impl<S> Iterator for Lexer<S>
where
    S: Source,
{
    type Item = Lexed;

    fn next(&mut self) -> Option<Self::Item> {
        let mut res = self.lex();
        while let Some(Ok((_, Token::Comment, _))) = res {
            res = self.lex();
        }
        res
    }
}
