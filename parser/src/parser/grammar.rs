//! A tolerant parser over the token stream.
//!
//! The parser only understands the handful of constructs that matter for ordering
//! declarations, and skips everything else. Balanced `{}`/`()`/`[]`/`<>` groups are skipped
//! as a unit, which keeps method bodies, initializers and nested declarations from leaking
//! into the enclosing declaration.
//!
//! Nothing here returns an error. Fragments that cannot be understood are reported as
//! warnings and contribute no names and no dependencies.
use miden_diagnostics::{DiagnosticsHandler, Severity, SourceIndex, SourceSpan};

use crate::{
    ast::*,
    lexer::{Lexed, Token},
    Symbol,
};

/// Type names which refer to language builtins rather than to declarations
const BUILTIN_TYPES: &[&str] = &[
    "any",
    "bigint",
    "boolean",
    "never",
    "null",
    "number",
    "object",
    "string",
    "symbol",
    "this",
    "undefined",
    "unknown",
    "void",
];

/// Standard library types. Generic ones stand for their first type argument, so that
/// `Array<Mesh>` depends on `Mesh`.
const GLOBAL_TYPES: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "Date",
    "Error",
    "Float32Array",
    "Float64Array",
    "Function",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Map",
    "Object",
    "Partial",
    "Promise",
    "ReadonlyArray",
    "Readonly",
    "Record",
    "RegExp",
    "Set",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "WeakMap",
    "WeakSet",
];

/// Keywords which may prefix a type without changing what it refers to
const TYPE_OPERATORS: &[&str] = &["keyof", "readonly", "typeof", "unique"];

static EOF: Token = Token::Eof;

type SpannedToken = (SourceIndex, Token, SourceIndex);

#[inline]
fn is_builtin(ty: &Identifier) -> bool {
    let name = ty.as_str();
    BUILTIN_TYPES.contains(&name) || GLOBAL_TYPES.contains(&name)
}

/// Builds a [Module] from a stream of [Lexed] tokens
#[derive(Debug, Default)]
pub struct ModuleParser;
impl ModuleParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse<I>(&self, diagnostics: &DiagnosticsHandler, tokens: I) -> Module
    where
        I: IntoIterator<Item = Lexed>,
    {
        let mut valid = vec![];
        for lexed in tokens {
            match lexed {
                Ok(token) => valid.push(token),
                Err(err) => diagnostics.emit(err),
            }
        }

        let mut state = ParserState {
            diagnostics,
            tokens: valid,
            pos: 0,
            module: Module::new(),
        };
        state.parse_module();
        log::debug!(
            "parsed {} imports and {} declarations",
            state.module.imports.len(),
            state.module.len()
        );
        state.module
    }
}

struct ParserState<'a> {
    diagnostics: &'a DiagnosticsHandler,
    tokens: Vec<SpannedToken>,
    pos: usize,
    module: Module,
}
impl<'a> ParserState<'a> {
    // TOKEN CURSOR
    // --------------------------------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    #[inline]
    fn peek_at(&self, n: usize) -> &Token {
        self.tokens
            .get(self.pos + n)
            .map(|(_, token, _)| token)
            .unwrap_or(&EOF)
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Start of the current token, or end of the previous one when at the end of input
    fn start(&self) -> SourceIndex {
        match self.tokens.get(self.pos) {
            Some((start, _, _)) => *start,
            None => self.prev_end(),
        }
    }

    /// End of the most recently consumed token
    fn prev_end(&self) -> SourceIndex {
        let index = self.pos.min(self.tokens.len()).saturating_sub(1);
        match self.tokens.get(index) {
            Some((_, _, end)) => *end,
            None => SourceSpan::UNKNOWN.start(),
        }
    }

    fn span_from(&self, start: SourceIndex) -> SourceSpan {
        SourceSpan::new(start, self.prev_end())
    }

    fn bump(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it can be used as a name
    fn eat_name(&mut self) -> Option<Identifier> {
        let (start, token, end) = self.tokens.get(self.pos)?;
        let name = token.as_name()?;
        let id = Identifier::new(SourceSpan::new(*start, *end), name);
        self.bump();
        Some(id)
    }

    /// Skips a group opened by the current token, including everything nested in it.
    ///
    /// Only the opening token kind is counted, which is enough for well-formed input and
    /// guarantees progress on anything else.
    fn skip_balanced(&mut self) {
        let (open, close) = match self.peek() {
            Token::LBrace => (Token::LBrace, Token::RBrace),
            Token::LParen => (Token::LParen, Token::RParen),
            Token::LBracket => (Token::LBracket, Token::RBracket),
            Token::LAngle => (Token::LAngle, Token::RAngle),
            _ => {
                self.bump();
                return;
            }
        };
        let mut depth = 0usize;
        while !self.at_eof() {
            let token = self.peek();
            if *token == open {
                depth += 1;
            } else if *token == close {
                depth -= 1;
                if depth == 0 {
                    self.bump();
                    return;
                }
            } else if open != Token::LBrace && *token == Token::RBrace {
                // A stray `}` inside `(`/`[`/`<` means the group was never closed
                return;
            }
            self.bump();
        }
    }

    /// Returns true if the current token begins a new top-level statement.
    ///
    /// Members may be named after keywords, so `namespace: string;` or `import()` is still read
    /// as a member.
    fn at_statement_start(&self) -> bool {
        matches!(
            self.peek(),
            Token::Import
                | Token::Export
                | Token::Class
                | Token::Interface
                | Token::Enum
                | Token::Namespace
        ) && !matches!(
            self.peek_at(1),
            Token::Colon
                | Token::Question
                | Token::Bang
                | Token::Equal
                | Token::SemiColon
                | Token::Comma
                | Token::LParen
                | Token::LAngle
                | Token::LBrace
                | Token::RBrace
        )
    }

    // DIAGNOSTICS
    // --------------------------------------------------------------------------------------------

    fn malformed(&self, start: SourceIndex, what: &str) {
        log::debug!("ignoring malformed {what}");
        self.diagnostics
            .diagnostic(Severity::Warning)
            .with_message(format!("ignoring malformed {what}"))
            .with_primary_label(
                self.span_from(start),
                format!("this {what} could not be understood, it contributes nothing"),
            )
            .emit();
    }

    fn declare(&mut self, declaration: Declaration) {
        let name = declaration.name;
        let span = declaration.span;
        log::trace!(
            "declared {} '{}' with {} dependencies",
            declaration.kind,
            name,
            declaration.dependencies.len()
        );
        if let Some(prev) = self.module.declare(declaration) {
            self.diagnostics
                .diagnostic(Severity::Warning)
                .with_message(format!("'{name}' is declared more than once"))
                .with_primary_label(span, "this declaration replaces the previous one")
                .with_secondary_label(prev.span, "previously declared here")
                .emit();
        }
    }

    // MODULE
    // --------------------------------------------------------------------------------------------

    fn parse_module(&mut self) {
        while !self.at_eof() {
            match self.peek() {
                Token::Import => self.parse_import(),
                Token::Export | Token::Declare | Token::Default | Token::Abstract => self.bump(),
                Token::Const if *self.peek_at(1) == Token::Enum => self.bump(),
                Token::Class => self.parse_class_like(DeclarationKind::Class),
                Token::Interface => self.parse_class_like(DeclarationKind::Interface),
                Token::Enum => self.parse_named_block(DeclarationKind::Enum),
                Token::Namespace | Token::Module => {
                    self.parse_named_block(DeclarationKind::Namespace)
                }
                Token::LBrace | Token::LParen | Token::LBracket => self.skip_balanced(),
                _ => self.bump(),
            }
        }
    }

    /// Skips to the end of a statement which could not be parsed
    fn recover_statement(&mut self) {
        loop {
            match self.peek() {
                Token::Eof => return,
                Token::SemiColon => {
                    self.bump();
                    return;
                }
                Token::Import
                | Token::Export
                | Token::Class
                | Token::Interface
                | Token::Enum
                | Token::Namespace => return,
                Token::LBrace | Token::LParen | Token::LBracket => self.skip_balanced(),
                _ => self.bump(),
            }
        }
    }

    // IMPORTS
    // --------------------------------------------------------------------------------------------

    fn parse_import(&mut self) {
        let start = self.start();
        self.bump();

        match self.peek() {
            // `import("./x")` and `import.meta` are expressions, not statements
            Token::LParen | Token::Dot => return,
            Token::Type if !matches!(self.peek_at(1), Token::From | Token::Comma) => self.bump(),
            _ => (),
        }

        // Side-effect import
        if let Token::Str(path) = *self.peek() {
            self.bump();
            self.eat(&Token::SemiColon);
            self.module
                .imports
                .push(ImportEntry::new(self.span_from(start), vec![], path));
            return;
        }

        let mut names = vec![];
        loop {
            let parsed = match self.peek() {
                Token::LBrace => self.parse_named_imports(&mut names),
                Token::Star => {
                    self.bump();
                    self.eat(&Token::As) && self.eat_name().map(|id| names.push(id)).is_some()
                }
                Token::From => false,
                _ => self.eat_name().map(|id| names.push(id)).is_some(),
            };
            if !parsed {
                break;
            }
            if !self.eat(&Token::Comma) {
                break;
            }
        }

        if !self.eat(&Token::From) {
            self.malformed(start, "import statement");
            self.recover_statement();
            return;
        }
        let path = match *self.peek() {
            Token::Str(path) => path,
            _ => {
                self.malformed(start, "import statement");
                self.recover_statement();
                return;
            }
        };
        self.bump();
        self.eat(&Token::SemiColon);

        let entry = ImportEntry::new(self.span_from(start), names, path);
        log::trace!(
            "import of {} names from '{}' ({})",
            entry.names.len(),
            path,
            if entry.is_internal {
                "internal"
            } else {
                "external"
            }
        );
        self.module.imports.push(entry);
    }

    /// Parses `{ A, B as C, type D }`, returning false if the list is never closed
    fn parse_named_imports(&mut self, names: &mut Vec<Identifier>) -> bool {
        self.bump();
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump();
                    return true;
                }
                Token::Eof | Token::SemiColon | Token::Import => return false,
                Token::Comma => self.bump(),
                Token::Type if self.peek_at(1).as_name().is_some() => self.bump(),
                token if token.as_name().is_some() => {
                    let imported = self.eat_name();
                    let local = if self.eat(&Token::As) {
                        self.eat_name()
                    } else {
                        imported
                    };
                    names.extend(local);
                }
                Token::Str(_) => {
                    // `{ "kebab-name" as local }`
                    self.bump();
                    if self.eat(&Token::As) {
                        names.extend(self.eat_name());
                    }
                }
                _ => self.bump(),
            }
        }
    }

    // DECLARATIONS
    // --------------------------------------------------------------------------------------------

    fn parse_class_like(&mut self, kind: DeclarationKind) {
        let start = self.start();
        self.bump();

        let name = match self.eat_name() {
            Some(name) => name,
            None => {
                self.malformed(start, "declaration header");
                if *self.peek() == Token::LBrace {
                    self.skip_balanced();
                }
                return;
            }
        };
        if *self.peek() == Token::LAngle {
            self.skip_balanced();
        }

        let mut parent = None;
        loop {
            match self.peek() {
                Token::LBrace => break,
                Token::Extends => {
                    self.bump();
                    let supertype = self.parse_type_path();
                    if parent.is_none() {
                        parent = supertype;
                    }
                    if *self.peek() == Token::LAngle {
                        self.skip_balanced();
                    }
                }
                // A header without a body ends where the next statement begins
                Token::Eof
                | Token::SemiColon
                | Token::RBrace
                | Token::Import
                | Token::Export
                | Token::Class
                | Token::Interface
                | Token::Enum
                | Token::Namespace => {
                    self.malformed(start, "declaration header");
                    return;
                }
                Token::LAngle | Token::LParen => self.skip_balanced(),
                // `implements` lists and extra interface supertypes are not tracked
                _ => self.bump(),
            }
        }

        let dependencies = self.parse_class_body();
        let span = self.span_from(start);
        self.declare(Declaration::new(span, kind, name, parent, dependencies));
    }

    fn parse_class_body(&mut self) -> Vec<Identifier> {
        let start = self.start();
        self.bump();

        let mut dependencies = vec![];
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump();
                    break;
                }
                Token::Eof => {
                    self.malformed(start, "declaration body");
                    break;
                }
                Token::SemiColon | Token::Comma => self.bump(),
                Token::At => {
                    self.bump();
                    self.parse_type_path();
                    if *self.peek() == Token::LParen {
                        self.skip_balanced();
                    }
                }
                Token::LBracket => {
                    // Index signature, e.g. `[key: string]: Value;`
                    self.skip_balanced();
                    if self.eat(&Token::Colon) {
                        self.parse_type();
                    }
                }
                Token::LBrace => self.skip_balanced(),
                // The closing brace is missing, leave the next statement to the module
                _ if self.at_statement_start() => {
                    self.malformed(start, "declaration body");
                    break;
                }
                _ => self.parse_member(&mut dependencies),
            }
        }
        dependencies
    }

    /// Parses a single class member, recording the type of properties in `dependencies`
    fn parse_member(&mut self, dependencies: &mut Vec<Identifier>) {
        loop {
            match self.peek() {
                Token::Colon => {
                    self.bump();
                    dependencies.extend(self.parse_type());
                    if self.eat(&Token::Equal) {
                        self.skip_initializer();
                    }
                    return;
                }
                Token::LParen | Token::LAngle => {
                    // Methods, constructors and accessors
                    if *self.peek() == Token::LAngle {
                        self.skip_balanced();
                    }
                    if *self.peek() == Token::LParen {
                        self.skip_balanced();
                    }
                    if self.eat(&Token::Colon) {
                        self.parse_type();
                    }
                    if *self.peek() == Token::LBrace {
                        self.skip_balanced();
                    }
                    return;
                }
                Token::Equal => {
                    self.bump();
                    self.skip_initializer();
                    return;
                }
                Token::SemiColon => {
                    self.bump();
                    return;
                }
                Token::RBrace | Token::LBrace | Token::Eof => return,
                _ if self.at_statement_start() => return,
                // Modifiers, the member name, and `?`/`!`/`#` markers
                _ => self.bump(),
            }
        }
    }

    /// Skips a property initializer, up to and including its terminating `;`
    fn skip_initializer(&mut self) {
        loop {
            match self.peek() {
                Token::SemiColon => {
                    self.bump();
                    return;
                }
                Token::RBrace | Token::Eof => return,
                Token::LBrace | Token::LParen | Token::LBracket => self.skip_balanced(),
                _ if self.at_statement_start() => return,
                _ => self.bump(),
            }
        }
    }

    /// Parses a type expression, returning the first type path in it which does not name a
    /// builtin, if there is one.
    ///
    /// Generic arguments and array suffixes are consumed but not reported. Of a union or
    /// intersection only one member is reported, so `null | Mesh` and `Mesh | null` both
    /// give `Mesh`.
    fn parse_type(&mut self) -> Option<Identifier> {
        while matches!(self.peek(), Token::Bar | Token::Ampersand) {
            self.bump();
        }

        let head = match self.peek() {
            Token::LParen => {
                self.skip_balanced();
                if self.eat(&Token::FatArrow) {
                    self.parse_type();
                }
                None
            }
            Token::LBrace | Token::LBracket => {
                self.skip_balanced();
                None
            }
            Token::Str(_) | Token::Num => {
                self.bump();
                None
            }
            Token::Ident(op) if TYPE_OPERATORS.contains(&op.as_str()) => {
                self.bump();
                return self.parse_type();
            }
            token if token.as_name().is_some() => match self.parse_type_path() {
                Some(path)
                    if GLOBAL_TYPES.contains(&path.as_str()) && *self.peek() == Token::LAngle =>
                {
                    self.parse_type_argument()
                }
                path => path,
            },
            _ => None,
        };
        let mut head = head.filter(|ty| !is_builtin(ty));

        while matches!(self.peek(), Token::LAngle | Token::LBracket) {
            self.skip_balanced();
        }
        while matches!(self.peek(), Token::Bar | Token::Ampersand) {
            self.bump();
            let member = self.parse_type();
            if head.is_none() {
                head = member;
            }
        }
        head
    }

    /// Parses `<T, ...>`, returning the head of the first argument
    fn parse_type_argument(&mut self) -> Option<Identifier> {
        self.bump();
        let argument = self.parse_type();
        loop {
            match self.peek() {
                Token::RAngle => {
                    self.bump();
                    break;
                }
                Token::SemiColon | Token::RBrace | Token::Eof => break,
                Token::LAngle | Token::LParen | Token::LBrace | Token::LBracket => {
                    self.skip_balanced()
                }
                _ => self.bump(),
            }
        }
        argument
    }

    /// Parses a possibly dotted name such as `Render.Graphic` into a single identifier
    fn parse_type_path(&mut self) -> Option<Identifier> {
        let start = self.start();
        let first = self.eat_name()?;
        let mut path = first.as_str().to_string();
        while *self.peek() == Token::Dot {
            match self.peek_at(1).as_name() {
                Some(segment) => {
                    self.bump();
                    self.bump();
                    path.push('.');
                    path.push_str(segment.as_str());
                }
                None => break,
            }
        }
        if path.len() == first.as_str().len() {
            return Some(first);
        }
        Some(Identifier::new(self.span_from(start), Symbol::intern(path)))
    }

    /// Parses `enum Name { ... }` and `namespace A.B { ... }`, recording only the name
    fn parse_named_block(&mut self, kind: DeclarationKind) {
        let start = self.start();
        self.bump();

        // `declare module "name" { ... }` declares types for another package
        if let Token::Str(_) = self.peek() {
            self.bump();
            if *self.peek() == Token::LBrace {
                self.skip_balanced();
            }
            return;
        }

        let name = match self.parse_type_path() {
            Some(name) => name,
            None => {
                self.malformed(start, "declaration header");
                if *self.peek() == Token::LBrace {
                    self.skip_balanced();
                }
                return;
            }
        };
        if *self.peek() == Token::LBrace {
            self.skip_balanced();
        }
        let span = self.span_from(start);
        self.declare(Declaration::named_block(span, kind, name));
    }
}
