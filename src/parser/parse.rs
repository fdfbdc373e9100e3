//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point. It
//! also holds the [`FunctionTable`], the name index built once a program has
//! parsed.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: function definitions, parameters, types, variable declarations
//! - `statements`: while, if, return, blocks, assignments, expression statements
//! - `expressions`: one method per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        ParseError {
            message: message.into(),
            location,
        }
    }
}

/// Recursive descent parser
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Tokenize `source` and prepare to parse it.
    pub fn new(source: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Parse an already-lexed token stream. A missing trailing `Eof` is added.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| &t.kind) != Some(&TokenKind::Eof) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, location));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program (a sequence of function definitions)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let function = self.parse_function()?;
            program.functions.push(function);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        self.peek_kind().is_type_keyword()
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek_kind()) == std::mem::discriminant(kind)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &Token {
        // `from_tokens` guarantees a trailing Eof and `advance` never moves past it
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.position + n).map(|t| &t.kind)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn error_here(&self, message: &str) -> ParseError {
        ParseError::new(
            format!("{}, found {}", message, self.peek()),
            self.current_location(),
        )
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: &TokenKind,
        message: &str,
    ) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::LParen, &format!("Expected '(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::RParen, &format!("Expected ')' {ctx}"))
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::LBrace, &format!("Expected '{{' {ctx}"))
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::Semicolon, &format!("Expected ';' {ctx}"))
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = self.peek_kind() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error_here("Expected identifier"))
        }
    }
}

/// Functions of a parsed program, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: FxHashMap<String, Function>,
}

impl FunctionTable {
    /// Index a program. Redefining a function, or defining one named `print`,
    /// is rejected.
    pub fn from_program(program: Program) -> Result<Self, ParseError> {
        let mut functions = FxHashMap::default();

        for function in program.functions {
            if function.name == "print" {
                return Err(ParseError::new(
                    "Cannot define a function named 'print': it is a builtin",
                    function.location,
                ));
            }
            if let Some(existing) = functions.get(&function.name) {
                let existing: &Function = existing;
                return Err(ParseError::new(
                    format!(
                        "Redefinition of function '{}' (first defined at {})",
                        function.name, existing.location
                    ),
                    function.location,
                ));
            }
            functions.insert(function.name.clone(), function);
        }

        Ok(FunctionTable { functions })
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Functions ordered by where they were defined.
    pub fn in_source_order(&self) -> Vec<&Function> {
        let mut functions: Vec<&Function> = self.functions.values().collect();
        functions.sort_by_key(|f| (f.location.line, f.location.column));
        functions
    }
}
