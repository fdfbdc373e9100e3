//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Variable declarations: `int x;`
//! - Assignments: `x = e;` and `*p = e;`
//! - Control flow: `while`, `if`/`else`
//! - `return`, with or without a value
//! - Compound statements: `{ ... }`
//! - Expression statements, usually calls
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | assign | while_stmt | if_stmt
//!             | return_stmt | block | expr_stmt
//! assign    ::= lvalue "=" expr ";"
//! lvalue    ::= identifier | "*" unary
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::{STACK_GROW_SIZE, STACK_RED_ZONE};

impl Parser {
    /// Parse statements up to and including the closing `}` of a block whose
    /// `{` has already been consumed.
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(&TokenKind::RBrace, "Expected '}' at end of block")?;
        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        if self.match_token(&TokenKind::Return) {
            return self.parse_return_statement(loc);
        }

        if self.match_token(&TokenKind::While) {
            return self.parse_while_statement(loc);
        }

        if self.match_token(&TokenKind::If) {
            return self.parse_if_statement(loc);
        }

        if self.check(&TokenKind::Else) {
            return Err(self.error_here("Expected statement"));
        }

        if self.match_token(&TokenKind::LBrace) {
            let statements = self.parse_block_statements()?;
            return Ok(Stmt::new(StmtKind::Block(statements), loc));
        }

        if self.is_type_keyword() {
            return self.parse_var_declaration();
        }

        // Assignment and expression statements share a prefix: parse an
        // expression and look for '=' after it.
        let expr = self.parse_expression()?;

        if self.check(&TokenKind::Eq) {
            let eq_loc = self.current_location();
            self.advance();
            let target = Self::into_lvalue(expr, eq_loc)?;
            let value = self.parse_expression()?;
            self.expect_semicolon("after assignment")?;
            return Ok(Stmt::new(StmtKind::Assign { target, value }, loc));
        }

        self.expect_semicolon("after expression")?;
        Ok(Stmt::new(StmtKind::Expr(expr), loc))
    }

    fn into_lvalue(expr: Expr, eq_loc: SourceLocation) -> Result<LValue, ParseError> {
        match expr.kind {
            ExprKind::Identifier(name) => Ok(LValue::Variable(name)),
            ExprKind::Deref(pointer) => Ok(LValue::Deref(*pointer)),
            _ => Err(ParseError::new(
                "Invalid assignment target: expected a variable or '*' expression",
                eq_loc,
            )),
        }
    }

    fn parse_return_statement(&mut self, loc: SourceLocation) -> Result<Stmt, ParseError> {
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let ctx = if value.is_some() {
            "after return value"
        } else {
            "after 'return'"
        };
        self.expect_semicolon(ctx)?;

        Ok(Stmt::new(StmtKind::Return(value), loc))
    }

    fn parse_while_statement(&mut self, loc: SourceLocation) -> Result<Stmt, ParseError> {
        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::new(StmtKind::While { condition, body }, loc))
    }

    fn parse_if_statement(&mut self, loc: SourceLocation) -> Result<Stmt, ParseError> {
        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        // A dangling else binds to the nearest if
        let else_branch = if self.match_token(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            loc,
        ))
    }
}
