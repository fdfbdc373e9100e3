//! Declaration parsing implementation
//!
//! - Function definitions: `type name(params) { ... }`
//! - Type parsing: base type followed by any number of `*`
//! - Function parameters
//! - Local variable declarations (no initializer)
//!
//! # Grammar
//!
//! ```text
//! function ::= type identifier "(" params? ")" block
//! params   ::= "void" | type identifier ("," type identifier)*
//! type     ::= ("int" | "char" | "float" | "void") "*"*
//! var_decl ::= type identifier ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse function definition: type name(params) { body }
    pub(crate) fn parse_function(&mut self) -> Result<Function, ParseError> {
        let loc = self.current_location();
        let return_type = self.parse_type()?;
        let name = self.expect_identifier()?;

        self.expect_lparen("after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        self.expect_lbrace("before function body")?;
        let body = self.parse_block_statements()?;

        Ok(Function {
            name,
            params,
            return_type,
            body,
            location: loc,
        })
    }

    /// Parse parameter list: (type name, type name, ...)
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(params);
        }

        // (void) means no parameters
        if self.check(&TokenKind::Void) && self.peek_ahead(1) == Some(&TokenKind::RParen) {
            self.advance();
            return Ok(params);
        }

        loop {
            let type_loc = self.current_location();
            let param_type = self.parse_type()?;
            if param_type.is_void() {
                return Err(ParseError::new("Parameter cannot have type 'void'", type_loc));
            }
            let param_name = self.expect_identifier()?;
            params.push(Param {
                name: param_name,
                param_type,
            });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse type: base_type [*]*
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let base = match self.peek_kind() {
            TokenKind::Int => BaseType::Int,
            TokenKind::Char => BaseType::Char,
            TokenKind::Float => BaseType::Float,
            TokenKind::Void => BaseType::Void,
            _ => return Err(self.error_here("Expected type")),
        };
        self.advance();

        let mut ty = Type::new(base);
        while self.match_token(&TokenKind::Star) {
            ty = ty.with_pointer();
        }

        Ok(ty)
    }

    /// Parse local declaration: type name;
    pub(crate) fn parse_var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let ty = self.parse_type()?;
        if ty.is_void() {
            return Err(ParseError::new("Variable cannot have type 'void'", loc));
        }

        let name = self.expect_identifier()?;
        self.expect_semicolon("after variable declaration")?;

        Ok(Stmt::new(StmtKind::VarDecl { ty, name }, loc))
    }
}
