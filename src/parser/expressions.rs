//! Expression parsing implementation
//!
//! Recursive descent with one method per precedence level, lowest first.
//! All binary levels are left-associative; the conditional operator is
//! right-associative.
//!
//! # Precedence (low to high)
//!
//! ```text
//! ?:  ||  &&  |  ^  &  == !=  < <= > >=  << >>  + -  * / %  unary
//! ```
//!
//! # Unary forms
//!
//! - `-e`, `!e`, `*e`
//! - `&name` (only a variable may have its address taken)
//! - `(type) e`
//! - `sizeof(type)`
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::{STACK_GROW_SIZE, STACK_RED_ZONE};

type Level = fn(&mut Parser) -> Result<Expr, ParseError>;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_conditional())
    }

    /// Parse conditional: condition ? then_expr : else_expr
    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_logical_or()?;

        if self.check(&TokenKind::Question) {
            let loc = self.current_location();
            self.advance();
            let then_expr = self.parse_expression()?;
            self.expect_token(&TokenKind::Colon, "Expected ':' in conditional expression")?;
            let else_expr = self.parse_expression()?;

            return Ok(Expr::new(
                ExprKind::Conditional {
                    condition: Box::new(condition),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                },
                loc,
            ));
        }

        Ok(condition)
    }

    /// Parse one left-associative binary level. `operators` maps the tokens
    /// accepted at this level to their operator.
    fn parse_binary_level(
        &mut self,
        operand: Level,
        operators: &[(TokenKind, BinOp)],
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        loop {
            let loc = self.current_location();
            let Some(op) = operators
                .iter()
                .find(|(kind, _)| self.check(kind))
                .map(|(_, op)| *op)
            else {
                break;
            };
            self.advance();

            let right = operand(self)?;
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                loc,
            );
        }

        Ok(left)
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_logical_and, &[(TokenKind::OrOr, BinOp::Or)])
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitwise_or, &[(TokenKind::AndAnd, BinOp::And)])
    }

    fn parse_bitwise_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitwise_xor, &[(TokenKind::Pipe, BinOp::BitOr)])
    }

    fn parse_bitwise_xor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_bitwise_and, &[(TokenKind::Caret, BinOp::BitXor)])
    }

    fn parse_bitwise_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, &[(TokenKind::Amp, BinOp::BitAnd)])
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_relational,
            &[(TokenKind::EqEq, BinOp::Eq), (TokenKind::NotEq, BinOp::Ne)],
        )
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_shift,
            &[
                (TokenKind::Lt, BinOp::Lt),
                (TokenKind::Le, BinOp::Le),
                (TokenKind::Gt, BinOp::Gt),
                (TokenKind::Ge, BinOp::Ge),
            ],
        )
    }

    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_additive,
            &[(TokenKind::LtLt, BinOp::BitShl), (TokenKind::GtGt, BinOp::BitShr)],
        )
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_multiplicative,
            &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)],
        )
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            Self::parse_unary,
            &[
                (TokenKind::Star, BinOp::Mul),
                (TokenKind::Slash, BinOp::Div),
                (TokenKind::Percent, BinOp::Mod),
            ],
        )
    }

    /// Parse unary (- ! * & cast sizeof)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_unary_inner())
    }

    fn parse_unary_inner(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        if self.match_token(&TokenKind::Minus) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::new(ExprKind::Unary { op: UnOp::Neg, operand }, loc));
        }

        if self.match_token(&TokenKind::Bang) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::new(ExprKind::Unary { op: UnOp::Not, operand }, loc));
        }

        if self.match_token(&TokenKind::Star) {
            let operand = self.parse_unary()?;
            return Ok(Expr::new(ExprKind::Deref(Box::new(operand)), loc));
        }

        if self.match_token(&TokenKind::Amp) {
            if !matches!(self.peek_kind(), TokenKind::Ident(_)) {
                return Err(self.error_here("Expected variable name after '&'"));
            }
            let name = self.expect_identifier()?;
            return Ok(Expr::new(ExprKind::AddressOf(name), loc));
        }

        // A '(' followed by a type keyword is a cast
        if self.check(&TokenKind::LParen)
            && self.peek_ahead(1).is_some_and(TokenKind::is_type_keyword)
        {
            self.advance(); // consume '('
            let type_loc = self.current_location();
            let target = self.parse_type()?;
            if target.is_void() {
                return Err(ParseError::new("Cannot cast to 'void'", type_loc));
            }
            self.expect_rparen("after cast type")?;
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::new(ExprKind::Cast { target, operand }, loc));
        }

        if self.match_token(&TokenKind::Sizeof) {
            self.expect_lparen("after 'sizeof'")?;
            let type_loc = self.current_location();
            let ty = self.parse_type()?;
            if ty.is_void() {
                return Err(ParseError::new("Cannot take sizeof 'void'", type_loc));
            }
            self.expect_rparen("after sizeof type")?;
            return Ok(Expr::new(ExprKind::SizeOf(ty), loc));
        }

        self.parse_primary()
    }

    /// Parse argument list: (expr, expr, ...), opening '(' already consumed
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);

                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect_rparen("after function arguments")?;
        Ok(args)
    }

    /// Parse primary (literals, variables, calls, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let kind = match self.peek_kind().clone() {
            TokenKind::IntLiteral(n) => ExprKind::IntLiteral(n),
            TokenKind::FloatLiteral(x) => ExprKind::FloatLiteral(x),
            TokenKind::CharLiteral(c) => ExprKind::CharLiteral(c),
            TokenKind::StringLiteral(s) => ExprKind::StringLiteral(s),
            TokenKind::Ident(name) => {
                self.advance();
                if self.match_token(&TokenKind::LParen) {
                    let args = self.parse_argument_list()?;
                    return Ok(Expr::new(ExprKind::Call { name, args }, loc));
                }
                return Ok(Expr::new(ExprKind::Identifier(name), loc));
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                return Ok(expr);
            }
            _ => return Err(self.error_here("Expected expression")),
        };

        self.advance();
        Ok(Expr::new(kind, loc))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};

    fn expr(source: &str) -> Result<Expr, ParseError> {
        let wrapped = format!("int main() {{ {}; }}", source);
        let mut program = Parser::new(&wrapped).unwrap().parse_program()?;
        match program.functions.remove(0).body.remove(0).kind {
            StmtKind::Expr(e) => Ok(e),
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    fn int(n: i64) -> Expr {
        Expr::new(ExprKind::IntLiteral(n), SourceLocation::default())
    }

    fn bin(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            SourceLocation::default(),
        )
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            expr("1 + 2 * 3").unwrap(),
            bin(BinOp::Add, int(1), bin(BinOp::Mul, int(2), int(3)))
        );
        assert_eq!(
            expr("1 << 2 + 3").unwrap(),
            bin(BinOp::BitShl, int(1), bin(BinOp::Add, int(2), int(3)))
        );
        assert_eq!(
            expr("1 | 2 ^ 3 & 4").unwrap(),
            bin(
                BinOp::BitOr,
                int(1),
                bin(BinOp::BitXor, int(2), bin(BinOp::BitAnd, int(3), int(4)))
            )
        );
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(
            expr("10 - 3 - 2").unwrap(),
            bin(BinOp::Sub, bin(BinOp::Sub, int(10), int(3)), int(2))
        );
    }

    #[test]
    fn test_conditional_is_right_associative() {
        let e = expr("1 ? 2 : 3 ? 4 : 5").unwrap();
        match e.kind {
            ExprKind::Conditional { else_expr, .. } => {
                assert!(matches!(else_expr.kind, ExprKind::Conditional { .. }))
            }
            other => panic!("Expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_cast_binds_tighter_than_binary() {
        let e = expr("(int) 3.9 + 1").unwrap();
        match e.kind {
            ExprKind::Binary { op: BinOp::Add, left, .. } => {
                assert!(matches!(left.kind, ExprKind::Cast { target, .. } if target == Type::int()))
            }
            other => panic!("Expected addition, got {:?}", other),
        }
    }

    #[test]
    fn test_sizeof_and_address_of() {
        assert_eq!(
            expr("sizeof(char*)").unwrap().kind,
            ExprKind::SizeOf(Type::char().with_pointer())
        );
        assert_eq!(expr("&x").unwrap().kind, ExprKind::AddressOf("x".to_string()));
        assert!(expr("sizeof(void)").is_err());
        assert!(expr("&1").is_err());
    }

    #[test]
    fn test_call_arguments() {
        match expr("sum(1, 2 + 3, f())").unwrap().kind {
            ExprKind::Call { name, args } => {
                assert_eq!(name, "sum");
                assert_eq!(args.len(), 3);
                assert!(matches!(&args[2].kind, ExprKind::Call { args, .. } if args.is_empty()));
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_operand() {
        let err = expr("1 +").unwrap_err();
        assert_eq!(err.message, "Expected expression, found ';'");
    }
}
