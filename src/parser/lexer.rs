//! Lexer (tokenizer) for source text
//!
//! Converts raw source text into [`Token`]s consumed by the parser. The lexer
//! is an [`Iterator`], so tokens can be pulled one at a time; [`Lexer::tokenize`]
//! collects the whole stream for callers that want it eagerly.
//!
//! `//` and `/* */` comments are discarded. Any character outside the
//! language's alphabet is a [`LexError`].

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// A token and the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(u8),
    StringLiteral(String),

    // Identifiers
    Ident(String),

    // Keywords
    Int,
    Char,
    Float,
    Void,
    If,
    Else,
    While,
    Return,
    Sizeof,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Bitwise
    Amp,   // &
    Pipe,  // |
    Caret, // ^
    LtLt,  // <<
    GtGt,  // >>

    // Assignment
    Eq, // =

    // Conditional
    Question, // ?
    Colon,    // :

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Comma,     // ,

    // End of file
    Eof,
}

impl TokenKind {
    /// Keywords that start a type.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Char | TokenKind::Float | TokenKind::Void
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLiteral(n) => write!(f, "int literal {}", n),
            TokenKind::FloatLiteral(x) => write!(f, "float literal {:?}", x),
            TokenKind::CharLiteral(c) => {
                if c.is_ascii_graphic() || *c == b' ' {
                    write!(f, "char literal '{}'", *c as char)
                } else {
                    write!(f, "char literal '\\x{:02x}'", c)
                }
            }
            TokenKind::StringLiteral(s) => write!(f, "string literal {:?}", s),
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Char => write!(f, "'char'"),
            TokenKind::Float => write!(f, "'float'"),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Sizeof => write!(f, "'sizeof'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::LtLt => write!(f, "'<<'"),
            TokenKind::GtGt => write!(f, "'>>'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Lexer error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        LexError {
            message: message.into(),
            location,
        }
    }
}

/// Lexer for source text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    done: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            done: false,
        }
    }

    /// Tokenize the entire input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    /// Produce the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, loc));
        };

        let kind = match ch {
            '"' => self.string_literal(loc)?,
            '\'' => self.char_literal(loc)?,
            '0'..='9' => self.number_literal(ch, loc)?,
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '=' => self.pick('=', TokenKind::EqEq, TokenKind::Eq),
            '!' => self.pick('=', TokenKind::NotEq, TokenKind::Bang),
            '&' => self.pick('&', TokenKind::AndAnd, TokenKind::Amp),
            '|' => self.pick('|', TokenKind::OrOr, TokenKind::Pipe),
            '<' => {
                if self.peek() == Some('<') {
                    self.advance();
                    TokenKind::LtLt
                } else {
                    self.pick('=', TokenKind::Le, TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('>') {
                    self.advance();
                    TokenKind::GtGt
                } else {
                    self.pick('=', TokenKind::Ge, TokenKind::Gt)
                }
            }

            _ => {
                return Err(LexError::new(
                    format!("Unexpected character: '{}'", ch.escape_debug()),
                    loc,
                ));
            }
        };

        Ok(Token::new(kind, loc))
    }

    /// Consume `next` if it follows and return `long`, otherwise `short`.
    fn pick(&mut self, next: char, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.peek() == Some(next) {
            self.advance();
            long
        } else {
            short
        }
    }

    /// Parse string literal (opening quote already consumed)
    fn string_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(TokenKind::StringLiteral(string));
                }
                '\n' => break,
                '\\' => {
                    self.advance();
                    string.push(self.escape_sequence("string literal")?);
                }
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::new("Unterminated string literal", loc))
    }

    /// Parse character literal (opening quote already consumed)
    fn char_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let ch = match self.advance() {
            None | Some('\n') => {
                return Err(LexError::new("Unterminated character literal", loc));
            }
            Some('\'') => return Err(LexError::new("Empty character literal", loc)),
            Some('\\') => self.escape_sequence("character literal")?,
            Some(ch) => ch,
        };

        if !ch.is_ascii() {
            return Err(LexError::new(
                format!("Character literal '{}' does not fit in a byte", ch),
                loc,
            ));
        }

        if self.advance() != Some('\'') {
            return Err(LexError::new(
                "Expected closing quote in character literal",
                self.current_location(),
            ));
        }

        Ok(TokenKind::CharLiteral(ch as u8))
    }

    /// Decode the character after a backslash.
    fn escape_sequence(&mut self, context: &str) -> Result<char, LexError> {
        let loc = self.current_location();
        let escaped = self
            .advance()
            .ok_or_else(|| LexError::new(format!("Unexpected end of file in {}", context), loc))?;

        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '0' => Ok('\0'),
            '\\' => Ok('\\'),
            '\'' => Ok('\''),
            '"' => Ok('"'),
            _ => Err(LexError::new(
                format!("Unknown escape sequence: \\{}", escaped),
                loc,
            )),
        }
    }

    /// Parse numeric literal: digits, or digits '.' digits
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<TokenKind, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        if self.peek() == Some('.') {
            self.advance();
            num_str.push('.');
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(LexError::new(
                    format!("Expected digit after '.' in float literal {}", num_str),
                    self.current_location(),
                ));
            }
            self.take_digits(&mut num_str);

            let value = num_str.parse::<f64>().map_err(|_| {
                LexError::new(format!("Invalid float literal: {}", num_str), loc)
            })?;
            if !value.is_finite() {
                return Err(LexError::new(
                    format!("Float literal out of range: {}", num_str),
                    loc,
                ));
            }
            return Ok(TokenKind::FloatLiteral(value));
        }

        let value = num_str.parse::<i64>().map_err(|_| {
            LexError::new(format!("Invalid integer literal: {}", num_str), loc)
        })?;

        Ok(TokenKind::IntLiteral(value))
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                out.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "int" => TokenKind::Int,
            "char" => TokenKind::Char,
            "float" => TokenKind::Float,
            "void" => TokenKind::Void,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "sizeof" => TokenKind::Sizeof,
            _ => TokenKind::Ident(ident),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('*') => self.skip_block_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new("Unterminated block comment", start_loc))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    /// Yields tokens up to and including `Eof`, or stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.kind != TokenKind::Eof => {}
            _ => self.done = true,
        }
        Some(result)
    }
}
