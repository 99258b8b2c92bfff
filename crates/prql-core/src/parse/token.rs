// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for PRQL lexical analysis.
//!
//! This module defines the token taxonomy shared by the scanner and the
//! parser, plus the binary-operator precedence table and the interval
//! unit suffixes.
//!
//! # Token Structure
//!
//! Each token consists of:
//! - A [`TokenKind`] naming the lexical category
//! - The exact source `lexeme`, delimiters included (string quotes,
//!   identifier back-ticks, the leading `@` of temporal literals)
//! - The code-point offset of the lexeme's first character
//!
//! Tokens render as `KIND("lexeme") at pos`; diagnostics embed this form
//! verbatim.

use std::fmt;

use ecow::EcoString;

/// The lexical category of a token.
///
/// Several members are reserved but never produced by the scanner:
/// `BOOLEAN`, `AND`, `OR`, `FUNC`, `TABLE`, `PRQL`, and `NULL` all reach
/// the parser as `IDENTIFIER` tokens, keeping the scanner context-free.
/// The parser dispatches on lexemes where it cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Structural ===
    /// An unrecognised or malformed character sequence.
    Illegal,
    /// End of input.
    Eof,
    /// A run of spaces and tabs.
    Whitespace,
    /// A single `\n` or `\r`.
    Newline,
    /// `|`
    Pipe,
    /// A `#` comment running to the end of the line.
    Comment,

    // === Literals ===
    /// `abc`, `_abc`, `$abc`, `` `abc` ``
    Identifier,
    /// `12345`, `-12`, `+12`
    Integer,
    /// `123.45`
    Float,
    /// Reserved: `true` and `false` are scanned as identifiers.
    Boolean,
    /// `"abc"`, `'abc'`, `f"abc{efg}"`, `s"version()"`
    String,
    /// `@2022-12-31`
    Date,
    /// `@00:00:00`
    Time,
    /// `@2022-12-31T00:00:00`
    Timestamp,
    /// `123seconds`, `10days`
    Interval,

    // === Punctuation and operators ===
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBrack,
    /// `]`
    RBrack,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `!`
    Not,
    /// `*`
    Mul,
    /// `/`
    Quo,
    /// `%`
    Rem,
    /// `==`
    Eql,
    /// `<`
    Lss,
    /// `>`
    Gtr,
    /// `=`
    Assign,
    /// `!=`
    Neq,
    /// `<=`
    Leq,
    /// `>=`
    Geq,
    /// Reserved: `and`
    And,
    /// Reserved: `or`
    Or,
    /// `??`
    Coalesce,
    /// `->`
    Arrow,

    // === Keywords (reserved, scanned as identifiers) ===
    /// `func`
    Func,
    /// `table`
    Table,
    /// `prql`
    Prql,
    /// `null`
    Null,
}

/// Lowest binding strength; expression parsing starts here.
pub const LOWEST_PRECEDENCE: u8 = 0;

/// Interval unit suffixes, in the order the parser splits lexemes.
pub const UNITS: &[&str] = &[
    "microseconds",
    "milliseconds",
    "seconds",
    "minutes",
    "hours",
    "days",
    "weeks",
    "months",
    "years",
];

impl TokenKind {
    /// Returns the diagnostic name of this kind.
    ///
    /// These names appear verbatim in error messages, e.g.
    /// `unexpected token IDENTIFIER("b") at 32`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Whitespace => "WHITESPACE",
            Self::Newline => "NEWLINE",
            Self::Pipe => "PIPE",
            Self::Comment => "COMMENT",
            Self::Identifier => "IDENTIFIER",
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Interval => "INTERVAL",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::LBrack => "LBRACK",
            Self::RBrack => "RBRACK",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::Colon => "COLON",
            Self::Comma => "COMMA",
            Self::Period => "PERIOD",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Not => "NOT",
            Self::Mul => "MUL",
            Self::Quo => "QUO",
            Self::Rem => "REM",
            Self::Eql => "EQL",
            Self::Lss => "LSS",
            Self::Gtr => "GTR",
            Self::Assign => "ASSIGN",
            Self::Neq => "NEQ",
            Self::Leq => "LEQ",
            Self::Geq => "GEQ",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Coalesce => "COALESCE",
            Self::Arrow => "ARROW",
            Self::Func => "FUNC",
            Self::Table => "TABLE",
            Self::Prql => "PRQL",
            Self::Null => "NULL",
        }
    }

    /// Returns the binding strength of this kind as a binary operator.
    ///
    /// Returns `None` for anything that is not a binary operator, which
    /// ends expression parsing.
    ///
    /// | Precedence | Operators |
    /// |------------|-----------|
    /// | 1          | `+` `-`   |
    /// | 2          | `*` `/`   |
    #[must_use]
    pub const fn precedence(self) -> Option<u8> {
        match self {
            Self::Add | Self::Sub => Some(1),
            Self::Mul | Self::Quo => Some(2),
            _ => None,
        }
    }

    /// Returns `true` if this kind is a literal value or identifier.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::Integer
                | Self::Float
                | Self::Boolean
                | Self::String
                | Self::Date
                | Self::Time
                | Self::Timestamp
                | Self::Interval
        )
    }

    /// Returns `true` if this kind is a reserved keyword member.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::Func | Self::Table | Self::Prql | Self::Null)
    }

    /// Returns `true` if this is the end-of-input marker.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its exact source text and position.
///
/// # Examples
///
/// ```
/// use prql_core::parse::{Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier, "employees", 5);
/// assert_eq!(token.to_string(), r#"IDENTIFIER("employees") at 5"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical category.
    pub kind: TokenKind,
    /// The exact source substring, delimiters included.
    pub lexeme: EcoString,
    /// Code-point offset of the first character of the lexeme.
    pub pos: u32,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<EcoString>, pos: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            pos,
        }
    }

    /// Returns `true` if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }
}

impl Default for Token {
    fn default() -> Self {
        Self {
            kind: TokenKind::Illegal,
            lexeme: EcoString::new(),
            pos: 0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) at {}", self.kind, self.lexeme.as_str(), self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_diagnostics() {
        assert_eq!(TokenKind::Identifier.name(), "IDENTIFIER");
        assert_eq!(TokenKind::LBrack.name(), "LBRACK");
        assert_eq!(TokenKind::Coalesce.name(), "COALESCE");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }

    #[test]
    fn token_display_quotes_lexeme() {
        let token = Token::new(TokenKind::Comma, ",", 11);
        assert_eq!(token.to_string(), r#"COMMA(",") at 11"#);

        let token = Token::new(TokenKind::String, "\"done\"", 7);
        assert_eq!(token.to_string(), r#"STRING("\"done\"") at 7"#);
    }

    #[test]
    fn precedence_table() {
        assert_eq!(TokenKind::Add.precedence(), Some(1));
        assert_eq!(TokenKind::Sub.precedence(), Some(1));
        assert_eq!(TokenKind::Mul.precedence(), Some(2));
        assert_eq!(TokenKind::Quo.precedence(), Some(2));
        assert_eq!(TokenKind::Eql.precedence(), None);
        assert_eq!(TokenKind::Eof.precedence(), None);

        // Multiplication binds tighter than addition.
        assert!(TokenKind::Mul.precedence() > TokenKind::Add.precedence());
    }

    #[test]
    fn kind_predicates() {
        assert!(TokenKind::Integer.is_literal());
        assert!(TokenKind::Identifier.is_literal());
        assert!(!TokenKind::Comma.is_literal());

        assert!(TokenKind::Func.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());

        assert!(TokenKind::Eof.is_eof());
        assert!(Token::new(TokenKind::Eof, "", 0).is_eof());
    }
}
