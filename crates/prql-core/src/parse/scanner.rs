// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for PRQL source text.
//!
//! The scanner is hand-written and produces one token per call, exposing a
//! one-token lookahead protocol: [`Scanner::next_token`] advances, and
//! [`Scanner::current_token`] returns the most recent token without
//! advancing. The parser drives the cursor exclusively through these two
//! operations.
//!
//! # Design Principles
//!
//! - **Materialised source**: the whole input is read into a code-point
//!   sequence at construction; positions are code-point offsets
//! - **Exact lexemes**: every token carries its verbatim source text,
//!   delimiters included, so concatenating lexemes reconstructs the input
//! - **Context-free keywords**: reserved words (`func`, `null`, `true`, …)
//!   are emitted as `IDENTIFIER`; the parser dispatches on lexemes
//! - **Recoverable errors**: a malformed character yields an error and the
//!   cursor steps past it, so a caller can always reach `EOF`
//!
//! # Signed literals
//!
//! A `+` or `-` directly followed by a digit is folded into a signed
//! numeric literal (`-12` is one `INTEGER` token) unless the previous
//! non-whitespace token was that same operator. The exception keeps
//! doubled signs visible to the parser: `1 + ++1` scans as
//! `INTEGER ADD ADD ADD INTEGER`, while `+1 + -2.1` scans as
//! `INTEGER ADD FLOAT`.
//!
//! # Example
//!
//! ```
//! use prql_core::parse::{Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("from employees");
//! let token = scanner.next_token().unwrap();
//! assert_eq!(token.kind, TokenKind::Identifier);
//! assert_eq!(token.lexeme, "from");
//! assert_eq!(token.pos, 0);
//! ```

use std::fmt;

use ecow::{eco_format, EcoString};
use miette::Diagnostic;
use thiserror::Error;

use super::token::{Token, TokenKind, UNITS};

/// A lexical error.
///
/// Carries the token surfaced alongside the error: an `ILLEGAL` token for
/// malformed characters and unterminated quotes, or the offending
/// `IDENTIFIER` for a number with an unknown unit suffix. The scanner has
/// already stepped past the offender when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct ScanError {
    /// The kind of lexical error.
    #[source]
    pub kind: ScanErrorKind,
    /// The token surfaced alongside the error.
    pub token: Token,
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    /// A character that cannot start any token.
    #[error("unexpected character {0}")]
    UnexpectedCharacter(char),

    /// A character that cannot start an identifier.
    #[error("unexpected identifier character {0}")]
    UnexpectedIdentifierCharacter(char),

    /// A quoted region reached end of input before its closing delimiter.
    #[error("missing close {0}")]
    MissingClose(char),

    /// Digits with a trailing letter run that is not a known unit.
    #[error("expected an interval, got {0}")]
    ExpectedInterval(Token),
}

/// A scanner over PRQL source text.
///
/// Owns the source buffer for its whole lifetime; construction performs
/// the only read. Whitespace and comment filtering are options so that
/// token-level consumers (tests, formatters) can see the full stream while
/// the parser skips both.
pub struct Scanner {
    /// The source as a code-point sequence.
    src: Vec<char>,
    /// Offset of the current code point.
    position: usize,
    /// Offset of the next code point to read.
    read_position: usize,
    /// The current code point, `None` at end of input.
    curr: Option<char>,
    /// One code point of lookahead.
    next: Option<char>,
    /// The most recently produced token.
    curr_token: Token,
    /// Kind of the last non-whitespace token, for signed-literal context.
    prev_kind: TokenKind,
    skip_whitespace: bool,
    skip_comment: bool,
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("position", &self.position)
            .field("curr", &self.curr)
            .field("curr_token", &self.curr_token)
            .finish_non_exhaustive()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "sources over 4 billion code points are not supported"
)]
fn pos32(offset: usize) -> u32 {
    offset as u32
}

fn is_identifier_first(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_middle(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Scanner {
    /// Creates a new scanner, materialising the source.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut scanner = Self {
            src: source.chars().collect(),
            position: 0,
            read_position: 0,
            curr: None,
            next: None,
            curr_token: Token::default(),
            prev_kind: TokenKind::Illegal,
            skip_whitespace: false,
            skip_comment: false,
        };
        scanner.read_char();
        scanner
    }

    /// When set, `WHITESPACE` tokens are consumed internally and never
    /// surfaced.
    pub fn set_skip_whitespace(&mut self, skip: bool) {
        self.skip_whitespace = skip;
    }

    /// When set, `COMMENT` tokens are consumed internally and never
    /// surfaced.
    pub fn set_skip_comment(&mut self, skip: bool) {
        self.skip_comment = skip;
    }

    /// Returns the most recently produced token without advancing.
    #[must_use]
    pub fn current_token(&self) -> &Token {
        &self.curr_token
    }

    /// Returns `true` once `EOF` has been produced.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.curr_token.kind == TokenKind::Eof
    }

    /// Advances and returns the next token.
    ///
    /// On error the scanner also steps past the offending character so a
    /// subsequent caller can still terminate; the surfaced token (see
    /// [`ScanError`]) becomes the current token.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] for malformed characters, unterminated
    /// quoted regions, and numbers with an unknown unit suffix.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        match self.scan_token() {
            Ok(token) => {
                if token.kind != TokenKind::Whitespace {
                    self.prev_kind = token.kind;
                }
                self.curr_token = token.clone();
                Ok(token)
            }
            Err(err) => {
                self.prev_kind = err.token.kind;
                self.curr_token = err.token.clone();
                self.read_char();
                Err(err)
            }
        }
    }

    /// Advances the cursor by one code point.
    fn read_char(&mut self) {
        self.curr = self.src.get(self.read_position).copied();
        self.position = self.read_position;
        self.read_position += 1;
        self.next = self.src.get(self.read_position).copied();
    }

    /// Extracts the lexeme from `start` to the current position.
    fn text_from(&self, start: usize) -> EcoString {
        self.src[start..self.position].iter().collect::<String>().into()
    }

    /// Emits a single-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.read_char();
        Token::new(kind, self.text_from(start), pos32(start))
    }

    /// Emits a two-character token.
    fn double(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        self.read_char();
        self.read_char();
        Token::new(kind, self.text_from(start), pos32(start))
    }

    fn scan_token(&mut self) -> Result<Token, ScanError> {
        loop {
            let start = self.position;
            let Some(c) = self.curr else {
                let token = Token::new(TokenKind::Eof, "", pos32(start));
                self.read_char();
                return Ok(token);
            };
            return match c {
                '\n' | '\r' => Ok(self.single(TokenKind::Newline)),
                '|' => Ok(self.single(TokenKind::Pipe)),
                '[' => Ok(self.single(TokenKind::LBrack)),
                ']' => Ok(self.single(TokenKind::RBrack)),
                '(' => Ok(self.single(TokenKind::LParen)),
                ')' => Ok(self.single(TokenKind::RParen)),
                ',' => Ok(self.single(TokenKind::Comma)),
                '%' => Ok(self.single(TokenKind::Rem)),
                '*' => Ok(self.single(TokenKind::Mul)),
                '/' => Ok(self.single(TokenKind::Quo)),
                '.' => Ok(self.single(TokenKind::Period)),
                ':' => Ok(self.single(TokenKind::Colon)),
                '0'..='9' => self.read_number(),
                '-' => {
                    // 'a - b', '-12', or '->'; the sign folds into a
                    // number only outside same-operator context.
                    if self.next.is_some_and(|n| n.is_ascii_digit())
                        && self.prev_kind != TokenKind::Sub
                    {
                        self.read_number()
                    } else if self.next == Some('>') {
                        Ok(self.double(TokenKind::Arrow))
                    } else {
                        Ok(self.single(TokenKind::Sub))
                    }
                }
                '+' => {
                    if self.next.is_some_and(|n| n.is_ascii_digit())
                        && self.prev_kind != TokenKind::Add
                    {
                        self.read_number()
                    } else {
                        Ok(self.single(TokenKind::Add))
                    }
                }
                '=' => {
                    if self.next == Some('=') {
                        Ok(self.double(TokenKind::Eql))
                    } else {
                        Ok(self.single(TokenKind::Assign))
                    }
                }
                '>' => {
                    if self.next == Some('=') {
                        Ok(self.double(TokenKind::Geq))
                    } else {
                        Ok(self.single(TokenKind::Gtr))
                    }
                }
                '<' => {
                    if self.next == Some('=') {
                        Ok(self.double(TokenKind::Leq))
                    } else {
                        Ok(self.single(TokenKind::Lss))
                    }
                }
                '!' => {
                    if self.next == Some('=') {
                        Ok(self.double(TokenKind::Neq))
                    } else {
                        Ok(self.single(TokenKind::Not))
                    }
                }
                '?' => {
                    if self.next == Some('?') {
                        Ok(self.double(TokenKind::Coalesce))
                    } else {
                        Err(ScanError {
                            kind: ScanErrorKind::UnexpectedCharacter(c),
                            token: Token::new(
                                TokenKind::Illegal,
                                eco_format!("{c}"),
                                pos32(start),
                            ),
                        })
                    }
                }
                'f' | 's' if self.next == Some('"') => self.read_string('"'),
                '@' => Ok(self.read_temporal()),
                '#' => {
                    let token = self.read_comment();
                    if self.skip_comment {
                        continue;
                    }
                    Ok(token)
                }
                '"' => self.read_string('"'),
                '\'' => self.read_string('\''),
                ' ' | '\t' => {
                    let token = self.read_whitespace();
                    if self.skip_whitespace {
                        continue;
                    }
                    Ok(token)
                }
                '`' => self.read_identifier_quoted(),
                _ => self.read_identifier(c),
            };
        }
    }

    /// Reads a number, including an optional leading sign and a trailing
    /// interval unit.
    fn read_number(&mut self) -> Result<Token, ScanError> {
        let start = self.position;

        if matches!(self.curr, Some('-' | '+')) {
            self.read_char();
        }

        let mut is_float = false;
        loop {
            match self.curr {
                Some('.') => {
                    is_float = true;
                    self.read_char();
                }
                Some(c) if c.is_ascii_digit() => self.read_char(),
                _ => break,
            }
        }

        // A trailing letter run must spell an interval unit.
        if let Some(c) = self.curr.filter(char::is_ascii_lowercase) {
            let ident = self.read_identifier(c)?;
            if UNITS.contains(&ident.lexeme.as_str()) {
                return Ok(Token::new(
                    TokenKind::Interval,
                    self.text_from(start),
                    pos32(start),
                ));
            }
            return Err(ScanError {
                kind: ScanErrorKind::ExpectedInterval(ident.clone()),
                token: ident,
            });
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        Ok(Token::new(kind, self.text_from(start), pos32(start)))
    }

    /// Reads a string literal, delimiters (and any `f`/`s` prefix)
    /// included in the lexeme. `\` skips the next character.
    fn read_string(&mut self, ender: char) -> Result<Token, ScanError> {
        let start = self.position;

        if matches!(self.curr, Some('f' | 's')) {
            self.read_char();
        }
        self.read_char(); // opening delimiter

        loop {
            match self.curr {
                Some('\\') => {
                    self.read_char();
                    self.read_char();
                }
                Some(c) if c == ender => {
                    self.read_char();
                    return Ok(Token::new(
                        TokenKind::String,
                        self.text_from(start),
                        pos32(start),
                    ));
                }
                Some(_) => self.read_char(),
                None => {
                    return Err(ScanError {
                        kind: ScanErrorKind::MissingClose(ender),
                        token: Token::new(
                            TokenKind::Illegal,
                            self.text_from(start),
                            pos32(start),
                        ),
                    });
                }
            }
        }
    }

    /// Reads a `#` comment up to, but not including, the next newline.
    fn read_comment(&mut self) -> Token {
        let start = self.position;
        while self.curr.is_some_and(|c| c != '\n') {
            self.read_char();
        }
        Token::new(TokenKind::Comment, self.text_from(start), pos32(start))
    }

    /// Reads a run of spaces and tabs as one token.
    fn read_whitespace(&mut self) -> Token {
        let start = self.position;
        while matches!(self.curr, Some(' ' | '\t')) {
            self.read_char();
        }
        Token::new(TokenKind::Whitespace, self.text_from(start), pos32(start))
    }

    /// Reads an unquoted identifier starting at `first`.
    fn read_identifier(&mut self, first: char) -> Result<Token, ScanError> {
        if is_identifier_first(first) {
            Ok(self.read_identifier_unquoted())
        } else {
            Err(ScanError {
                kind: ScanErrorKind::UnexpectedIdentifierCharacter(first),
                token: Token::new(
                    TokenKind::Illegal,
                    eco_format!("{first}"),
                    pos32(self.position),
                ),
            })
        }
    }

    fn read_identifier_unquoted(&mut self) -> Token {
        let start = self.position;
        self.read_char();
        while self.curr.is_some_and(is_identifier_middle) {
            self.read_char();
        }
        Token::new(TokenKind::Identifier, self.text_from(start), pos32(start))
    }

    /// Reads a back-quoted identifier, back-ticks included in the lexeme.
    fn read_identifier_quoted(&mut self) -> Result<Token, ScanError> {
        let start = self.position;
        self.read_char(); // opening back-tick
        loop {
            match self.curr {
                Some('`') => {
                    self.read_char();
                    return Ok(Token::new(
                        TokenKind::Identifier,
                        self.text_from(start),
                        pos32(start),
                    ));
                }
                Some(_) => self.read_char(),
                None => {
                    return Err(ScanError {
                        kind: ScanErrorKind::MissingClose('`'),
                        token: Token::new(
                            TokenKind::Illegal,
                            self.text_from(start),
                            pos32(start),
                        ),
                    });
                }
            }
        }
    }

    /// Reads a `@…` temporal literal and classifies it by shape.
    fn read_temporal(&mut self) -> Token {
        let start = self.position;
        loop {
            self.read_char();
            if self.is_end_of_expression() {
                let lexeme = self.text_from(start);
                let kind = if lexeme.contains('T') {
                    TokenKind::Timestamp
                } else if lexeme.contains('-') {
                    TokenKind::Date
                } else if lexeme.contains(':') {
                    TokenKind::Time
                } else {
                    TokenKind::Illegal
                };
                return Token::new(kind, lexeme, pos32(start));
            }
        }
    }

    /// Terminators for `@…` literals: space, `,`, `]`, newline, end of
    /// input, or a `..` range.
    fn is_end_of_expression(&self) -> bool {
        match self.curr {
            None | Some(' ' | ',' | ']' | '\n') => true,
            Some('.') => self.next == Some('.'),
            _ => false,
        }
    }
}
