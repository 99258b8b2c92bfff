// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse error types.
//!
//! The parser reports the first syntactic failure as a single
//! [`ParseError`]; there is no recovery. Messages embed the offending
//! token as `KIND("lexeme") at pos`. Lexical errors pass through
//! transparently, so a caller sees one uniform error type. Errors
//! integrate with [`miette`] for rich terminal reports.

use miette::Diagnostic;
use thiserror::Error;

use super::scanner::ScanError;
use super::token::{Token, TokenKind};

/// A parse error; the first failure aborts the parse.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ParseError {
    /// A token at transform position that is not a known transform head.
    #[error("failed to parse a transform, unexpected {0}")]
    UnexpectedTransform(Token),

    /// A specific spelling was required (e.g. `from`, `(`).
    #[error("expected {expected:?}, got {found}")]
    ExpectedLexeme {
        /// The required spelling.
        expected: &'static str,
        /// What was found instead.
        found: Token,
    },

    /// A specific token kind was required.
    #[error("expected {expected}, got {found}")]
    ExpectedKind {
        /// The required kind.
        expected: TokenKind,
        /// What was found instead.
        found: Token,
    },

    /// A leading sign was not followed by a signable operand.
    #[error("expected integer or float, got {0}")]
    ExpectedSignedOperand(Token),

    /// A primary expression was required.
    #[error("failed to parse primary expression, got {0}")]
    UnexpectedPrimary(Token),

    /// A list separator (`,`, newline, or `]`) was required.
    #[error("unexpected token {0}")]
    UnexpectedToken(Token),

    /// An `INTERVAL` lexeme that does not split into count and unit.
    #[error("bad interval format {0}")]
    BadIntervalFormat(Token),

    /// A literal lexeme that failed conversion to its value.
    #[error("invalid {what} literal {found}: {reason}")]
    InvalidLiteral {
        /// Which literal family failed.
        what: &'static str,
        /// The offending token.
        found: Token,
        /// The underlying conversion failure.
        reason: String,
    },

    /// A lexical error, passed through unchanged.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanError),
}
