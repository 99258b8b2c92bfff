// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! PRQL front-end core.
//!
//! This crate contains the front-end for a pipelined relational query
//! language:
//! - Lexical analysis (scanner and token taxonomy)
//! - Parsing (AST construction with precedence-climbing expressions)
//!
//! The tree it produces is suitable for downstream analysis or translation
//! to SQL; no semantic analysis, name resolution, or code generation
//! happens here. Parsing reports the first failure as a single structured
//! error and performs no recovery.
//!
//! # Example
//!
//! ```
//! use prql_core::ast::Node;
//! use prql_core::parse;
//!
//! let root = parse::parse("from orders\nderive total = price * quantity").unwrap();
//! assert!(matches!(root.transforms[1], Node::Derive(_)));
//! ```

pub mod ast;
pub mod parse;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Expr, ExprList, Ident, Node, Root};
    pub use crate::parse::{ParseError, Parser, ScanError, Scanner, Token, TokenKind};
}
