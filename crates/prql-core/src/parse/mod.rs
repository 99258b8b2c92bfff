// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for PRQL source text.
//!
//! This module contains the token taxonomy, the scanner, and the parser.
//!
//! # Pipeline Grammar
//!
//! ```text
//! Root         := { Transform }
//! Transform    := "from" FromTail | "select" ExprList | "derive" ExprList
//!               | NEWLINE
//! FromTail     := IDENT | IDENT "=" IDENT
//! ExprList     := "[" ListItems "]" | AssignOrExpr
//! AssignOrExpr := IDENT "=" Expr | Expr
//! Expr         := PrimaryExpr { binop Expr }        (precedence climbing)
//! PrimaryExpr  := literal | IDENT | sign PrimaryExpr | "(" Expr ")"
//! ```
//!
//! # Example
//!
//! ```
//! use prql_core::ast::Node;
//! use prql_core::parse;
//!
//! let root = parse::parse("from employees\nselect [id, name]").unwrap();
//! assert_eq!(root.transforms.len(), 2);
//! assert!(matches!(root.transforms[0], Node::From(_)));
//! ```

mod error;
mod parser;
mod scanner;
mod token;


pub use error::ParseError;
pub use parser::{parse, parse_expr, Parser};
pub use scanner::{ScanError, ScanErrorKind, Scanner};
pub use token::{Token, TokenKind, LOWEST_PRECEDENCE, UNITS};
