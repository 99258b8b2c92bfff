// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for PRQL pipelines.
//!
//! The tree is rooted at [`Root`], an ordered list of transforms. Two enums
//! give the two capability sets the parser works with: [`Node`] for anything
//! a pipeline may contain, and [`Expr`] for values inside transforms. The
//! parser never narrows beyond these two sets.
//!
//! Nodes are built bottom-up during parsing and never mutated afterwards.
//! Identifiers carry their source position; literal nodes carry converted
//! values (a parsed `@2022-12-31` keeps its year/month/day, a string keeps
//! its verbatim spelling, delimiters included).
//!
//! # Example
//!
//! ```
//! use prql_core::ast::Node;
//! use prql_core::parse;
//!
//! let root = parse::parse("from employees\nselect [id, first_name]").unwrap();
//! assert_eq!(root.transforms.len(), 2);
//! assert!(matches!(root.transforms[0], Node::From(_)));
//! assert!(matches!(root.transforms[1], Node::Select(_)));
//! ```

use ecow::EcoString;

use crate::parse::TokenKind;

/// Top of the tree: an ordered pipeline of transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    /// The pipeline steps, in source order.
    pub transforms: Vec<Node>,
}

/// A top-level pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `from table` / `from alias = table`
    From(FromTransform),
    /// `select <expr-list>`
    Select(SelectTransform),
    /// `derive <expr-list>`
    Derive(DeriveTransform),
}

/// An identifier with its source position.
///
/// Not itself a node; appears as a field of [`Column`] and
/// [`FromTransform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// The identifier spelling (back-ticks included when quoted).
    pub name: EcoString,
    /// Code-point offset of the first character.
    pub pos: u32,
}

impl Ident {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, pos: u32) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// The `from` transform: a source table with an optional alias.
///
/// `alias` is the identifier written before `=`; `table` is always the
/// post-`=` (or sole) identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromTransform {
    /// Alias bound with `alias = table`, if any.
    pub alias: Option<Ident>,
    /// The table being read.
    pub table: Ident,
}

/// The `select` transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectTransform {
    /// The selected expressions.
    pub list: ExprList,
}

/// The `derive` transform.
#[derive(Debug, Clone, PartialEq)]
pub struct DeriveTransform {
    /// The derived expressions.
    pub list: ExprList,
}

/// A possibly-bracketed, comma-or-newline-separated expression sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprList {
    /// The expressions, in source order.
    pub items: Vec<Expr>,
}

/// A value inside a transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference.
    Column(Column),
    /// An integer literal.
    Integer(Integer),
    /// A float literal.
    Float(Float),
    /// A string literal, verbatim.
    String(StringLit),
    /// A `@YYYY-MM-DD` literal.
    Date(Date),
    /// A `@HH:MM:SS` literal.
    Time(Time),
    /// A `@YYYY-MM-DDTHH:MM:SS` literal.
    Timestamp(Timestamp),
    /// An `<int><unit>` literal.
    Interval(Interval),
    /// A binary operation.
    Binary(BinaryExpr),
    /// A sign applied to a primary expression.
    Unary(UnaryExpr),
    /// A parenthesised expression; parens are preserved.
    Paren(ParenExpr),
    /// `name = expr` inside a list.
    Assign(AssignExpr),
}

/// A column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The column name.
    pub name: Ident,
}

/// An integer literal. Signed spellings (`-12`, `+12`) carry the sign in
/// the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer {
    /// The parsed value.
    pub value: i64,
}

/// A float literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Float {
    /// The parsed value.
    pub value: f64,
}

/// A string literal, kept verbatim: delimiters and any `f`/`s` prefix are
/// part of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLit {
    /// The verbatim source spelling.
    pub value: EcoString,
}

/// A calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    /// Year.
    pub year: i32,
    /// Month (1–12).
    pub month: u32,
    /// Day of month (1–31).
    pub day: u32,
}

/// A time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    /// Hour (0–23).
    pub hour: u32,
    /// Minute (0–59).
    pub minute: u32,
    /// Second (0–59).
    pub second: u32,
}

/// A calendar date with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Year.
    pub year: i32,
    /// Month (1–12).
    pub month: u32,
    /// Day of month (1–31).
    pub day: u32,
    /// Hour (0–23).
    pub hour: u32,
    /// Minute (0–59).
    pub minute: u32,
    /// Second (0–59).
    pub second: u32,
}

/// An integer count glued to a time unit suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// The count.
    pub count: i64,
    /// One of the known unit suffixes (see [`crate::parse::UNITS`]).
    pub unit: EcoString,
}

/// A binary operation. `op` is always one of the operators with
/// precedence entries: `ADD`, `SUB`, `MUL`, or `QUO`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// Left operand.
    pub x: Box<Expr>,
    /// Right operand.
    pub y: Box<Expr>,
    /// The operator token kind.
    pub op: TokenKind,
}

/// A sign applied to a primary expression. `op` is `ADD` or `SUB` only.
///
/// Signs directly attached to a numeric literal are folded into the
/// literal by the scanner and produce no `UnaryExpr`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    /// The operand.
    pub x: Box<Expr>,
    /// The sign token kind.
    pub op: TokenKind,
}

/// A parenthesised expression, preserved for presentation and
/// round-tripping.
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    /// The inner expression.
    pub x: Box<Expr>,
}

/// A named expression inside a list: `name = expr`.
///
/// `name` is the exact source spelling of the identifier left of `=`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    /// The bound name.
    pub name: EcoString,
    /// The bound expression.
    pub expr: Box<Expr>,
}
