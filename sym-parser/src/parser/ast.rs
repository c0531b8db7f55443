//! The abstract syntax tree produced by the parser.
//!
//! The tree mirrors the source text: spans are preserved on every node, and no algebraic
//! normalization happens here. The engine crate converts this tree into its own flattened
//! representation for symbolic manipulation.

use crate::funcs::Func;
use super::op::{BinOp, UnaryOpKind};
use std::ops::Range;

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value: a numeral, a variable, or Euler's number.
    Literal(Literal),

    /// An expression surrounded by parentheses, brackets, or braces.
    Paren(Paren),

    /// A negated expression.
    Unary(Unary),

    /// A binary expression, such as `1 + 2`.
    Binary(Binary),

    /// An elementary function applied to one operand, such as `sin(x)`.
    Call(Call),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span.clone(),
            Expr::Unary(unary) => unary.span.clone(),
            Expr::Binary(binary) => binary.span.clone(),
            Expr::Call(call) => call.span.clone(),
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A numeral, such as `2` or `3.14`.
    Num {
        /// The parsed value.
        value: f64,

        /// The region of the source code of this literal.
        span: Range<usize>,
    },

    /// A single-letter variable, such as `x`.
    Symbol {
        /// The variable's symbol character.
        name: char,

        /// The region of the source code of this literal.
        span: Range<usize>,
    },

    /// The literal `e`, Euler's number.
    Euler {
        /// The region of the source code of this literal.
        span: Range<usize>,
    },
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Num { span, .. }
            | Literal::Symbol { span, .. }
            | Literal::Euler { span } => span.clone(),
        }
    }
}

/// An expression surrounded by a pair of grouping delimiters.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The enclosed expression.
    pub inner: Box<Expr>,

    /// The region of the source code, including the delimiters.
    pub span: Range<usize>,
}

/// A unary negation, such as `-x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The kind of operator.
    pub op: UnaryOpKind,

    /// The negated operand.
    pub operand: Box<Expr>,

    /// The region of the source code of this expression.
    pub span: Range<usize>,
}

/// A binary expression, such as `1 + 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code of this expression.
    pub span: Range<usize>,
}

/// An elementary function applied to exactly one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The function being applied.
    pub func: Func,

    /// The function's argument.
    pub arg: Box<Expr>,

    /// The region of the source code of this expression.
    pub span: Range<usize>,
}
