//! Tokenizer and parser for symbolic algebra expressions.
//!
//! The grammar is deliberately small: decimal numerals, single-letter variables, the fixed set of
//! elementary function names in [`funcs::Func`], the binary operators `+ - * / ^`, unary sign, and
//! grouping with parentheses, brackets, or braces. Adjacent operands multiply implicitly, so
//! `3x^2` parses the same as `3*x^2`.
//!
//! Parsing produces a plain syntax tree ([`parser::ast::Expr`]) with source spans on every node.
//! The algebraic representation used for symbolic manipulation is a separate type defined by the
//! engine crate, which converts from the syntax tree.

pub mod funcs;
pub mod parser;
pub mod tokenizer;

pub use parser::Parser;
