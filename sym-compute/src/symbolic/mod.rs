//! Symbolic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are represented as a tree of [`Node`]s, a closed sum type of six
//! variants: constants, variables, function applications, powers, products, and signed sums. It
//! differs from the syntax tree produced by [`sym_parser`] in that it **flattens** the structure:
//! `x + (y + z)` becomes a single sum with three summands, and numeric coefficients live directly
//! on the variants that carry them. This makes like-term collection and the calculus rules
//! operate on siblings at one level instead of walking binary trees.
//!
//! A syntax tree is folded into a [`Node`] through the arithmetic composition operators (see
//! [`node`]), which is where every cross-variant algebraic identity lives. [`tokenise`] bundles
//! the pipeline: parse, fold, canonicalize.
//!
//! ```
//! use sym_compute::symbolic::tokenise;
//!
//! let node = tokenise("x + x + x").unwrap();
//! assert_eq!(node.to_string(), "3x");
//! ```
//!
//! # Operations
//!
//! - [`simplified`] — reduce to canonical form (idempotent);
//! - [`depends_on`] / [`is_linear_in`] — dependency analysis;
//! - [`evaluate`] — substitute variable bindings and canonicalize;
//! - [`derivative`] / [`derivative_at`] — n-th order symbolic differentiation;
//! - [`integral`] / [`integral_between`] — indefinite and definite integration.
//!
//! All operations are pure functions over value trees: nothing is mutated in place, and every
//! returned node has already been canonicalized.

pub mod dependency;
pub mod derivative;
pub mod eval;
pub mod integral;
pub mod node;
pub mod simplify;

pub use dependency::{depends_on, is_linear_in};
pub use derivative::{derivative, derivative_at};
pub use eval::evaluate;
pub use integral::{integral, integral_between};
pub use node::{Node, Sign};
pub use simplify::simplified;

use crate::error::Error;
use sym_parser::parser::ast;
use sym_parser::Parser;

/// Parses the given text into a canonical node.
///
/// Syntax errors, and domain errors raised while folding concrete arithmetic (`1/0`, `0^0`), are
/// returned as-is; no partial tree is ever produced.
pub fn tokenise(text: &str) -> Result<Node, Error> {
    let expr = Parser::new(text).try_parse_full::<ast::Expr>()?;
    let node = Node::try_from(expr)?;
    simplified(&node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_and_render_round_trip() {
        for (input, rendered) in [
            ("sin(x)", "sin(x)"),
            ("3*x", "3x"),
            ("3x", "3x"),
            ("x^3", "x^3"),
            ("2 + x", "(2 + x)"),
            ("x/y", "(x*y^-1)"),
        ] {
            assert_eq!(tokenise(input).unwrap().to_string(), rendered);
        }
    }

    #[test]
    fn rendered_output_parses_back_to_itself() {
        for input in ["3x", "(x + 3y)", "sin(x)^2", "0.5x^2", "(cos(y)*sin(x))"] {
            let node = tokenise(input).unwrap();
            let reparsed = tokenise(&node.to_string()).unwrap();
            assert_eq!(node, reparsed);
        }
    }

    #[test]
    fn syntax_errors_propagate() {
        assert!(matches!(tokenise("x +"), Err(Error::Syntax(_))));
        assert!(matches!(tokenise("(x"), Err(Error::Syntax(_))));
        assert!(matches!(tokenise("frob(x)"), Err(Error::Syntax(_))));
    }
}
