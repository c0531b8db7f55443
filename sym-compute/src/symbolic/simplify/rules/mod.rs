//! Implementation of the canonicalization rules.
//!
//! Each rule is a function that takes the node to simplify and returns `Some(node)` with the
//! rewritten node if the rule applies, or `None` if it does not. Rules that fold concrete
//! arithmetic can raise domain errors and return `Result<Option<Node>, Error>` instead. Rules
//! are grouped by the variant family they rewrite: sums ([`add`]), products ([`multiply`]),
//! powers ([`power`]), and function applications ([`function`]).

pub mod add;
pub mod function;
pub mod multiply;
pub mod power;

use crate::error::Error;
use crate::symbolic::node::{Node, Sign};
use sym_parser::funcs::Func;

/// If the node is a sum, calls the given transformation function with its signed summands.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_sum(
    node: &Node,
    f: impl FnOnce(&[(Sign, Node)]) -> Option<Node>,
) -> Option<Node> {
    if let Node::Expression(terms) = node {
        f(terms)
    } else {
        None
    }
}

/// If the node is a product, calls the given transformation function with its coefficient and
/// factors.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_product(
    node: &Node,
    f: impl FnOnce(f64, &[Node]) -> Option<Node>,
) -> Option<Node> {
    if let Node::Terms { coefficient, factors } = node {
        f(*coefficient, factors)
    } else {
        None
    }
}

/// If the node is a power, calls the given transformation function with its coefficient, base,
/// and exponent.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_power(
    node: &Node,
    f: impl FnOnce(f64, &Node, &Node) -> Option<Node>,
) -> Option<Node> {
    if let Node::Term { coefficient, base, power } = node {
        f(*coefficient, base, power)
    } else {
        None
    }
}

/// If the node is a function application, calls the given transformation function with the
/// function and its argument.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_call(
    node: &Node,
    f: impl FnOnce(Func, &Node) -> Option<Node>,
) -> Option<Node> {
    if let Node::Function { func, arg } = node {
        f(*func, arg)
    } else {
        None
    }
}

/// Applies all rules, returning the first rewrite that applies.
pub fn all(node: &Node) -> Result<Option<Node>, Error> {
    // anything numerically zero (e.g. a variable with coefficient 0) is the constant zero
    if node.is_zero() && !matches!(node, Node::Constant(_)) {
        return Ok(Some(Node::zero()));
    }

    if let Some(node) = add::all(node)? {
        return Ok(Some(node));
    }
    if let Some(node) = multiply::all(node)? {
        return Ok(Some(node));
    }
    if let Some(node) = power::all(node)? {
        return Ok(Some(node));
    }
    function::all(node)
}
