//! Canonicalization rules for function applications: evaluating constant arguments through the
//! numeric table, cancelling mutual inverses, and expanding logarithms of products and powers.

use crate::error::Error;
use crate::funcs;
use crate::symbolic::node::{Node, Sign};
use sym_parser::funcs::Func;
use super::do_call;

/// `sin(0) = 0`
///
/// A function applied to a constant evaluates immediately through the numeric table. An argument
/// outside the function's domain is a domain error.
pub fn eval_constant(node: &Node) -> Result<Option<Node>, Error> {
    if let Node::Function { func, arg } = node {
        if let Some(value) = arg.as_constant() {
            return Ok(Some(Node::Constant(funcs::eval(*func, value)?)));
        }
    }
    Ok(None)
}

/// `sin(asin(x)) = x` and `asin(sin(x)) = x`
///
/// A function applied to its mutual inverse cancels to the inner argument.
pub fn inverse_cancel(node: &Node) -> Option<Node> {
    do_call(node, |func, arg| {
        if let Node::Function { func: inner_func, arg: inner_arg } = arg {
            if func.inverse() == Some(*inner_func) {
                return Some((**inner_arg).clone());
            }
        }
        None
    })
}

/// Expands a logarithm over the multiplicative structure of its argument:
///
/// - `ln(c*x) = ln(c) + ln(x)` for a positive coefficient,
/// - `ln(base^power) = power * ln(base)`,
/// - `ln(f1*f2*…) = ln(f1) + ln(f2) + …`
///
/// This is what lets the calculus engines treat general exponents logarithmically. Negative
/// coefficients are left alone: splitting them out would manufacture the logarithm of a negative
/// constant, a domain error the input does not imply.
pub fn expand_log(node: &Node) -> Option<Node> {
    do_call(node, |func, arg| {
        if func != Func::Ln {
            return None;
        }

        /// `ln(coefficient)` as a signed summand, unless the coefficient is 1.
        fn ln_coefficient(coefficient: f64) -> Option<(Sign, Node)> {
            if coefficient == 1.0 {
                None
            } else {
                Some((Sign::Plus, Node::Constant(coefficient.ln())))
            }
        }

        match arg {
            Node::Variable { symbol, coefficient } if *coefficient > 0.0 && *coefficient != 1.0 => {
                Some(Node::Expression(vec![
                    (Sign::Plus, Node::Constant(coefficient.ln())),
                    (Sign::Plus, Node::call(Func::Ln, Node::var(*symbol))),
                ]))
            },
            Node::Term { coefficient, base, power } if *coefficient > 0.0 => {
                let product = (**power).clone() * Node::call(Func::Ln, (**base).clone());
                Some(match ln_coefficient(*coefficient) {
                    Some(constant) => {
                        Node::Expression(vec![constant, (Sign::Plus, product)])
                    },
                    None => product,
                })
            },
            Node::Terms { coefficient, factors } if *coefficient > 0.0 => {
                let mut terms = Vec::with_capacity(factors.len() + 1);
                terms.extend(ln_coefficient(*coefficient));
                for factor in factors {
                    terms.push((Sign::Plus, Node::call(Func::Ln, factor.clone())));
                }
                Some(Node::Expression(terms))
            },
            _ => None,
        }
    })
}

/// Applies all function rules.
pub fn all(node: &Node) -> Result<Option<Node>, Error> {
    if let Some(node) = eval_constant(node)? {
        return Ok(Some(node));
    }
    Ok(inverse_cancel(node).or_else(|| expand_log(node)))
}
