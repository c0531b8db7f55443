//! The canonicalizer: reduces any node to its minimal normal form.
//!
//! [`simplified`] is idempotent: simplifying an already-canonical node changes nothing. Children
//! are simplified before their parent, then the rule set in [`rules`] is applied at the current
//! level; the two steps repeat until a full pass makes no change. Rules may rearrange the tree
//! into shapes whose children are not yet canonical (merging two symbolic exponents produces a
//! new sum, for example), which the next pass picks up.
//!
//! The invariants that hold after canonicalization:
//!
//! - no zero factors or summands survive; zero products and sums collapse to the constant 0;
//! - an empty product collapses to its coefficient, a singleton product to its factor (the
//!   coefficient pushed into the factor when it can carry one);
//! - an empty sum collapses to 0, a singleton sum to its summand;
//! - at most one variable factor per symbol appears in a product; repeats merge into a power;
//! - a power with exponent 1 and coefficient 1 collapses to its base; exponent 0 collapses to
//!   the coefficient;
//! - coefficients are hoisted outward through nested products and powers;
//! - summand coefficients are positive, negativity carried by the summand's sign;
//! - product factors are in canonical order.
//!
//! Simplification of concrete arithmetic can raise domain errors: `0^0` inside a power, a
//! function evaluated outside its domain. These abort the whole operation.

pub mod rules;

use crate::error::Error;
use super::node::Node;

/// Simplify the given node into canonical form.
pub fn simplified(node: &Node) -> Result<Node, Error> {
    Ok(inner_simplify(node)?.0)
}

/// Base implementation of the simplification algorithm. Returns the simplified node and whether
/// anything changed.
fn inner_simplify(node: &Node) -> Result<(Node, bool), Error> {
    let mut node = node.clone();
    let mut changed_at_least_once = false;

    loop {
        let mut changed_in_this_pass = false;

        // simplify children first, so rules at this level see canonical children
        node = match node {
            leaf @ (Node::Constant(_) | Node::Variable { .. }) => leaf,
            Node::Function { func, arg } => {
                let (arg, changed) = inner_simplify(&arg)?;
                changed_in_this_pass |= changed;
                Node::Function { func, arg: Box::new(arg) }
            },
            Node::Term { coefficient, base, power } => {
                let (base, base_changed) = inner_simplify(&base)?;
                let (power, power_changed) = inner_simplify(&power)?;
                changed_in_this_pass |= base_changed || power_changed;
                Node::Term {
                    coefficient,
                    base: Box::new(base),
                    power: Box::new(power),
                }
            },
            Node::Terms { coefficient, factors } => {
                let mut new_factors = Vec::with_capacity(factors.len());
                for factor in &factors {
                    let (factor, changed) = inner_simplify(factor)?;
                    changed_in_this_pass |= changed;
                    new_factors.push(factor);
                }
                Node::Terms { coefficient, factors: new_factors }
            },
            Node::Expression(terms) => {
                let mut new_terms = Vec::with_capacity(terms.len());
                for (sign, term) in &terms {
                    let (term, changed) = inner_simplify(term)?;
                    changed_in_this_pass |= changed;
                    new_terms.push((*sign, term));
                }
                Node::Expression(new_terms)
            },
        };

        // then apply the rewrite rules at this level
        if let Some(new_node) = rules::all(&node)? {
            node = new_node;
            changed_in_this_pass = true;
        }

        changed_at_least_once |= changed_in_this_pass;
        if !changed_in_this_pass {
            break;
        }
    }

    Ok((node, changed_at_least_once))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::tokenise;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses, simplifies, and renders the given expression.
    fn simplify_str(input: &str) -> String {
        tokenise(input).unwrap().to_string()
    }

    #[test]
    fn idempotence() {
        for input in [
            "x + x + x",
            "3x^2 - 2x + 1",
            "sin(x) * cos(y) / (x + 1)",
            "2^x * 2^y",
            "ln(x^2 * y)",
        ] {
            let once = tokenise(input).unwrap();
            let twice = simplified(&once).unwrap();
            assert_eq!(once.to_string(), twice.to_string(), "not idempotent for `{input}`");
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn zero_absorption() {
        assert_eq!(simplify_str("0 * x"), "0");
        assert_eq!(simplify_str("0 * sin(x)"), "0");
        assert_eq!(simplify_str("x + 0"), "x");
        assert_eq!(simplify_str("0 * (x + y) + 0"), "0");
    }

    #[test]
    fn one_absorption() {
        assert_eq!(simplify_str("1 * x"), "x");
        assert_eq!(simplify_str("x ^ 1"), "x");
        assert_eq!(simplify_str("1 * sin(x) * 1"), "sin(x)");
    }

    #[test]
    fn like_terms_collect() {
        assert_eq!(simplify_str("x + x + x"), "3x");
        assert_eq!(simplify_str("2x + 3y - x"), "(x + 3y)");
        assert_eq!(simplify_str("x - x"), "0");
        assert_eq!(simplify_str("sin(x) + sin(x)"), "2sin(x)");
    }

    #[test]
    fn like_factors_merge() {
        assert_eq!(simplify_str("x * x"), "x^2");
        assert_eq!(simplify_str("x * x^2 * y"), "(x^3*y)");
        assert_eq!(simplify_str("x^3 / x"), "x^2");
        assert_eq!(simplify_str("x / x"), "1");
    }

    #[test]
    fn constants_fold() {
        assert_eq!(simplify_str("2 + 3 * 4"), "14");
        assert_eq!(simplify_str("2 ^ 3 ^ 2"), "512");
        assert_eq!(simplify_str("6 / 4"), "1.5");
        assert_eq!(simplify_str("sin(0)"), "0");
    }

    #[test]
    fn coefficients_hoist_outward() {
        assert_eq!(simplify_str("2 * x * 3 * y"), "6(x*y)");
        assert_eq!(simplify_str("(2x)^3"), "8x^3");
    }

    #[test]
    fn nested_powers_flatten() {
        assert_eq!(simplify_str("(x^2)^3"), "x^6");
        assert_eq!(simplify_str("(x^y)^2"), "x^(2y)");
    }

    #[test]
    fn signs_normalize() {
        assert_eq!(simplify_str("x - 2"), "(x - 2)");
        assert_eq!(simplify_str("-x + y"), "(-x + y)");
        assert_eq!(simplify_str("x - -y"), "(x + y)");
    }

    #[test]
    fn inverse_functions_cancel() {
        assert_eq!(simplify_str("sin(asin(x))"), "x");
        assert_eq!(simplify_str("asin(sin(x))"), "x");
        assert_eq!(simplify_str("cosh(acosh(y))"), "y");
    }

    #[test]
    fn logarithms_expand() {
        assert_eq!(simplify_str("ln(x^2)"), "2ln(x)");
        assert_eq!(simplify_str("ln(x * y)"), "(ln(x) + ln(y))");
        // ln(2x) = ln(2) + ln(x)
        assert_eq!(
            simplify_str("ln(2x)"),
            format!("({} + ln(x))", 2.0_f64.ln()),
        );
    }

    #[test]
    fn division_by_zero_raises() {
        assert!(matches!(tokenise("1 / 0"), Err(Error::DivisionByZero)));
        assert!(matches!(tokenise("x / 0"), Err(Error::DivisionByZero)));
    }

    #[test]
    fn indeterminate_power_raises() {
        assert!(matches!(tokenise("0 ^ 0"), Err(Error::Indeterminate("0^0"))));
    }

    #[test]
    fn function_domain_errors_raise() {
        assert!(matches!(tokenise("ln(0 - 1)"), Err(Error::OutOfDomain { .. })));
    }
}
