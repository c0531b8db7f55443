//! Dependency and linearity analysis.
//!
//! [`depends_on`] answers whether a variable occurs free anywhere in a tree; [`is_linear_in`]
//! answers whether the tree depends on the variable through exactly one additive component raised
//! to the first power, with every other contribution variable-free. The differentiator uses the
//! former to short-circuit; the integrator's rule selection leans on both.

use super::node::Node;

/// Returns true if the given variable's symbol occurs free anywhere in the tree.
pub fn depends_on(node: &Node, var: char) -> bool {
    node.post_order_iter().any(|node| {
        matches!(node, Node::Variable { symbol, .. } if *symbol == var)
    })
}

/// Returns true if the node is linear in the given variable.
///
/// A node is linear if it depends on the variable and, excluding constant contributions, exactly
/// one additive component depends on the variable at exponent 1 with a variable-free coefficient:
///
/// - a variable is linear in itself;
/// - a power is linear iff its exponent is exactly the constant 1 and its base is linear;
/// - a product is linear iff exactly one factor is linear and the rest are variable-free;
/// - a sum is linear iff every dependent summand is linear and at least one summand depends.
///
/// A function application is **never** linear, even when its argument is: functions are
/// nonlinear by construction. This asymmetry is deliberate; it decides which integration rule
/// applies to products containing function factors.
pub fn is_linear_in(node: &Node, var: char) -> bool {
    match node {
        Node::Constant(_) => false,
        Node::Variable { symbol, .. } => *symbol == var,
        Node::Function { .. } => false,
        Node::Term { base, power, .. } => power.is_one() && is_linear_in(base, var),
        Node::Terms { factors, .. } => {
            let mut linear = 0;
            for factor in factors {
                if depends_on(factor, var) {
                    if is_linear_in(factor, var) {
                        linear += 1;
                    } else {
                        return false;
                    }
                }
            }
            linear == 1
        },
        Node::Expression(terms) => {
            let mut any = false;
            for (_, term) in terms {
                if depends_on(term, var) {
                    if is_linear_in(term, var) {
                        any = true;
                    } else {
                        return false;
                    }
                }
            }
            any
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::tokenise;
    use super::*;

    fn parse(input: &str) -> Node {
        tokenise(input).unwrap()
    }

    #[test]
    fn dependency() {
        assert!(depends_on(&parse("3x + sin(y)"), 'x'));
        assert!(depends_on(&parse("3x + sin(y)"), 'y'));
        assert!(!depends_on(&parse("3x + sin(y)"), 'z'));
        assert!(!depends_on(&Node::Constant(4.0), 'x'));
    }

    #[test]
    fn sums_are_linear_when_every_dependent_summand_is() {
        assert!(is_linear_in(&parse("3x + y"), 'x'));
        assert!(is_linear_in(&parse("3x + y"), 'y'));
        assert!(!is_linear_in(&parse("3x + sin(x)"), 'x'));
        assert!(!is_linear_in(&parse("y + 2"), 'x'));
    }

    #[test]
    fn powers_are_not_linear() {
        assert!(!is_linear_in(&parse("x*x"), 'x'));
        assert!(!is_linear_in(&parse("x^2"), 'x'));
        assert!(is_linear_in(&parse("y^2 * x"), 'x'));
    }

    #[test]
    fn products_need_exactly_one_linear_factor() {
        assert!(is_linear_in(&parse("3 * y * x"), 'x'));
        assert!(!is_linear_in(&parse("x * (x + 1)"), 'x'));
    }

    /// Functions are never linear, even with a linear argument. This drives integration rule
    /// selection and is preserved as observed behavior.
    #[test]
    fn functions_are_never_linear() {
        assert!(!is_linear_in(&parse("sin(x)"), 'x'));
        assert!(!is_linear_in(&parse("sin(2x + 1)"), 'x'));
    }
}
