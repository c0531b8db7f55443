//! Symbolic differentiation.
//!
//! [`derivative`] computes the n-th derivative with respect to a variable by applying the
//! single-order rules repeatedly, canonicalizing between steps; there are no closed-form n-th
//! derivative shortcuts. The per-function derivative templates live in [`function`] and are
//! constructed directly as nodes.

mod function;

use crate::error::Error;
use std::collections::HashMap;
use sym_parser::funcs::Func;
use super::dependency::depends_on;
use super::eval::evaluate;
use super::node::{Node, Sign};
use super::simplify::simplified;

/// Helper struct to build a product of nodes while applying basic short-circuits: a zero factor
/// collapses the whole product, and unit factors are skipped.
#[derive(Default)]
struct ProductBuilder {
    factors: Vec<Node>,
    zero: bool,
}

impl ProductBuilder {
    fn push(&mut self, node: Node) {
        if self.zero || node.is_zero() {
            self.zero = true;
        } else if !node.is_one() {
            self.factors.push(node);
        }
    }

    fn build(self) -> Node {
        if self.zero {
            Node::zero()
        } else {
            self.factors.into_iter().fold(Node::one(), |product, factor| product * factor)
        }
    }
}

/// Helper struct to build a sum of nodes. Only non-zero nodes are added to the sum.
#[derive(Default)]
struct SumBuilder {
    terms: Vec<Node>,
}

impl SumBuilder {
    fn push(&mut self, node: Node) {
        if !node.is_zero() {
            self.terms.push(node);
        }
    }

    fn build(self) -> Node {
        self.terms.into_iter().fold(Node::zero(), |sum, term| sum + term)
    }
}

/// Computes the `order`-th derivative of the given node with respect to `var`.
///
/// Order 0 returns the canonicalized input. Higher orders repeat single-order differentiation
/// with a canonicalization pass between steps.
pub fn derivative(node: &Node, var: char, order: u32) -> Result<Node, Error> {
    let mut result = simplified(node)?;
    for _ in 0..order {
        result = simplified(&derivative_once(&result, var)?)?;
    }
    Ok(result)
}

/// Computes the `order`-th derivative of the node and immediately evaluates it at
/// `var := point`.
pub fn derivative_at(node: &Node, var: char, order: u32, point: &Node) -> Result<Node, Error> {
    let derived = derivative(node, var, order)?;
    evaluate(&derived, &HashMap::from([(var, point.clone())]))
}

/// `(f + g)' = f' + g'`, sign preserved per summand.
fn sum_rule(terms: &[(Sign, Node)], var: char) -> Result<Node, Error> {
    let mut derived = Vec::with_capacity(terms.len());
    for (sign, term) in terms {
        derived.push((*sign, derivative_once(term, var)?));
    }
    Ok(Node::Expression(derived))
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(coefficient: f64, factors: &[Node], var: char) -> Result<Node, Error> {
    let mut sum = SumBuilder::default();

    for derived_index in 0..factors.len() {
        let mut product = ProductBuilder::default();
        for (index, factor) in factors.iter().enumerate() {
            if index == derived_index {
                product.push(derivative_once(factor, var)?);
            } else {
                product.push(factor.clone());
            }
        }
        sum.push(product.build());
    }

    Ok(Node::Constant(coefficient) * sum.build())
}

/// Differentiates `c * base^power`, selecting between the power rule, the exponential rule, and
/// full logarithmic differentiation.
fn power_rule(node: &Node, var: char) -> Result<Node, Error> {
    let Node::Term { coefficient, base, power } = node else {
        return Ok(Node::zero());
    };

    if let Some(exp) = power.as_constant() {
        // power rule: c * p * base^(p-1) * base'
        let lowered = Node::Term {
            coefficient: coefficient * exp,
            base: base.clone(),
            power: Box::new(Node::Constant(exp - 1.0)),
        };
        Ok(lowered * derivative_once(base, var)?)
    } else if !depends_on(base, var) {
        // exponential rule: c * base^power * ln(base) * power'
        let log = Node::call(Func::Ln, (**base).clone());
        Ok(node.clone() * log * derivative_once(power, var)?)
    } else {
        // both the base and the power depend on the variable; differentiate logarithmically:
        // (base^power)' = base^power * (power * base'/base + power' * ln(base))
        let ratio = ((**power).clone() * derivative_once(base, var)?).div((**base).clone())?;
        let log_part = derivative_once(power, var)? * Node::call(Func::Ln, (**base).clone());
        Ok(node.clone() * (ratio + log_part))
    }
}

/// Computes a single-order derivative. Results are not canonicalized; [`derivative`] interleaves
/// canonicalization between orders.
fn derivative_once(node: &Node, var: char) -> Result<Node, Error> {
    if !depends_on(node, var) {
        return Ok(Node::zero());
    }

    match node {
        // the depends_on check above already rejected constants and free variables
        Node::Constant(_) => Ok(Node::zero()),
        Node::Variable { coefficient, .. } => Ok(Node::Constant(*coefficient)),
        Node::Function { func, arg } => {
            // chain rule: f(u)' = f'(u) * u'
            let outer = function::derivative_rule(*func, arg);
            Ok(outer * derivative_once(arg, var)?)
        },
        Node::Term { .. } => power_rule(node, var),
        Node::Terms { coefficient, factors } => product_rule(*coefficient, factors, var),
        Node::Expression(terms) => sum_rule(terms, var),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::symbolic::tokenise;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use super::*;

    fn diff(input: &str, order: u32) -> String {
        derivative(&tokenise(input).unwrap(), 'x', order).unwrap().to_string()
    }

    /// Evaluates the node at `x`, which must leave no free variables.
    fn eval_x(node: &Node, x: f64) -> f64 {
        let bindings = HashMap::from([('x', Node::Constant(x))]);
        evaluate(node, &bindings)
            .unwrap()
            .as_constant()
            .expect("evaluation should yield a constant")
    }

    /// Approximates the derivative of the expression at `x` by finite difference.
    fn finite_difference(node: &Node, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(node, x + DX) - eval_x(node, x - DX)) / (2.0 * DX)
    }

    /// Checks the symbolic derivative against a finite-difference approximation at the given
    /// sample points.
    fn check_against_finite_difference(input: &str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 1e-4;

        let node = tokenise(input).unwrap();
        let symbolic = derivative(&node, 'x', 1).unwrap();

        for point in points {
            let computed = eval_x(&symbolic, point);
            let approximated = finite_difference(&node, point);
            assert!(
                (computed - approximated).abs() < TOL,
                "for `{input}` at x={point}: symbolic {computed}, finite difference {approximated}",
            );
        }
    }

    #[test]
    fn constants_vanish() {
        assert_eq!(diff("42", 1), "0");
        assert_eq!(diff("y", 1), "0");
    }

    #[test]
    fn order_zero_is_the_simplified_input() {
        assert_eq!(diff("x + x", 0), "2x");
    }

    #[test]
    fn power_rule_basic() {
        assert_eq!(diff("x^3", 1), "3x^2");
        assert_eq!(diff("x", 1), "1");
        assert_eq!(diff("3x^2", 1), "6x");
    }

    #[test]
    fn derivative_distributes_over_sums() {
        let combined = diff("x^2 + 3x", 1);
        let separate = simplified(
            &(derivative(&tokenise("x^2").unwrap(), 'x', 1).unwrap()
                + derivative(&tokenise("3x").unwrap(), 'x', 1).unwrap()),
        )
        .unwrap();
        assert_eq!(combined, separate.to_string());
    }

    #[test]
    fn chain_rule() {
        assert_eq!(diff("sin(x)", 1), "cos(x)");
        assert_eq!(diff("sin(2x)", 1), "2cos(2x)");
        assert_eq!(diff("ln(x)", 1), "x^-1");
    }

    #[test]
    fn product_rule_expands() {
        // (x * sin(x))' = sin(x) + x cos(x)
        assert_eq!(diff("x * sin(x)", 1), "(sin(x) + (x*cos(x)))");
    }

    #[test]
    fn exponential_rule() {
        // (e^x)' = e^x
        let derived = diff("e^x", 1);
        assert_eq!(derived, tokenise("e^x").unwrap().to_string());
    }

    #[test]
    fn higher_orders_iterate() {
        assert_eq!(diff("x^3", 2), "6x");
        assert_eq!(diff("x^3", 3), "6");
        assert_eq!(diff("x^3", 4), "0");
        assert_eq!(diff("sin(x)", 2), "-sin(x)");
    }

    #[test]
    fn derivative_at_a_point() {
        let node = tokenise("sin(x)").unwrap();
        let value = derivative_at(&node, 'x', 1, &Node::one()).unwrap();
        assert_float_absolute_eq!(value.as_constant().unwrap(), 1.0_f64.cos());
    }

    #[test]
    fn finite_difference_cross_check() {
        check_against_finite_difference("x^3 - 2x + 1", [0.5, 1.0, 2.0]);
        check_against_finite_difference("sin(x) * cos(x)", [0.3, 1.2]);
        check_against_finite_difference("e^(2x)", [0.0, 0.7]);
        check_against_finite_difference("ln(x^2 + 1)", [0.5, 1.5]);
        check_against_finite_difference("x^x", [0.5, 1.5, 2.0]);
    }
}
