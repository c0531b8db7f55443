//! Symbolic integration.
//!
//! [`integral`] produces an indefinite antiderivative (without the constant of integration);
//! [`integral_between`] evaluates the antiderivative at two bounds and subtracts. The rule set is
//! deliberately closed: reverse power rule and logarithm rule over linear bases, the exponential
//! rule over variable-free bases, the per-function antiderivative table over linear arguments,
//! and the single-linear-factor decomposition of products. Everything else raises
//! [`Error::NonIntegrable`] — an expected outcome, since elementary antiderivatives do not exist
//! for arbitrary products and compositions, and the engine must say so rather than guess.

mod function;

use crate::error::Error;
use std::collections::HashMap;
use sym_parser::funcs::Func;
use super::dependency::{depends_on, is_linear_in};
use super::derivative::derivative;
use super::eval::evaluate;
use super::node::Node;
use super::simplify::simplified;

/// Computes an indefinite antiderivative of the node with respect to `var`.
pub fn integral(node: &Node, var: char) -> Result<Node, Error> {
    let canonical = simplified(node)?;
    simplified(&integral_once(&canonical, var)?)
}

/// Computes the definite integral of the node from `from` to `to`: the indefinite antiderivative
/// is evaluated at each bound and the difference is canonicalized. Bounds are arbitrary nodes.
pub fn integral_between(node: &Node, var: char, from: &Node, to: &Node) -> Result<Node, Error> {
    let antiderivative = integral(node, var)?;
    let upper = evaluate(&antiderivative, &HashMap::from([(var, to.clone())]))?;
    let lower = evaluate(&antiderivative, &HashMap::from([(var, from.clone())]))?;
    simplified(&(upper - lower))
}

/// Integrates `c * base^power` by the reverse power rule, the logarithm rule, or the exponential
/// rule, depending on where the variable appears.
fn reverse_power_rule(node: &Node, var: char) -> Result<Node, Error> {
    let Node::Term { coefficient, base, power } = node else {
        return Err(Error::NonIntegrable(node.to_string()));
    };

    match power.as_constant() {
        // ∫ c/u du = c * ln|u| / u' for linear u
        Some(exp) if exp == -1.0 => {
            if is_linear_in(base, var) {
                let log = Node::call(Func::Ln, Node::call(Func::Abs, (**base).clone()));
                (Node::Constant(*coefficient) * log).div(derivative(base, var, 1)?)
            } else {
                Err(Error::NonIntegrable(node.to_string()))
            }
        },
        // ∫ c*u^p du = c/(p+1) * u^(p+1) / u' for linear u
        Some(exp) => {
            if is_linear_in(base, var) {
                let raised = Node::Term {
                    coefficient: coefficient / (exp + 1.0),
                    base: base.clone(),
                    power: Box::new(Node::Constant(exp + 1.0)),
                };
                raised.div(derivative(base, var, 1)?)
            } else {
                Err(Error::NonIntegrable(node.to_string()))
            }
        },
        // ∫ c*b^u du = c*b^u / (u' * ln(b)) for a variable-free base and linear exponent
        None => {
            if !depends_on(base, var) && is_linear_in(power, var) {
                let correction =
                    derivative(power, var, 1)? * Node::call(Func::Ln, (**base).clone());
                node.clone().div(correction)
            } else {
                Err(Error::NonIntegrable(node.to_string()))
            }
        },
    }
}

/// Integrates a product. Only a product that is linear in the variable is supported: every
/// variable-free factor is a constant multiplier, and the single dependent (linear) factor is
/// integrated in isolation.
fn product_rule(node: &Node, var: char) -> Result<Node, Error> {
    let Node::Terms { coefficient, factors } = node else {
        return Err(Error::NonIntegrable(node.to_string()));
    };

    if !is_linear_in(node, var) {
        return Err(Error::NonIntegrable(node.to_string()));
    }

    match factors.iter().position(|factor| depends_on(factor, var)) {
        Some(index) => {
            let multiplier = Node::Terms {
                coefficient: *coefficient,
                factors: factors
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, factor)| factor.clone())
                    .collect(),
            };
            Ok(multiplier * integral_once(&factors[index], var)?)
        },
        None => Err(Error::NonIntegrable(node.to_string())),
    }
}

/// Computes a single antiderivative. Results are not canonicalized; [`integral`] does that.
fn integral_once(node: &Node, var: char) -> Result<Node, Error> {
    // anything free of the variable integrates to itself times the variable
    if !depends_on(node, var) {
        return Ok(node.clone() * Node::var(var));
    }

    match node {
        // unreachable: constants never depend on the variable
        Node::Constant(_) => Ok(node.clone() * Node::var(var)),
        // ∫ c*x dx = c/2 * x^2
        Node::Variable { coefficient, .. } => Ok(Node::Term {
            coefficient: coefficient / 2.0,
            base: Box::new(Node::var(var)),
            power: Box::new(Node::Constant(2.0)),
        }),
        Node::Function { func, arg } => {
            if is_linear_in(arg, var) {
                let rule = function::antiderivative_rule(*func, arg);
                rule.div(derivative(arg, var, 1)?)
            } else {
                Err(Error::NonIntegrable(node.to_string()))
            }
        },
        Node::Term { .. } => reverse_power_rule(node, var),
        Node::Terms { .. } => product_rule(node, var),
        Node::Expression(terms) => {
            let mut integrated = Vec::with_capacity(terms.len());
            for (sign, term) in terms {
                integrated.push((*sign, integral_once(term, var)?));
            }
            Ok(Node::Expression(integrated))
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::symbolic::tokenise;
    use pretty_assertions::assert_eq;
    use super::*;

    fn integrate(input: &str) -> String {
        integral(&tokenise(input).unwrap(), 'x').unwrap().to_string()
    }

    #[test]
    fn independent_nodes_multiply_by_the_variable() {
        assert_eq!(integrate("3"), "3x");
        assert_eq!(integrate("y"), "(x*y)");
    }

    #[test]
    fn variable_self_integral() {
        assert_eq!(integrate("x"), "0.5x^2");
        assert_eq!(integrate("3x"), "1.5x^2");
    }

    #[test]
    fn reverse_power_rule_with_substitution_correction() {
        assert_eq!(integrate("x^2"), format!("{}x^3", 1.0 / 3.0));
        // ∫(2x+1)^3 dx = (2x+1)^4 / 8
        assert_eq!(integrate("(2x + 1)^3"), "0.125(2x + 1)^4");
    }

    #[test]
    fn logarithm_rule_at_power_minus_one() {
        assert_eq!(integrate("x^-1"), "ln(abs(x))");
        assert_eq!(integrate("1/x"), "ln(abs(x))");
    }

    #[test]
    fn exponential_rule() {
        // ∫e^x dx = e^x
        assert_eq!(integrate("e^x"), tokenise("e^x").unwrap().to_string());
    }

    #[test]
    fn function_antiderivatives_with_chain_correction() {
        assert_eq!(integrate("sin(x)"), "-cos(x)");
        assert_eq!(integrate("cos(2x)"), "0.5sin(2x)");
    }

    #[test]
    fn sums_integrate_term_by_term() {
        assert_eq!(integrate("x + 1"), "(0.5x^2 + x)");
    }

    #[test]
    fn products_need_a_single_linear_factor() {
        assert_eq!(integrate("y * x"), "0.5(x^2*y)");
    }

    #[test]
    fn fundamental_theorem_round_trip() {
        for input in ["sin(x)", "x^2 + 1", "cos(2x)", "3x + y", "e^x"] {
            let node = tokenise(input).unwrap();
            let integrated = integral(&node, 'x').unwrap();
            let back = derivative(&integrated, 'x', 1).unwrap();
            assert_eq!(
                back.to_string(),
                node.to_string(),
                "derivative of integral of `{input}` did not round-trip",
            );
        }
    }

    #[test]
    fn definite_integral_of_sine() {
        let node = tokenise("sin(x)").unwrap();
        let area = integral_between(
            &node,
            'x',
            &Node::zero(),
            &Node::Constant(std::f64::consts::PI),
        )
        .unwrap();
        assert_float_absolute_eq!(area.as_constant().unwrap(), 2.0);
    }

    #[test]
    fn definite_integral_with_symbolic_bounds() {
        // ∫₀ᵗ 2x dx = t^2
        let node = tokenise("2x").unwrap();
        let area = integral_between(&node, 'x', &Node::zero(), &Node::var('t')).unwrap();
        assert_eq!(area.to_string(), "t^2");
    }

    #[test]
    fn nonlinear_products_are_not_integrable() {
        let node = tokenise("sin(x) * cos(x^2)").unwrap();
        assert!(matches!(
            integral(&node, 'x'),
            Err(Error::NonIntegrable(_)),
        ));
    }

    #[test]
    fn nonlinear_function_arguments_are_not_integrable() {
        let node = tokenise("sin(x^2)").unwrap();
        assert!(matches!(
            integral(&node, 'x'),
            Err(Error::NonIntegrable(_)),
        ));
    }
}
