//! Variable substitution and evaluation.

use crate::error::Error;
use std::collections::HashMap;
use super::node::Node;
use super::simplify::simplified;

/// Substitutes the given variable bindings into the node and canonicalizes the result.
///
/// A bound variable is replaced by `coefficient · binding`; unbound variables stay symbolic, so
/// the result is a [`Node::Constant`] only when every free variable is bound. Bindings are
/// arbitrary nodes, not just constants; substituting `x := y + 1` is valid.
pub fn evaluate(node: &Node, bindings: &HashMap<char, Node>) -> Result<Node, Error> {
    simplified(&substitute(node, bindings))
}

/// Structural substitution, leaving canonicalization to the caller.
fn substitute(node: &Node, bindings: &HashMap<char, Node>) -> Node {
    match node {
        Node::Constant(_) => node.clone(),
        Node::Variable { symbol, coefficient } => match bindings.get(symbol) {
            Some(binding) => Node::Constant(*coefficient) * binding.clone(),
            None => node.clone(),
        },
        Node::Function { func, arg } => Node::Function {
            func: *func,
            arg: Box::new(substitute(arg, bindings)),
        },
        Node::Term { coefficient, base, power } => Node::Term {
            coefficient: *coefficient,
            base: Box::new(substitute(base, bindings)),
            power: Box::new(substitute(power, bindings)),
        },
        Node::Terms { coefficient, factors } => Node::Terms {
            coefficient: *coefficient,
            factors: factors.iter().map(|factor| substitute(factor, bindings)).collect(),
        },
        Node::Expression(terms) => Node::Expression(
            terms
                .iter()
                .map(|(sign, term)| (*sign, substitute(term, bindings)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::tokenise;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval_str(input: &str, bindings: &[(char, &str)]) -> String {
        let node = tokenise(input).unwrap();
        let bindings = bindings
            .iter()
            .map(|(symbol, value)| (*symbol, tokenise(value).unwrap()))
            .collect();
        evaluate(&node, &bindings).unwrap().to_string()
    }

    #[test]
    fn full_evaluation_yields_a_constant() {
        assert_eq!(eval_str("x^2 + 2x + 1", &[('x', "3")]), "16");
        assert_eq!(eval_str("3x * y", &[('x', "2"), ('y', "5")]), "30");
    }

    #[test]
    fn partial_evaluation_stays_symbolic() {
        assert_eq!(eval_str("x^2 + y", &[('x', "3")]), "(9 + y)");
    }

    #[test]
    fn bindings_can_be_symbolic() {
        assert_eq!(eval_str("x^2", &[('x', "y + 1")]), "(y + 1)^2");
    }

    #[test]
    fn coefficient_multiplies_the_binding() {
        assert_eq!(eval_str("3x", &[('x', "2y")]), "6y");
    }

    #[test]
    fn evaluation_inside_functions() {
        assert_eq!(eval_str("sin(x)", &[('x', "0")]), "0");
    }
}
