//! Symbolic derivatives of the elementary functions.
//!
//! Each rule is the closed-form derivative template in the function's argument, constructed
//! directly as a node tree with the argument subtree inserted where the template needs it. The
//! chain-rule factor is applied by the caller.

use crate::symbolic::node::Node;
use sym_parser::funcs::Func;

/// `1 - u^2`
fn one_minus_square(u: &Node) -> Node {
    Node::one() - Node::term(u.clone(), Node::Constant(2.0))
}

/// `u^2 + c`
fn square_plus(u: &Node, constant: f64) -> Node {
    Node::term(u.clone(), Node::Constant(2.0)) + Node::Constant(constant)
}

/// `sqrt(n)`
fn sqrt(node: Node) -> Node {
    Node::term(node, Node::Constant(0.5))
}

/// `1 / n`
fn reciprocal(node: Node) -> Node {
    Node::term(node, Node::Constant(-1.0))
}

/// Returns the derivative of `func` applied to `arg`, without the chain-rule factor.
pub(super) fn derivative_rule(func: Func, arg: &Node) -> Node {
    let u = arg;
    match func {
        // trigonometric
        Func::Sin => Node::call(Func::Cos, u.clone()),
        Func::Cos => -Node::call(Func::Sin, u.clone()),
        Func::Tan => Node::term(Node::call(Func::Sec, u.clone()), Node::Constant(2.0)),
        Func::Sec => Node::call(Func::Sec, u.clone()) * Node::call(Func::Tan, u.clone()),
        Func::Csc => -(Node::call(Func::Csc, u.clone()) * Node::call(Func::Cot, u.clone())),
        Func::Cot => -Node::term(Node::call(Func::Csc, u.clone()), Node::Constant(2.0)),

        // hyperbolic
        Func::Sinh => Node::call(Func::Cosh, u.clone()),
        Func::Cosh => Node::call(Func::Sinh, u.clone()),
        Func::Tanh => Node::term(Node::call(Func::Sech, u.clone()), Node::Constant(2.0)),
        Func::Sech => -(Node::call(Func::Sech, u.clone()) * Node::call(Func::Tanh, u.clone())),
        Func::Csch => -(Node::call(Func::Csch, u.clone()) * Node::call(Func::Coth, u.clone())),
        Func::Coth => -Node::term(Node::call(Func::Csch, u.clone()), Node::Constant(2.0)),

        // inverse trigonometric
        Func::Asin => Node::term(one_minus_square(u), Node::Constant(-0.5)),
        Func::Acos => -Node::term(one_minus_square(u), Node::Constant(-0.5)),
        Func::Atan => reciprocal(square_plus(u, 1.0)),
        Func::Asec => reciprocal(
            Node::call(Func::Abs, u.clone()) * sqrt(square_plus(u, -1.0)),
        ),
        Func::Acsc => -reciprocal(
            Node::call(Func::Abs, u.clone()) * sqrt(square_plus(u, -1.0)),
        ),
        Func::Acot => -reciprocal(square_plus(u, 1.0)),

        // inverse hyperbolic
        Func::Asinh => Node::term(square_plus(u, 1.0), Node::Constant(-0.5)),
        Func::Acosh => Node::term(square_plus(u, -1.0), Node::Constant(-0.5)),
        Func::Atanh => reciprocal(one_minus_square(u)),
        Func::Asech => -reciprocal(u.clone() * sqrt(one_minus_square(u))),
        Func::Acsch => -reciprocal(
            Node::call(Func::Abs, u.clone()) * sqrt(square_plus(u, 1.0)),
        ),
        Func::Acoth => reciprocal(one_minus_square(u)),

        // logarithm and absolute value
        Func::Ln => reciprocal(u.clone()),
        Func::Abs => u.clone() * reciprocal(Node::call(Func::Abs, u.clone())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn templates_substitute_the_argument() {
        let arg = Node::var('x');
        assert_eq!(derivative_rule(Func::Sin, &arg).to_string(), "cos(x)");
        assert_eq!(derivative_rule(Func::Cos, &arg).to_string(), "-sin(x)");
        assert_eq!(derivative_rule(Func::Ln, &arg).to_string(), "x^-1");
        assert_eq!(derivative_rule(Func::Tan, &arg).to_string(), "sec(x)^2");
    }

    #[test]
    fn inverse_templates() {
        use crate::symbolic::simplify::simplified;

        let arg = Node::var('x');
        // d/dx asin(x) = (1 - x^2)^(-1/2)
        assert_eq!(
            simplified(&derivative_rule(Func::Asin, &arg)).unwrap().to_string(),
            "(1 - x^2)^-0.5",
        );
        // d/dx atan(x) = (x^2 + 1)^-1
        assert_eq!(
            derivative_rule(Func::Atan, &arg).to_string(),
            "(x^2 + 1)^-1",
        );
    }
}
