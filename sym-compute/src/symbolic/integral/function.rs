//! Antiderivatives of the elementary functions.
//!
//! Each rule is the closed-form antiderivative template in the function's argument, constructed
//! directly as a node tree. The caller divides by the argument's derivative (the substitution
//! correction for linear arguments). The inverse-function antiderivatives come from the standard
//! integration-by-parts results, e.g. `∫asec u du = u·asec u − ln|u + √(u²−1)|`.

use crate::symbolic::node::Node;
use sym_parser::funcs::Func;

/// `u^2 + c`
fn square_plus(u: &Node, constant: f64) -> Node {
    Node::term(u.clone(), Node::Constant(2.0)) + Node::Constant(constant)
}

/// `1 - u^2`
fn one_minus_square(u: &Node) -> Node {
    Node::one() - Node::term(u.clone(), Node::Constant(2.0))
}

/// `sqrt(n)`
fn sqrt(node: Node) -> Node {
    Node::term(node, Node::Constant(0.5))
}

/// `ln|n|`
fn ln_abs(node: Node) -> Node {
    Node::call(Func::Ln, Node::call(Func::Abs, node))
}

/// `u * f(u)`, the integration-by-parts head common to all the inverse functions.
fn by_parts_head(func: Func, u: &Node) -> Node {
    u.clone() * Node::call(func, u.clone())
}

/// `ln(n) / 2`
fn half_ln(node: Node) -> Node {
    Node::Constant(0.5) * Node::call(Func::Ln, node)
}

/// Returns the antiderivative of `func` applied to `arg`, without the substitution correction.
pub(super) fn antiderivative_rule(func: Func, arg: &Node) -> Node {
    let u = arg;
    match func {
        // trigonometric
        Func::Sin => -Node::call(Func::Cos, u.clone()),
        Func::Cos => Node::call(Func::Sin, u.clone()),
        Func::Tan => -ln_abs(Node::call(Func::Cos, u.clone())),
        Func::Sec => ln_abs(Node::call(Func::Sec, u.clone()) + Node::call(Func::Tan, u.clone())),
        Func::Csc => -ln_abs(Node::call(Func::Csc, u.clone()) + Node::call(Func::Cot, u.clone())),
        Func::Cot => ln_abs(Node::call(Func::Sin, u.clone())),

        // hyperbolic
        Func::Sinh => Node::call(Func::Cosh, u.clone()),
        Func::Cosh => Node::call(Func::Sinh, u.clone()),
        Func::Tanh => Node::call(Func::Ln, Node::call(Func::Cosh, u.clone())),
        Func::Sech => Node::call(Func::Atan, Node::call(Func::Sinh, u.clone())),
        Func::Csch => ln_abs(Node::call(Func::Tanh, Node::Constant(0.5) * u.clone())),
        Func::Coth => ln_abs(Node::call(Func::Sinh, u.clone())),

        // inverse trigonometric, by parts
        Func::Asin => by_parts_head(Func::Asin, u) + sqrt(one_minus_square(u)),
        Func::Acos => by_parts_head(Func::Acos, u) - sqrt(one_minus_square(u)),
        Func::Atan => by_parts_head(Func::Atan, u) - half_ln(square_plus(u, 1.0)),
        Func::Asec => {
            by_parts_head(Func::Asec, u) - ln_abs(u.clone() + sqrt(square_plus(u, -1.0)))
        },
        Func::Acsc => {
            by_parts_head(Func::Acsc, u) + ln_abs(u.clone() + sqrt(square_plus(u, -1.0)))
        },
        Func::Acot => by_parts_head(Func::Acot, u) + half_ln(square_plus(u, 1.0)),

        // inverse hyperbolic, by parts
        Func::Asinh => by_parts_head(Func::Asinh, u) - sqrt(square_plus(u, 1.0)),
        Func::Acosh => by_parts_head(Func::Acosh, u) - sqrt(square_plus(u, -1.0)),
        Func::Atanh => by_parts_head(Func::Atanh, u) + half_ln(one_minus_square(u)),
        Func::Asech => by_parts_head(Func::Asech, u) + Node::call(Func::Asin, u.clone()),
        Func::Acsch => by_parts_head(Func::Acsch, u) + Node::call(Func::Asinh, u.clone()),
        Func::Acoth => by_parts_head(Func::Acoth, u) + half_ln(square_plus(u, -1.0)),

        // logarithm and absolute value
        Func::Ln => by_parts_head(Func::Ln, u) - u.clone(),
        Func::Abs => Node::Constant(0.5) * (u.clone() * Node::call(Func::Abs, u.clone())),
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::derivative::derivative;
    use crate::symbolic::eval::evaluate;
    use crate::symbolic::simplify::simplified;
    use std::collections::HashMap;
    use super::*;
    use sym_parser::funcs;

    #[test]
    fn templates_substitute_the_argument() {
        let arg = Node::var('x');
        assert_eq!(antiderivative_rule(Func::Sin, &arg).to_string(), "-cos(x)");
        assert_eq!(antiderivative_rule(Func::Cos, &arg).to_string(), "sin(x)");
        assert_eq!(
            antiderivative_rule(Func::Cot, &arg).to_string(),
            "ln(abs(sin(x)))",
        );
    }

    /// Every antiderivative template differentiates back to its function, checked numerically at
    /// a point inside the function's domain.
    #[test]
    fn templates_differentiate_back() {
        const TOL: f64 = 1e-9;

        let arg = Node::var('x');
        for func in funcs::ALL {
            // the inverse functions split into those defined inside and outside the unit interval
            let point = match func {
                Func::Asin | Func::Acos | Func::Atanh | Func::Asech => 0.5,
                _ => 1.2,
            };

            let antiderivative = antiderivative_rule(func, &arg);
            let restored = derivative(&antiderivative, 'x', 1).unwrap();

            let bindings = HashMap::from([('x', Node::Constant(point))]);
            let expected = crate::funcs::eval(func, point).unwrap();
            let actual = evaluate(&restored, &bindings)
                .unwrap()
                .as_constant()
                .expect("derivative of a template should evaluate to a constant");
            assert!(
                (actual - expected).abs() < TOL,
                "template for `{func}` differentiates to {actual}, expected {expected}",
            );
        }
    }

    #[test]
    fn inverse_function_templates_are_balanced() {
        // the by-parts results for the inverse functions, spelled out
        let arg = Node::var('x');
        let asec = simplified(&antiderivative_rule(Func::Asec, &arg)).unwrap();
        assert_eq!(
            asec.to_string(),
            "((x*asec(x)) - ln(abs((x + (x^2 - 1)^0.5))))",
        );
    }
}
