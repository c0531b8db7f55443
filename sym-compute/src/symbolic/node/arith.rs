//! Pairwise arithmetic between nodes.
//!
//! This module is the single place that decides what `a` combined with `b` means: every algebraic
//! identity that applies across variants (constant folding, zero/one absorption, like-term
//! coefficient merging, like-base exponent merging, coefficient hoisting) lives here exactly
//! once. Every other component builds its results through these operators.
//!
//! The result of a combination is the smallest representation that is exact, and is not
//! necessarily of either operand's variant: adding two equal variables produces a variable with a
//! doubled coefficient, multiplying them produces a power. Combinations with no special identity
//! fall back to wrapping both sides in a product ([`Node::Terms`]) or a sum
//! ([`Node::Expression`]) and leave further reduction to the canonicalizer.
//!
//! `+`, `-`, `*`, and unary `-` cannot fail and are provided as [`std::ops`] impls. Division and
//! exponentiation can raise domain errors on concrete values ([`Node::div`], [`Node::pow`]):
//! dividing by a value structurally or numerically equal to zero, `0/0`, `0^0`, and powers with
//! no finite real value.

use crate::error::Error;
use std::ops::{Add, Mul, Neg, Sub};
use super::{Node, Sign};

/// Folds `base^exp` over concrete values, raising the domain errors the spec of `^` requires.
pub(crate) fn pow_constants(base: f64, exp: f64) -> Result<f64, Error> {
    if base == 0.0 {
        if exp == 0.0 {
            Err(Error::Indeterminate("0^0"))
        } else if exp < 0.0 {
            Err(Error::DivisionByZero)
        } else {
            Ok(0.0)
        }
    } else {
        let value = base.powf(exp);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NonRealPower { base, exp })
        }
    }
}

/// Merges two like terms (equal up to coefficient) by summing their coefficients. Returns
/// [`None`] if the nodes are not like terms.
fn merge_like_terms(lhs: &Node, rhs: &Node) -> Option<Node> {
    let (lc, lcore) = lhs.split_coefficient();
    let (rc, rcore) = rhs.split_coefficient();
    if lcore == rcore {
        Some(lcore.with_coefficient(lc + rc))
    } else {
        None
    }
}

/// Merges two factors with structurally equal bases by adding (or, for division, subtracting)
/// their exponents. Returns [`None`] if the bases differ or either side is a bare constant
/// (constant folding is handled by the callers).
pub(crate) fn merge_like_bases(lhs: &Node, rhs: &Node, dividing: bool) -> Option<Node> {
    if lhs.as_constant().is_some() || rhs.as_constant().is_some() {
        return None;
    }

    let (lbase, lpow, lc) = lhs.as_base_power();
    let (rbase, rpow, rc) = rhs.as_base_power();
    if lbase != rbase {
        return None;
    }

    let (power, coefficient) = if dividing {
        (lpow - rpow, lc / rc)
    } else {
        (lpow + rpow, lc * rc)
    };

    Some(if power.is_zero() {
        // x^a * x^-a: only the coefficients remain
        Node::Constant(coefficient)
    } else if power.is_one() {
        lbase.with_coefficient(coefficient)
    } else {
        Node::Term {
            coefficient,
            base: Box::new(lbase),
            power: Box::new(power),
        }
    })
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Node) -> Node {
        match (self, rhs) {
            (Node::Constant(lhs), Node::Constant(rhs)) => Node::Constant(lhs + rhs),
            (lhs, rhs) if lhs.is_zero() => rhs,
            (lhs, rhs) if rhs.is_zero() => lhs,
            (lhs, rhs) => {
                if let Some(merged) = merge_like_terms(&lhs, &rhs) {
                    return merged;
                }

                match (lhs, rhs) {
                    (Node::Expression(mut terms), Node::Expression(others)) => {
                        terms.extend(others);
                        Node::Expression(terms)
                    },
                    (Node::Expression(mut terms), other) => {
                        terms.push((Sign::Plus, other));
                        Node::Expression(terms)
                    },
                    (other, Node::Expression(terms)) => {
                        let mut all = vec![(Sign::Plus, other)];
                        all.extend(terms);
                        Node::Expression(all)
                    },
                    (lhs, rhs) => Node::Expression(vec![(Sign::Plus, lhs), (Sign::Plus, rhs)]),
                }
            },
        }
    }
}

impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Node) -> Node {
        self + rhs.neg()
    }
}

impl Mul for Node {
    type Output = Node;

    fn mul(self, rhs: Node) -> Node {
        match (self, rhs) {
            (Node::Constant(lhs), Node::Constant(rhs)) => Node::Constant(lhs * rhs),
            (lhs, rhs) if lhs.is_zero() || rhs.is_zero() => Node::zero(),
            (Node::Constant(value), node) | (node, Node::Constant(value)) => {
                let (coefficient, core) = node.split_coefficient();
                core.with_coefficient(coefficient * value)
            },
            (lhs, rhs) => {
                if let Some(merged) = merge_like_bases(&lhs, &rhs, false) {
                    return merged;
                }

                match (lhs, rhs) {
                    (
                        Node::Terms { coefficient: lc, factors: mut lf },
                        Node::Terms { coefficient: rc, factors: rf },
                    ) => {
                        lf.extend(rf);
                        Node::Terms { coefficient: lc * rc, factors: lf }
                    },
                    (Node::Terms { coefficient, mut factors }, other)
                    | (other, Node::Terms { coefficient, mut factors }) => {
                        let (other_coefficient, core) = other.split_coefficient();
                        factors.push(core);
                        Node::Terms {
                            coefficient: coefficient * other_coefficient,
                            factors,
                        }
                    },
                    (lhs, rhs) => {
                        let (lc, lcore) = lhs.split_coefficient();
                        let (rc, rcore) = rhs.split_coefficient();
                        Node::Terms {
                            coefficient: lc * rc,
                            factors: vec![lcore, rcore],
                        }
                    },
                }
            },
        }
    }
}

/// Multiplies the node by -1, negating coefficients in place where a variant carries one.
impl Neg for Node {
    type Output = Node;

    fn neg(self) -> Node {
        match self {
            Node::Constant(value) => Node::Constant(-value),
            Node::Variable { symbol, coefficient } => Node::Variable {
                symbol,
                coefficient: -coefficient,
            },
            Node::Term { coefficient, base, power } => Node::Term {
                coefficient: -coefficient,
                base,
                power,
            },
            Node::Terms { coefficient, factors } => Node::Terms {
                coefficient: -coefficient,
                factors,
            },
            Node::Expression(terms) => Node::Expression(
                terms.into_iter().map(|(sign, term)| (sign.flip(), term)).collect(),
            ),
            node @ Node::Function { .. } => Node::Terms {
                coefficient: -1.0,
                factors: vec![node],
            },
        }
    }
}

impl Node {
    /// Divides this node by another.
    ///
    /// Division by a value structurally or numerically equal to zero is a domain error; `0/0` is
    /// an indeterminate form. Like bases merge by subtracting exponents; any other combination
    /// becomes `lhs * rhs^-1` and is left to the canonicalizer.
    pub fn div(self, rhs: Node) -> Result<Node, Error> {
        if rhs.is_zero() {
            return Err(if self.is_zero() {
                Error::Indeterminate("0/0")
            } else {
                Error::DivisionByZero
            });
        }
        if self.is_zero() {
            return Ok(Node::zero());
        }

        match (self, rhs) {
            (Node::Constant(lhs), Node::Constant(rhs)) => Ok(Node::Constant(lhs / rhs)),
            (lhs, Node::Constant(value)) => {
                let (coefficient, core) = lhs.split_coefficient();
                Ok(core.with_coefficient(coefficient / value))
            },
            (lhs, rhs) => {
                if let Some(merged) = merge_like_bases(&lhs, &rhs, true) {
                    return Ok(merged);
                }

                let (coefficient, core) = rhs.split_coefficient();
                let reciprocal = Node::Term {
                    coefficient: 1.0 / coefficient,
                    base: Box::new(core),
                    power: Box::new(Node::Constant(-1.0)),
                };
                Ok(lhs * reciprocal)
            },
        }
    }

    /// Raises this node to the power of another.
    ///
    /// Concrete values fold immediately (with `0^0`, `0^negative`, and non-real results raising
    /// domain errors); powers of zero and one collapse; a constant exponent multiplies into a
    /// nested power's exponent and hoists the base's coefficient. Any other combination becomes a
    /// [`Node::Term`].
    pub fn pow(self, rhs: Node) -> Result<Node, Error> {
        match (self, rhs) {
            (Node::Constant(base), Node::Constant(exp)) => {
                pow_constants(base, exp).map(Node::Constant)
            },
            (base, exp) if exp.is_zero() => {
                if base.is_zero() {
                    Err(Error::Indeterminate("0^0"))
                } else {
                    Ok(Node::one())
                }
            },
            (base, exp) if base.is_zero() => match exp.as_constant() {
                Some(value) if value < 0.0 => Err(Error::DivisionByZero),
                _ => Ok(Node::zero()),
            },
            (base, exp) if exp.is_one() => Ok(base),
            (base, _) if base.is_one() => Ok(Node::one()),
            (Node::Variable { symbol, coefficient }, Node::Constant(exp)) => {
                let hoisted = coefficient.powf(exp);
                if hoisted.is_finite() {
                    Ok(Node::Term {
                        coefficient: hoisted,
                        base: Box::new(Node::var(symbol)),
                        power: Box::new(Node::Constant(exp)),
                    })
                } else {
                    Ok(Node::term(
                        Node::Variable { symbol, coefficient },
                        Node::Constant(exp),
                    ))
                }
            },
            (Node::Term { coefficient, base, power }, Node::Constant(exp)) => {
                let hoisted = coefficient.powf(exp);
                if hoisted.is_finite() {
                    Ok(Node::Term {
                        coefficient: hoisted,
                        base,
                        power: Box::new(*power * Node::Constant(exp)),
                    })
                } else {
                    Ok(Node::term(
                        Node::Term { coefficient, base, power },
                        Node::Constant(exp),
                    ))
                }
            },
            (base, exp) => Ok(Node::term(base, exp)),
        }
    }
}
