//! Canonicalization rules for powers: trivial exponents, constant folding (with its domain
//! errors), coefficient hoisting out of the base, and flattening nested powers.

use crate::error::Error;
use crate::symbolic::node::{pow_constants, Node};
use super::do_power;

/// `0 * base^power = 0`
pub fn zero_coefficient(node: &Node) -> Option<Node> {
    do_power(node, |coefficient, _, _| {
        if coefficient == 0.0 {
            Some(Node::zero())
        } else {
            None
        }
    })
}

/// `0^positive = 0`; `0^0` and `0^negative` are domain errors.
pub fn zero_base(node: &Node) -> Result<Option<Node>, Error> {
    if let Node::Term { base, power, .. } = node {
        if base.is_zero() {
            return match power.as_constant() {
                Some(exp) if exp == 0.0 => Err(Error::Indeterminate("0^0")),
                Some(exp) if exp < 0.0 => Err(Error::DivisionByZero),
                _ => Ok(Some(Node::zero())),
            };
        }
    }
    Ok(None)
}

/// `c * base^0 = c` and `c * base^1 = c * base`.
pub fn trivial_power(node: &Node) -> Option<Node> {
    do_power(node, |coefficient, base, power| {
        if power.is_zero() {
            Some(Node::Constant(coefficient))
        } else if power.is_one() {
            Some(Node::Constant(coefficient) * base.clone())
        } else {
            None
        }
    })
}

/// Folds a concrete base raised to a concrete power, raising the domain errors of `^`.
pub fn fold_constants(node: &Node) -> Result<Option<Node>, Error> {
    if let Node::Term { coefficient, base, power } = node {
        if let (Some(base), Some(exp)) = (base.as_constant(), power.as_constant()) {
            return Ok(Some(Node::Constant(coefficient * pow_constants(base, exp)?)));
        }
    }
    Ok(None)
}

/// `(2x)^3 = 8x^3`
///
/// A constant coefficient inside the base hoists out through a constant exponent. Skipped when
/// the hoisted value would not be finite (a negative coefficient under a fractional exponent).
pub fn hoist_base_coefficient(node: &Node) -> Option<Node> {
    do_power(node, |coefficient, base, power| {
        if base.as_constant().is_some() {
            return None;
        }

        let (base_coefficient, core) = base.split_coefficient();
        if base_coefficient == 1.0 {
            return None;
        }

        let exp = power.as_constant()?;
        let hoisted = base_coefficient.powf(exp);
        if !hoisted.is_finite() {
            return None;
        }

        Some(Node::Term {
            coefficient: coefficient * hoisted,
            base: Box::new(core),
            power: Box::new(power.clone()),
        })
    })
}

/// `(x^a)^b = x^(a*b)`
pub fn flatten_nested_power(node: &Node) -> Option<Node> {
    do_power(node, |coefficient, base, power| {
        if let Node::Term {
            coefficient: inner_coefficient,
            base: inner_base,
            power: inner_power,
        } = base
        {
            if *inner_coefficient == 1.0 {
                return Some(Node::Term {
                    coefficient,
                    base: inner_base.clone(),
                    power: Box::new((**inner_power).clone() * power.clone()),
                });
            }
        }
        None
    })
}

/// Applies all power rules.
pub fn all(node: &Node) -> Result<Option<Node>, Error> {
    if let Some(node) = zero_coefficient(node) {
        return Ok(Some(node));
    }
    if let Some(node) = zero_base(node)? {
        return Ok(Some(node));
    }
    if let Some(node) = trivial_power(node) {
        return Ok(Some(node));
    }
    if let Some(node) = fold_constants(node)? {
        return Ok(Some(node));
    }
    Ok(hoist_base_coefficient(node).or_else(|| flatten_nested_power(node)))
}
