//! Canonicalization rules for products: zero absorption, coefficient hoisting, combining like
//! factors, canonical factor ordering, and collapsing trivial products.

use crate::error::Error;
use crate::symbolic::node::{merge_like_bases, Node};
use std::cmp::Ordering;
use super::do_product;

/// `0 * a = 0`
pub fn multiply_zero(node: &Node) -> Option<Node> {
    do_product(node, |coefficient, factors| {
        if coefficient == 0.0 || factors.iter().any(Node::is_zero) {
            Some(Node::zero())
        } else {
            None
        }
    })
}

/// Hoists everything numeric out of the factor list and into the product's coefficient:
/// constant factors fold in, nested products are spliced flat, and a factor's own coefficient
/// (`3x` inside a product) moves outward, leaving coefficient-free cores.
pub fn normalize_factors(node: &Node) -> Option<Node> {
    do_product(node, |coefficient, factors| {
        let mut new_coefficient = coefficient;
        let mut new_factors = Vec::with_capacity(factors.len());
        let mut changed = false;

        for factor in factors {
            match factor {
                Node::Constant(value) => {
                    new_coefficient *= value;
                    changed = true;
                },
                Node::Terms { coefficient: inner, factors: inner_factors } => {
                    new_coefficient *= inner;
                    new_factors.extend(inner_factors.iter().cloned());
                    changed = true;
                },
                other => {
                    let (factor_coefficient, core) = other.split_coefficient();
                    if factor_coefficient != 1.0 {
                        new_coefficient *= factor_coefficient;
                        changed = true;
                    }
                    new_factors.push(core);
                },
            }
        }

        if changed {
            Some(Node::Terms {
                coefficient: new_coefficient,
                factors: new_factors,
            })
        } else {
            None
        }
    })
}

/// `x * x^2 = x^3`
///
/// Two factors with structurally equal bases merge by adding their exponents. A merge that
/// cancels completely (`x * x^-1`) leaves a constant behind for [`normalize_factors`] to fold.
pub fn combine_like_factors(node: &Node) -> Option<Node> {
    do_product(node, |coefficient, factors| {
        let mut new_factors = factors.to_vec();
        let mut changed = false;
        let mut current = 0;

        while current < new_factors.len() {
            let mut next = current + 1;
            while next < new_factors.len() {
                if let Some(merged) =
                    merge_like_bases(&new_factors[current], &new_factors[next], false)
                {
                    new_factors[current] = merged;
                    new_factors.remove(next);
                    changed = true;
                } else {
                    next += 1;
                }
            }
            current += 1;
        }

        if changed {
            Some(Node::Terms {
                coefficient,
                factors: new_factors,
            })
        } else {
            None
        }
    })
}

/// Puts the factors of a product into canonical order: variables by symbol, functions by name,
/// powers grouped with their base, compound factors last.
pub fn sort_factors(node: &Node) -> Option<Node> {
    do_product(node, |coefficient, factors| {
        let sorted = factors
            .windows(2)
            .all(|pair| pair[0].canonical_cmp(&pair[1]) != Ordering::Greater);
        if sorted {
            return None;
        }

        let mut new_factors = factors.to_vec();
        new_factors.sort_by(|lhs, rhs| lhs.canonical_cmp(rhs));
        Some(Node::Terms {
            coefficient,
            factors: new_factors,
        })
    })
}

/// A product with no factors collapses to its coefficient. A product with one factor collapses
/// to that factor, with the coefficient pushed into it when the factor can carry one; a product
/// whose lone factor cannot (a function or a sum) stays as the coefficient carrier.
pub fn collapse(node: &Node) -> Option<Node> {
    do_product(node, |coefficient, factors| match factors {
        [] => Some(Node::Constant(coefficient)),
        [factor] => {
            if coefficient == 1.0 {
                Some(factor.clone())
            } else {
                match factor {
                    Node::Constant(_) | Node::Variable { .. } | Node::Term { .. } => {
                        let (factor_coefficient, core) = factor.split_coefficient();
                        Some(core.with_coefficient(coefficient * factor_coefficient))
                    },
                    _ => None,
                }
            }
        },
        _ => None,
    })
}

/// Applies all product rules.
pub fn all(node: &Node) -> Result<Option<Node>, Error> {
    Ok(multiply_zero(node)
        .or_else(|| normalize_factors(node))
        .or_else(|| combine_like_factors(node))
        .or_else(|| sort_factors(node))
        .or_else(|| collapse(node)))
}
