//! Canonicalization rules for sums: flattening, dropping zeros, sign normalization, collecting
//! like terms, and collapsing trivial sums.

use crate::error::Error;
use crate::symbolic::node::{Node, Sign};
use super::do_sum;

/// `a + (b + c) = a + b + c`
///
/// A summand that is itself a sum is spliced into its parent, distributing the outer sign over
/// the inner summands.
pub fn flatten_nested_sums(node: &Node) -> Option<Node> {
    do_sum(node, |terms| {
        if !terms.iter().any(|(_, term)| matches!(term, Node::Expression(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for (sign, term) in terms {
            match term {
                Node::Expression(inner) => {
                    for (inner_sign, inner_term) in inner {
                        let combined = match sign {
                            Sign::Plus => *inner_sign,
                            Sign::Minus => inner_sign.flip(),
                        };
                        new_terms.push((combined, inner_term.clone()));
                    }
                },
                other => new_terms.push((*sign, other.clone())),
            }
        }
        Some(Node::Expression(new_terms))
    })
}

/// `a + 0 = a`
pub fn drop_zero_summands(node: &Node) -> Option<Node> {
    do_sum(node, |terms| {
        let new_terms = terms
            .iter()
            .filter(|(_, term)| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(Node::Expression(new_terms))
        }
    })
}

/// `a + -3b = a - 3b`
///
/// A summand whose coefficient is negative flips its sign and the sign of the coefficient, so
/// negativity always lives in the summand's sign.
pub fn normalize_signs(node: &Node) -> Option<Node> {
    do_sum(node, |terms| {
        if !terms.iter().any(|(_, term)| term.split_coefficient().0 < 0.0) {
            return None;
        }

        let new_terms = terms
            .iter()
            .map(|(sign, term)| {
                if term.split_coefficient().0 < 0.0 {
                    (sign.flip(), -term.clone())
                } else {
                    (*sign, term.clone())
                }
            })
            .collect();
        Some(Node::Expression(new_terms))
    })
}

/// `2x + 3x = 5x`
///
/// Two summands that are equal up to coefficient merge by summing their signed coefficients.
/// Constants are a special case of this rule (their core is the constant one).
pub fn combine_like_summands(node: &Node) -> Option<Node> {
    do_sum(node, |terms| {
        let mut new_terms = terms.to_vec();
        let mut changed = false;
        let mut current = 0;

        while current < new_terms.len() {
            let mut next = current + 1;
            while next < new_terms.len() {
                let (current_coeff, current_core) = new_terms[current].1.split_coefficient();
                let (next_coeff, next_core) = new_terms[next].1.split_coefficient();

                if current_core == next_core {
                    let total = new_terms[current].0.factor() * current_coeff
                        + new_terms[next].0.factor() * next_coeff;
                    new_terms[current] = (Sign::Plus, current_core.with_coefficient(total));
                    new_terms.remove(next);
                    changed = true;
                } else {
                    next += 1;
                }
            }
            current += 1;
        }

        if changed {
            Some(Node::Expression(new_terms))
        } else {
            None
        }
    })
}

/// A sum with no summands collapses to zero; a sum with one summand collapses to that summand,
/// negated if its sign is negative.
pub fn collapse(node: &Node) -> Option<Node> {
    do_sum(node, |terms| match terms {
        [] => Some(Node::zero()),
        [(Sign::Plus, term)] => Some(term.clone()),
        [(Sign::Minus, term)] => Some(-term.clone()),
        _ => None,
    })
}

/// Applies all sum rules.
pub fn all(node: &Node) -> Result<Option<Node>, Error> {
    Ok(flatten_nested_sums(node)
        .or_else(|| drop_zero_summands(node))
        .or_else(|| normalize_signs(node))
        .or_else(|| combine_like_summands(node))
        .or_else(|| collapse(node)))
}
