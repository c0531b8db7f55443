//! The six-variant expression tree used for symbolic manipulation.
//!
//! A [`Node`] is one of six mutually exclusive, mutually recursive variants: a closed sum type.
//! Every operation in this crate is a total match over the variants; there is no downcasting and
//! no way to extend the set without touching every operation, which is deliberate.
//!
//! The representation favors flat, coefficient-carrying shapes over deep binary trees: a product
//! is a single [`Node::Terms`] with a list of factors, a sum is a single [`Node::Expression`]
//! with a list of signed summands, and numeric coefficients live directly on the variants that
//! can carry them instead of as separate constant factors. The canonicalizer
//! ([`simplify`](crate::symbolic::simplify)) maintains these invariants; intermediate results of
//! arithmetic are allowed to violate them temporarily.
//!
//! # Structural equality
//!
//! The [`PartialEq`] impl implements *structural* equality: two products or sums are equal if
//! their factors / summands are pairwise equal in any order, and everything else compares field
//! by field. Structural equality is a subset of mathematical equality: it never reports false
//! positives, but `x^2 + 2x + 1` and `(x + 1)^2` are structurally distinct. Combined with
//! canonicalization this is enough to drive like-term merging.
//!
//! Nodes are plain values. Cloning deep-copies the subtree, and no subtree is ever shared between
//! two nodes, so transformations never observe aliasing.

mod arith;
mod iter;

pub(crate) use arith::{merge_like_bases, pow_constants};
pub use iter::NodeIter;

use std::cmp::Ordering;
use sym_parser::funcs::Func;
use sym_parser::parser::{ast, op::{BinOpKind, UnaryOpKind}};

/// The sign of a summand inside an [`Node::Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// The opposite sign.
    pub fn flip(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }

    /// The sign as a factor, `1.0` or `-1.0`.
    pub fn factor(self) -> f64 {
        match self {
            Sign::Plus => 1.0,
            Sign::Minus => -1.0,
        }
    }
}

/// A symbolic expression.
#[derive(Debug, Clone)]
pub enum Node {
    /// A numeric literal.
    Constant(f64),

    /// `coefficient · symbol`, such as `3x`.
    Variable {
        /// The variable's symbol character. Identity and ordering of variables use only this.
        symbol: char,

        /// The numeric coefficient.
        coefficient: f64,
    },

    /// A named elementary function applied to its argument, such as `sin(x)`.
    Function {
        /// The function being applied.
        func: Func,

        /// The function's argument.
        arg: Box<Node>,
    },

    /// `coefficient · base^power`, such as `3x^2`.
    Term {
        /// The numeric coefficient.
        coefficient: f64,

        /// The base of the power.
        base: Box<Node>,

        /// The exponent.
        power: Box<Node>,
    },

    /// `coefficient · factor₁ · factor₂ · …`, a canonical product.
    Terms {
        /// The numeric coefficient.
        coefficient: f64,

        /// The factors of the product.
        factors: Vec<Node>,
    },

    /// A canonical signed sum of summands.
    Expression(Vec<(Sign, Node)>),
}

impl Node {
    /// The constant zero.
    pub fn zero() -> Node {
        Node::Constant(0.0)
    }

    /// The constant one.
    pub fn one() -> Node {
        Node::Constant(1.0)
    }

    /// A variable with coefficient 1.
    pub fn var(symbol: char) -> Node {
        Node::Variable { symbol, coefficient: 1.0 }
    }

    /// A function applied to the given argument.
    pub fn call(func: Func, arg: Node) -> Node {
        Node::Function { func, arg: Box::new(arg) }
    }

    /// `base^power` with coefficient 1.
    pub fn term(base: Node, power: Node) -> Node {
        Node::Term {
            coefficient: 1.0,
            base: Box::new(base),
            power: Box::new(power),
        }
    }

    /// If the node is a [`Node::Constant`], returns the contained value.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Node::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the node is numerically zero: a zero constant, a variant with a zero
    /// coefficient, or an empty sum.
    pub fn is_zero(&self) -> bool {
        match self {
            Node::Constant(value) => *value == 0.0,
            Node::Variable { coefficient, .. }
            | Node::Term { coefficient, .. }
            | Node::Terms { coefficient, .. } => *coefficient == 0.0,
            Node::Expression(terms) => terms.is_empty(),
            Node::Function { .. } => false,
        }
    }

    /// Returns true if the node is the constant one.
    pub fn is_one(&self) -> bool {
        matches!(self, Node::Constant(value) if *value == 1.0)
    }

    /// Splits the node into its numeric coefficient and the coefficient-free core.
    ///
    /// The core of a [`Node::Constant`] is the constant one; the core of a [`Node::Function`] or
    /// [`Node::Expression`] (which cannot carry coefficients) is the node itself.
    pub fn split_coefficient(&self) -> (f64, Node) {
        match self {
            Node::Constant(value) => (*value, Node::one()),
            Node::Variable { symbol, coefficient } => (*coefficient, Node::var(*symbol)),
            Node::Term { coefficient, base, power } => {
                (*coefficient, Node::term((**base).clone(), (**power).clone()))
            },
            Node::Terms { coefficient, factors } => {
                // a singleton product is only a coefficient carrier; its core is the factor
                // itself, so `sin(x)` and `2sin(x)` have equal cores and merge as like terms
                if factors.len() == 1 {
                    (*coefficient, factors[0].clone())
                } else {
                    (*coefficient, Node::Terms { coefficient: 1.0, factors: factors.clone() })
                }
            },
            Node::Function { .. } | Node::Expression(_) => (1.0, self.clone()),
        }
    }

    /// Rebuilds a coefficient-free core with the given coefficient. The inverse of
    /// [`split_coefficient`](Node::split_coefficient): variants that cannot carry a coefficient
    /// are wrapped in a [`Node::Terms`].
    pub fn with_coefficient(self, coefficient: f64) -> Node {
        if coefficient == 0.0 {
            return Node::zero();
        }

        match self {
            Node::Constant(value) => Node::Constant(value * coefficient),
            Node::Variable { symbol, .. } => Node::Variable { symbol, coefficient },
            Node::Term { base, power, .. } => Node::Term { coefficient, base, power },
            Node::Terms { factors, .. } => Node::Terms { coefficient, factors },
            node @ (Node::Function { .. } | Node::Expression(_)) => {
                if coefficient == 1.0 {
                    node
                } else {
                    Node::Terms { coefficient, factors: vec![node] }
                }
            },
        }
    }

    /// Views the node as `coefficient · base^power`, for merging like bases during
    /// multiplication and division. Nodes that are not powers are viewed as raised to the first
    /// power.
    pub fn as_base_power(&self) -> (Node, Node, f64) {
        match self {
            Node::Term { coefficient, base, power } => {
                ((**base).clone(), (**power).clone(), *coefficient)
            },
            _ => {
                let (coefficient, core) = self.split_coefficient();
                (core, Node::one(), coefficient)
            },
        }
    }

    /// Returns an iterator that traverses the tree of nodes in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> NodeIter {
        NodeIter::new(self)
    }

    /// A total order on nodes used only for the canonical ordering of factors inside a product.
    ///
    /// Constants sort first, then variables by symbol, then functions by name, then compound
    /// nodes. Nodes that this order considers equal keep their relative order (sorts are stable).
    pub fn canonical_cmp(&self, other: &Node) -> Ordering {
        fn rank(node: &Node) -> u8 {
            match node {
                Node::Constant(_) => 0,
                Node::Variable { .. } => 1,
                Node::Function { .. } => 2,
                Node::Term { .. } => 3,
                Node::Terms { .. } => 4,
                Node::Expression(_) => 5,
            }
        }

        match (self, other) {
            (
                Node::Variable { symbol: lhs, .. },
                Node::Variable { symbol: rhs, .. },
            ) => lhs.cmp(rhs),
            (
                Node::Function { func: lhs, .. },
                Node::Function { func: rhs, .. },
            ) => lhs.name().cmp(rhs.name()),
            // a power sorts by its base, so `x^2 * y * x` groups the `x`s together
            (Node::Term { base, .. }, other) => base.canonical_cmp(other),
            (other, Node::Term { base, .. }) => other.canonical_cmp(base),
            (lhs, rhs) => rank(lhs).cmp(&rank(rhs)),
        }
    }
}

/// Structural equality. Products and sums compare their factors / summands in any order;
/// variables compare coefficient and symbol; everything else compares field by field.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Constant(lhs), Node::Constant(rhs)) => lhs == rhs,
            (
                Node::Variable { symbol: ls, coefficient: lc },
                Node::Variable { symbol: rs, coefficient: rc },
            ) => ls == rs && lc == rc,
            (
                Node::Function { func: lf, arg: la },
                Node::Function { func: rf, arg: ra },
            ) => lf == rf && la == ra,
            (
                Node::Term { coefficient: lc, base: lb, power: lp },
                Node::Term { coefficient: rc, base: rb, power: rp },
            ) => lc == rc && lb == rb && lp == rp,
            (
                Node::Terms { coefficient: lc, factors: lf },
                Node::Terms { coefficient: rc, factors: rf },
            ) => lc == rc && lf.len() == rf.len() && lf.iter().all(|f| rf.contains(f)),
            (Node::Expression(lhs), Node::Expression(rhs)) => {
                lhs.len() == rhs.len() && lhs.iter().all(|t| rhs.contains(t))
            },
            _ => false,
        }
    }
}

/// Writes the coefficient prefix of a variant: nothing for 1, `-` for -1, the number otherwise.
fn coefficient_prefix(f: &mut std::fmt::Formatter<'_>, coefficient: f64) -> std::fmt::Result {
    if coefficient == -1.0 {
        write!(f, "-")
    } else if coefficient != 1.0 {
        write!(f, "{}", coefficient)
    } else {
        Ok(())
    }
}

/// Returns true if the node renders as a single unit that needs no parentheses when used as the
/// base or exponent of a power. Expressions always render their own parentheses.
fn renders_atomically(node: &Node) -> bool {
    match node {
        Node::Constant(value) => *value >= 0.0,
        Node::Variable { coefficient, .. } => *coefficient == 1.0,
        Node::Function { .. } => true,
        // sums and coefficient-free products render their own parentheses
        Node::Expression(terms) => terms.len() > 1,
        Node::Terms { coefficient, factors } => *coefficient == 1.0 && factors.len() > 1,
        Node::Term { .. } => false,
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Constant(value) => {
                // normalize the sign of zero so `-0` never renders
                if *value == 0.0 {
                    write!(f, "0")
                } else {
                    write!(f, "{}", value)
                }
            },
            Node::Variable { symbol, coefficient } => {
                coefficient_prefix(f, *coefficient)?;
                write!(f, "{}", symbol)
            },
            Node::Function { func, arg } => write!(f, "{}({})", func, arg),
            Node::Term { coefficient, base, power } => {
                coefficient_prefix(f, *coefficient)?;
                if renders_atomically(base) {
                    write!(f, "{}", base)?;
                } else {
                    write!(f, "({})", base)?;
                }
                if !power.is_one() {
                    write!(f, "^")?;
                    if renders_atomically(power) || matches!(**power, Node::Constant(_)) {
                        write!(f, "{}", power)?;
                    } else {
                        write!(f, "({})", power)?;
                    }
                }
                Ok(())
            },
            Node::Terms { coefficient, factors } => {
                coefficient_prefix(f, *coefficient)?;
                if factors.len() == 1 {
                    write!(f, "{}", factors[0])
                } else {
                    write!(f, "(")?;
                    let mut iter = factors.iter();
                    if let Some(factor) = iter.next() {
                        write!(f, "{}", factor)?;
                        for factor in iter {
                            write!(f, "*{}", factor)?;
                        }
                    }
                    write!(f, ")")
                }
            },
            Node::Expression(terms) => {
                match terms.as_slice() {
                    [] => write!(f, "0"),
                    [(Sign::Plus, term)] => write!(f, "{}", term),
                    [(Sign::Minus, term)] => write!(f, "-{}", term),
                    terms => {
                        write!(f, "(")?;
                        for (i, (sign, term)) in terms.iter().enumerate() {
                            match (i, sign) {
                                (0, Sign::Plus) => {},
                                (0, Sign::Minus) => write!(f, "-")?,
                                (_, Sign::Plus) => write!(f, " + ")?,
                                (_, Sign::Minus) => write!(f, " - ")?,
                            }
                            write!(f, "{}", term)?;
                        }
                        write!(f, ")")
                    },
                }
            },
        }
    }
}

/// Folds the parser's syntax tree into a node through the arithmetic composition operators,
/// so the result of conversion is already flattened (though not yet canonical). Division and
/// exponentiation of concrete values can raise domain errors during the fold.
impl TryFrom<ast::Expr> for Node {
    type Error = crate::error::Error;

    fn try_from(expr: ast::Expr) -> Result<Node, Self::Error> {
        Ok(match expr {
            ast::Expr::Literal(literal) => match literal {
                ast::Literal::Num { value, .. } => Node::Constant(value),
                ast::Literal::Symbol { name, .. } => Node::var(name),
                ast::Literal::Euler { .. } => Node::Constant(std::f64::consts::E),
            },
            ast::Expr::Paren(paren) => Node::try_from(*paren.inner)?,
            ast::Expr::Unary(unary) => {
                let UnaryOpKind::Neg = unary.op;
                -Node::try_from(*unary.operand)?
            },
            ast::Expr::Binary(binary) => {
                let lhs = Node::try_from(*binary.lhs)?;
                let rhs = Node::try_from(*binary.rhs)?;
                match binary.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs.div(rhs)?,
                    BinOpKind::Exp => lhs.pow(rhs)?,
                }
            },
            ast::Expr::Call(call) => Node::call(call.func, Node::try_from(*call.arg)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn render_variable() {
        assert_eq!(Node::var('x').to_string(), "x");
        assert_eq!(Node::Variable { symbol: 'x', coefficient: 3.0 }.to_string(), "3x");
        assert_eq!(Node::Variable { symbol: 'x', coefficient: -1.0 }.to_string(), "-x");
        assert_eq!(Node::Variable { symbol: 'y', coefficient: 2.5 }.to_string(), "2.5y");
    }

    #[test]
    fn render_term() {
        let cubed = Node::Term {
            coefficient: 3.0,
            base: Box::new(Node::var('x')),
            power: Box::new(Node::Constant(2.0)),
        };
        assert_eq!(cubed.to_string(), "3x^2");

        let reciprocal = Node::term(Node::var('x'), Node::Constant(-1.0));
        assert_eq!(reciprocal.to_string(), "x^-1");

        let first_power = Node::term(Node::var('x'), Node::one());
        assert_eq!(first_power.to_string(), "x");
    }

    #[test]
    fn render_compound_base() {
        let sum = Node::Expression(vec![
            (Sign::Plus, Node::var('x')),
            (Sign::Plus, Node::Constant(1.0)),
        ]);
        let squared = Node::term(sum, Node::Constant(2.0));
        assert_eq!(squared.to_string(), "(x + 1)^2");
    }

    #[test]
    fn render_terms() {
        let product = Node::Terms {
            coefficient: 2.0,
            factors: vec![Node::var('x'), Node::var('y')],
        };
        assert_eq!(product.to_string(), "2(x*y)");

        let negated = Node::Terms {
            coefficient: -1.0,
            factors: vec![Node::call(Func::Cos, Node::var('x'))],
        };
        assert_eq!(negated.to_string(), "-cos(x)");
    }

    #[test]
    fn render_expression() {
        let sum = Node::Expression(vec![
            (Sign::Plus, Node::Variable { symbol: 'x', coefficient: 3.0 }),
            (Sign::Minus, Node::Constant(2.0)),
        ]);
        assert_eq!(sum.to_string(), "(3x - 2)");

        let leading_minus = Node::Expression(vec![
            (Sign::Minus, Node::var('x')),
            (Sign::Plus, Node::var('y')),
        ]);
        assert_eq!(leading_minus.to_string(), "(-x + y)");
    }

    #[test]
    fn structural_equality_ignores_order() {
        let a = Node::Terms {
            coefficient: 2.0,
            factors: vec![Node::var('x'), Node::var('y')],
        };
        let b = Node::Terms {
            coefficient: 2.0,
            factors: vec![Node::var('y'), Node::var('x')],
        };
        assert_eq!(a, b);
    }

    #[test]
    fn structural_equality_includes_coefficients() {
        assert_ne!(
            Node::Variable { symbol: 'x', coefficient: 3.0 },
            Node::var('x'),
        );
    }

    #[test]
    fn split_and_rebuild_coefficient() {
        let (coefficient, core) = Node::Variable { symbol: 'x', coefficient: 3.0 }
            .split_coefficient();
        assert_eq!(coefficient, 3.0);
        assert_eq!(core, Node::var('x'));
        assert_eq!(
            core.with_coefficient(coefficient),
            Node::Variable { symbol: 'x', coefficient: 3.0 },
        );

        // functions cannot carry a coefficient, so one is attached via a product
        let sin = Node::call(Func::Sin, Node::var('x'));
        assert_eq!(
            sin.clone().with_coefficient(2.0),
            Node::Terms { coefficient: 2.0, factors: vec![sin] },
        );
    }

    #[test]
    fn canonical_order_groups_powers_with_their_base() {
        let mut factors = vec![
            Node::var('y'),
            Node::term(Node::var('x'), Node::Constant(2.0)),
            Node::var('x'),
        ];
        factors.sort_by(|a, b| a.canonical_cmp(b));
        assert_eq!(factors[0], Node::term(Node::var('x'), Node::Constant(2.0)));
        assert_eq!(factors[1], Node::var('x'));
        assert_eq!(factors[2], Node::var('y'));
    }
}
