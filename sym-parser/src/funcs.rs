//! The fixed set of elementary function names recognized by the parser.
//!
//! The set is closed: trigonometric, hyperbolic, and inverse functions, the natural logarithm,
//! and absolute value. The numeric, derivative, and antiderivative rules for each function are
//! defined by the engine crate; this module only knows the names, so the parser can tell a
//! function application apart from a run of variables.

use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// An elementary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Sinh,
    Cosh,
    Tanh,
    Sech,
    Csch,
    Coth,
    Asin,
    Acos,
    Atan,
    Asec,
    Acsc,
    Acot,
    Asinh,
    Acosh,
    Atanh,
    Asech,
    Acsch,
    Acoth,
    Ln,
    Abs,
}

/// Every elementary function, in declaration order.
pub const ALL: [Func; 26] = [
    Func::Sin, Func::Cos, Func::Tan, Func::Sec, Func::Csc, Func::Cot,
    Func::Sinh, Func::Cosh, Func::Tanh, Func::Sech, Func::Csch, Func::Coth,
    Func::Asin, Func::Acos, Func::Atan, Func::Asec, Func::Acsc, Func::Acot,
    Func::Asinh, Func::Acosh, Func::Atanh, Func::Asech, Func::Acsch, Func::Acoth,
    Func::Ln, Func::Abs,
];

/// Lazily-built lookup table from function name to [`Func`]. Built once, never mutated.
static BY_NAME: Lazy<HashMap<&'static str, Func>> = Lazy::new(|| {
    ALL.iter().map(|&func| (func.name(), func)).collect()
});

impl Func {
    /// The name of the function as it appears in source text.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Sec => "sec",
            Func::Csc => "csc",
            Func::Cot => "cot",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Sech => "sech",
            Func::Csch => "csch",
            Func::Coth => "coth",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Asec => "asec",
            Func::Acsc => "acsc",
            Func::Acot => "acot",
            Func::Asinh => "asinh",
            Func::Acosh => "acosh",
            Func::Atanh => "atanh",
            Func::Asech => "asech",
            Func::Acsch => "acsch",
            Func::Acoth => "acoth",
            Func::Ln => "ln",
            Func::Abs => "abs",
        }
    }

    /// Looks up a function by its exact name.
    pub fn from_name(name: &str) -> Option<Func> {
        BY_NAME.get(name).copied()
    }

    /// Returns the function this function is a mutual inverse of, if any.
    ///
    /// `f.inverse() == Some(g)` implies `g.inverse() == Some(f)`, and `f(g(x))` cancels to `x`.
    pub fn inverse(self) -> Option<Func> {
        match self {
            Func::Sin => Some(Func::Asin),
            Func::Cos => Some(Func::Acos),
            Func::Tan => Some(Func::Atan),
            Func::Sec => Some(Func::Asec),
            Func::Csc => Some(Func::Acsc),
            Func::Cot => Some(Func::Acot),
            Func::Sinh => Some(Func::Asinh),
            Func::Cosh => Some(Func::Acosh),
            Func::Tanh => Some(Func::Atanh),
            Func::Sech => Some(Func::Asech),
            Func::Csch => Some(Func::Acsch),
            Func::Coth => Some(Func::Acoth),
            Func::Asin => Some(Func::Sin),
            Func::Acos => Some(Func::Cos),
            Func::Atan => Some(Func::Tan),
            Func::Asec => Some(Func::Sec),
            Func::Acsc => Some(Func::Csc),
            Func::Acot => Some(Func::Cot),
            Func::Asinh => Some(Func::Sinh),
            Func::Acosh => Some(Func::Cosh),
            Func::Atanh => Some(Func::Tanh),
            Func::Asech => Some(Func::Sech),
            Func::Acsch => Some(Func::Csch),
            Func::Acoth => Some(Func::Coth),
            Func::Ln | Func::Abs => None,
        }
    }
}

impl std::fmt::Display for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Matches the longest function name that prefixes the given letter run, checking name lengths
/// 5, 4, 3, 2 in that order. Returns the function and the length of the matched prefix.
pub fn match_prefix(run: &str) -> Option<(Func, usize)> {
    for len in [5, 4, 3, 2] {
        if run.len() >= len {
            if let Some(func) = Func::from_name(&run[..len]) {
                return Some((func, len));
            }
        }
    }
    None
}

/// Returns all function names similar to the given name, for "did you mean" suggestions.
pub fn similar_names(name: &str) -> Vec<&'static str> {
    BY_NAME
        .keys()
        .copied()
        .filter(|n| levenshtein(n, name) < 2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_prefix_wins() {
        assert_eq!(match_prefix("sinhx"), Some((Func::Sinh, 4)));
        assert_eq!(match_prefix("sinx"), Some((Func::Sin, 3)));
        assert_eq!(match_prefix("asinhx"), Some((Func::Asinh, 5)));
        assert_eq!(match_prefix("lnx"), Some((Func::Ln, 2)));
        assert_eq!(match_prefix("xy"), None);
    }

    #[test]
    fn suggestions() {
        let similar = similar_names("sim");
        assert!(similar.contains(&"sin"));
        assert!(!similar.contains(&"cosh"));
    }
}
