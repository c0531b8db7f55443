//! The error type shared by every engine operation.
//!
//! Three kinds of failure exist, and none is recovered locally: syntax errors from the parser,
//! domain errors from arithmetic on concrete values, and the non-integrable outcome of symbolic
//! integration. All operations are deterministic, so there is no retry logic anywhere; an error
//! aborts the current top-level operation and propagates to the caller.

use thiserror::Error;

/// An error produced while parsing, simplifying, differentiating, integrating, or evaluating an
/// expression.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text is not a well-formed expression. The wrapped error carries source spans and
    /// can build a full diagnostic report.
    #[error("{0}")]
    Syntax(#[from] sym_error::Error),

    /// Division by a value structurally or numerically equal to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An indeterminate form, such as `0/0` or `0^0`.
    #[error("indeterminate form `{0}`")]
    Indeterminate(&'static str),

    /// An elementary function was evaluated outside its domain (e.g. `ln(-1)`).
    #[error("`{func}` is undefined at {arg}")]
    OutOfDomain {
        /// The function's name.
        func: &'static str,

        /// The argument it was applied to.
        arg: f64,
    },

    /// Raising a concrete base to a concrete power has no real value (e.g. `(-2)^0.5`), or the
    /// result overflows to infinity.
    #[error("`{base}^{exp}` has no finite real value")]
    NonRealPower {
        /// The base of the power.
        base: f64,

        /// The exponent.
        exp: f64,
    },

    /// The integration rule set has no elementary closed form for the given expression. This is
    /// an expected outcome of symbolic integration, not a bug.
    #[error("no elementary antiderivative for `{0}`")]
    NonIntegrable(String),
}

impl Error {
    /// Returns true if this error is a domain error (as opposed to a syntax error or a
    /// non-integrable outcome).
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            Error::DivisionByZero
                | Error::Indeterminate(_)
                | Error::OutOfDomain { .. }
                | Error::NonRealPower { .. },
        )
    }
}
