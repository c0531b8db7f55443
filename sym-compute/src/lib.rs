//! A symbolic-algebra engine: parsing, canonicalization, differentiation, integration, and
//! evaluation of arithmetic expressions over a closed six-variant tree type.
//!
//! The pipeline is small and explicit. [`sym_parser`] turns text into a syntax tree; the
//! [`symbolic`] module folds that tree into a [`symbolic::Node`] through the arithmetic
//! composition operators and keeps every node in canonical form; the calculus engines transform
//! nodes into new nodes. Errors are never recovered internally: syntax errors, domain errors,
//! and the non-integrable outcome all propagate to the caller as [`error::Error`].
//!
//! ```
//! use sym_compute::symbolic::{derivative, tokenise};
//!
//! let f = tokenise("sin(x)").unwrap();
//! let df = derivative(&f, 'x', 1).unwrap();
//! assert_eq!(df.to_string(), "cos(x)");
//! ```

pub mod error;
pub mod funcs;
pub mod symbolic;

pub use error::Error;
