//! Numeric evaluation of the elementary functions.
//!
//! The function set is fixed by the parser ([`sym_parser::funcs::Func`]); this module provides
//! the evaluation half of its rule table. Evaluation delegates to the standard `f64` math
//! functions, with the reciprocal and inverse-reciprocal identities filling in the functions the
//! standard library does not provide directly (`sec x = 1/cos x`, `asech x = acosh(1/x)`, and so
//! on). The symbolic halves of the table (derivative and antiderivative templates) live with the
//! engines that use them, in [`derivative`](crate::symbolic::derivative) and
//! [`integral`](crate::symbolic::integral).
//!
//! A result that is not finite means the argument was outside the function's domain, and raises
//! [`Error::OutOfDomain`]; the engine never propagates NaN or infinity into a node.

use crate::error::Error;
use sym_parser::funcs::Func;

/// Evaluates the given function at a concrete argument.
pub fn eval(func: Func, arg: f64) -> Result<f64, Error> {
    let value = match func {
        Func::Sin => arg.sin(),
        Func::Cos => arg.cos(),
        Func::Tan => arg.tan(),
        Func::Sec => arg.cos().recip(),
        Func::Csc => arg.sin().recip(),
        Func::Cot => arg.tan().recip(),
        Func::Sinh => arg.sinh(),
        Func::Cosh => arg.cosh(),
        Func::Tanh => arg.tanh(),
        Func::Sech => arg.cosh().recip(),
        Func::Csch => arg.sinh().recip(),
        Func::Coth => arg.tanh().recip(),
        Func::Asin => arg.asin(),
        Func::Acos => arg.acos(),
        Func::Atan => arg.atan(),
        Func::Asec => arg.recip().acos(),
        Func::Acsc => arg.recip().asin(),
        Func::Acot => arg.recip().atan(),
        Func::Asinh => arg.asinh(),
        Func::Acosh => arg.acosh(),
        Func::Atanh => arg.atanh(),
        Func::Asech => arg.recip().acosh(),
        Func::Acsch => arg.recip().asinh(),
        Func::Acoth => arg.recip().atanh(),
        Func::Ln => arg.ln(),
        Func::Abs => arg.abs(),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::OutOfDomain { func: func.name(), arg })
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn direct_functions() {
        assert_float_absolute_eq!(eval(Func::Sin, std::f64::consts::PI / 2.0).unwrap(), 1.0);
        assert_float_absolute_eq!(eval(Func::Cos, std::f64::consts::PI).unwrap(), -1.0);
        assert_float_absolute_eq!(eval(Func::Ln, std::f64::consts::E).unwrap(), 1.0);
        assert_float_absolute_eq!(eval(Func::Abs, -3.5).unwrap(), 3.5);
    }

    #[test]
    fn reciprocal_identities() {
        assert_float_absolute_eq!(eval(Func::Sec, 0.0).unwrap(), 1.0);
        assert_float_absolute_eq!(eval(Func::Coth, 1.0).unwrap(), 1.0_f64.tanh().recip());
        assert_float_absolute_eq!(eval(Func::Asec, 2.0).unwrap(), 0.5_f64.acos());
    }

    #[test]
    fn out_of_domain_arguments_are_errors() {
        assert!(matches!(eval(Func::Ln, -1.0), Err(Error::OutOfDomain { .. })));
        assert!(matches!(eval(Func::Ln, 0.0), Err(Error::OutOfDomain { .. })));
        assert!(matches!(eval(Func::Asin, 2.0), Err(Error::OutOfDomain { .. })));
        assert!(matches!(eval(Func::Acosh, 0.5), Err(Error::OutOfDomain { .. })));
        assert!(matches!(eval(Func::Csc, 0.0), Err(Error::OutOfDomain { .. })));
    }
}
