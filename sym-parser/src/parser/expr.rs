//! Expression parsing: precedence climbing over the three operator tiers, unary sign, grouping
//! delimiters, and function application.
//!
//! `^` is right-associative: `a^b^c` parses as `a^(b^c)`. Adjacent operands multiply implicitly
//! at the same precedence as `*`, so `3x y` parses as `(3*x)*y`. A function name consumes exactly
//! one following primary operand as its argument; a trailing `^` then binds to the whole call, so
//! `sin x^2` parses as `sin(x)^2`.

use crate::funcs;
use sym_error::Error;
use super::{
    ast::{Binary, Call, Expr, Literal, Paren, Unary},
    error,
    op::{Associativity, BinOp, BinOpKind, Precedence, UnaryOpKind},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        parse_binary(input, Precedence::Any)
    }
}

/// Parses a run of binary operators whose precedence is at least `min_prec`, climbing into
/// higher tiers as they appear.
fn parse_binary(input: &mut Parser, min_prec: Precedence) -> Result<Expr, Error> {
    let mut lhs = parse_unary(input)?;

    loop {
        let Some(next) = input.peek_kind() else { break };

        if let Some(kind) = BinOpKind::from_token(next) {
            if kind.precedence() < min_prec {
                break;
            }

            let op_token = input.next_token()?;
            let op = BinOp {
                kind,
                implicit: false,
                span: op_token.span.clone(),
            };

            // an operator at the very end of the stream has nothing to apply to
            if input.peek().is_none() {
                return Err(Error::spanned(op_token.span, error::MissingOperand {
                    op: kind.symbol(),
                }));
            }

            let next_min = match kind.associativity() {
                Associativity::Left => kind.precedence().raise(),
                Associativity::Right => kind.precedence(),
            };
            let rhs = parse_binary(input, next_min)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        } else if next.starts_operand() && Precedence::Factor >= min_prec {
            // no operator between two operands: implicit multiplication
            let rhs = parse_binary(input, Precedence::Factor.raise())?;

            let op_span = lhs.span().end..rhs.span().start;
            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op: BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: op_span,
                },
                rhs: Box::new(rhs),
                span,
            });
        } else {
            break;
        }
    }

    Ok(lhs)
}

/// Parses an optionally signed operand. A leading `+` is consumed without effect; a leading `-`
/// produces a negation node. Exponentiation binds tighter than the sign, so `-x^2` parses as
/// `-(x^2)`.
fn parse_unary(input: &mut Parser) -> Result<Expr, Error> {
    match input.peek_kind() {
        Some(TokenKind::Sub) => {
            let op_token = input.next_token()?;
            let operand = parse_binary(input, Precedence::Exp)?;
            let span = op_token.span.start..operand.span().end;
            Ok(Expr::Unary(Unary {
                op: UnaryOpKind::Neg,
                operand: Box::new(operand),
                span,
            }))
        },
        Some(TokenKind::Add) => {
            input.next_token()?;
            parse_unary(input)
        },
        _ => parse_primary(input),
    }
}

/// Parses a primary operand: a numeral, a name run, or a delimited group.
fn parse_primary(input: &mut Parser) -> Result<Expr, Error> {
    let token = input.next_token()?;
    match token.kind {
        TokenKind::Num => {
            // the lexer guarantees a numeral run with at most one decimal point
            let value = token.lexeme.parse::<f64>().expect("lexer produced a valid numeral");
            Ok(Expr::Literal(Literal::Num { value, span: token.span }))
        },
        TokenKind::Name => parse_name_run(input, token.lexeme, token.span.start),
        TokenKind::OpenParen => parse_group(input, '(', ')', TokenKind::CloseParen, token.span),
        TokenKind::OpenBracket => parse_group(input, '[', ']', TokenKind::CloseBracket, token.span),
        TokenKind::OpenBrace => parse_group(input, '{', '}', TokenKind::CloseBrace, token.span),
        _ => Err(Error::spanned(token.span, error::ExpectedOperand {
            found: token.lexeme.to_string(),
        })),
    }
}

/// Parses the remainder of a delimited group, after the opening delimiter has been consumed.
fn parse_group(
    input: &mut Parser,
    open: char,
    expected: char,
    close_kind: TokenKind,
    open_span: std::ops::Range<usize>,
) -> Result<Expr, Error> {
    if input.peek_kind() == Some(close_kind) {
        let close = input.next_token()?;
        return Err(Error::spanned(open_span.start..close.span.end, error::EmptyGroup));
    }

    let inner = parse_binary(input, Precedence::Any)?;

    match input.peek_kind() {
        Some(kind) if kind == close_kind => {
            let close = input.next_token()?;
            Ok(Expr::Paren(Paren {
                inner: Box::new(inner),
                span: open_span.start..close.span.end,
            }))
        },
        Some(
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace,
        ) => {
            let close = input.next_token()?;
            let found = close.lexeme.chars().next().unwrap();
            Err(Error::new(
                vec![open_span, close.span],
                error::MismatchedDelimiter { open, expected, found },
            ))
        },
        _ => Err(Error::spanned(open_span, error::UnclosedDelimiter { open, expected })),
    }
}

/// Splits a run of letters into function applications and a single variable.
///
/// The run is matched longest-first (name lengths 5, 4, 3, 2) against the fixed function table.
/// A matched function consumes the rest of the run as its argument; when the rest is empty, the
/// argument is the next operand in the token stream, so `sin(x)`, `sin x`, and `sinx` all parse
/// the same. A run that is a single letter is a variable (or Euler's number for `e`); any other
/// run is an unknown-function error.
fn parse_name_run(input: &mut Parser, run: &str, start: usize) -> Result<Expr, Error> {
    if let Some((func, len)) = funcs::match_prefix(run) {
        let rest = &run[len..];
        let arg = if rest.is_empty() {
            parse_unary(input)?
        } else {
            parse_name_run(input, rest, start + len)?
        };

        let span = start..arg.span().end.max(start + len);
        Ok(Expr::Call(Call { func, arg: Box::new(arg), span }))
    } else if run.len() == 1 {
        let name = run.chars().next().unwrap();
        let span = start..start + 1;
        Ok(Expr::Literal(if name == 'e' {
            Literal::Euler { span }
        } else {
            Literal::Symbol { name, span }
        }))
    } else {
        Err(Error::spanned(start..start + run.len(), error::UnknownFunction {
            name: run.to_string(),
            suggestions: funcs::similar_names(run),
        }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    fn parse_err(input: &str) -> Error {
        Parser::new(input).try_parse_full::<Expr>().unwrap_err()
    }

    /// Strips parenthesis and span information, rendering the tree in prefix form for easy
    /// comparison.
    fn sexpr(expr: &Expr) -> String {
        match expr {
            Expr::Literal(Literal::Num { value, .. }) => format!("{value}"),
            Expr::Literal(Literal::Symbol { name, .. }) => format!("{name}"),
            Expr::Literal(Literal::Euler { .. }) => String::from("e"),
            Expr::Paren(paren) => sexpr(&paren.inner),
            Expr::Unary(unary) => format!("(neg {})", sexpr(&unary.operand)),
            Expr::Binary(binary) => format!(
                "({} {} {})",
                binary.op.kind.symbol(),
                sexpr(&binary.lhs),
                sexpr(&binary.rhs),
            ),
            Expr::Call(call) => format!("({} {})", call.func, sexpr(&call.arg)),
        }
    }

    #[test]
    fn precedence_tiers() {
        assert_eq!(sexpr(&parse("1 + 2 * 3 ^ 4")), "(+ 1 (* 2 (^ 3 4)))");
        assert_eq!(sexpr(&parse("1 * 2 + 3")), "(+ (* 1 2) 3)");
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(sexpr(&parse("2 ^ 3 ^ 2")), "(^ 2 (^ 3 2))");
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(sexpr(&parse("1 - 2 - 3")), "(- (- 1 2) 3)");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(sexpr(&parse("3x")), "(* 3 x)");
        assert_eq!(sexpr(&parse("3x^2")), "(* 3 (^ x 2))");
        assert_eq!(sexpr(&parse("2(x + 1)")), "(* 2 (+ x 1))");
    }

    #[test]
    fn function_application() {
        assert_eq!(sexpr(&parse("sin(x)")), "(sin x)");
        assert_eq!(sexpr(&parse("sin x")), "(sin x)");
        assert_eq!(sexpr(&parse("sinx")), "(sin x)");
        assert_eq!(sexpr(&parse("sinhx")), "(sinh x)");
        assert_eq!(sexpr(&parse("sin cos x")), "(sin (cos x))");
        assert_eq!(sexpr(&parse("sin x^2")), "(^ (sin x) 2)");
    }

    #[test]
    fn euler_literal() {
        assert_eq!(sexpr(&parse("e^x")), "(^ e x)");
    }

    #[test]
    fn unary_sign() {
        assert_eq!(sexpr(&parse("-x + +y")), "(+ (neg x) y)");
        assert_eq!(sexpr(&parse("x^-1")), "(^ x (neg 1))");
        // the sign binds looser than the exponent
        assert_eq!(sexpr(&parse("-x^2")), "(neg (^ x 2))");
    }

    #[test]
    fn mixed_delimiters() {
        assert_eq!(sexpr(&parse("{[(x + 1)] * 2}")), "(* (+ x 1) 2)");
    }

    #[test]
    fn leading_operator_is_an_error() {
        assert_eq!(parse_err("* x").to_string(), "expected an operand, found `*`");
        assert_eq!(parse_err("/ x").to_string(), "expected an operand, found `/`");
        assert_eq!(parse_err("^ x").to_string(), "expected an operand, found `^`");
    }

    #[test]
    fn trailing_operator_is_an_error() {
        assert_eq!(parse_err("x +").to_string(), "the `+` operator is missing an operand");
    }

    #[test]
    fn delimiter_errors() {
        assert_eq!(parse_err("(x").to_string(), "unclosed `(`");
        assert_eq!(
            parse_err("(x]").to_string(),
            "mismatched delimiter: `(` closed with `]`",
        );
        assert_eq!(parse_err("()").to_string(), "missing expression inside the group");
    }

    #[test]
    fn unknown_function_with_suggestion() {
        let err = parse_err("sim(x)");
        assert_eq!(err.to_string(), "`sim` is not a recognized function");
    }

    #[test]
    fn unknown_character() {
        assert_eq!(parse_err("x + $").to_string(), "expected an operand, found `$`");
    }
}
