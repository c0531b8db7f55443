//! Syntax error kinds raised by the parser.
//!
//! Every kind implements [`ErrorKind`] by hand, building the same shape of [`ariadne`] report for
//! each: the message, one label per span, and an optional help line.

use ariadne::{Fmt, Label, Report, ReportKind};
use std::ops::Range;
use sym_error::{ErrorKind, EXPR};

/// Builds a report with the given message, one label per span, and an optional help line.
fn report<'a>(
    src_id: &'a str,
    spans: &[Range<usize>],
    message: String,
    labels: &[String],
    help: Option<String>,
) -> Report<'a, (&'a str, Range<usize>)> {
    let mut builder = Report::build(ReportKind::Error, src_id, spans[0].start)
        .with_message(message)
        .with_labels(
            labels
                .iter()
                .zip(spans)
                .map(|(label_str, span)| {
                    let mut label = Label::new((src_id, span.clone())).with_color(EXPR);
                    if !label_str.is_empty() {
                        label = label.with_message(label_str);
                    }
                    label
                })
                .collect::<Vec<_>>(),
        );

    if let Some(help) = help {
        builder.set_help(help);
    }
    builder.finish()
}

/// The end of the expression was reached unexpectedly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedEof;

impl ErrorKind for UnexpectedEof {
    fn message(&self) -> String {
        String::from("unexpected end of expression")
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self.message(),
            &[format!("you might need to add another {} here", "operand".fg(EXPR))],
            None,
        )
    }
}

/// The end of the expression was expected, but something else was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedEof;

impl ErrorKind for ExpectedEof {
    fn message(&self) -> String {
        String::from("expected end of expression")
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self.message(),
            &[format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
            None,
        )
    }
}

/// An operand was expected, but an operator or unrecognized character was found. This covers
/// leading `*`, `/`, and `^` as well as stray characters like `$`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedOperand {
    /// The lexeme that was found instead of an operand.
    pub found: String,
}

impl ErrorKind for ExpectedOperand {
    fn message(&self) -> String {
        format!("expected an operand, found `{}`", self.found)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self.message(),
            &[String::from("this cannot begin an expression")],
            None,
        )
    }
}

/// A binary operator has no operand to apply to.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingOperand {
    /// The operator's symbol.
    pub op: char,
}

impl ErrorKind for MissingOperand {
    fn message(&self) -> String {
        format!("the `{}` operator is missing an operand", self.op)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self.message(),
            &[String::from("this operator has nothing to apply to")],
            Some(format!("add an {} after the operator", "operand".fg(EXPR))),
        )
    }
}

/// A grouping delimiter was not closed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclosedDelimiter {
    /// The opening delimiter.
    pub open: char,

    /// The closing delimiter that would match it.
    pub expected: char,
}

impl ErrorKind for UnclosedDelimiter {
    fn message(&self) -> String {
        format!("unclosed `{}`", self.open)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self.message(),
            &[String::from("this delimiter is not closed")],
            Some(format!("add a closing `{}` somewhere after this", self.expected)),
        )
    }
}

/// A group was closed with a delimiter of the wrong kind, such as `(x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchedDelimiter {
    /// The opening delimiter.
    pub open: char,

    /// The closing delimiter that would match it.
    pub expected: char,

    /// The closing delimiter that was found.
    pub found: char,
}

impl ErrorKind for MismatchedDelimiter {
    fn message(&self) -> String {
        format!("mismatched delimiter: `{}` closed with `{}`", self.open, self.found)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self.message(),
            &[
                String::from("the group opened here"),
                format!("should be closed with `{}`, not `{}`", self.expected, self.found),
            ],
            None,
        )
    }
}

/// There was no expression inside a pair of grouping delimiters.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyGroup;

impl ErrorKind for EmptyGroup {
    fn message(&self) -> String {
        String::from("missing expression inside the group")
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        report(
            src_id,
            spans,
            self.message(),
            &[String::from("add an expression here")],
            None,
        )
    }
}

/// A multi-letter run does not begin with a recognized function name.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownFunction {
    /// The run of letters that was found.
    pub name: String,

    /// Recognized function names similar to the run, if any.
    pub suggestions: Vec<&'static str>,
}

impl ErrorKind for UnknownFunction {
    fn message(&self) -> String {
        format!("`{}` is not a recognized function", self.name)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        let help = if self.suggestions.is_empty() {
            format!(
                "variables are single letters; multi-letter names must start with a {}",
                "function name".fg(EXPR),
            )
        } else if self.suggestions.len() == 1 {
            format!("did you mean the `{}` function?", self.suggestions[0].fg(EXPR))
        } else {
            format!(
                "did you mean one of these functions? {}",
                self.suggestions
                    .iter()
                    .map(|name| format!("`{}`", name.fg(EXPR)))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };

        report(
            src_id,
            spans,
            self.message(),
            &[String::from("this function")],
            Some(help),
        )
    }
}
