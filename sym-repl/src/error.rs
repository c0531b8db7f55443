use ariadne::{Report, ReportKind, Source};
use std::ops::Range;
use sym_compute::Error as EngineError;
use sym_error::ErrorKind;

/// Utility wrapper to report errors that occur while parsing / computing.
pub struct Error(pub EngineError);

impl Error {
    /// Creates an error for a missing or malformed command argument.
    pub fn bad_argument(found: &str) -> Self {
        Self(EngineError::Syntax(sym_error::Error::spanned(
            0..0,
            BadArgument { found: found.to_string() },
        )))
    }

    /// Report this error to stderr.
    ///
    /// Syntax errors carry source spans and print a full `ariadne` report; the `ariadne` crate's
    /// `Report` type has no `Display` implementation, so its `eprint` method is the only way to
    /// render it. Engine errors (domain, non-integrable) print a one-line message.
    pub fn report_to_stderr(&self, input: &str) {
        match &self.0 {
            EngineError::Syntax(err) => {
                let report = err.build_report("input");
                let _ = report.eprint(("input", Source::from(input)));
            },
            other => eprintln!("error: {other}"),
        }
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

/// A REPL command was given a missing or malformed argument.
#[derive(Debug)]
struct BadArgument {
    /// The argument that was found, or the empty string if it was missing entirely.
    found: String,
}

impl ErrorKind for BadArgument {
    fn message(&self) -> String {
        if self.found.is_empty() {
            String::from("missing command argument")
        } else {
            format!("malformed command argument `{}`", self.found)
        }
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'a, (&'a str, Range<usize>)> {
        Report::build(ReportKind::Error, src_id, spans[0].start)
            .with_message(self.message())
            .with_help("commands take a single-letter variable, then the expression")
            .finish()
    }
}
