mod error;

use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, IsTerminal, Read};
use sym_compute::symbolic::{
    depends_on, derivative, integral, integral_between, is_linear_in, tokenise, Node,
};

/// Parses and runs a single input line, returning the text to print.
///
/// A bare expression is simplified. A handful of command words expose the rest of the engine:
///
/// ```text
/// diff <var> [<order>] <expr>       n-th derivative (order defaults to 1)
/// int <var> <expr>                  indefinite integral
/// defint <var> <from> <to> <expr>   definite integral (bounds written without spaces)
/// linear <var> <expr>               linearity test
/// depends <var> <expr>              dependency test
/// ```
fn run_line(input: &str) -> Result<String, Error> {
    let mut words = input.split_whitespace();
    let result = match words.next() {
        Some("diff") => {
            let var = parse_var(words.next())?;
            // an optional leading numeral is the derivative order
            let order = match words.clone().next().and_then(|word| word.parse::<u32>().ok()) {
                Some(order) => {
                    words.next();
                    order
                },
                None => 1,
            };
            let expr = tokenise(&words.collect::<Vec<_>>().join(" "))?;
            derivative(&expr, var, order)?.to_string()
        },
        Some("int") => {
            let var = parse_var(words.next())?;
            let expr = tokenise(&words.collect::<Vec<_>>().join(" "))?;
            integral(&expr, var)?.to_string()
        },
        Some("defint") => {
            let var = parse_var(words.next())?;
            let from = tokenise_word(words.next())?;
            let to = tokenise_word(words.next())?;
            let expr = tokenise(&words.collect::<Vec<_>>().join(" "))?;
            integral_between(&expr, var, &from, &to)?.to_string()
        },
        Some("linear") => {
            let var = parse_var(words.next())?;
            let expr = tokenise(&words.collect::<Vec<_>>().join(" "))?;
            is_linear_in(&expr, var).to_string()
        },
        Some("depends") => {
            let var = parse_var(words.next())?;
            let expr = tokenise(&words.collect::<Vec<_>>().join(" "))?;
            depends_on(&expr, var).to_string()
        },
        _ => tokenise(input)?.to_string(),
    };
    Ok(result)
}

/// Parses a command's variable argument: a single letter.
fn parse_var(word: Option<&str>) -> Result<char, Error> {
    match word {
        Some(word) => match word.chars().next() {
            Some(symbol) if word.len() == 1 && symbol.is_ascii_alphabetic() => Ok(symbol),
            _ => Err(Error::bad_argument(word)),
        },
        None => Err(Error::bad_argument("")),
    }
}

/// Parses a single-word expression argument, such as a definite integral's bound.
fn tokenise_word(word: Option<&str>) -> Result<Node, Error> {
    match word {
        Some(word) => Ok(tokenise(word)?),
        None => Err(Error::bad_argument("")),
    }
}

/// Runs the given input line and prints the result or the error.
fn run_and_print(input: &str) {
    if input.trim().is_empty() {
        return;
    }
    match run_line(input.trim()) {
        Ok(result) => println!("{result}"),
        Err(err) => err.report_to_stderr(input),
    }
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run each line of the source file
        let input = std::fs::read_to_string(filename).expect("cannot read input file");
        input.lines().for_each(run_and_print);
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).expect("cannot read stdin");
        input.lines().for_each(run_and_print);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                eprintln!("{err}");
                return;
            },
        };

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;
            run_and_print(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
