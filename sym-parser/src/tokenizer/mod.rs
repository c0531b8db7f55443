pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows the
/// parser to backtrack freely.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(
        input: &'source str,
        expected: [(TokenKind, &'source str); N],
    ) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2.5x",
            [
                (TokenKind::Num, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Num, "2.5"),
                (TokenKind::Name, "x"),
            ],
        );
    }

    #[test]
    fn delimiters_and_powers() {
        compare_tokens(
            "[x^2] / {sin(y)}",
            [
                (TokenKind::OpenBracket, "["),
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Num, "2"),
                (TokenKind::CloseBracket, "]"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Div, "/"),
                (TokenKind::Whitespace, " "),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Name, "sin"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "y"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::CloseBrace, "}"),
            ],
        );
    }

    #[test]
    fn name_runs_are_not_split_by_the_lexer() {
        compare_tokens("sinhx", [(TokenKind::Name, "sinhx")]);
    }

    #[test]
    fn unknown_character() {
        compare_tokens(
            "x $ y",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
            ],
        );
    }
}
