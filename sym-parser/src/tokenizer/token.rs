use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    /// A numeral run with at most one decimal point, such as `3`, `1.5`, or `2.`.
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Num,

    /// A run of letters: a variable, a function name, or a function name fused with the start of
    /// its argument (`sinx`). The parser splits the run.
    #[regex(r"[a-zA-Z]+")]
    Name,

    #[token(".")]
    Dot,

    /// Any other character. Always a syntax error; kept as a token so the parser can point at it.
    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if a token of this kind can begin an operand. Used to detect implicit
    /// multiplication between adjacent operands.
    pub fn starts_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Num
                | TokenKind::Name
                | TokenKind::OpenParen
                | TokenKind::OpenBracket
                | TokenKind::OpenBrace,
        )
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
