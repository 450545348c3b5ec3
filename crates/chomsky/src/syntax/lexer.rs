//! Lexer implementation.

use logos::Logos;
use std::ops::Range;

#[derive(Debug, Copy, Clone, Logos, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'source> {
    #[token("->")]
    Arrow,

    #[token("|")]
    VertBar,

    #[token(";")]
    Semicolon,

    #[token("ε")]
    #[token("ϵ")]
    Epsilon,

    /// Every other character stands for a symbol of its own.
    #[regex(r"[^ \t\r\n\f|;]")]
    Symbol(&'source str),
}

pub type Spanned<'source> = (Token<'source>, Range<usize>);

pub fn lexer(source: &str) -> impl Iterator<Item = anyhow::Result<Spanned<'_>>> {
    Token::lexer(source).spanned().map(|(res, span)| match res {
        Ok(tok) => Ok((tok, span)),
        Err(()) => Err(anyhow::anyhow!("lexer error at {}..{}", span.start, span.end)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        lexer(source).map(|t| t.unwrap().0).collect()
    }

    #[test]
    fn arrow_and_minus() {
        use Token::*;
        assert_eq!(
            tokens("E -> E-T | ε;"),
            [
                Symbol("E"),
                Arrow,
                Symbol("E"),
                Symbol("-"),
                Symbol("T"),
                VertBar,
                Epsilon,
                Semicolon
            ]
        );
    }

    #[test]
    fn both_epsilons() {
        assert_eq!(tokens("ϵε"), [Token::Epsilon, Token::Epsilon]);
    }
}
