//! The textual grammar notation.
//!
//! ```text
//! S -> aB | bA | B
//! A -> b | aD | AS | bAB | ε
//! ```
//!
//! Every non-blank character is a symbol of its own. Rules are separated
//! either by `;` or by the beginning of the next `X ->`; `ε` (or `ϵ`) is
//! the empty body.

pub mod ast;
pub mod lexer;

use self::lexer::{Spanned, Token};

pub fn parse(source: &str) -> anyhow::Result<ast::Grammar> {
    let span = tracing::trace_span!("parse");
    let _entered = span.enter();

    let tokens = lexer::lexer(source).collect::<anyhow::Result<Vec<_>>>()?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
    };

    let mut grammar = ast::Grammar::default();
    loop {
        parser.skip_semicolons();
        if parser.peek(0).is_none() {
            break;
        }
        let rule = parser.rule()?;
        tracing::trace!("rule: {:?}", rule);
        grammar.rules.push(rule);
    }
    if grammar.rules.is_empty() {
        anyhow::bail!("syntax error: the input contains no rules");
    }
    Ok(grammar)
}

struct Parser<'t, 'source> {
    tokens: &'t [Spanned<'source>],
    pos: usize,
    end: usize,
}

impl<'t, 'source> Parser<'t, 'source> {
    fn peek(&self, n: usize) -> Option<&'t Spanned<'source>> {
        self.tokens.get(self.pos + n)
    }

    fn bump(&mut self) -> Option<&'t Spanned<'source>> {
        let tok = self.peek(0)?;
        self.pos += 1;
        Some(tok)
    }

    fn eat(&mut self, expected: Token<'_>) -> bool {
        let matched = matches!(self.peek(0), Some((t, _)) if *t == expected);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn skip_semicolons(&mut self) {
        while self.eat(Token::Semicolon) {}
    }

    // rule := Symbol '->' body ('|' body)*
    fn rule(&mut self) -> anyhow::Result<ast::RuleDesc> {
        let left = match self.bump() {
            Some((Token::Symbol(s), _)) => s.to_string(),
            Some((tok, span)) => {
                anyhow::bail!("syntax error at {}: expecting a head symbol, found {:?}", span.start, tok)
            }
            None => anyhow::bail!("syntax error at {}: unexpected end of input", self.end),
        };
        match self.bump() {
            Some((Token::Arrow, _)) => (),
            Some((tok, span)) => {
                anyhow::bail!("syntax error at {}: expecting `->', found {:?}", span.start, tok)
            }
            None => anyhow::bail!("syntax error at {}: expecting `->'", self.end),
        }

        let mut productions = vec![self.body()?];
        while self.eat(Token::VertBar) {
            productions.push(self.body()?);
        }
        Ok(ast::RuleDesc { left, productions })
    }

    // A body runs until `|`, `;`, the end of input, or the head of the next rule.
    fn body(&mut self) -> anyhow::Result<ast::Production> {
        let mut production = ast::Production::default();
        let mut empty = true;
        loop {
            if self.starts_rule() {
                break;
            }
            match self.peek(0) {
                Some((Token::Symbol(s), _)) => production.elems.push(s.to_string()),
                Some((Token::Epsilon, _)) => (),
                Some((Token::Arrow, span)) => {
                    anyhow::bail!("syntax error at {}: unexpected `->'", span.start)
                }
                Some((Token::VertBar | Token::Semicolon, _)) | None => break,
            }
            empty = false;
            self.pos += 1;
        }
        if empty {
            let at = self.peek(0).map_or(self.end, |(_, span)| span.start);
            anyhow::bail!("syntax error at {}: missing production body", at);
        }
        Ok(production)
    }

    fn starts_rule(&self) -> bool {
        matches!(
            (self.peek(0), self.peek(1)),
            (Some((Token::Symbol(..), _)), Some((Token::Arrow, _)))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .try_init();
    }

    fn rules(source: &str) -> Vec<(String, Vec<String>)> {
        parse(source)
            .unwrap()
            .rules
            .into_iter()
            .map(|r| {
                let bodies = r
                    .productions
                    .into_iter()
                    .map(|p| p.elems.concat())
                    .collect();
                (r.left, bodies)
            })
            .collect()
    }

    #[test]
    fn separated_by_semicolons() {
        assert_eq!(
            rules("S -> aB | b; B -> ε"),
            [
                ("S".to_owned(), vec!["aB".to_owned(), "b".to_owned()]),
                ("B".to_owned(), vec!["".to_owned()]),
            ]
        );
    }

    #[test]
    fn separated_by_next_head() {
        init_tracing();
        let parsed = rules(
            "S -> aB | bA | B
             A -> b | ϵ
             B -> a",
        );
        let heads: Vec<&str> = parsed.iter().map(|(h, _)| &**h).collect();
        assert_eq!(heads, ["S", "A", "B"]);
        assert_eq!(parsed[1].1, ["b", ""]);
    }

    #[test]
    fn long_input() {
        let body = "ab".repeat(50_000);
        let source = format!("S -> {}; A -> a | {}", body, body);
        let parsed = parse(&source).unwrap();
        assert_eq!(parsed.rules.len(), 2);
        assert_eq!(parsed.rules[0].productions[0].elems.len(), 100_000);
        assert_eq!(parsed.rules[1].productions[1].elems.len(), 100_000);
    }

    #[test]
    fn syntax_errors() {
        assert!(parse("").is_err());
        assert!(parse("S -> a |").is_err());
        assert!(parse("S a").is_err());
        assert!(parse("-> a").is_err());
        assert!(parse("S -> ; A -> a").is_err());
    }
}
