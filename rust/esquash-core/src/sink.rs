//! Minimal-whitespace token sink (§4.3).

use std::io::{self, Write};

use crate::token::{Token, TokenKind};

/// A stateful consumer of tokens that writes text to a byte stream,
/// inserting the minimum whitespace needed to keep the output reparsing to
/// the same token stream.
///
/// It remembers only the most recently emitted token's kind and text (the
/// first character of the text is all the adjacency rules ever need, but we
/// keep the whole token since it's already owned).
pub struct TokenSink<W: Write> {
    out: W,
    last: Option<Token>,
}

impl<W: Write> TokenSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    /// Generic entry point; all the role-specific `report_*` methods below
    /// funnel into this one, since only the token's `kind` (not which
    /// method reported it) affects the whitespace decision.
    pub fn report(&mut self, token: Token) -> io::Result<()> {
        if self.needs_space_before(&token) {
            self.out.write_all(b" ")?;
        }
        self.out.write_all(token.text.as_bytes())?;
        self.last = Some(token);
        Ok(())
    }

    pub fn report_number(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_keyword(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_literal(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_identifier(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_binary_op(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_unary_op(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_prefix_op(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_postfix_op(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    pub fn report_regexp(&mut self, token: Token) -> io::Result<()> {
        self.report(token)
    }

    fn needs_space_before(&self, next: &Token) -> bool {
        let Some(last) = &self.last else {
            return false;
        };

        match next.kind {
            TokenKind::Decimal if last.kind.is_literal_class() => true,
            TokenKind::Identifier | TokenKind::Reserved if last.kind.is_literal_class() => true,
            _ if next.kind.is_literal_class() && last.kind.is_literal_class() => true,
            TokenKind::Inc if last.kind == TokenKind::Add => true,
            TokenKind::Dec if last.kind == TokenKind::Sub => true,
            TokenKind::Add if last.kind == TokenKind::Add => true,
            TokenKind::Sub if last.kind == TokenKind::Sub => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tokens: Vec<Token>) -> String {
        let mut buf = Vec::new();
        let mut sink = TokenSink::new(&mut buf);
        for t in tokens {
            sink.report(t).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn keyword_then_number_needs_space() {
        let out = render(vec![
            Token::new(TokenKind::Return, "return"),
            Token::new(TokenKind::Decimal, "5"),
        ]);
        assert_eq!(out, "return 5");
    }

    #[test]
    fn two_identifiers_need_space() {
        let out = render(vec![
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Identifier, "b"),
        ]);
        assert_eq!(out, "a b");
    }

    #[test]
    fn plus_then_prefix_increment_needs_space() {
        let out = render(vec![
            Token::punct(TokenKind::Add, "+"),
            Token::punct(TokenKind::Inc, "++"),
            Token::new(TokenKind::Identifier, "x"),
        ]);
        assert_eq!(out, "+ ++x");
    }

    #[test]
    fn minus_then_unary_minus_needs_space() {
        let out = render(vec![
            Token::punct(TokenKind::Sub, "-"),
            Token::punct(TokenKind::Sub, "-"),
            Token::new(TokenKind::Decimal, "1"),
        ]);
        assert_eq!(out, "- -1");
    }

    #[test]
    fn punctuation_needs_no_space() {
        let out = render(vec![
            Token::new(TokenKind::Identifier, "a"),
            Token::punct(TokenKind::LParen, "("),
            Token::new(TokenKind::Identifier, "b"),
            Token::punct(TokenKind::RParen, ")"),
        ]);
        assert_eq!(out, "a(b)");
    }
}
