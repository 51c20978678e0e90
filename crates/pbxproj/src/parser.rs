//! Recursive-descent parser over lexer tokens
//!
//! Grammar:
//!
//! ```text
//! document := value EOF
//! value    := string | data | dict | array
//! dict     := '{' (string '=' value ';')* '}'
//! array    := '(' (value (',' value)* ','?)? ')'
//! ```

use xcpatch_core::{Limits, Result};

use crate::lexer::{error_at, Span, Token, TokenKind};
use crate::value::{Array, Dict, Entry, Node, Value};

/// Parse a token stream into a single root value
pub fn parse_tokens(src: &str, tokens: &[Token], limits: &Limits) -> Result<Node> {
    let mut parser = Parser {
        src,
        tokens,
        pos: 0,
        limits,
    };
    let root = parser.value(0)?;
    if let Some(extra) = parser.tokens.get(parser.pos) {
        return Err(error_at(
            src,
            extra.span.start,
            format!("unexpected {} after end of document", extra.kind.describe()),
        ));
    }
    Ok(root)
}

struct Parser<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
    limits: &'a Limits,
}

impl<'a> Parser<'a> {
    fn next(&mut self, expected: &str) -> Result<&'a Token> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token)
            }
            None => Err(error_at(
                self.src,
                self.src.len(),
                format!("unexpected end of input, expected {}", expected),
            )),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&'a Token> {
        let token = self.next(expected)?;
        if token.kind != kind {
            return Err(self.unexpected(token, expected));
        }
        Ok(token)
    }

    fn unexpected(&self, token: &Token, expected: &str) -> xcpatch_core::Error {
        error_at(
            self.src,
            token.span.start,
            format!("expected {}, found {}", expected, token.kind.describe()),
        )
    }

    fn value(&mut self, depth: usize) -> Result<Node> {
        let token = self.next("a value")?;
        match &token.kind {
            TokenKind::Str { text, .. } => Ok(Node {
                value: Value::String(text.clone()),
                span: token.span,
            }),
            TokenKind::Data(hex) => Ok(Node {
                value: Value::Data(hex.clone()),
                span: token.span,
            }),
            TokenKind::OpenBrace => {
                self.limits.validate_depth(depth + 1)?;
                self.dict(token.span.start, depth + 1)
            }
            TokenKind::OpenParen => {
                self.limits.validate_depth(depth + 1)?;
                self.array(token.span.start, depth + 1)
            }
            _ => Err(self.unexpected(token, "a value")),
        }
    }

    fn dict(&mut self, open: usize, depth: usize) -> Result<Node> {
        let mut dict = Dict::default();
        loop {
            let token = self.next("a key or '}'")?;
            let key = match &token.kind {
                TokenKind::CloseBrace => {
                    return Ok(Node {
                        value: Value::Dict(dict),
                        span: Span::new(open, token.span.end),
                    });
                }
                TokenKind::Str { text, .. } => text.clone(),
                _ => return Err(self.unexpected(token, "a key or '}'")),
            };
            let key_span = token.span;
            self.expect(TokenKind::Equals, "'='")?;
            let value = self.value(depth)?;
            let semi = self.expect(TokenKind::Semicolon, "';'")?;
            dict.entries.push(Entry {
                key,
                key_span,
                value,
                span: Span::new(key_span.start, semi.span.end),
            });
        }
    }

    fn array(&mut self, open: usize, depth: usize) -> Result<Node> {
        let mut array = Array::default();
        loop {
            if let Some(token) = self.peek() {
                if token.kind == TokenKind::CloseParen {
                    self.pos += 1;
                    return Ok(Node {
                        value: Value::Array(array),
                        span: Span::new(open, token.span.end),
                    });
                }
            }

            array.items.push(self.value(depth)?);
            array.trailing_comma = false;

            let token = self.next("',' or ')'")?;
            match token.kind {
                TokenKind::Comma => array.trailing_comma = true,
                TokenKind::CloseParen => {
                    return Ok(Node {
                        value: Value::Array(array),
                        span: Span::new(open, token.span.end),
                    });
                }
                _ => return Err(self.unexpected(token, "',' or ')'")),
            }
        }
    }
}
