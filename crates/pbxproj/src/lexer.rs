//! Tokenizer for OpenStep-style property lists
//!
//! Produces the punctuation and string tokens the parser consumes, and
//! collects comments on the side with their byte spans. Comments carry
//! meaning in project manifests (`/* Begin PBXGroup section */` markers,
//! `/* Features */` labels), so they are kept rather than discarded.
//!
//! Unquoted strings are limited to ASCII, so every token boundary falls on
//! a UTF-8 character boundary; non-ASCII text may only appear inside quoted
//! strings and comments.

use xcpatch_core::{Error, Result};

/// Half-open byte range `[start, end)` into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// First byte
    pub start: usize,
    /// One past the last byte
    pub end: usize,
}

impl Span {
    /// Create a span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this span
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `=`
    Equals,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// Quoted or bare string, already unescaped
    Str {
        /// Decoded text
        text: String,
        /// Whether it was written in double quotes
        quoted: bool,
    },
    /// `<hex bytes>`, whitespace removed
    Data(String),
}

impl TokenKind {
    /// Human-readable name for error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::OpenBrace => "'{'".to_string(),
            TokenKind::CloseBrace => "'}'".to_string(),
            TokenKind::OpenParen => "'('".to_string(),
            TokenKind::CloseParen => "')'".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Str { text, .. } => format!("string {:?}", text),
            TokenKind::Data(_) => "data".to_string(),
        }
    }
}

/// A token and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was read
    pub kind: TokenKind,
    /// Where it was read
    pub span: Span,
}

/// Comment delimiter style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `/* ... */`
    Block,
    /// `// ...` to end of line
    Line,
}

/// A comment and its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Text between the delimiters, trimmed
    pub text: String,
    /// Span including the delimiters
    pub span: Span,
    /// Delimiter style
    pub style: CommentStyle,
}

/// Output of [`Lexer::tokenize`]
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    /// Tokens in source order
    pub tokens: Vec<Token>,
    /// Comments in source order
    pub comments: Vec<Comment>,
}

/// Whether `b` may appear in an unquoted string
pub fn is_unquoted_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'+' | b'/' | b':' | b'.' | b'-')
}

/// 1-based line and column (in characters) of a byte offset
pub fn line_col(src: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(src.len());
    let before = &src[..floor_char_boundary(src, offset)];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

fn floor_char_boundary(src: &str, mut offset: usize) -> usize {
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Build a `ParseError` positioned at `offset`
pub fn error_at(src: &str, offset: usize, message: impl Into<String>) -> Error {
    let (line, column) = line_col(src, offset);
    Error::ParseError {
        line,
        column,
        message: message.into(),
    }
}

/// Property-list tokenizer
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `src`
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    /// Tokenize the whole input
    pub fn tokenize(mut self) -> Result<Lexed> {
        let mut out = Lexed::default();

        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            let start = self.pos;

            if b.is_ascii_whitespace() {
                self.pos += 1;
                continue;
            }

            let punct = match b {
                b'{' => Some(TokenKind::OpenBrace),
                b'}' => Some(TokenKind::CloseBrace),
                b'(' => Some(TokenKind::OpenParen),
                b')' => Some(TokenKind::CloseParen),
                b'=' => Some(TokenKind::Equals),
                b';' => Some(TokenKind::Semicolon),
                b',' => Some(TokenKind::Comma),
                _ => None,
            };
            if let Some(kind) = punct {
                self.pos += 1;
                out.tokens.push(Token {
                    kind,
                    span: Span::new(start, self.pos),
                });
                continue;
            }

            match b {
                b'/' if self.peek(1) == Some(b'*') => {
                    out.comments.push(self.block_comment()?);
                }
                b'/' if self.peek(1) == Some(b'/') => {
                    out.comments.push(self.line_comment());
                }
                b'"' | b'\'' => {
                    let text = self.quoted(b)?;
                    out.tokens.push(Token {
                        kind: TokenKind::Str { text, quoted: true },
                        span: Span::new(start, self.pos),
                    });
                }
                b'<' => {
                    let data = self.data()?;
                    out.tokens.push(Token {
                        kind: TokenKind::Data(data),
                        span: Span::new(start, self.pos),
                    });
                }
                _ if is_unquoted_byte(b) => {
                    while self.pos < self.bytes.len() && is_unquoted_byte(self.bytes[self.pos]) {
                        self.pos += 1;
                    }
                    out.tokens.push(Token {
                        kind: TokenKind::Str {
                            text: self.src[start..self.pos].to_string(),
                            quoted: false,
                        },
                        span: Span::new(start, self.pos),
                    });
                }
                _ => {
                    let ch = self.src[start..].chars().next().unwrap_or('?');
                    return Err(error_at(
                        self.src,
                        start,
                        format!("unexpected character {:?}", ch),
                    ));
                }
            }
        }

        Ok(out)
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn block_comment(&mut self) -> Result<Comment> {
        let start = self.pos;
        let body_start = start + 2;
        match self.src[body_start..].find("*/") {
            Some(rel) => {
                let body_end = body_start + rel;
                self.pos = body_end + 2;
                Ok(Comment {
                    text: self.src[body_start..body_end].trim().to_string(),
                    span: Span::new(start, self.pos),
                    style: CommentStyle::Block,
                })
            }
            None => Err(error_at(self.src, start, "unterminated comment")),
        }
    }

    fn line_comment(&mut self) -> Comment {
        let start = self.pos;
        let body_start = start + 2;
        let body_end = self.src[body_start..]
            .find('\n')
            .map(|rel| body_start + rel)
            .unwrap_or(self.src.len());
        self.pos = body_end;
        Comment {
            text: self.src[body_start..body_end].trim().to_string(),
            span: Span::new(start, body_end),
            style: CommentStyle::Line,
        }
    }

    fn quoted(&mut self, quote: u8) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();
        let mut run_start = self.pos;

        loop {
            let Some(&b) = self.bytes.get(self.pos) else {
                return Err(error_at(self.src, start, "unterminated string"));
            };
            if b == quote {
                text.push_str(&self.src[run_start..self.pos]);
                self.pos += 1;
                return Ok(text);
            }
            if b == b'\\' {
                text.push_str(&self.src[run_start..self.pos]);
                self.pos += 1;
                let escaped = self.escape(start)?;
                text.push(escaped);
                run_start = self.pos;
                continue;
            }
            self.pos += 1;
        }
    }

    /// Decode one escape; `pos` is just past the backslash
    fn escape(&mut self, string_start: usize) -> Result<char> {
        let Some(&b) = self.bytes.get(self.pos) else {
            return Err(error_at(self.src, string_start, "unterminated string"));
        };
        self.pos += 1;
        let ch = match b {
            b'a' => '\u{07}',
            b'b' => '\u{08}',
            b'f' => '\u{0C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'v' => '\u{0B}',
            b'U' => {
                let hex_start = self.pos;
                let hex_end = hex_start + 4;
                let code = self
                    .src
                    .get(hex_start..hex_end)
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .and_then(char::from_u32)
                    .ok_or_else(|| error_at(self.src, hex_start, "invalid \\U escape"))?;
                self.pos = hex_end;
                code
            }
            b'0'..=b'7' => {
                let mut value = u32::from(b - b'0');
                for _ in 0..2 {
                    match self.bytes.get(self.pos) {
                        Some(&d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                char::from_u32(value).unwrap_or('\u{FFFD}')
            }
            _ => {
                // Any other escaped character stands for itself
                self.pos -= 1;
                let ch = self.src[self.pos..].chars().next().unwrap_or('\\');
                self.pos += ch.len_utf8();
                ch
            }
        };
        Ok(ch)
    }

    fn data(&mut self) -> Result<String> {
        let start = self.pos;
        match self.src[start..].find('>') {
            Some(rel) => {
                let body = &self.src[start + 1..start + rel];
                if let Some(bad) = body
                    .chars()
                    .find(|c| !c.is_ascii_hexdigit() && !c.is_ascii_whitespace())
                {
                    return Err(error_at(
                        self.src,
                        start,
                        format!("invalid character {:?} in data", bad),
                    ));
                }
                self.pos = start + rel + 1;
                Ok(body.chars().filter(|c| !c.is_ascii_whitespace()).collect())
            }
            None => Err(error_at(self.src, start, "unterminated data")),
        }
    }
}
