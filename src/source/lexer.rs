//! Lexer for contract source using logos
//!
//! Only the tokens needed to find imports and address placeholders are
//! recognised. Everything else is dropped, and comments and string literals
//! are consumed whole so that placeholders inside them are never reported.

use logos::{Lexer, Logos, Skip};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    #[token("import")]
    Import,
    #[token("from")]
    From,
    #[token(",")]
    Comma,

    /// Concrete account address like `0xf233dcee88fe0abe`
    #[regex(r"0x[0-9a-fA-F]+", |lex| lex.slice().to_string())]
    Address(String),

    /// Address-shaped stand-in like `0xFUNGIBLETOKENADDRESS`
    #[regex(r"0x[0-9a-fA-F]*[g-zG-Z_][0-9a-zA-Z_]*", |lex| lex.slice().to_string())]
    Placeholder(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,
}

/// Skip a block comment, which may nest
///
/// An unterminated comment runs to the end of input.
fn block_comment(lex: &mut Lexer<'_, Token>) -> Skip {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() && depth > 0 {
        match (rest[i], rest.get(i + 1)) {
            (b'/', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(b'/')) => {
                depth -= 1;
                i += 2;
            }
            _ => i += 1,
        }
    }
    lex.bump(i);
    Skip
}

/// Lex source into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Every placeholder occurrence in code, in source order
pub fn placeholders(input: &str) -> Vec<(String, Span)> {
    lex(input)
        .filter_map(|(tok, span)| match tok {
            Token::Placeholder(name) => Some((name, span)),
            _ => None,
        })
        .collect()
}
