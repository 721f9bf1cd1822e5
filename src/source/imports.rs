//! Import declaration parser using chumsky
//!
//! Recognises `import A, B from <location>` where the location is either a
//! concrete address or a placeholder. Tokens outside import declarations are
//! skipped, as are string-location imports.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use log::debug;

use super::lexer::{lex, Span, Token};

/// Where an import is loaded from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImportLocation {
    /// A concrete account address
    Address(String),
    /// A placeholder substituted per network
    Placeholder(String),
}

impl ImportLocation {
    pub fn as_str(&self) -> &str {
        match self {
            ImportLocation::Address(a) | ImportLocation::Placeholder(a) => a,
        }
    }
}

/// One `import ... from ...` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported contract names, in declaration order
    pub contracts: Vec<String>,
    pub location: ImportLocation,
    /// Span of the whole declaration
    pub span: Span,
}

/// Find every import declaration in contract source
pub fn find_imports(source: &str) -> Vec<ImportDecl> {
    let len = source.len();

    let token_iter = lex(source).map(|(tok, span)| (tok, span.into()));

    // Split (Token, SimpleSpan) into token and span parts
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    let result = imports_parser().parse(token_stream);
    for err in result.errors() {
        debug!("skipping unparsable import near {:?}: {:?}", err.span(), err.reason());
    }
    result.into_output().unwrap_or_default()
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> Span {
    e.start()..e.end()
}

fn imports_parser<'a, I>() -> impl Parser<'a, I, Vec<ImportDecl>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let contract = select! {
        Token::Ident(name) => name,
    };

    let location = select! {
        Token::Address(address) => ImportLocation::Address(address),
        Token::Placeholder(placeholder) => ImportLocation::Placeholder(placeholder),
    };

    let import = just(Token::Import)
        .ignore_then(
            contract
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .then_ignore(just(Token::From))
        .then(location)
        .map_with(|(contracts, location), e| ImportDecl {
            contracts,
            location,
            span: span_range(&e.span()),
        });

    choice((import.map(Some), any().to(None)))
        .repeated()
        .collect::<Vec<_>>()
        .map(|decls| decls.into_iter().flatten().collect())
}
