//! Contract source scanning and per-network resolution

mod imports;
mod lexer;
mod resolver;

pub use imports::{find_imports, ImportDecl, ImportLocation};
pub use lexer::{lex, placeholders, Span, Token};
pub use resolver::{resolve, resolve_source, ResolveError};
