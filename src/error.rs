//! Crate-level error type and source diagnostics

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::encoding::EncodingError;
use crate::manifest::ManifestError;
use crate::pin::PinError;
use crate::source::{ResolveError, Span};
use crate::template::{BuildError, IdentityError};

/// Errors that can occur anywhere in the template pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed template document
    #[error("invalid template document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Pin(#[from] PinError),
}

impl Error {
    /// Format the error, with source context when it points into `source`
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            Error::Resolve(err) => err.format(source, filename),
            other => other.to_string(),
        }
    }
}

/// Render a labelled span of `source` using ariadne
pub(crate) fn format_source_error(
    source: &str,
    filename: &str,
    span: &Span,
    message: &str,
    label: &str,
) -> String {
    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span.clone()))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf);

    match written {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => message.to_string(),
    }
}
