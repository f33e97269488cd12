//! Error types for xlf-sync operations.

use thiserror::Error;

/// Errors that can occur while reading XLIFF text or settings.
///
/// Structural problems inside a well-formed document (unknown version,
/// missing `file`/`body` containers, absent units) are never errors; the
/// document model reports them as `None` or an empty list instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
