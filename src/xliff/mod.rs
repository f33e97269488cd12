//! Version-agnostic XLIFF document model.
//!
//! Both dialects are handled behind one API: every structural query first
//! resolves the document's [`XliffVersion`] and then uses that dialect's
//! element and attribute names.

mod document;
mod merge;
mod unit;
mod version;

pub use document::XliffDocument;
pub use unit::UnitRef;
pub use version::{UnsupportedVersion, XliffVersion};
