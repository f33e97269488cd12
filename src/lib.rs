//! # xlf-sync
//!
//! A version-agnostic document model for XLIFF 1.2 and 2.0 translation files.
//!
//! ## Features
//!
//! - Load, create and serialize XLIFF 1.2/2.0 documents
//! - Read and write source/target language metadata
//! - Locate translation units by id, meaning, description or source markup
//! - Merge previous translations into freshly extracted units
//! - Synchronize a whole translation file with its source file
//!
//! ## Quick Start
//!
//! ```
//! use xlf_sync::{MergeOptions, XliffDocument};
//!
//! let source = XliffDocument::load(
//!     r#"<xliff version="2.0" srcLang="en"><file id="f"><unit id="greet"><segment><source>Hello</source></segment></unit></file></xliff>"#,
//! );
//! let previous = XliffDocument::load(
//!     r#"<xliff version="2.0" srcLang="en" trgLang="de"><file id="f"><unit id="greet"><segment><source>Hello</source><target>Hallo</target></segment></unit></file></xliff>"#,
//! );
//!
//! let (output, report) =
//!     xlf_sync::sync(&source, Some(&previous), "de", &MergeOptions::default()).unwrap();
//! assert_eq!(report.matched, 1);
//! assert!(output.extract().unwrap().contains("<target>Hallo</target>"));
//! ```
//!
//! ## Working with units
//!
//! Units are addressed by [`NodeId`] inside their own document. To merge a
//! unit of another document, borrow it as a [`UnitRef`]:
//!
//! ```
//! use xlf_sync::{MergeOptions, XliffDocument};
//!
//! let mut extracted = XliffDocument::load(
//!     r#"<xliff version="1.2"><file source-language="en"><body><trans-unit id="1"><source>Hi</source></trans-unit></body></file></xliff>"#,
//! );
//! let unit = extracted.find_by_id("1").unwrap();
//! extracted.merge_unit(unit, None, &MergeOptions::default().with_missing_translation("TODO"));
//!
//! assert!(extracted.extract().unwrap().contains("<source>Hi</source><target>TODO</target>"));
//! ```

pub mod config;
pub mod error;
pub mod sync;
pub(crate) mod util;
pub mod xliff;
pub mod xml;

pub use config::MergeOptions;
pub use error::{Error, Result};
pub use sync::{SyncReport, sync};
pub use util::decode_text;
pub use xliff::{UnitRef, UnsupportedVersion, XliffDocument, XliffVersion};
pub use xml::NodeId;
