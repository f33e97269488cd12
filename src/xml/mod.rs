//! Minimal XML tree with a quick-xml backed parser and a faithful builder.
//!
//! The XLIFF model only needs three things from XML: a mutable element tree,
//! `parse(text) -> tree` and `build(node) -> text`.

mod builder;
mod parser;
mod tree;

pub use builder::{build, build_document};
pub use parser::parse;
pub use tree::{Attribute, Attributes, NodeData, NodeId, XmlNode, XmlTree};
