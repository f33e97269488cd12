//! The XLIFF document: loading, creation, language metadata and extraction.

use log::warn;
use memchr::memmem;

use crate::error::Result;
use crate::util::decode_text;
use crate::xliff::unit::UnitRef;
use crate::xliff::version::XliffVersion;
use crate::xml::{self, Attributes, NodeId, XmlTree};

/// An XLIFF 1.2 or 2.0 document behind one dialect-independent API.
///
/// A document whose text failed to parse has no tree and stays invalid
/// forever; every accessor then answers `None` or an empty list.
#[derive(Debug, Clone, Default)]
pub struct XliffDocument {
    tree: Option<XmlTree>,
}

impl XliffDocument {
    /// Load a document from XLIFF text.
    ///
    /// A parse failure is logged and yields an invalid document; use
    /// [`try_load`](Self::try_load) to see the error.
    pub fn load(text: &str) -> Self {
        match Self::try_load(text) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("XLIFF document could not be parsed: {e}");
                Self::default()
            }
        }
    }

    /// Load a document from XLIFF text, surfacing parse errors.
    pub fn try_load(text: &str) -> Result<Self> {
        let tree = xml::parse(text)?;
        Ok(Self { tree: Some(tree) })
    }

    /// Load a document from raw file bytes, detecting the encoding.
    pub fn load_bytes(bytes: &[u8]) -> Self {
        Self::load(&decode_text(bytes))
    }

    /// Wrap an already built tree.
    pub fn from_tree(tree: XmlTree) -> Self {
        Self { tree: Some(tree) }
    }

    /// Create an empty document for a dialect and target language.
    ///
    /// No `body`/`unit` containers are created, and no source language is
    /// set, so the document is not [`valid`](Self::valid) until one is added.
    pub fn create(version: XliffVersion, language: &str) -> Self {
        let mut tree = XmlTree::with_root(
            "xliff",
            [("version", version.as_str())].into_iter().collect(),
        );

        if let Some(root) = tree.root() {
            match version {
                XliffVersion::V1_2 => {
                    let file = tree.create_element(
                        "file",
                        [("target-language", language)].into_iter().collect(),
                    );
                    tree.append(root, file);
                }
                XliffVersion::V2_0 => {
                    tree.set_attr(root, "trgLang", language);
                }
            }
        }

        Self { tree: Some(tree) }
    }

    pub fn tree(&self) -> Option<&XmlTree> {
        self.tree.as_ref()
    }

    pub fn tree_mut(&mut self) -> Option<&mut XmlTree> {
        self.tree.as_mut()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.as_ref()?.root()
    }

    /// Borrow one of this document's units for matching or merging.
    pub fn unit(&self, node: NodeId) -> UnitRef<'_> {
        UnitRef::new(self, node)
    }

    /// The root `version` attribute, whatever its value.
    pub fn version(&self) -> Option<&str> {
        let tree = self.tree.as_ref()?;
        tree.attr(tree.root()?, "version")
    }

    /// The dialect, when the version is one this crate understands.
    pub fn dialect(&self) -> Option<XliffVersion> {
        self.version().and_then(XliffVersion::from_attr)
    }

    /// A document is valid when it has a root with version `1.2` or `2.0`
    /// and a non-empty source language.
    pub fn valid(&self) -> bool {
        self.dialect().is_some() && self.source_language().is_some_and(|lang| !lang.is_empty())
    }

    /// Node carrying the language attributes for the current dialect.
    fn language_container(&self) -> Option<(NodeId, XliffVersion)> {
        let version = self.dialect()?;
        let tree = self.tree.as_ref()?;
        let root = tree.root()?;
        let node = match version.language_container() {
            Some(tag) => tree.find_descendant(root, tag)?,
            None => root,
        };
        Some((node, version))
    }

    pub fn source_language(&self) -> Option<&str> {
        let (node, version) = self.language_container()?;
        self.tree.as_ref()?.attr(node, version.source_language_attr())
    }

    pub fn target_language(&self) -> Option<&str> {
        let (node, version) = self.language_container()?;
        self.tree.as_ref()?.attr(node, version.target_language_attr())
    }

    /// Set the source language. Ignored for `None`, an empty value, or a
    /// document without the dialect's language container.
    pub fn set_source_language(&mut self, language: Option<&str>) {
        self.set_language(language, XliffVersion::source_language_attr);
    }

    /// Set the target language. Same rules as [`set_source_language`](Self::set_source_language).
    pub fn set_target_language(&mut self, language: Option<&str>) {
        self.set_language(language, XliffVersion::target_language_attr);
    }

    fn set_language(&mut self, language: Option<&str>, attr: fn(XliffVersion) -> &'static str) {
        let Some(language) = language.filter(|lang| !lang.is_empty()) else {
            return;
        };
        let Some((node, version)) = self.language_container() else {
            return;
        };
        if let Some(tree) = self.tree.as_mut() {
            tree.set_attr(node, attr(version), language);
        }
    }

    /// Translation units in document order.
    ///
    /// 1.2: `trans-unit` children of the first `body`; 2.0: `unit` children
    /// of the first `file`. Empty for unknown versions or missing containers.
    pub fn translation_units(&self) -> Vec<NodeId> {
        let Some(version) = self.dialect() else {
            return Vec::new();
        };
        let Some(tree) = self.tree.as_ref() else {
            return Vec::new();
        };
        let Some(container) = tree
            .root()
            .and_then(|root| tree.find_descendant(root, version.unit_container()))
        else {
            return Vec::new();
        };

        tree.element_children(container)
            .filter(|&unit| tree.is_element(unit, version.unit_tag()))
            .collect()
    }

    /// Serialize a valid document back to text.
    ///
    /// When something (typically the XML declaration) precedes the opening
    /// `<xliff ` tag, a newline is inserted right before it.
    pub fn extract(&self) -> Option<String> {
        if !self.valid() {
            return None;
        }

        let mut text = xml::build_document(self.tree.as_ref()?);
        if let Some(idx) = memmem::find(text.as_bytes(), b"<xliff ")
            && idx > 0
        {
            text.insert(idx, '\n');
        }
        Some(text)
    }
}
