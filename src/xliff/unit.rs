//! Translation unit lookup and content accessors.
//!
//! Every `find_*` method is a linear scan over
//! [`translation_units`](XliffDocument::translation_units) returning the first
//! match in document order.

use log::trace;

use crate::xliff::document::XliffDocument;
use crate::xml::{self, NodeId};

/// A translation unit borrowed together with the document that owns it.
///
/// Units of two different documents are compared and merged through this
/// handle, since a [`NodeId`] alone only has meaning inside its own tree.
#[derive(Debug, Clone, Copy)]
pub struct UnitRef<'a> {
    pub document: &'a XliffDocument,
    pub node: NodeId,
}

impl<'a> UnitRef<'a> {
    pub fn new(document: &'a XliffDocument, node: NodeId) -> Self {
        Self { document, node }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.document.tree()?.attr(self.node, "id")
    }

    pub fn source(&self) -> Option<String> {
        self.document.unit_source(self.node)
    }

    pub fn meaning(&self) -> Option<&'a str> {
        self.document.unit_meaning(self.node)
    }

    pub fn description(&self) -> Option<&'a str> {
        self.document.unit_description(self.node)
    }
}

/// Note kinds that carry matching keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteKind {
    Meaning,
    Description,
}

impl NoteKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Meaning => "meaning",
            Self::Description => "description",
        }
    }
}

impl XliffDocument {
    /// First unit whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree()?;
        self.translation_units()
            .into_iter()
            .find(|&unit| tree.attr(unit, "id") == Some(id))
    }

    /// First unit with the given meaning and exactly this serialized source markup.
    pub fn find_by_meaning_and_source(&self, meaning: &str, source: &str) -> Option<NodeId> {
        self.translation_units().into_iter().find(|&unit| {
            self.unit_meaning(unit) == Some(meaning)
                && self.unit_source(unit).as_deref() == Some(source)
        })
    }

    /// First unit with the given meaning, whatever its source.
    pub fn find_by_meaning(&self, meaning: &str) -> Option<NodeId> {
        self.translation_units()
            .into_iter()
            .find(|&unit| self.unit_meaning(unit) == Some(meaning))
    }

    /// First unit with the given meaning and description.
    pub fn find_by_meaning_and_description(
        &self,
        meaning: &str,
        description: &str,
    ) -> Option<NodeId> {
        self.translation_units().into_iter().find(|&unit| {
            self.unit_meaning(unit) == Some(meaning)
                && self.unit_description(unit) == Some(description)
        })
    }

    /// Find the unit of this document that corresponds to a unit of another.
    ///
    /// Tries, in order: same `id`, same meaning and source, same meaning and
    /// description, same meaning. The meaning-based lookups only run when the
    /// other unit has a meaning.
    pub fn find_match(&self, other: UnitRef<'_>) -> Option<NodeId> {
        if let Some(found) = other.id().and_then(|id| self.find_by_id(id)) {
            return Some(found);
        }

        let Some(meaning) = other.meaning() else {
            trace!("no unit matches id {:?}", other.id());
            return None;
        };

        let found = other
            .source()
            .and_then(|source| self.find_by_meaning_and_source(meaning, &source))
            .or_else(|| {
                other
                    .description()
                    .and_then(|description| self.find_by_meaning_and_description(meaning, description))
            })
            .or_else(|| self.find_by_meaning(meaning));

        if found.is_none() {
            trace!("no unit matches id {:?} or meaning {meaning:?}", other.id());
        }
        found
    }

    /// Serialized markup of the unit's first `source` element, tags included.
    pub fn unit_source(&self, unit: NodeId) -> Option<String> {
        let tree = self.tree()?;
        let source = tree.find_descendant(unit, "source")?;
        Some(xml::build(tree, source))
    }

    /// Text of the unit's `meaning` note.
    pub fn unit_meaning(&self, unit: NodeId) -> Option<&str> {
        self.unit_note(unit, NoteKind::Meaning)
    }

    /// Text of the unit's `description` note.
    pub fn unit_description(&self, unit: NodeId) -> Option<&str> {
        self.unit_note(unit, NoteKind::Description)
    }

    /// The note's first child, when it is non-empty text.
    fn unit_note(&self, unit: NodeId, kind: NoteKind) -> Option<&str> {
        let version = self.dialect()?;
        let tree = self.tree()?;
        let container = match version.notes_container() {
            Some(tag) => tree.find_descendant(unit, tag)?,
            None => unit,
        };
        let note =
            tree.find_child_with_attr(container, "note", version.note_kind_attr(), kind.as_str())?;
        tree.first_child_text(note)
    }
}
