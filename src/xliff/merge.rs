//! Merging previous translations into freshly extracted units.
//!
//! Merging mutates the extracted unit in place. Callers must not rely on a
//! second merge of the same pair producing the same tree.

use log::{debug, warn};

use crate::config::MergeOptions;
use crate::xliff::document::XliffDocument;
use crate::xliff::unit::UnitRef;
use crate::xml::{Attributes, NodeId, XmlTree};

impl XliffDocument {
    /// Absorb the translation state of `existing` into `unit`, in place.
    ///
    /// `unit` belongs to this document; `existing` is the previous version
    /// of the same unit, usually from another document. Attributes are
    /// reconciled per [`MergeOptions::preserve_target_order`], the previous
    /// `target` is copied over (or a placeholder target is synthesized) and
    /// placed with [`append_target_node`](Self::append_target_node).
    pub fn merge_unit(
        &mut self,
        unit: NodeId,
        existing: Option<UnitRef<'_>>,
        options: &MergeOptions,
    ) {
        let Some(tree) = self.tree_mut() else {
            return;
        };

        let mut target = None;
        if let Some(existing) = existing
            && let Some(existing_tree) = existing.document.tree()
        {
            if let Some(existing_attrs) = existing_tree.attrs(existing.node) {
                reconcile_attributes(tree, unit, existing_attrs, options.preserve_target_order);
            }
            target = existing_tree
                .find_descendant(existing.node, "target")
                .and_then(|node| tree.import_subtree(existing_tree, node));
        }

        let target = match target {
            Some(target) => {
                debug!("reusing previous target for unit {:?}", tree.attr(unit, "id"));
                target
            }
            None => {
                debug!(
                    "no previous target for unit {:?}, using placeholder",
                    tree.attr(unit, "id")
                );
                placeholder_target(tree, &options.missing_translation)
            }
        };

        self.append_target_node(unit, target);
    }

    /// Put `target` into the unit (1.2) or its `segment` (2.0).
    ///
    /// An existing `target` is replaced in place. Otherwise the target goes
    /// right after `source`, preceded by a copy of the node before `source`
    /// (normally the indentation) so the target lines up with the source.
    /// When `source` is the first child nothing is copied. Without `source`
    /// the target is appended. A 2.0 unit without a `segment` is left
    /// untouched.
    pub fn append_target_node(&mut self, unit: NodeId, target: NodeId) {
        let Some(version) = self.dialect() else {
            return;
        };
        let Some(tree) = self.tree_mut() else {
            return;
        };

        let container = match version.segment_container() {
            Some(tag) => tree.find_descendant(unit, tag),
            None => Some(unit),
        };
        let Some(container) = container else {
            warn!(
                "unit {:?} has no segment, target not placed",
                tree.attr(unit, "id")
            );
            return;
        };

        let source_idx = tree.position_of_child(container, "source");
        let target_idx = tree.position_of_child(container, "target");

        match (target_idx, source_idx) {
            (Some(idx), _) => {
                tree.replace_child(container, idx, target);
            }
            (None, Some(idx)) => {
                let mut insert_at = idx + 1;
                let prev = idx
                    .checked_sub(1)
                    .and_then(|prev| tree.children(container).get(prev).copied());
                if let Some(copy) = prev.and_then(|prev| tree.duplicate_subtree(prev)) {
                    tree.insert(container, insert_at, copy);
                    insert_at += 1;
                }
                tree.insert(container, insert_at, target);
            }
            (None, None) => tree.append(container, target),
        }
    }
}

/// Reconcile the extracted unit's attributes with the previous unit's.
///
/// Order-preserving: the previous mapping becomes the base, `id` is forced
/// back to the extracted value, and extracted attributes the previous unit
/// lacks or left empty are filled in. Otherwise the previous unit's attributes, except `id`,
/// overwrite the extracted ones in place.
fn reconcile_attributes(
    tree: &mut XmlTree,
    unit: NodeId,
    existing: &Attributes,
    preserve_order: bool,
) {
    let Some(attrs) = tree.attrs_mut(unit) else {
        return;
    };

    if preserve_order {
        let extracted = std::mem::replace(attrs, existing.clone());
        match extracted.get("id") {
            Some(id) => attrs.set("id", id),
            None => {
                attrs.remove("id");
            }
        }
        for (name, value) in extracted.iter() {
            if attrs.get(name).is_none_or(str::is_empty) {
                attrs.set(name, value);
            }
        }
    } else {
        for (name, value) in existing.iter().filter(|&(name, _)| name != "id") {
            attrs.set(name, value);
        }
    }
}

fn placeholder_target(tree: &mut XmlTree, text: &str) -> NodeId {
    let target = tree.create_element("target", Attributes::new());
    let text = tree.create_text(text);
    tree.append(target, text);
    target
}
