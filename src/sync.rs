//! Synchronizing a translation file with a freshly extracted source file.

use log::{debug, info};

use crate::config::MergeOptions;
use crate::xliff::XliffDocument;

/// Outcome counters of a [`sync`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Translation units in the synchronized document.
    pub total: usize,
    /// Units matched with a unit of the previous translation file.
    pub matched: usize,
    /// Units whose matched previous unit had no `target` either.
    pub untranslated: usize,
}

impl SyncReport {
    /// Units that got the placeholder target.
    pub fn placeholders(&self) -> usize {
        self.total - self.matched + self.untranslated
    }
}

/// Build the translation file for `language` from `source`.
///
/// Every unit of `source` is matched against `previous` (see
/// [`XliffDocument::find_match`]) and merged; units of `previous` with no
/// counterpart in `source` are dropped. Returns `None` when `source` is not
/// a valid document.
pub fn sync(
    source: &XliffDocument,
    previous: Option<&XliffDocument>,
    language: &str,
    options: &MergeOptions,
) -> Option<(XliffDocument, SyncReport)> {
    if !source.valid() {
        debug!("source document is not valid XLIFF, nothing to synchronize");
        return None;
    }

    let previous = previous.filter(|doc| doc.valid());
    let mut output = source.clone();
    output.set_target_language(Some(language));

    let units = output.translation_units();
    let mut report = SyncReport {
        total: units.len(),
        ..SyncReport::default()
    };

    for unit in units {
        let existing = previous.and_then(|prev| {
            prev.find_match(output.unit(unit))
                .map(|node| prev.unit(node))
        });

        if let Some(existing) = existing {
            report.matched += 1;
            if existing
                .document
                .tree()
                .and_then(|tree| tree.find_descendant(existing.node, "target"))
                .is_none()
            {
                report.untranslated += 1;
            }
        }

        output.merge_unit(unit, existing, options);
    }

    info!(
        "synchronized {} units for {language}: {} matched, {} placeholders",
        report.total,
        report.matched,
        report.placeholders()
    );
    Some((output, report))
}
