//! Merge settings.

/// Placeholder written into targets that have no previous translation.
pub const DEFAULT_MISSING_TRANSLATION: &str = "NOT TRANSLATED YET";

/// Settings consumed by [`XliffDocument::merge_unit`](crate::XliffDocument::merge_unit).
///
/// With the `cli` feature these can be read from a JSON settings file:
///
/// ```json
/// { "missingTranslation": "TODO", "preserveTargetOrder": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default, rename_all = "camelCase"))]
pub struct MergeOptions {
    /// Target text synthesized for units without a previous translation.
    pub missing_translation: String,
    /// Take attribute order from the previous unit instead of the extracted one.
    pub preserve_target_order: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            missing_translation: DEFAULT_MISSING_TRANSLATION.to_string(),
            preserve_target_order: true,
        }
    }
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_translation(mut self, text: impl Into<String>) -> Self {
        self.missing_translation = text.into();
        self
    }

    pub fn with_preserve_target_order(mut self, preserve: bool) -> Self {
        self.preserve_target_order = preserve;
        self
    }

    /// Read settings from JSON. Missing keys keep their defaults.
    #[cfg(feature = "cli")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MergeOptions::default();
        assert_eq!(options.missing_translation, "NOT TRANSLATED YET");
        assert!(options.preserve_target_order);
    }

    #[test]
    fn test_builder() {
        let options = MergeOptions::new()
            .with_missing_translation("TODO")
            .with_preserve_target_order(false);
        assert_eq!(options.missing_translation, "TODO");
        assert!(!options.preserve_target_order);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_from_json() {
        let options = MergeOptions::from_json(r#"{ "missingTranslation": "TBD" }"#).unwrap();
        assert_eq!(options.missing_translation, "TBD");
        assert!(options.preserve_target_order);

        let options = MergeOptions::from_json(r#"{ "preserveTargetOrder": false }"#).unwrap();
        assert_eq!(options.missing_translation, DEFAULT_MISSING_TRANSLATION);
        assert!(!options.preserve_target_order);

        assert!(matches!(
            MergeOptions::from_json("{ not json"),
            Err(crate::Error::Config(_))
        ));
    }
}
