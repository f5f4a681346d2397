use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};

/// How `nrm` renders its listings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct DisplaySettings {
    /// Mark the fastest registry of `nrm test` with an icon instead of text.
    /// Default: true
    pub icons: Option<bool>,

    /// Colorize the active registry marker, dash lines and probe results.
    /// `--no-color` always wins.
    /// Default: true
    pub color: Option<bool>,
}

impl DisplaySettings {
    pub fn icons(&self) -> bool {
        self.icons.unwrap_or(true)
    }

    pub fn color(&self) -> bool {
        self.color.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_default_to_enabled() {
        let settings: DisplaySettings = toml::from_str("color = false").unwrap();
        assert!(settings.icons());
        assert!(!settings.color());
    }
}
