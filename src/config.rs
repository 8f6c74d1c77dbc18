//! Engine configuration
//!
//! Plain serde structs so callers can embed them in their own configuration
//! files. Every field has a default.

use serde::Deserialize;

use crate::serializer::LabelAlphabet;

/// Attempts at drawing a random baseline tree before giving up
pub const DEFAULT_MAX_TRIES: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub baseline: BaselineConfig,
}

/// Random-baseline tree edit distance settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Attempts before the baseline is reported as exhausted
    pub max_tries: usize,
    /// Node labels used when serializing trees for comparison
    pub labels: LabelAlphabet,
    /// Fail the whole sentence when the baseline cannot be computed;
    /// otherwise the field is left empty
    pub required: bool,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            labels: LabelAlphabet::Index,
            required: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MetricsConfig::default();
        assert_eq!(config.baseline.max_tries, 16);
        assert_eq!(config.baseline.labels, LabelAlphabet::Index);
        assert!(config.baseline.required);
    }

    #[test]
    fn test_partial_config() {
        let config: MetricsConfig =
            serde_json::from_str(r#"{"baseline": {"labels": "legacy", "required": false}}"#)
                .unwrap();
        assert_eq!(config.baseline.max_tries, 16);
        assert_eq!(config.baseline.labels, LabelAlphabet::Legacy);
        assert!(!config.baseline.required);

        let empty: MetricsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, MetricsConfig::default());
    }
}
