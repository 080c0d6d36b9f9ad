//! Configuration for schema conversion.

use serde::{Deserialize, Serialize};

/// Options for schema conversion.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-depth`,
/// `detect-lazy-cycles`). Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConvertOptions {
    /// Maximum node depth before conversion is aborted (stack overflow guard).
    ///
    /// The default converts a tree this deep on a 2 MiB thread stack, the
    /// size Rust gives spawned threads. Raise it only with a larger stack.
    pub max_depth: usize,
    /// Fail with `CyclicSchema` when a lazy node re-enters itself.
    /// When disabled, self-referential lazy schemas run until `max_depth`.
    pub detect_lazy_cycles: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            detect_lazy_cycles: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_serde_round_trip() {
        let opts = ConvertOptions {
            max_depth: 12,
            detect_lazy_cycles: false,
        };

        let json = serde_json::to_string(&opts).unwrap();

        assert!(json.contains("\"max-depth\""));
        assert!(json.contains("\"detect-lazy-cycles\""));

        let deserialized: ConvertOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, opts);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let opts: ConvertOptions = serde_json::from_str(r#"{ "max-depth": 8 }"#).unwrap();
        assert_eq!(opts.max_depth, 8);
        assert!(opts.detect_lazy_cycles);
    }
}
