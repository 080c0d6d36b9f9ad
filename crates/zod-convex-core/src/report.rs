//! Conversion report: the lossy lowerings applied while converting.
//!
//! Convex validators are coarser than Zod schemas: formats, defaults, catch
//! values and key policies have no representation and are dropped. Each drop
//! is recorded with the path of the node it happened at, so callers can
//! audit what the produced validator no longer enforces.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{BigIntFormat, NumberFormat, StringFormat, UnknownKeys};
use crate::validator::ValidatorNode;

/// A single lossy lowering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lowering {
    /// Path of the source node (e.g. `#/shape/email`).
    pub path: String,
    pub kind: LoweringKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoweringKind {
    StringFormatDropped { format: StringFormat },
    NumberFormatCollapsed { format: NumberFormat },
    BigIntFormatCollapsed { format: BigIntFormat },
    /// Template literal parts are not checked; any string is accepted.
    TemplateLiteralWidened,
    TupleDegraded { arity: usize, rest: bool },
    DefaultDropped { value: Value },
    CatchDropped { value: Value },
    PipeInputIgnored,
    KeyPolicyCollapsed { policy: UnknownKeys },
    CatchallDropped,
    DiscriminatorDropped { key: String },
    CoercionDropped,
}

/// Result of a conversion with its report.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub validator: ValidatorNode,
    /// Lossy lowerings in the order they were applied (pre-order).
    pub lowerings: Vec<Lowering>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_lowering_serializes_with_type_tag() {
        let lowering = Lowering {
            path: "#/shape/email".to_string(),
            kind: LoweringKind::StringFormatDropped {
                format: StringFormat::Email,
            },
        };
        assert_eq!(
            serde_json::to_value(&lowering).unwrap(),
            json!({
                "path": "#/shape/email",
                "kind": { "type": "string_format_dropped", "format": "email" }
            })
        );
    }

    #[test]
    fn test_lowering_deserializes() {
        let lowering: Lowering = serde_json::from_value(json!({
            "path": "#",
            "kind": { "type": "tuple_degraded", "arity": 2, "rest": false }
        }))
        .unwrap();
        assert_eq!(
            lowering.kind,
            LoweringKind::TupleDegraded {
                arity: 2,
                rest: false
            }
        );
    }
}
