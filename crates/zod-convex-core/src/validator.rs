//! Convex validator model.
//!
//! [`ValidatorNode`] is the output of conversion: an owned tree mirroring the
//! validators built with Convex's `v.*` constructors. The `union` and
//! `optional` constructors normalise as they build:
//!
//! - a union never holds a union as a direct member (members are spliced)
//!   and never holds two equal members;
//! - an optional never wraps another optional.
//!
//! [`ValidatorNode::to_json`] produces Convex's validator JSON encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::schema::LiteralValue;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorNode {
    Any,
    Boolean,
    Float64,
    Int64,
    Null,
    String,
    Literal(LiteralValue),
    Union(Vec<ValidatorNode>),
    Array(Box<ValidatorNode>),
    Object(IndexMap<String, ValidatorNode>),
    Record {
        key: Box<ValidatorNode>,
        value: Box<ValidatorNode>,
    },
    Optional(Box<ValidatorNode>),
    Id(String),
}

impl ValidatorNode {
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        ValidatorNode::Literal(value.into())
    }

    /// `v.union(...members)`, splicing members that are unions themselves
    /// and keeping only the first of equal members.
    ///
    /// `members` must not be empty; Convex has no empty union. The
    /// dispatcher reports empty sources as `ConvertError::EmptyUnion` before
    /// building one.
    pub fn union(members: impl IntoIterator<Item = ValidatorNode>) -> Self {
        let mut flat: Vec<ValidatorNode> = Vec::new();
        for member in members {
            let spliced = match member {
                ValidatorNode::Union(nested) => nested,
                other => vec![other],
            };
            for member in spliced {
                if !flat.contains(&member) {
                    flat.push(member);
                }
            }
        }
        debug_assert!(!flat.is_empty(), "a union needs at least one member");
        ValidatorNode::Union(flat)
    }

    pub fn array(element: ValidatorNode) -> Self {
        ValidatorNode::Array(Box::new(element))
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, ValidatorNode)>) -> Self {
        ValidatorNode::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn record(key: ValidatorNode, value: ValidatorNode) -> Self {
        ValidatorNode::Record {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// `v.optional(inner)`; optional of optional stays a single layer.
    pub fn optional(inner: ValidatorNode) -> Self {
        match inner {
            ValidatorNode::Optional(_) => inner,
            other => ValidatorNode::Optional(Box::new(other)),
        }
    }

    pub fn id(table_name: impl Into<String>) -> Self {
        ValidatorNode::Id(table_name.into())
    }

    /// The validator kind, as Convex names it.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidatorNode::Any => "any",
            ValidatorNode::Boolean => "boolean",
            ValidatorNode::Float64 => "float64",
            ValidatorNode::Int64 => "int64",
            ValidatorNode::Null => "null",
            ValidatorNode::String => "string",
            ValidatorNode::Literal(_) => "literal",
            ValidatorNode::Union(_) => "union",
            ValidatorNode::Array(_) => "array",
            ValidatorNode::Object(_) => "object",
            ValidatorNode::Record { .. } => "record",
            ValidatorNode::Optional(_) => "optional",
            ValidatorNode::Id(_) => "id",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, ValidatorNode::Optional(_))
    }

    /// Encode as Convex validator JSON.
    ///
    /// Optionality is a property of object fields in this encoding, so a
    /// top-level optional encodes as its inner validator.
    pub fn to_json(&self) -> Value {
        match self {
            ValidatorNode::Any => json!({ "type": "any" }),
            ValidatorNode::Boolean => json!({ "type": "boolean" }),
            ValidatorNode::Float64 => json!({ "type": "number" }),
            ValidatorNode::Int64 => json!({ "type": "bigint" }),
            ValidatorNode::Null => json!({ "type": "null" }),
            ValidatorNode::String => json!({ "type": "string" }),
            ValidatorNode::Literal(value) => {
                json!({ "type": "literal", "value": literal_to_json(value) })
            }
            ValidatorNode::Union(members) => json!({
                "type": "union",
                "value": members.iter().map(ValidatorNode::to_json).collect::<Vec<_>>(),
            }),
            ValidatorNode::Array(element) => json!({ "type": "array", "value": element.to_json() }),
            ValidatorNode::Object(fields) => {
                let mut value = Map::new();
                for (name, field) in fields {
                    value.insert(name.clone(), field_to_json(field));
                }
                json!({ "type": "object", "value": value })
            }
            ValidatorNode::Record { key, value } => json!({
                "type": "record",
                "keys": key.to_json(),
                "values": { "fieldType": value.to_json(), "optional": false },
            }),
            ValidatorNode::Optional(inner) => inner.to_json(),
            ValidatorNode::Id(table_name) => json!({ "type": "id", "tableName": table_name }),
        }
    }
}

impl Serialize for ValidatorNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn field_to_json(field: &ValidatorNode) -> Value {
    json!({ "fieldType": field.to_json(), "optional": field.is_optional() })
}

/// Convex's JSON encoding of literal values: bigints and floats that JSON
/// cannot carry (non-finite, negative zero) are base64 of their
/// little-endian bytes.
fn literal_to_json(value: &LiteralValue) -> Value {
    match value {
        LiteralValue::String(s) => Value::String(s.clone()),
        LiteralValue::Boolean(b) => Value::Bool(*b),
        LiteralValue::BigInt(i) => json!({ "$integer": STANDARD.encode(i.to_le_bytes()) }),
        LiteralValue::Number(n) => {
            let is_negative_zero = *n == 0.0 && n.is_sign_negative();
            match serde_json::Number::from_f64(*n) {
                Some(number) if !is_negative_zero => Value::Number(number),
                _ => json!({ "$float": STANDARD.encode(n.to_le_bytes()) }),
            }
        }
    }
}
