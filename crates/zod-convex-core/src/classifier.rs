//! Node classification.
//!
//! Maps a [`SchemaNode`] to its [`NodeKind`] and Zod definition tag by
//! inspecting the node itself. Classification is total: nodes of unknown
//! definition types classify as [`NodeKind::Unrecognized`] and keep the tag
//! they were built with.
//!
//! The dispatcher in [`crate::convert`] matches [`SchemaNode`] variants
//! directly, since the enum is closed and the compiler checks the match is
//! exhaustive. It uses this module for the tags in errors and logs. The
//! payload accessors here are for callers that inspect schema trees.

use crate::schema::SchemaNode;

/// The variant of a schema node.
///
/// Refinements are told apart from their base type (`NumberFormat` vs
/// `Number`) even though both share the `number` tag, and ids are told apart
/// from strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Any,
    Unknown,
    Boolean,
    Number,
    NumberFormat,
    NaN,
    BigInt,
    BigIntFormat,
    Null,
    String,
    StringFormat,
    TemplateLiteral,
    Id,
    Literal,
    Enum,
    Array,
    Tuple,
    Object,
    Union,
    Record,
    Optional,
    Nullable,
    NonOptional,
    Default,
    Prefault,
    Catch,
    Readonly,
    Pipe,
    Lazy,
    Custom,
    Date,
    File,
    Intersection,
    Map,
    Never,
    Promise,
    Set,
    Symbol,
    Transform,
    Undefined,
    Void,
    Unrecognized,
}

impl NodeKind {
    /// The Zod definition `type` of this kind.
    ///
    /// `Unrecognized` has no fixed tag; use [`SchemaNode::tag`] to get the
    /// tag the node carries.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Any => "any",
            NodeKind::Unknown => "unknown",
            NodeKind::Boolean => "boolean",
            NodeKind::Number | NodeKind::NumberFormat => "number",
            NodeKind::NaN => "nan",
            NodeKind::BigInt | NodeKind::BigIntFormat => "bigint",
            NodeKind::Null => "null",
            // Ids are strings carrying a table name.
            NodeKind::String | NodeKind::StringFormat | NodeKind::Id => "string",
            NodeKind::TemplateLiteral => "template_literal",
            NodeKind::Literal => "literal",
            NodeKind::Enum => "enum",
            NodeKind::Array => "array",
            NodeKind::Tuple => "tuple",
            NodeKind::Object => "object",
            NodeKind::Union => "union",
            NodeKind::Record => "record",
            NodeKind::Optional => "optional",
            NodeKind::Nullable => "nullable",
            NodeKind::NonOptional => "nonoptional",
            NodeKind::Default => "default",
            NodeKind::Prefault => "prefault",
            NodeKind::Catch => "catch",
            NodeKind::Readonly => "readonly",
            NodeKind::Pipe => "pipe",
            NodeKind::Lazy => "lazy",
            NodeKind::Custom => "custom",
            NodeKind::Date => "date",
            NodeKind::File => "file",
            NodeKind::Intersection => "intersection",
            NodeKind::Map => "map",
            NodeKind::Never => "never",
            NodeKind::Promise => "promise",
            NodeKind::Set => "set",
            NodeKind::Symbol => "symbol",
            NodeKind::Transform => "transform",
            NodeKind::Undefined => "undefined",
            NodeKind::Void => "void",
            NodeKind::Unrecognized => "unrecognized",
        }
    }
}

impl SchemaNode {
    /// Classify this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            // Ids first: they are strings to Zod but not to Convex.
            SchemaNode::Id { .. } => NodeKind::Id,
            SchemaNode::String {
                format: Some(_), ..
            } => NodeKind::StringFormat,
            SchemaNode::String { format: None, .. } => NodeKind::String,
            SchemaNode::Any => NodeKind::Any,
            SchemaNode::Unknown => NodeKind::Unknown,
            SchemaNode::Boolean { .. } => NodeKind::Boolean,
            SchemaNode::Number {
                format: Some(_), ..
            } => NodeKind::NumberFormat,
            SchemaNode::Number { format: None, .. } => NodeKind::Number,
            SchemaNode::NaN => NodeKind::NaN,
            SchemaNode::BigInt {
                format: Some(_), ..
            } => NodeKind::BigIntFormat,
            SchemaNode::BigInt { format: None, .. } => NodeKind::BigInt,
            SchemaNode::Null => NodeKind::Null,
            SchemaNode::TemplateLiteral { .. } => NodeKind::TemplateLiteral,
            SchemaNode::Literal { .. } => NodeKind::Literal,
            SchemaNode::Enum { .. } => NodeKind::Enum,
            SchemaNode::Array { .. } => NodeKind::Array,
            SchemaNode::Tuple { .. } => NodeKind::Tuple,
            SchemaNode::Object { .. } => NodeKind::Object,
            SchemaNode::Union { .. } => NodeKind::Union,
            SchemaNode::Record { .. } => NodeKind::Record,
            SchemaNode::Optional { .. } => NodeKind::Optional,
            SchemaNode::Nullable { .. } => NodeKind::Nullable,
            SchemaNode::NonOptional { .. } => NodeKind::NonOptional,
            SchemaNode::Default { .. } => NodeKind::Default,
            SchemaNode::Prefault { .. } => NodeKind::Prefault,
            SchemaNode::Catch { .. } => NodeKind::Catch,
            SchemaNode::Readonly { .. } => NodeKind::Readonly,
            SchemaNode::Pipe { .. } => NodeKind::Pipe,
            SchemaNode::Lazy(_) => NodeKind::Lazy,
            SchemaNode::Custom => NodeKind::Custom,
            SchemaNode::Date => NodeKind::Date,
            SchemaNode::File => NodeKind::File,
            SchemaNode::Intersection { .. } => NodeKind::Intersection,
            SchemaNode::Map { .. } => NodeKind::Map,
            SchemaNode::Never => NodeKind::Never,
            SchemaNode::Promise { .. } => NodeKind::Promise,
            SchemaNode::Set { .. } => NodeKind::Set,
            SchemaNode::Symbol => NodeKind::Symbol,
            SchemaNode::Transform => NodeKind::Transform,
            SchemaNode::Undefined => NodeKind::Undefined,
            SchemaNode::Void => NodeKind::Void,
            SchemaNode::Unrecognized { .. } => NodeKind::Unrecognized,
        }
    }

    /// The Zod definition `type` of this node.
    pub fn tag(&self) -> &str {
        match self {
            SchemaNode::Unrecognized { tag } => tag,
            other => other.kind().tag(),
        }
    }

    /// The `innerType` of a single-child wrapper.
    pub fn inner_type(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Optional { inner_type }
            | SchemaNode::Nullable { inner_type }
            | SchemaNode::NonOptional { inner_type }
            | SchemaNode::Default { inner_type, .. }
            | SchemaNode::Prefault { inner_type, .. }
            | SchemaNode::Catch { inner_type, .. }
            | SchemaNode::Readonly { inner_type }
            | SchemaNode::Promise { inner_type } => Some(inner_type),
            _ => None,
        }
    }

    /// Every stored structural child, paired with the definition field that
    /// holds it. Lazy getters are not expanded.
    pub fn children(&self) -> Vec<(&'static str, &SchemaNode)> {
        if let Some(inner) = self.inner_type() {
            return vec![("innerType", inner)];
        }
        match self {
            SchemaNode::TemplateLiteral { parts } => parts.iter().map(|p| ("parts", p)).collect(),
            SchemaNode::Array { element } => vec![("element", element.as_ref())],
            SchemaNode::Tuple { items, rest } => items
                .iter()
                .map(|item| ("items", item))
                .chain(rest.as_deref().map(|rest| ("rest", rest)))
                .collect(),
            SchemaNode::Object {
                shape, catchall, ..
            } => shape
                .values()
                .map(|field| ("shape", field))
                .chain(catchall.as_deref().map(|c| ("catchall", c)))
                .collect(),
            SchemaNode::Union { options, .. } => {
                options.iter().map(|option| ("options", option)).collect()
            }
            SchemaNode::Record {
                key_type,
                value_type,
            } => vec![("keyType", key_type.as_ref()), ("valueType", value_type.as_ref())],
            SchemaNode::Pipe { input, output } => {
                vec![("in", input.as_ref()), ("out", output.as_ref())]
            }
            SchemaNode::Intersection { left, right } => {
                vec![("left", left.as_ref()), ("right", right.as_ref())]
            }
            SchemaNode::Map {
                key_type,
                value_type,
            } => vec![("keyType", key_type.as_ref()), ("valueType", value_type.as_ref())],
            SchemaNode::Set { value_type } => vec![("valueType", value_type.as_ref())],
            _ => Vec::new(),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, SchemaNode::Optional { .. })
    }

    /// Strip one `optional` layer, if present.
    pub fn unwrap_optional(&self) -> &SchemaNode {
        match self {
            SchemaNode::Optional { inner_type } => inner_type,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{z, StringFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_id_is_classified_before_string() {
        let id = z::zid("users");
        assert_eq!(id.kind(), NodeKind::Id);
        assert_eq!(id.tag(), "string");
    }

    #[test]
    fn test_formats_share_base_tag() {
        assert_eq!(z::email().kind(), NodeKind::StringFormat);
        assert_eq!(z::email().tag(), "string");
        assert_eq!(z::int32().kind(), NodeKind::NumberFormat);
        assert_eq!(z::int32().tag(), "number");
        assert_eq!(z::uint64().kind(), NodeKind::BigIntFormat);
        assert_eq!(z::uint64().tag(), "bigint");
    }

    #[test]
    fn test_every_builtin_string_format_classifies_as_format() {
        for format in StringFormat::BUILT_IN {
            assert_eq!(z::string_format(format).kind(), NodeKind::StringFormat);
        }
    }

    #[test]
    fn test_unrecognized_keeps_its_tag() {
        let node = SchemaNode::Unrecognized {
            tag: "function".to_string(),
        };
        assert_eq!(node.kind(), NodeKind::Unrecognized);
        assert_eq!(node.tag(), "function");
    }

    #[test]
    fn test_unsupported_tags() {
        let cases = [
            (z::custom(), "custom"),
            (z::date(), "date"),
            (z::file(), "file"),
            (z::intersection(z::string(), z::number()), "intersection"),
            (z::map(z::string(), z::number()), "map"),
            (z::never(), "never"),
            (z::promise(z::boolean()), "promise"),
            (z::set(z::string()), "set"),
            (z::transform(), "transform"),
            (z::undefined(), "undefined"),
            (z::void(), "void"),
        ];
        for (node, tag) in cases {
            assert_eq!(node.tag(), tag);
        }
    }

    #[test]
    fn test_wrapper_accessors() {
        let node = z::string().optional().default("x");
        let inner = node.inner_type().expect("default wraps a node");
        assert!(inner.is_optional());
        assert_eq!(inner.unwrap_optional().kind(), NodeKind::String);
        assert!(z::string().inner_type().is_none());
        assert_eq!(z::string().unwrap_optional().kind(), NodeKind::String);
    }

    #[test]
    fn test_children_name_their_fields() {
        let names = |node: &SchemaNode| {
            node.children()
                .into_iter()
                .map(|(field, child)| (field, child.tag().to_string()))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            names(&z::tuple_with_rest([z::string()], z::number())),
            vec![("items", "string".to_string()), ("rest", "number".to_string())]
        );
        assert_eq!(
            names(&z::record(z::string(), z::boolean())),
            vec![
                ("keyType", "string".to_string()),
                ("valueType", "boolean".to_string())
            ]
        );
        assert_eq!(
            names(&z::null().nullable()),
            vec![("innerType", "null".to_string())]
        );
        assert!(z::lazy(z::string).children().is_empty());
        assert!(z::boolean().children().is_empty());
    }
}
