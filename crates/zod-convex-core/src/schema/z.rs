//! Constructors mirroring the `z.*` surface used to build schema trees.
//!
//! ```
//! use zod_convex_core::z;
//!
//! let user = z::object([
//!     ("name", z::string()),
//!     ("email", z::email().optional()),
//!     ("team", z::zid("teams")),
//! ]);
//! ```

use super::{
    BigIntFormat, LazySchema, LiteralValue, NumberFormat, ObjectShape, SchemaNode, StringFormat,
    UnknownKeys,
};

pub fn any() -> SchemaNode {
    SchemaNode::Any
}

pub fn unknown() -> SchemaNode {
    SchemaNode::Unknown
}

pub fn boolean() -> SchemaNode {
    SchemaNode::Boolean { coerce: false }
}

/// `z.stringbool()`: a string input decoded to a boolean output.
pub fn stringbool() -> SchemaNode {
    string().pipe(boolean())
}

pub fn number() -> SchemaNode {
    SchemaNode::Number {
        format: None,
        coerce: false,
    }
}

fn number_format(format: NumberFormat) -> SchemaNode {
    SchemaNode::Number {
        format: Some(format),
        coerce: false,
    }
}

pub fn int() -> SchemaNode {
    number_format(NumberFormat::SafeInt)
}

pub fn int32() -> SchemaNode {
    number_format(NumberFormat::Int32)
}

pub fn uint32() -> SchemaNode {
    number_format(NumberFormat::Uint32)
}

pub fn float32() -> SchemaNode {
    number_format(NumberFormat::Float32)
}

pub fn float64() -> SchemaNode {
    number_format(NumberFormat::Float64)
}

pub fn nan() -> SchemaNode {
    SchemaNode::NaN
}

pub fn bigint() -> SchemaNode {
    SchemaNode::BigInt {
        format: None,
        coerce: false,
    }
}

pub fn int64() -> SchemaNode {
    SchemaNode::BigInt {
        format: Some(BigIntFormat::Int64),
        coerce: false,
    }
}

pub fn uint64() -> SchemaNode {
    SchemaNode::BigInt {
        format: Some(BigIntFormat::Uint64),
        coerce: false,
    }
}

pub fn null() -> SchemaNode {
    SchemaNode::Null
}

pub fn string() -> SchemaNode {
    SchemaNode::String {
        format: None,
        coerce: false,
    }
}

/// A string refined with `format`.
pub fn string_format(format: StringFormat) -> SchemaNode {
    SchemaNode::String {
        format: Some(format),
        coerce: false,
    }
}

pub fn email() -> SchemaNode {
    string_format(StringFormat::Email)
}

pub fn url() -> SchemaNode {
    string_format(StringFormat::Url)
}

pub fn uuid() -> SchemaNode {
    string_format(StringFormat::Uuid)
}

pub fn datetime() -> SchemaNode {
    string_format(StringFormat::Datetime)
}

/// `z.stringFormat(name, predicate)`. The predicate is not needed to
/// describe the shape, so only the name is kept.
pub fn custom_format(name: impl Into<String>) -> SchemaNode {
    string_format(StringFormat::Custom(name.into()))
}

pub fn template_literal(parts: impl IntoIterator<Item = SchemaNode>) -> SchemaNode {
    SchemaNode::TemplateLiteral {
        parts: parts.into_iter().collect(),
    }
}

/// A string holding the id of a document in `table_name`.
pub fn zid(table_name: impl Into<String>) -> SchemaNode {
    SchemaNode::Id {
        table_name: table_name.into(),
    }
}

pub fn literal(value: impl Into<LiteralValue>) -> SchemaNode {
    SchemaNode::Literal {
        values: vec![value.into()],
    }
}

/// `z.literal([a, b, ...])`
pub fn literals<V: Into<LiteralValue>>(values: impl IntoIterator<Item = V>) -> SchemaNode {
    SchemaNode::Literal {
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// `z.enum([...])`: every entry maps to itself.
pub fn enumeration<S: Into<String>>(values: impl IntoIterator<Item = S>) -> SchemaNode {
    let entries = values
        .into_iter()
        .map(|v| {
            let v = v.into();
            (v.clone(), LiteralValue::String(v))
        })
        .collect();
    SchemaNode::Enum { entries }
}

/// `z.enum(NativeEnum)`: entries keep their own values.
pub fn native_enum<K: Into<String>, V: Into<LiteralValue>>(
    entries: impl IntoIterator<Item = (K, V)>,
) -> SchemaNode {
    SchemaNode::Enum {
        entries: entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    }
}

/// `z.keyof(object)`: an enum of the object's field names. Non-object
/// nodes yield an enum with no entries.
pub fn keyof(object: &SchemaNode) -> SchemaNode {
    let names = match object {
        SchemaNode::Object { shape, .. } => shape.keys().cloned().collect::<Vec<_>>(),
        _ => Vec::new(),
    };
    enumeration(names)
}

pub fn array(element: SchemaNode) -> SchemaNode {
    element.array()
}

pub fn tuple(items: impl IntoIterator<Item = SchemaNode>) -> SchemaNode {
    SchemaNode::Tuple {
        items: items.into_iter().collect(),
        rest: None,
    }
}

pub fn tuple_with_rest(items: impl IntoIterator<Item = SchemaNode>, rest: SchemaNode) -> SchemaNode {
    SchemaNode::Tuple {
        items: items.into_iter().collect(),
        rest: Some(Box::new(rest)),
    }
}

/// Collect `(name, node)` pairs into a shape.
pub fn shape<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> ObjectShape {
    fields.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

fn object_with(shape: ObjectShape, unknown_keys: UnknownKeys) -> SchemaNode {
    SchemaNode::Object {
        shape,
        unknown_keys,
        catchall: None,
    }
}

pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> SchemaNode {
    object_with(shape(fields), UnknownKeys::Strip)
}

pub fn strict_object<K: Into<String>>(
    fields: impl IntoIterator<Item = (K, SchemaNode)>,
) -> SchemaNode {
    object_with(shape(fields), UnknownKeys::Strict)
}

pub fn loose_object<K: Into<String>>(
    fields: impl IntoIterator<Item = (K, SchemaNode)>,
) -> SchemaNode {
    object_with(shape(fields), UnknownKeys::Passthrough)
}

pub fn union(options: impl IntoIterator<Item = SchemaNode>) -> SchemaNode {
    SchemaNode::Union {
        options: options.into_iter().collect(),
        discriminator: None,
    }
}

pub fn discriminated_union(
    discriminator: impl Into<String>,
    options: impl IntoIterator<Item = SchemaNode>,
) -> SchemaNode {
    SchemaNode::Union {
        options: options.into_iter().collect(),
        discriminator: Some(discriminator.into()),
    }
}

pub fn record(key_type: SchemaNode, value_type: SchemaNode) -> SchemaNode {
    SchemaNode::Record {
        key_type: Box::new(key_type),
        value_type: Box::new(value_type),
    }
}

pub fn optional(inner: SchemaNode) -> SchemaNode {
    inner.optional()
}

pub fn nullable(inner: SchemaNode) -> SchemaNode {
    inner.nullable()
}

pub fn nullish(inner: SchemaNode) -> SchemaNode {
    inner.nullish()
}

pub fn nonoptional(inner: SchemaNode) -> SchemaNode {
    inner.nonoptional()
}

pub fn readonly(inner: SchemaNode) -> SchemaNode {
    inner.readonly()
}

pub fn pipe(input: SchemaNode, output: SchemaNode) -> SchemaNode {
    input.pipe(output)
}

/// `z.preprocess(fn, schema)`: a transform piped into `schema`.
pub fn preprocess(schema: SchemaNode) -> SchemaNode {
    transform().pipe(schema)
}

pub fn lazy<F>(getter: F) -> SchemaNode
where
    F: Fn() -> SchemaNode + Send + Sync + 'static,
{
    SchemaNode::Lazy(LazySchema::new(getter))
}

pub fn custom() -> SchemaNode {
    SchemaNode::Custom
}

pub fn date() -> SchemaNode {
    SchemaNode::Date
}

pub fn file() -> SchemaNode {
    SchemaNode::File
}

pub fn intersection(left: SchemaNode, right: SchemaNode) -> SchemaNode {
    left.and(right)
}

pub fn map(key_type: SchemaNode, value_type: SchemaNode) -> SchemaNode {
    SchemaNode::Map {
        key_type: Box::new(key_type),
        value_type: Box::new(value_type),
    }
}

pub fn never() -> SchemaNode {
    SchemaNode::Never
}

pub fn promise(inner: SchemaNode) -> SchemaNode {
    SchemaNode::Promise {
        inner_type: Box::new(inner),
    }
}

pub fn set(value_type: SchemaNode) -> SchemaNode {
    SchemaNode::Set {
        value_type: Box::new(value_type),
    }
}

pub fn symbol() -> SchemaNode {
    SchemaNode::Symbol
}

pub fn transform() -> SchemaNode {
    SchemaNode::Transform
}

pub fn undefined() -> SchemaNode {
    SchemaNode::Undefined
}

pub fn void() -> SchemaNode {
    SchemaNode::Void
}

/// `z.coerce.*` constructors.
pub mod coerce {
    use super::SchemaNode;

    pub fn string() -> SchemaNode {
        SchemaNode::String {
            format: None,
            coerce: true,
        }
    }

    pub fn number() -> SchemaNode {
        SchemaNode::Number {
            format: None,
            coerce: true,
        }
    }

    pub fn boolean() -> SchemaNode {
        SchemaNode::Boolean { coerce: true }
    }

    pub fn bigint() -> SchemaNode {
        SchemaNode::BigInt {
            format: None,
            coerce: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyof_lists_fields_in_order() {
        let node = keyof(&object([("b", string()), ("a", number())]));
        let SchemaNode::Enum { entries } = node else {
            panic!("keyof should build an enum");
        };
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_nullish_is_optional_of_nullable() {
        let node = nullish(string());
        let SchemaNode::Optional { inner_type } = node else {
            panic!("nullish should be optional at the top");
        };
        assert!(matches!(*inner_type, SchemaNode::Nullable { .. }));
    }

    #[test]
    fn test_native_enum_keeps_values() {
        let node = native_enum([("Up", 1.0), ("Down", 2.0)]);
        let SchemaNode::Enum { entries } = node else {
            panic!("native_enum should build an enum");
        };
        let expected: IndexMap<String, LiteralValue> = [
            ("Up".to_string(), LiteralValue::Number(1.0)),
            ("Down".to_string(), LiteralValue::Number(2.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(entries, expected);
    }
}
