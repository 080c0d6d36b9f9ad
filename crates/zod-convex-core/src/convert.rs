//! Conversion dispatcher: Zod schema tree → Convex validator tree.
//!
//! The walk is depth-first. Each node is classified by its variant, children
//! are converted first, and the parent validator is assembled from their
//! results. Variants without a Convex counterpart abort the whole conversion.
//!
//! ## Guards
//!
//! - Every descent counts toward `ConvertOptions::max_depth`.
//! - A lazy node being expanded is held in a visiting set; meeting it again
//!   below itself fails with [`ConvertError::CyclicSchema`] instead of
//!   expanding forever. Getters that build a fresh lazy node on every call
//!   have no stable identity and are stopped by the depth guard only.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::path::{build_path, ROOT};
use crate::report::{ConversionResult, Lowering, LoweringKind};
use crate::schema::{
    BigIntFormat, LazySchema, LiteralValue, NumberFormat, ObjectShape, SchemaNode, StringFormat,
    UnknownKeys,
};
use crate::validator::ValidatorNode;

/// Input accepted by the combined entry points: a single node, or a bare
/// shape that converts to an object validator.
#[derive(Debug, Clone, Copy)]
pub enum ConvexInput<'a> {
    Node(&'a SchemaNode),
    Shape(&'a ObjectShape),
}

impl<'a> From<&'a SchemaNode> for ConvexInput<'a> {
    fn from(node: &'a SchemaNode) -> Self {
        ConvexInput::Node(node)
    }
}

impl<'a> From<&'a ObjectShape> for ConvexInput<'a> {
    fn from(shape: &'a ObjectShape) -> Self {
        ConvexInput::Shape(shape)
    }
}

/// Converts schema trees with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a single node.
    pub fn convert(&self, node: &SchemaNode) -> Result<ValidatorNode, ConvertError> {
        self.convert_input(node)
    }

    /// Convert a shape into an object validator with the same fields, in the
    /// same order.
    pub fn convert_shape(&self, shape: &ObjectShape) -> Result<ValidatorNode, ConvertError> {
        self.convert_input(shape)
    }

    /// Convert either a node or a shape.
    pub fn convert_input<'a>(
        &self,
        input: impl Into<ConvexInput<'a>>,
    ) -> Result<ValidatorNode, ConvertError> {
        Ok(self.convert_with_report(input)?.validator)
    }

    /// Convert a table definition: a shape, or a node that lowers to an
    /// object validator.
    pub fn convert_table<'a>(
        &self,
        input: impl Into<ConvexInput<'a>>,
    ) -> Result<ValidatorNode, ConvertError> {
        match self.convert_input(input)? {
            object @ ValidatorNode::Object(_) => Ok(object),
            other => Err(ConvertError::NotAnObject {
                kind: other.kind().to_string(),
            }),
        }
    }

    /// Convert and report every lossy lowering applied on the way.
    pub fn convert_with_report<'a>(
        &self,
        input: impl Into<ConvexInput<'a>>,
    ) -> Result<ConversionResult, ConvertError> {
        let mut walk = Walk {
            options: &self.options,
            visiting: HashSet::new(),
            lowerings: Vec::new(),
        };
        let validator = match input.into() {
            ConvexInput::Node(node) => walk.node(node, ROOT, 0)?,
            ConvexInput::Shape(shape) => walk.shape(shape, ROOT, 0)?,
        };
        Ok(ConversionResult {
            validator,
            lowerings: walk.lowerings,
        })
    }
}

/// Convert a single node with default options.
pub fn convert(node: &SchemaNode) -> Result<ValidatorNode, ConvertError> {
    Converter::default().convert(node)
}

/// Convert a shape with default options.
pub fn convert_shape(shape: &ObjectShape) -> Result<ValidatorNode, ConvertError> {
    Converter::default().convert_shape(shape)
}

/// Convert a node or a shape with default options.
pub fn convert_input<'a>(input: impl Into<ConvexInput<'a>>) -> Result<ValidatorNode, ConvertError> {
    Converter::default().convert_input(input)
}

/// Convert function arguments, given as a node or a shape.
pub fn convert_args<'a>(input: impl Into<ConvexInput<'a>>) -> Result<ValidatorNode, ConvertError> {
    convert_input(input)
}

/// Convert a table definition with default options.
pub fn convert_table<'a>(input: impl Into<ConvexInput<'a>>) -> Result<ValidatorNode, ConvertError> {
    Converter::default().convert_table(input)
}

// ---------------------------------------------------------------------------
// Recursive walker
// ---------------------------------------------------------------------------

/// State of one conversion call.
struct Walk<'a> {
    options: &'a ConvertOptions,
    /// Identities of lazy getters currently being expanded.
    visiting: HashSet<usize>,
    lowerings: Vec<Lowering>,
}

impl Walk<'_> {
    /// Dispatch on the node variant. Every arm beyond a bare leaf delegates
    /// to its own non-inlined method so the recursive frame stays small.
    fn node(
        &mut self,
        node: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        if depth > self.options.max_depth {
            return Err(ConvertError::RecursionDepthExceeded {
                path: path.to_string(),
                max_depth: self.options.max_depth,
            });
        }
        trace!(path, tag = node.tag(), "converting node");

        let next = depth + 1;
        match node {
            SchemaNode::Id { table_name } => Ok(ValidatorNode::id(table_name.clone())),
            SchemaNode::Any | SchemaNode::Unknown => Ok(ValidatorNode::Any),
            SchemaNode::NaN => Ok(ValidatorNode::Float64),
            SchemaNode::Null => Ok(ValidatorNode::Null),
            SchemaNode::Boolean { coerce } => Ok(self.boolean(*coerce, path)),
            SchemaNode::Number { format, coerce } => Ok(self.number(*format, *coerce, path)),
            SchemaNode::BigInt { format, coerce } => Ok(self.bigint(*format, *coerce, path)),
            SchemaNode::String { format, coerce } => {
                Ok(self.string(format.as_ref(), *coerce, path))
            }
            SchemaNode::TemplateLiteral { .. } => {
                self.lower(path, LoweringKind::TemplateLiteralWidened);
                Ok(ValidatorNode::String)
            }
            SchemaNode::Literal { values } => literal_validator(values),
            SchemaNode::Enum { entries } => enum_validator(node, entries.values()),
            SchemaNode::Array { element } => self.array(element, path, next),
            SchemaNode::Tuple { items, rest } => {
                self.tuple(node, items, rest.as_deref(), path, next)
            }
            SchemaNode::Object {
                shape,
                unknown_keys,
                catchall,
            } => self.object(shape, *unknown_keys, catchall.is_some(), path, next),
            SchemaNode::Union {
                options,
                discriminator,
            } => self.union(node, options, discriminator.as_deref(), path, next),
            SchemaNode::Record {
                key_type,
                value_type,
            } => self.record(key_type, value_type, path, next),
            SchemaNode::Optional { inner_type } => self.optional(inner_type, path, next),
            SchemaNode::Nullable { inner_type } => self.nullable(inner_type, path, next),
            SchemaNode::NonOptional { inner_type } => self.required(inner_type, path, next),
            SchemaNode::Default {
                inner_type,
                default_value,
            }
            | SchemaNode::Prefault {
                inner_type,
                default_value,
            } => self.default(default_value, inner_type, path, next),
            SchemaNode::Catch {
                inner_type,
                catch_value,
            } => self.catch(catch_value, inner_type, path, next),
            SchemaNode::Readonly { inner_type } => {
                self.node(inner_type, &build_path(path, &["innerType"]), next)
            }
            SchemaNode::Pipe { output, .. } => self.pipe(output, path, next),
            SchemaNode::Lazy(lazy) => self.lazy(lazy, path, next),
            SchemaNode::Custom
            | SchemaNode::Date
            | SchemaNode::File
            | SchemaNode::Intersection { .. }
            | SchemaNode::Map { .. }
            | SchemaNode::Never
            | SchemaNode::Promise { .. }
            | SchemaNode::Set { .. }
            | SchemaNode::Symbol
            | SchemaNode::Transform
            | SchemaNode::Undefined
            | SchemaNode::Void
            | SchemaNode::Unrecognized { .. } => Err(unsupported(node, path)),
        }
    }

    #[inline(never)]
    fn boolean(&mut self, coerce: bool, path: &str) -> ValidatorNode {
        self.coercion(path, coerce);
        ValidatorNode::Boolean
    }

    #[inline(never)]
    fn number(&mut self, format: Option<NumberFormat>, coerce: bool, path: &str) -> ValidatorNode {
        if let Some(format) = format {
            self.lower(path, LoweringKind::NumberFormatCollapsed { format });
        }
        self.coercion(path, coerce);
        ValidatorNode::Float64
    }

    #[inline(never)]
    fn bigint(&mut self, format: Option<BigIntFormat>, coerce: bool, path: &str) -> ValidatorNode {
        if let Some(format) = format {
            self.lower(path, LoweringKind::BigIntFormatCollapsed { format });
        }
        self.coercion(path, coerce);
        ValidatorNode::Int64
    }

    #[inline(never)]
    fn string(&mut self, format: Option<&StringFormat>, coerce: bool, path: &str) -> ValidatorNode {
        if let Some(format) = format {
            self.lower(
                path,
                LoweringKind::StringFormatDropped {
                    format: format.clone(),
                },
            );
        }
        self.coercion(path, coerce);
        ValidatorNode::String
    }

    #[inline(never)]
    fn array(
        &mut self,
        element: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        let element = self.node(element, &build_path(path, &["element"]), depth)?;
        Ok(ValidatorNode::array(element))
    }

    #[inline(never)]
    fn tuple(
        &mut self,
        node: &SchemaNode,
        items: &[SchemaNode],
        rest: Option<&SchemaNode>,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        if items.is_empty() && rest.is_none() {
            return Err(empty_union(node));
        }
        self.lower(
            path,
            LoweringKind::TupleDegraded {
                arity: items.len(),
                rest: rest.is_some(),
            },
        );
        let mut members = Vec::with_capacity(items.len() + 1);
        for (index, item) in items.iter().enumerate() {
            let item_path = build_path(path, &["items", &index.to_string()]);
            members.push(self.node(item, &item_path, depth)?);
        }
        if let Some(rest) = rest {
            members.push(self.node(rest, &build_path(path, &["rest"]), depth)?);
        }
        Ok(ValidatorNode::array(ValidatorNode::union(members)))
    }

    #[inline(never)]
    fn object(
        &mut self,
        shape: &ObjectShape,
        unknown_keys: UnknownKeys,
        has_catchall: bool,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        if unknown_keys != UnknownKeys::Strip {
            self.lower(
                path,
                LoweringKind::KeyPolicyCollapsed {
                    policy: unknown_keys,
                },
            );
        }
        if has_catchall {
            self.lower(path, LoweringKind::CatchallDropped);
        }
        self.shape(shape, path, depth)
    }

    #[inline(never)]
    fn union(
        &mut self,
        node: &SchemaNode,
        options: &[SchemaNode],
        discriminator: Option<&str>,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        if options.is_empty() {
            return Err(empty_union(node));
        }
        if let Some(key) = discriminator {
            self.lower(
                path,
                LoweringKind::DiscriminatorDropped {
                    key: key.to_string(),
                },
            );
        }
        let mut members = Vec::with_capacity(options.len());
        for (index, option) in options.iter().enumerate() {
            let option_path = build_path(path, &["options", &index.to_string()]);
            members.push(self.node(option, &option_path, depth)?);
        }
        Ok(ValidatorNode::union(members))
    }

    #[inline(never)]
    fn record(
        &mut self,
        key_type: &SchemaNode,
        value_type: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        let key = self.node(key_type, &build_path(path, &["keyType"]), depth)?;
        ensure_record_key(&key)?;
        let value = self.node(value_type, &build_path(path, &["valueType"]), depth)?;
        Ok(ValidatorNode::record(key, value))
    }

    #[inline(never)]
    fn optional(
        &mut self,
        inner: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        let inner = self.node(inner, &build_path(path, &["innerType"]), depth)?;
        Ok(ValidatorNode::optional(inner))
    }

    /// `nullable(optional(T))` normalises like `optional(nullable(T))`.
    #[inline(never)]
    fn nullable(
        &mut self,
        inner: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        match inner {
            SchemaNode::Optional { inner_type: nested } => {
                let nested_path = build_path(path, &["innerType", "innerType"]);
                let nested = self.node(nested, &nested_path, depth + 1)?;
                Ok(ValidatorNode::optional(ValidatorNode::union([
                    nested,
                    ValidatorNode::Null,
                ])))
            }
            inner => {
                let inner = self.node(inner, &build_path(path, &["innerType"]), depth)?;
                Ok(ValidatorNode::union([inner, ValidatorNode::Null]))
            }
        }
    }

    #[inline(never)]
    fn default(
        &mut self,
        value: &Value,
        inner: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        self.lower(
            path,
            LoweringKind::DefaultDropped {
                value: value.clone(),
            },
        );
        self.required(inner, path, depth)
    }

    #[inline(never)]
    fn catch(
        &mut self,
        value: &Value,
        inner: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        self.lower(
            path,
            LoweringKind::CatchDropped {
                value: value.clone(),
            },
        );
        self.node(inner, &build_path(path, &["innerType"]), depth)
    }

    /// Only the output side of a pipe is converted.
    #[inline(never)]
    fn pipe(
        &mut self,
        output: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        self.lower(path, LoweringKind::PipeInputIgnored);
        self.node(output, &build_path(path, &["out"]), depth)
    }

    /// Convert each field of `shape` into an object validator.
    #[inline(never)]
    fn shape(
        &mut self,
        shape: &ObjectShape,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        let mut fields = IndexMap::with_capacity(shape.len());
        for (name, node) in shape {
            let field_path = build_path(path, &["shape", name]);
            fields.insert(name.clone(), self.node(node, &field_path, depth)?);
        }
        Ok(ValidatorNode::Object(fields))
    }

    /// Convert the inner type of a nonoptional/default/prefault wrapper at
    /// `path`, dropping at most one optional layer.
    #[inline(never)]
    fn required(
        &mut self,
        inner: &SchemaNode,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        if inner.is_optional() {
            let stripped_path = build_path(path, &["innerType", "innerType"]);
            self.node(inner.unwrap_optional(), &stripped_path, depth + 1)
        } else {
            self.node(inner, &build_path(path, &["innerType"]), depth)
        }
    }

    #[inline(never)]
    fn lazy(
        &mut self,
        lazy: &LazySchema,
        path: &str,
        depth: usize,
    ) -> Result<ValidatorNode, ConvertError> {
        let id = lazy.id();
        let guarded = self.options.detect_lazy_cycles;
        if guarded && !self.visiting.insert(id) {
            debug!(path, "lazy schema re-entered itself");
            return Err(ConvertError::CyclicSchema {
                path: path.to_string(),
            });
        }

        let resolved = lazy.get();
        let result = self.node(&resolved, &build_path(path, &["getter"]), depth);

        if guarded {
            self.visiting.remove(&id);
        }
        result
    }

    fn coercion(&mut self, path: &str, coerce: bool) {
        if coerce {
            self.lower(path, LoweringKind::CoercionDropped);
        }
    }

    #[inline(never)]
    fn lower(&mut self, path: &str, kind: LoweringKind) {
        debug!(path, ?kind, "lossy lowering");
        self.lowerings.push(Lowering {
            path: path.to_string(),
            kind,
        });
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One literal for a single value, a union of literals otherwise.
fn literal_validator(values: &[LiteralValue]) -> Result<ValidatorNode, ConvertError> {
    let mut values = distinct(values.iter());
    match values.len() {
        0 => Err(ConvertError::MalformedLiteral),
        1 => Ok(ValidatorNode::Literal(values.remove(0).clone())),
        _ => Ok(ValidatorNode::union(
            values.into_iter().cloned().map(ValidatorNode::Literal),
        )),
    }
}

/// Distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a LiteralValue>) -> Vec<&'a LiteralValue> {
    let mut seen: Vec<&LiteralValue> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Record keys must lower to strings or ids, directly or through unions.
fn ensure_record_key(key: &ValidatorNode) -> Result<(), ConvertError> {
    match key {
        ValidatorNode::String | ValidatorNode::Id(_) => Ok(()),
        ValidatorNode::Union(members) => members.iter().try_for_each(ensure_record_key),
        other => Err(ConvertError::InvalidRecordKey {
            kind: other.kind().to_string(),
        }),
    }
}

/// A union of the distinct enum values, in declaration order.
fn enum_validator<'a>(
    node: &SchemaNode,
    values: impl Iterator<Item = &'a LiteralValue>,
) -> Result<ValidatorNode, ConvertError> {
    let values = distinct(values);
    if values.is_empty() {
        return Err(empty_union(node));
    }
    Ok(ValidatorNode::union(
        values.into_iter().cloned().map(ValidatorNode::Literal),
    ))
}

#[inline(never)]
fn unsupported(node: &SchemaNode, path: &str) -> ConvertError {
    debug!(path, tag = node.tag(), "unsupported variant");
    ConvertError::UnsupportedVariant {
        tag: node.tag().to_string(),
    }
}

fn empty_union(node: &SchemaNode) -> ConvertError {
    ConvertError::EmptyUnion {
        tag: node.tag().to_string(),
    }
}
