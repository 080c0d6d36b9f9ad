//! Source schema model.
//!
//! [`SchemaNode`] mirrors the Zod v4 definition tree (`_zod.def`): one variant
//! per definition `type`, with payload fields named after the definition
//! fields. Trees are built with the constructors in [`z`] and the chaining
//! methods on `SchemaNode`, and are only ever read by the converter.

mod formats;
mod lazy;
pub mod z;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use formats::{BigIntFormat, NumberFormat, StringFormat};
pub use lazy::LazySchema;

/// A mapping of field name to schema node, in declaration order.
pub type ObjectShape = IndexMap<String, SchemaNode>;

/// A value a Zod literal or enum can take that Convex can represent.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    BigInt(i64),
    Boolean(bool),
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Number(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::BigInt(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Boolean(value)
    }
}

/// How an object treats keys missing from its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// `z.object`: unknown keys are stripped.
    #[default]
    Strip,
    /// `z.strictObject`: unknown keys are rejected.
    Strict,
    /// `z.looseObject`: unknown keys pass through.
    Passthrough,
}

/// A node of a Zod schema tree.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    Any,
    Unknown,
    Boolean {
        coerce: bool,
    },
    Number {
        format: Option<NumberFormat>,
        coerce: bool,
    },
    NaN,
    BigInt {
        format: Option<BigIntFormat>,
        coerce: bool,
    },
    Null,
    String {
        format: Option<StringFormat>,
        coerce: bool,
    },
    TemplateLiteral {
        parts: Vec<SchemaNode>,
    },
    /// A string holding a Convex document id of `table_name`.
    Id {
        table_name: String,
    },
    Literal {
        values: Vec<LiteralValue>,
    },
    Enum {
        entries: IndexMap<String, LiteralValue>,
    },
    Array {
        element: Box<SchemaNode>,
    },
    Tuple {
        items: Vec<SchemaNode>,
        rest: Option<Box<SchemaNode>>,
    },
    Object {
        shape: ObjectShape,
        unknown_keys: UnknownKeys,
        catchall: Option<Box<SchemaNode>>,
    },
    Union {
        options: Vec<SchemaNode>,
        discriminator: Option<String>,
    },
    Record {
        key_type: Box<SchemaNode>,
        value_type: Box<SchemaNode>,
    },
    Optional {
        inner_type: Box<SchemaNode>,
    },
    Nullable {
        inner_type: Box<SchemaNode>,
    },
    NonOptional {
        inner_type: Box<SchemaNode>,
    },
    Default {
        inner_type: Box<SchemaNode>,
        default_value: Value,
    },
    Prefault {
        inner_type: Box<SchemaNode>,
        default_value: Value,
    },
    Catch {
        inner_type: Box<SchemaNode>,
        catch_value: Value,
    },
    Readonly {
        inner_type: Box<SchemaNode>,
    },
    Pipe {
        input: Box<SchemaNode>,
        output: Box<SchemaNode>,
    },
    Lazy(LazySchema),

    // Variants with no Convex representation.
    Custom,
    Date,
    File,
    Intersection {
        left: Box<SchemaNode>,
        right: Box<SchemaNode>,
    },
    Map {
        key_type: Box<SchemaNode>,
        value_type: Box<SchemaNode>,
    },
    Never,
    Promise {
        inner_type: Box<SchemaNode>,
    },
    Set {
        value_type: Box<SchemaNode>,
    },
    Symbol,
    Transform,
    Undefined,
    Void,

    /// A definition type this crate does not know, kept with its tag.
    Unrecognized {
        tag: String,
    },
}

impl SchemaNode {
    /// `.optional()`
    pub fn optional(self) -> SchemaNode {
        SchemaNode::Optional {
            inner_type: Box::new(self),
        }
    }

    /// `.nullable()`
    pub fn nullable(self) -> SchemaNode {
        SchemaNode::Nullable {
            inner_type: Box::new(self),
        }
    }

    /// `.nullish()`, i.e. `.nullable().optional()`.
    pub fn nullish(self) -> SchemaNode {
        self.nullable().optional()
    }

    /// `.nonoptional()`
    pub fn nonoptional(self) -> SchemaNode {
        SchemaNode::NonOptional {
            inner_type: Box::new(self),
        }
    }

    /// `.default(value)`
    pub fn default(self, value: impl Into<Value>) -> SchemaNode {
        SchemaNode::Default {
            inner_type: Box::new(self),
            default_value: value.into(),
        }
    }

    /// `.prefault(value)`
    pub fn prefault(self, value: impl Into<Value>) -> SchemaNode {
        SchemaNode::Prefault {
            inner_type: Box::new(self),
            default_value: value.into(),
        }
    }

    /// `.catch(value)`
    pub fn catch(self, value: impl Into<Value>) -> SchemaNode {
        SchemaNode::Catch {
            inner_type: Box::new(self),
            catch_value: value.into(),
        }
    }

    /// `.readonly()`
    pub fn readonly(self) -> SchemaNode {
        SchemaNode::Readonly {
            inner_type: Box::new(self),
        }
    }

    /// `.array()`
    pub fn array(self) -> SchemaNode {
        SchemaNode::Array {
            element: Box::new(self),
        }
    }

    /// `.pipe(output)`
    pub fn pipe(self, output: SchemaNode) -> SchemaNode {
        SchemaNode::Pipe {
            input: Box::new(self),
            output: Box::new(output),
        }
    }

    /// `.or(other)`
    pub fn or(self, other: SchemaNode) -> SchemaNode {
        SchemaNode::Union {
            options: vec![self, other],
            discriminator: None,
        }
    }

    /// `.and(other)`
    pub fn and(self, other: SchemaNode) -> SchemaNode {
        SchemaNode::Intersection {
            left: Box::new(self),
            right: Box::new(other),
        }
    }
}
