//! Convert Zod schema trees into equivalent Convex validators.
//!
//! ```
//! use zod_convex_core::{convert, z, ValidatorNode};
//!
//! let schema = z::object([
//!     ("author", z::zid("users")),
//!     ("body", z::string()),
//!     ("likes", z::int().default(0)),
//!     ("tags", z::enumeration(["news", "sport"]).array().optional()),
//! ]);
//!
//! let validator = convert(&schema).unwrap();
//! assert_eq!(
//!     validator,
//!     ValidatorNode::object([
//!         ("author", ValidatorNode::id("users")),
//!         ("body", ValidatorNode::String),
//!         ("likes", ValidatorNode::Float64),
//!         (
//!             "tags",
//!             ValidatorNode::optional(ValidatorNode::array(ValidatorNode::union([
//!                 ValidatorNode::literal("news"),
//!                 ValidatorNode::literal("sport"),
//!             ]))),
//!         ),
//!     ])
//! );
//! ```

pub mod classifier;
pub mod config;
pub mod convert;
pub mod error;
pub mod path;
pub mod report;
pub mod schema;
pub mod validator;

pub use classifier::NodeKind;
pub use config::ConvertOptions;
pub use convert::{
    convert, convert_args, convert_input, convert_shape, convert_table, ConvexInput, Converter,
};
pub use error::{ConvertError, ErrorCode};
pub use path::build_path;
pub use report::{ConversionResult, Lowering, LoweringKind};
pub use schema::z::{self, zid};
pub use schema::{LiteralValue, ObjectShape, SchemaNode};
pub use validator::ValidatorNode;
