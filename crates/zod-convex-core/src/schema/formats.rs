use serde::{Deserialize, Serialize};

/// Refinements of `z.number()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// `z.int()`
    SafeInt,
    Int32,
    Uint32,
    Float32,
    Float64,
}

/// Refinements of `z.bigint()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BigIntFormat {
    Int64,
    Uint64,
}

/// String format refinements (`z.email()`, `z.iso.datetime()`, ...).
///
/// Convex has no format validators, so every format lowers to a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringFormat {
    Email,
    Url,
    Emoji,
    Uuid,
    Guid,
    Uuidv4,
    Uuidv6,
    Uuidv7,
    Nanoid,
    Cuid,
    Cuid2,
    Ulid,
    Xid,
    Ksuid,
    Datetime,
    Date,
    Time,
    Duration,
    Ipv4,
    Ipv6,
    Cidrv4,
    Cidrv6,
    Base64,
    Base64url,
    E164,
    Jwt,
    /// `z.stringFormat(name, predicate)`; the predicate is never evaluated.
    Custom(String),
}

impl StringFormat {
    /// Every built-in format, in declaration order.
    pub const BUILT_IN: [StringFormat; 26] = [
        StringFormat::Email,
        StringFormat::Url,
        StringFormat::Emoji,
        StringFormat::Uuid,
        StringFormat::Guid,
        StringFormat::Uuidv4,
        StringFormat::Uuidv6,
        StringFormat::Uuidv7,
        StringFormat::Nanoid,
        StringFormat::Cuid,
        StringFormat::Cuid2,
        StringFormat::Ulid,
        StringFormat::Xid,
        StringFormat::Ksuid,
        StringFormat::Datetime,
        StringFormat::Date,
        StringFormat::Time,
        StringFormat::Duration,
        StringFormat::Ipv4,
        StringFormat::Ipv6,
        StringFormat::Cidrv4,
        StringFormat::Cidrv6,
        StringFormat::Base64,
        StringFormat::Base64url,
        StringFormat::E164,
        StringFormat::Jwt,
    ];
}
