use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use canon_protocol::Shape;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The canonicalization strategy applied to a value.
///
/// Every external type name in a [`Registry`](crate::Registry) resolves to exactly one kind, and
/// every kind has exactly one canonicalizer. Kinds have a stable kebab-case name, used in
/// configuration files and error messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum DataKind {
    /// Free-form text.
    String,
    /// Free-form text, fingerprinted case insensitively.
    StringInsensitive,
    /// A public IPv4 or IPv6 address.
    Ip,
    /// A network in CIDR notation based on a public address.
    Cidr,
    /// A fully qualified domain name.
    Fqdn,
    /// An email address.
    Email,
    /// An absolute URL.
    Url,
    /// A UUID in any of the common notations.
    Uuid,
    /// An MD5 digest, or its 16 character short form.
    Md5,
    /// A SHA-1 digest.
    Sha1,
    /// A SHA-224 digest.
    Sha224,
    /// A SHA-256 digest.
    Sha256,
    /// A SHA-384 digest.
    Sha384,
    /// A SHA-512 digest.
    Sha512,
    /// A SHA-512/224 digest.
    Sha512_224,
    /// A SHA-512/256 digest.
    Sha512_256,
    /// A SHA3-224 digest.
    Sha3_224,
    /// A SHA3-256 digest.
    Sha3_256,
    /// A SHA3-384 digest.
    Sha3_384,
    /// A SHA3-512 digest.
    Sha3_512,
    /// A signed 64-bit integer.
    Integer,
    /// A 64-bit float.
    Float,
    /// A boolean.
    Boolean,
    /// A calendar date, `YYYY-MM-DD`.
    Date,
    /// An RFC 3339 timestamp.
    Datetime,
    /// A MAC address.
    Mac,
    /// A MIME type.
    Mime,
    /// A phone number in international format.
    Phone,
    /// A port with its transport protocol, such as `443/tcp`.
    Port,
    /// A file system path.
    Path,
    /// Hexadecimal encoded bytes.
    Hex,
    /// Base64 encoded bytes.
    Base64,
    /// A city name.
    City,
    /// A country name.
    Country,
    /// An object identifier: an MD5 digest, a SHA3-256 digest or a UUID.
    Identifier,
    /// The free-form name of an adversary.
    Adversary,
    /// A regular expression.
    Regex,
}

impl DataKind {
    /// Returns all kinds in declaration order.
    pub fn all() -> &'static [Self] {
        &[
            Self::String,
            Self::StringInsensitive,
            Self::Ip,
            Self::Cidr,
            Self::Fqdn,
            Self::Email,
            Self::Url,
            Self::Uuid,
            Self::Md5,
            Self::Sha1,
            Self::Sha224,
            Self::Sha256,
            Self::Sha384,
            Self::Sha512,
            Self::Sha512_224,
            Self::Sha512_256,
            Self::Sha3_224,
            Self::Sha3_256,
            Self::Sha3_384,
            Self::Sha3_512,
            Self::Integer,
            Self::Float,
            Self::Boolean,
            Self::Date,
            Self::Datetime,
            Self::Mac,
            Self::Mime,
            Self::Phone,
            Self::Port,
            Self::Path,
            Self::Hex,
            Self::Base64,
            Self::City,
            Self::Country,
            Self::Identifier,
            Self::Adversary,
            Self::Regex,
        ]
    }

    /// Returns the stable name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::StringInsensitive => "string-insensitive",
            Self::Ip => "ip",
            Self::Cidr => "cidr",
            Self::Fqdn => "fqdn",
            Self::Email => "email",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512-224",
            Self::Sha512_256 => "sha512-256",
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Mac => "mac",
            Self::Mime => "mime",
            Self::Phone => "phone",
            Self::Port => "port",
            Self::Path => "path",
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::City => "city",
            Self::Country => "country",
            Self::Identifier => "identifier",
            Self::Adversary => "adversary",
            Self::Regex => "regex",
        }
    }

    /// Returns the primitive shape of values of this kind.
    ///
    /// Raw values are coerced into this shape before canonicalization, and canonical values
    /// always have this shape.
    pub fn shape(self) -> Shape {
        match self {
            Self::Integer => Shape::Integer,
            Self::Float => Shape::Float,
            Self::Boolean => Shape::Boolean,
            _ => Shape::String,
        }
    }

    /// Returns the accepted hex digest lengths for hash kinds, in the order they are tried.
    ///
    /// Returns an empty slice for all other kinds.
    pub fn digest_lengths(self) -> &'static [usize] {
        match self {
            Self::Md5 => &[32, 16],
            Self::Sha1 => &[40],
            Self::Sha224 | Self::Sha512_224 | Self::Sha3_224 => &[56],
            Self::Sha256 | Self::Sha512_256 | Self::Sha3_256 => &[64],
            Self::Sha384 | Self::Sha3_384 => &[96],
            Self::Sha512 | Self::Sha3_512 => &[128],
            _ => &[],
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`DataKind`] name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown data kind {0:?}")]
pub struct ParseDataKindError(String);

impl FromStr for DataKind {
    type Err = ParseDataKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseDataKindError(s.to_owned()))
    }
}

impl Serialize for DataKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = <Cow<'_, str>>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
