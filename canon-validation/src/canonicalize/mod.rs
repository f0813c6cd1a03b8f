//! Canonicalizers, one per [`DataKind`].
//!
//! Every canonicalizer takes the textual form of a value and either returns its [`Canonical`]
//! representation or rejects it. Canonicalizers are pure, and running a canonicalizer on its own
//! output returns that output unchanged.

use canon_protocol::Value;

use crate::{Canonical, DataKind, ValidationError};

mod format;
mod hash;
mod network;
mod text;

pub use self::format::*;
pub use self::hash::*;
pub use self::network::*;
pub use self::text::*;

/// Coerces a raw value into the shape of `kind` and canonicalizes it.
///
/// Coercion is lossy: a value that cannot be converted becomes the zero value of the shape, and
/// is then canonicalized like any other value.
///
/// ```
/// use canon_protocol::Value;
/// use canon_validation::{DataKind, canonicalize};
///
/// let canonical = canonicalize(DataKind::Fqdn, &Value::from("Example.COM")).unwrap();
/// assert_eq!(canonical.as_str(), Some("example.com"));
///
/// let canonical = canonicalize(DataKind::Integer, &Value::from("8080")).unwrap();
/// assert_eq!(canonical.value, Value::I64(8080));
/// ```
pub fn canonicalize(kind: DataKind, value: &Value) -> Result<Canonical, ValidationError> {
    let value = kind.shape().coerce_lossy(value);
    let text = value.as_str().unwrap_or_default();

    match kind {
        DataKind::Integer | DataKind::Float | DataKind::Boolean => Ok(Canonical::new(value)),
        DataKind::String => validate_string(text),
        DataKind::StringInsensitive => validate_string_insensitive(text),
        DataKind::Ip => validate_ip(text),
        DataKind::Cidr => validate_cidr(text),
        DataKind::Fqdn => validate_fqdn(text),
        DataKind::Email => validate_email(text),
        DataKind::Url => validate_url(text),
        DataKind::Uuid => validate_uuid(text),
        DataKind::Md5
        | DataKind::Sha1
        | DataKind::Sha224
        | DataKind::Sha256
        | DataKind::Sha384
        | DataKind::Sha512
        | DataKind::Sha512_224
        | DataKind::Sha512_256
        | DataKind::Sha3_224
        | DataKind::Sha3_256
        | DataKind::Sha3_384
        | DataKind::Sha3_512 => validate_digest(kind, text),
        DataKind::Date => validate_date(text),
        DataKind::Datetime => validate_datetime(text),
        DataKind::Mac => validate_mac(text),
        DataKind::Mime => validate_mime(text),
        DataKind::Phone => validate_phone(text),
        DataKind::Port => validate_port(text),
        DataKind::Path => validate_path(text),
        DataKind::Hex => validate_hex(text),
        DataKind::Base64 => validate_base64(text),
        DataKind::City => validate_city(text),
        DataKind::Country => validate_country(text),
        DataKind::Identifier => validate_identifier(text),
        DataKind::Adversary => validate_adversary(text),
        DataKind::Regex => validate_regex(text),
    }
}
