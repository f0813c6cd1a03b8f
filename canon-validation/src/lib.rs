//! Validation and canonicalization of threat-intelligence values.
//!
//! Values such as IP addresses, digests, domains or adversary names arrive in many spellings.
//! This crate turns a raw [`Value`] of a named type into one canonical representative and a
//! [`Fingerprint`] of it, so that equal values can be correlated across records no matter how
//! they were written.
//!
//! # Types and kinds
//!
//! External type names like `"domain"` or `"sha3-256"` are bound to a [`DataKind`] in a
//! [`Registry`]. The kind determines the primitive shape the raw value is coerced into, and the
//! canonicalizer that normalizes or rejects it. The built-in bindings are listed in
//! [`BUILTIN_TYPES`].
//!
//! ```
//! use canon_protocol::Value;
//! use canon_validation::ValidationError;
//!
//! let canonical = canon_validation::validate(&Value::from("Example.COM"), "domain").unwrap();
//! assert_eq!(canonical.as_str(), Some("example.com"));
//! assert_eq!(canonical.fingerprint.as_str().len(), 64);
//!
//! let err = canon_validation::validate(&Value::from("127.0.0.1"), "ip").unwrap_err();
//! assert!(matches!(err, ValidationError::Range { .. }));
//! ```
//!
//! # Canonical form
//!
//! Canonicalizers are idempotent: validating a canonical value again returns the same value and
//! fingerprint. Most kinds lower-case their input. See the `validate_*` functions for the rules of
//! individual kinds.

#![warn(missing_docs)]

use canon_protocol::Value;

mod canonicalize;
mod error;
mod fingerprint;
mod kind;
mod regexes;
mod registry;

pub use self::canonicalize::*;
pub use self::error::*;
pub use self::fingerprint::*;
pub use self::kind::*;
pub use self::registry::*;

/// Canonicalizes a raw value of the named type using the built-in registry.
///
/// This is a shorthand for `Registry::builtin().validate(value, type_name)`.
pub fn validate(value: &Value, type_name: &str) -> Result<Canonical, ValidationError> {
    Registry::builtin().validate(value, type_name)
}
