use std::borrow::Cow;
use std::sync::LazyLock;

use canon_protocol::Value;
use serde::{Deserialize, Serialize};

use crate::{Canonical, DataKind, ValidationError, canonicalize};

/// The built-in type names and their kinds, in scan order.
///
/// These names double as the attribute names of entity records. Renaming or removing one is a
/// breaking change for every producer and consumer of those records.
pub const BUILTIN_TYPES: &[(&str, DataKind)] = &[
    ("aba-rtn", DataKind::String),
    ("accuracy-radius", DataKind::Integer),
    ("account", DataKind::String),
    ("address", DataKind::String),
    ("adversary", DataKind::Adversary),
    ("asn", DataKind::Integer),
    ("authentihash", DataKind::Sha256),
    ("bank-account-nr", DataKind::String),
    ("base64", DataKind::Base64),
    ("bic", DataKind::String),
    ("bin", DataKind::String),
    ("boolean", DataKind::Boolean),
    ("breach-count", DataKind::Integer),
    ("breach-date", DataKind::Date),
    ("btc", DataKind::String),
    ("category", DataKind::StringInsensitive),
    ("cc-number", DataKind::String),
    ("cdhash", DataKind::Md5),
    ("cidr", DataKind::Cidr),
    ("city", DataKind::City),
    ("continent", DataKind::Country),
    ("cookie", DataKind::String),
    ("country", DataKind::Country),
    ("country-code", DataKind::StringInsensitive),
    ("cpe", DataKind::StringInsensitive),
    ("cve", DataKind::StringInsensitive),
    ("cwe", DataKind::StringInsensitive),
    ("date", DataKind::Date),
    ("datetime", DataKind::Datetime),
    ("descriptor", DataKind::String),
    ("domain", DataKind::Fqdn),
    ("email-address", DataKind::Email),
    ("email-body", DataKind::String),
    ("email-display-name", DataKind::String),
    ("email-subject", DataKind::String),
    ("email-x-mailer", DataKind::String),
    ("file", DataKind::Path),
    ("file-size", DataKind::Integer),
    ("filename", DataKind::String),
    ("first-seen", DataKind::Datetime),
    ("float", DataKind::Float),
    ("github-organization", DataKind::StringInsensitive),
    ("github-repository", DataKind::StringInsensitive),
    ("github-username", DataKind::StringInsensitive),
    ("hex", DataKind::Hex),
    ("hostname", DataKind::Fqdn),
    ("iban", DataKind::StringInsensitive),
    ("identifier", DataKind::Identifier),
    ("imei", DataKind::String),
    ("imphash", DataKind::Md5),
    ("integer", DataKind::Integer),
    ("ip", DataKind::Ip),
    ("issuer", DataKind::String),
    ("ja3-fingerprint-md5", DataKind::Md5),
    ("jarm-fingerprint", DataKind::Hex),
    ("last-seen", DataKind::Datetime),
    ("latitude", DataKind::Float),
    ("longitude", DataKind::Float),
    ("mac-address", DataKind::Mac),
    ("malware", DataKind::String),
    ("malware-family", DataKind::StringInsensitive),
    ("md5", DataKind::Md5),
    ("mime-type", DataKind::Mime),
    ("mutex", DataKind::String),
    ("object", DataKind::Identifier),
    ("organization", DataKind::String),
    ("path", DataKind::Path),
    ("pattern-in-file", DataKind::String),
    ("phone-number", DataKind::Phone),
    ("port", DataKind::Port),
    ("postal-code", DataKind::StringInsensitive),
    ("region", DataKind::City),
    ("regex", DataKind::Regex),
    ("risk-score", DataKind::Float),
    ("sha1", DataKind::Sha1),
    ("sha224", DataKind::Sha224),
    ("sha256", DataKind::Sha256),
    ("sha3-224", DataKind::Sha3_224),
    ("sha3-256", DataKind::Sha3_256),
    ("sha3-384", DataKind::Sha3_384),
    ("sha3-512", DataKind::Sha3_512),
    ("sha384", DataKind::Sha384),
    ("sha512", DataKind::Sha512),
    ("sha512-224", DataKind::Sha512_224),
    ("sha512-256", DataKind::Sha512_256),
    ("ssdeep", DataKind::String),
    ("string", DataKind::String),
    ("tag", DataKind::StringInsensitive),
    ("telfhash", DataKind::Hex),
    ("text", DataKind::String),
    ("tlsh", DataKind::StringInsensitive),
    ("url", DataKind::Url),
    ("user-agent", DataKind::String),
    ("username", DataKind::String),
    ("uuid", DataKind::Uuid),
    ("value", DataKind::String),
    ("vhash", DataKind::String),
    ("website", DataKind::Url),
    ("whois-registrant", DataKind::String),
    ("whois-registrar", DataKind::String),
    ("x509-fingerprint-md5", DataKind::Md5),
    ("x509-fingerprint-sha1", DataKind::Sha1),
    ("x509-fingerprint-sha256", DataKind::Sha256),
];

/// Binds an external type name to the kind used to canonicalize its values.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct TypeBinding {
    /// The type name, matched exactly and case-sensitively.
    pub name: Cow<'static, str>,
    /// The kind resolved for this name.
    pub kind: DataKind,
}

impl TypeBinding {
    /// Creates a new binding.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: DataKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

static BUILTIN_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::default);

/// An ordered list of type bindings.
///
/// Names are resolved by scanning the bindings in order, and the first binding with a matching
/// name wins. Names are expected to be unique, but this is not enforced: a later binding with
/// the same name as an earlier one is never reached.
///
/// The registry is immutable while shared. Callers that need additional bindings build their own
/// registry from [`Registry::default`] and [`extend`](Self::extend) it before use.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Registry {
    bindings: Vec<TypeBinding>,
}

impl Registry {
    /// Creates a registry from the given bindings, without the built-in types.
    pub fn new(bindings: impl IntoIterator<Item = TypeBinding>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Returns the shared registry of built-in types.
    pub fn builtin() -> &'static Self {
        &BUILTIN_REGISTRY
    }

    /// Appends bindings after the existing ones.
    ///
    /// Bindings whose name is already bound are kept, but they are shadowed by the earlier binding
    /// and logged as a warning.
    pub fn extend(&mut self, bindings: impl IntoIterator<Item = TypeBinding>) {
        for binding in bindings {
            if let Some(existing) = self.resolve(&binding.name) {
                canon_log::warn!(
                    name = %binding.name,
                    existing = %existing,
                    shadowed = %binding.kind,
                    "type binding is shadowed by an earlier binding"
                );
            }
            self.bindings.push(binding);
        }
    }

    /// Returns the kind of the first binding with the given name.
    pub fn resolve(&self, name: &str) -> Option<DataKind> {
        self.bindings
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| binding.kind)
    }

    /// Returns all bindings in scan order.
    pub fn bindings(&self) -> &[TypeBinding] {
        &self.bindings
    }

    /// Returns the number of bindings, including shadowed ones.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Canonicalizes a raw value of the named type.
    ///
    /// The value is coerced to the primitive shape of the resolved kind first. See
    /// [`canonicalize`](crate::canonicalize) for the coercion rules.
    pub fn validate(&self, value: &Value, type_name: &str) -> Result<Canonical, ValidationError> {
        let Some(kind) = self.resolve(type_name) else {
            canon_log::debug!(type_name, "no binding for type");
            return Err(ValidationError::UnknownType(type_name.to_owned()));
        };

        let result = canonicalize(kind, value);
        if let Err(ref error) = result {
            canon_log::trace!(
                type_name,
                value = %value.describe(),
                error = error as &dyn std::error::Error,
                "value rejected"
            );
        }
        result
    }
}

impl Default for Registry {
    /// Returns a registry containing all [`BUILTIN_TYPES`].
    fn default() -> Self {
        Self::new(
            BUILTIN_TYPES
                .iter()
                .map(|&(name, kind)| TypeBinding::new(name, kind)),
        )
    }
}
