use std::fmt;
use std::str::FromStr;

use canon_protocol::Value;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// A content-derived identifier of a canonical value.
///
/// The fingerprint is the SHA3-256 digest of the value's textual form, rendered as 64 lower-case
/// hex characters. Equal canonical values always have equal fingerprints, regardless of how the
/// raw value was spelled, which makes fingerprints suitable for correlating attributes across
/// records.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The length of a fingerprint in hex characters.
    pub const LEN: usize = 64;

    /// Computes the fingerprint of a canonical value.
    ///
    /// ```
    /// use canon_protocol::Value;
    /// use canon_validation::Fingerprint;
    ///
    /// let by_number = Fingerprint::of(&Value::I64(443));
    /// let by_text = Fingerprint::of(&Value::from("443"));
    /// assert_eq!(by_number, by_text);
    /// assert_eq!(by_number.as_str().len(), Fingerprint::LEN);
    /// ```
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::of_text(text),
            other => Self::of_text(&other.to_string()),
        }
    }

    /// Computes the fingerprint of a textual representation.
    pub fn of_text(text: &str) -> Self {
        Self(hex::encode(Sha3_256::digest(text.as_bytes())))
    }

    /// Returns the fingerprint as hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the identifier of an entity whose primary attribute has this fingerprint.
    ///
    /// ```
    /// use canon_validation::Fingerprint;
    ///
    /// let id = Fingerprint::of_text("8.8.8.8").entity_id("ip");
    /// assert!(id.starts_with("ip-"));
    /// assert_eq!(id.len(), 3 + Fingerprint::LEN);
    /// ```
    pub fn entity_id(&self, entity_type: &str) -> String {
        format!("{entity_type}-{}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.0
    }
}

/// Error returned when parsing a malformed [`Fingerprint`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("fingerprint must be 64 lower-case hex characters")]
pub struct ParseFingerprintError;

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == Self::LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(ParseFingerprintError)
        }
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = ParseFingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The outcome of a successful validation: a canonical value and its fingerprint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Canonical {
    /// The canonical value, in the shape of its kind.
    pub value: Value,
    /// The fingerprint of the canonical value.
    pub fingerprint: Fingerprint,
}

impl Canonical {
    /// Creates the outcome for a canonical value, fingerprinting it.
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        let fingerprint = Fingerprint::of(&value);
        Self { value, fingerprint }
    }

    /// Creates the outcome for a value that is fingerprinted through another representation.
    pub(crate) fn with_fingerprint(value: impl Into<Value>, fingerprint: Fingerprint) -> Self {
        Self {
            value: value.into(),
            fingerprint,
        }
    }

    /// Returns the canonical value as string, if it has the string shape.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}
