use std::borrow::Cow;

use crate::DataKind;

/// An error returned when a value cannot be canonicalized.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The requested type name has no binding in the registry.
    #[error("unknown type {0:?}")]
    UnknownType(String),

    /// The value does not match the pattern or grammar of its kind.
    #[error("invalid {kind}: {reason}")]
    Format {
        /// The kind whose rules rejected the value.
        kind: DataKind,
        /// Why the value was rejected.
        reason: Cow<'static, str>,
    },

    /// The value is well-formed, but lies in a range that is not accepted.
    #[error("{kind} rejected: {reason}")]
    Range {
        /// The kind whose rules rejected the value.
        kind: DataKind,
        /// The rejected range.
        reason: &'static str,
    },
}

impl ValidationError {
    pub(crate) fn format(kind: DataKind, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Format {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn range(kind: DataKind, reason: &'static str) -> Self {
        Self::Range { kind, reason }
    }

    /// Returns the kind that rejected the value, if the type name was resolved.
    pub fn kind(&self) -> Option<DataKind> {
        match self {
            Self::UnknownType(_) => None,
            Self::Format { kind, .. } | Self::Range { kind, .. } => Some(*kind),
        }
    }
}
