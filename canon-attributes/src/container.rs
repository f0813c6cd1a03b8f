use std::fmt;

use canon_protocol::{CoercionError, Object, Shape, Value};
use canon_validation::{Fingerprint, ValidationError};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::AttributeSchema;

/// An error returned when storing an attribute fails.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum AttributeError {
    /// The name is not part of the [`AttributeSchema`].
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),

    /// The value cannot be converted to the shape of the attribute.
    #[error("attribute {name:?} holds {shape} values")]
    CoercionFailure {
        /// The attribute name.
        name: String,
        /// The declared shape of the attribute.
        shape: Shape,
        /// The conversion error.
        #[source]
        source: CoercionError,
    },

    /// The canonical value is empty, which would unset the attribute instead of storing it.
    #[error("attribute {0:?} cannot hold an empty value")]
    EmptyValue(String),

    /// The raw value was rejected by its canonicalizer.
    #[error("invalid value for attribute")]
    Invalid(#[from] ValidationError),
}

/// A sparse record of named attributes.
///
/// The container has one optional slot per attribute of the [`AttributeSchema`]. Every stored
/// value has the shape declared for its attribute, which is enforced when setting values. Unset
/// attributes are absent, rather than holding a zero value, and cannot be told apart from names
/// that are not in the schema.
///
/// ```
/// use canon_attributes::Attributes;
/// use canon_protocol::Value;
///
/// let mut attributes = Attributes::new();
/// assert!(attributes.set("port", Value::from("8080/udp")));
/// assert!(attributes.set("asn", Value::from("13335")));
///
/// assert_eq!(attributes.get("port"), Some(&Value::from("8080/udp")));
/// assert_eq!(attributes.get("asn"), Some(&Value::I64(13335)));
/// assert_eq!(attributes.get("domain"), None);
/// ```
///
/// The container is not synchronized. Mutation requires exclusive access.
#[derive(Clone, PartialEq)]
pub struct Attributes {
    slots: Vec<Option<Value>>,
}

impl Attributes {
    /// Creates a container with all attributes unset.
    pub fn new() -> Self {
        Self {
            slots: vec![None; AttributeSchema::get().len()],
        }
    }

    /// Returns the value of the named attribute.
    ///
    /// Returns `None` both for unset attributes and for names outside the schema.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = AttributeSchema::get().index_of(name)?;
        self.slots[index].as_ref()
    }

    /// Returns `true` if the named attribute is set.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Stores a value in the named attribute, converting it to the attribute's shape.
    ///
    /// Passing `None` or an empty string unsets the attribute. On error, the container is left
    /// unchanged.
    pub fn try_set(
        &mut self,
        name: &str,
        value: impl Into<Option<Value>>,
    ) -> Result<(), AttributeError> {
        let schema = AttributeSchema::get();
        let index = schema
            .index_of(name)
            .ok_or_else(|| AttributeError::UnknownAttribute(name.to_owned()))?;

        let value = match value.into() {
            None => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => {
                let shape = schema.attributes()[index].shape;
                let coerced = shape.coerce(value).map_err(|source| {
                    AttributeError::CoercionFailure {
                        name: name.to_owned(),
                        shape,
                        source,
                    }
                })?;
                Some(coerced)
            }
        };

        self.slots[index] = value;
        Ok(())
    }

    /// Stores a value in the named attribute and returns whether it was stored.
    ///
    /// See [`try_set`](Self::try_set).
    pub fn set(&mut self, name: &str, value: impl Into<Option<Value>>) -> bool {
        self.try_set(name, value).is_ok()
    }

    /// Canonicalizes a raw value with the built-in type of the same name and stores the result.
    ///
    /// Returns the fingerprint of the stored value. Values that canonicalize to an empty string
    /// are rejected and leave the attribute unchanged.
    pub fn set_validated(&mut self, name: &str, raw: &Value) -> Result<Fingerprint, AttributeError> {
        if AttributeSchema::get().index_of(name).is_none() {
            return Err(AttributeError::UnknownAttribute(name.to_owned()));
        }

        let canonical = canon_validation::validate(raw, name)?;
        if canonical.as_str() == Some("") {
            return Err(AttributeError::EmptyValue(name.to_owned()));
        }
        self.try_set(name, canonical.value)?;
        Ok(canonical.fingerprint)
    }

    /// Unsets the named attribute and returns its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = AttributeSchema::get().index_of(name)?;
        self.slots[index].take()
    }

    /// Returns the number of set attributes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates over all set attributes in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        AttributeSchema::get()
            .attributes()
            .iter()
            .zip(&self.slots)
            .filter_map(|(info, slot)| Some((info.name, slot.as_ref()?)))
    }

    /// Returns a copy of all set attributes keyed by name.
    pub fn export(&self) -> Object {
        self.iter()
            .map(|(name, value)| (name.to_owned(), value.clone()))
            .collect()
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of attribute names to primitive values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Attributes, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut attributes = Attributes::new();
                while let Some(name) = map.next_key::<String>()? {
                    let value = map.next_value::<Option<Value>>()?;
                    attributes
                        .try_set(&name, value)
                        .map_err(de::Error::custom)?;
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}
