use std::collections::HashMap;
use std::sync::LazyLock;

use canon_protocol::Shape;
use canon_validation::BUILTIN_TYPES;
use serde::Serialize;

/// A named attribute and the shape of its values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AttributeInfo {
    /// The attribute name, identical to its built-in type name.
    pub name: &'static str,
    /// The shape every stored value has.
    pub shape: Shape,
}

static SCHEMA: LazyLock<AttributeSchema> = LazyLock::new(AttributeSchema::build);

/// The fixed list of attributes an [`Attributes`](crate::Attributes) container can hold.
///
/// There is one attribute per built-in type of the validation registry. Its shape is the shape
/// of the bound kind, so that canonical values can be stored without conversion.
#[derive(Debug)]
pub struct AttributeSchema {
    attributes: Vec<AttributeInfo>,
    index: HashMap<&'static str, usize>,
}

impl AttributeSchema {
    fn build() -> Self {
        let attributes: Vec<_> = BUILTIN_TYPES
            .iter()
            .map(|&(name, kind)| AttributeInfo {
                name,
                shape: kind.shape(),
            })
            .collect();

        let index = attributes
            .iter()
            .enumerate()
            .map(|(index, info)| (info.name, index))
            .collect();

        Self { attributes, index }
    }

    /// Returns the schema.
    pub fn get() -> &'static Self {
        &SCHEMA
    }

    /// Returns the slot index of the named attribute.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the shape of the named attribute.
    pub fn shape_of(&self, name: &str) -> Option<Shape> {
        self.index_of(name).map(|index| self.attributes[index].shape)
    }

    /// Returns all attributes in slot order.
    pub fn attributes(&self) -> &[AttributeInfo] {
        &self.attributes
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the schema has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
