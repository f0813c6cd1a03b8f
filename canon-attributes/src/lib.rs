//! Schema-bound storage for the attributes of entity records.
//!
//! An entity record carries a sparse set of roughly a hundred named attributes, such as `ip`,
//! `domain` or `latitude`. The names and their shapes are fixed by the [`AttributeSchema`], which
//! mirrors the built-in types of `canon_validation`: every attribute can hold exactly the
//! canonical values of the type with the same name.
//!
//! [`Attributes`] stores the values by name, converting them to the declared shape on the way in.
//! It serializes as a flat object of the attributes that are set:
//!
//! ```
//! use canon_attributes::Attributes;
//! use canon_protocol::Value;
//!
//! let mut attributes = Attributes::new();
//! attributes.set_validated("domain", &Value::from("Example.COM")).unwrap();
//! attributes.set("latitude", Value::from("52.52"));
//!
//! let json = serde_json::to_string(&attributes).unwrap();
//! assert_eq!(json, r#"{"domain":"example.com","latitude":52.52}"#);
//! ```

#![warn(missing_docs)]

mod container;
mod schema;

pub use self::container::*;
pub use self::schema::*;
