//! Dynamic values and primitive shapes for the canonicalization engine.
//!
//! Raw values arrive from ingestion pipelines in whatever shape the producer chose: a port might
//! be sent as a string, an ASN as a float, a latitude as a decimal string. This crate provides
//! the boxed [`Value`] used to carry such values through validation and into attribute storage,
//! and the [`Shape`] describing which primitive a validator or attribute slot expects.
//!
//! # Coercion
//!
//! There are two sets of coercion rules, both defined on [`Shape`]:
//!
//!  - [`Shape::coerce_lossy`] never fails. Values that cannot be converted become the zero value of
//!    the shape. This is what the validation dispatcher uses.
//!  - [`Shape::coerce`] fails with a [`CoercionError`] instead. This is what attribute storage
//!    uses, so that a bad assignment leaves the slot untouched.
//!
//! ```
//! use canon_protocol::{Shape, Value};
//!
//! assert_eq!(Shape::Integer.coerce_lossy(&Value::from("8080")), Value::I64(8080));
//! assert_eq!(Shape::Integer.coerce_lossy(&Value::from("n/a")), Value::I64(0));
//! assert!(Shape::Integer.coerce(Value::from("n/a")).is_err());
//! ```

#![warn(missing_docs)]

mod shape;
mod value;

pub use self::shape::*;
pub use self::value::*;
