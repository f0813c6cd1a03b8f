//! Configuration for the canonicalization engine.
//!
//! The configuration is read from a single YAML or JSON file. It controls logging and extends
//! the registry of built-in types with additional type names. The configuration is an explicit
//! value: nothing in the engine reads it from global state.
//!
//! ```
//! use canon_config::Config;
//! use canon_validation::DataKind;
//!
//! let config = Config::from_yaml_str("types: [{name: c2-server, kind: ip}]").unwrap();
//! let registry = config.registry();
//! assert_eq!(registry.resolve("c2-server"), Some(DataKind::Ip));
//! ```

#![warn(missing_docs)]

mod config;

pub use self::config::*;
