//! Command line interface of the canonicalization engine.
//!
//! The `canon` binary canonicalizes values from the command line, using the same registry and
//! canonicalizers as the ingestion pipeline:
//!
//! ```text
//! $ canon validate domain Example.COM
//! example.com     a1b2...
//! ```
//!
//! # Workspace Crates
//!
//! The engine is split into the following workspace crates:
//!
//!  - `canon`: Main entry point and command line interface.
//!  - `canon-attributes`: Schema-bound container of entity attributes.
//!  - `canon-config`: Configuration for the engine and the command line.
//!  - `canon-log`: Logging facade.
//!  - `canon-protocol`: Dynamic values, primitive shapes and coercion.
//!  - `canon-validation`: Type registry, canonicalizers and fingerprints.

mod cli;
mod cliapp;

use std::process;

pub fn main() {
    let exit_code = match cli::execute() {
        Ok(()) => 0,
        Err(err) => {
            canon_log::ensure_error(&err);
            1
        }
    };

    process::exit(exit_code);
}
