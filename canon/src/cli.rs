use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use canon_attributes::AttributeSchema;
use canon_config::Config;
use canon_protocol::Value;
use canon_validation::{Canonical, Registry, ValidationError};
use clap::ArgMatches;
use serde_json::json;

use crate::cliapp::make_app;

/// Runs the command line application.
pub fn execute() -> Result<()> {
    let matches = make_app().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    canon_log::init(config.logging());

    match matches.subcommand() {
        Some(("validate", matches)) => validate(&config, matches),
        Some(("types", _)) => list_types(&config),
        Some(("attributes", _)) => list_attributes(),
        _ => unreachable!(),
    }
}

fn validate(config: &Config, matches: &ArgMatches) -> Result<()> {
    let type_name = matches
        .get_one::<String>("type")
        .context("missing type name")?;
    let json = matches.get_flag("json");

    let registry = config.registry();
    if registry.resolve(type_name).is_none() {
        return Err(ValidationError::UnknownType(type_name.clone()).into());
    }

    let values: Vec<String> = match matches.get_many::<String>("values") {
        Some(values) => values.cloned().collect(),
        None => io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("failed to read values from stdin")?,
    };

    let mut stdout = io::stdout().lock();
    let mut rejected = 0;

    for raw in &values {
        let result = registry.validate(&Value::from(raw.as_str()), type_name);
        if result.is_err() {
            rejected += 1;
        }

        if json {
            write_json(&mut stdout, raw, type_name, &result)?;
        } else {
            write_plain(&mut stdout, raw, &result)?;
        }
    }

    stdout.flush()?;

    if rejected > 0 {
        anyhow::bail!("{rejected} of {} values rejected", values.len());
    }
    Ok(())
}

fn write_plain(
    out: &mut impl Write,
    raw: &str,
    result: &Result<Canonical, ValidationError>,
) -> io::Result<()> {
    match result {
        Ok(canonical) => writeln!(out, "{}\t{}", canonical.value, canonical.fingerprint),
        Err(error) => writeln!(out, "{raw}\trejected: {error}"),
    }
}

fn write_json(
    out: &mut impl Write,
    raw: &str,
    type_name: &str,
    result: &Result<Canonical, ValidationError>,
) -> Result<()> {
    let line = match result {
        Ok(canonical) => json!({
            "input": raw,
            "type": type_name,
            "value": canonical.value,
            "fingerprint": canonical.fingerprint,
        }),
        Err(error) => json!({
            "input": raw,
            "type": type_name,
            "error": error.to_string(),
        }),
    };

    serde_json::to_writer(&mut *out, &line)?;
    writeln!(out)?;
    Ok(())
}

fn list_types(config: &Config) -> Result<()> {
    let registry: Registry = config.registry();
    let mut stdout = io::stdout().lock();

    for binding in registry.bindings() {
        let shape = binding.kind.shape();
        writeln!(stdout, "{}\t{}\t{}", binding.name, binding.kind, shape)?;
    }

    Ok(())
}

fn list_attributes() -> Result<()> {
    let mut stdout = io::stdout().lock();

    for info in AttributeSchema::get().attributes() {
        writeln!(stdout, "{}\t{}", info.name, info.shape)?;
    }

    Ok(())
}
