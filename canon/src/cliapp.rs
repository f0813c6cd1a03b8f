//! Definition of the command line app.
use clap::builder::ValueParser;
use clap::{Arg, ArgAction, Command};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ABOUT: &str = "Validates and canonicalizes threat-intelligence values.";

pub fn make_app() -> Command {
    Command::new("canon")
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .max_term_width(79)
        .version(VERSION)
        .about(ABOUT)
        .arg(
            Arg::new("config")
                .value_name("CONFIG")
                .long("config")
                .short('c')
                .global(true)
                .env("CANON_CONFIG")
                .value_parser(ValueParser::path_buf())
                .help("The path to a YAML or JSON config file."),
        )
        .subcommand(
            Command::new("validate")
                .about("Canonicalize values of a type")
                .after_help(
                    "This prints the canonical form and fingerprint of every value, one \
                     line per value. Values are read from standard input, one per line, \
                     if none are given. The command fails if any value is rejected.",
                )
                .arg(
                    Arg::new("type")
                        .value_name("TYPE")
                        .required(true)
                        .help("The type name, such as 'ip' or 'sha3-256'."),
                )
                .arg(
                    Arg::new("values")
                        .value_name("VALUE")
                        .num_args(0..)
                        .help("The raw values to canonicalize."),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print one JSON object per value."),
                ),
        )
        .subcommand(
            Command::new("types")
                .about("List all type names")
                .after_help(
                    "This prints the type bindings in the order they are resolved, \
                     including the types added in the config file.",
                ),
        )
        .subcommand(Command::new("attributes").about("List all attributes and their shapes"))
}
