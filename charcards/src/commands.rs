use charcards_core::output::OutputFormat;
use charcards_fetch::DEFAULT_BASE_URL;
use clap::{Arg, arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("charcards")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("charcards")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and progress output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Log requests and draws to stderr")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("grid")
                .about("Fetch the character listing and render one card per character")
                .args(shared_args()),
        )
        .subcommand(
            command!("random")
                .about("Fetch a single random character and render its card")
                .args(shared_args())
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Seed for the random draw, for reproducible picks")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}

fn shared_args() -> Vec<Arg> {
    vec![
        arg!(--"base-url" <URL>)
            .required(false)
            .help("Base URL of the character API")
            .value_parser(clap::value_parser!(Url))
            .default_value(DEFAULT_BASE_URL),
        arg!(--"timeout" <SECONDS>)
            .required(false)
            .help("Request timeout in seconds (default: no timeout)")
            .value_parser(clap::value_parser!(u64)),
        arg!(-o --"output" <PATH>)
            .required(false)
            .help("Write output to a file (default: print to stdout)"),
        arg!(-f --"format" <FORMAT>)
            .required(false)
            .help("Output format: html, json, text")
            .value_parser(parse_format)
            .default_value("html"),
        arg!(--"title" <TITLE>)
            .required(false)
            .help("Title of the generated HTML page"),
        arg!(--"stylesheet" <HREF>)
            .required(false)
            .help("Stylesheet to link from the generated HTML page"),
    ]
}

fn parse_format(raw: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(raw)
        .ok_or_else(|| format!("unknown format '{}' (expected html, json or text)", raw))
}
