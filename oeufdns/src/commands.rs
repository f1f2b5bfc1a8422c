use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("oeufdns")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("oeufdns")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("map")
                .about(
                    "Map the DNS footprint of a domain: crawl records, related domains and \
                addresses into a relation graph.",
                )
                .arg(
                    arg!([DOMAIN])
                        .required(true)
                        .help("The root domain to analyze"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Maximum recursion depth")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("2"),
                )
                .arg(
                    arg!(-p --"parallel" <WORKERS>)
                        .required(false)
                        .help("Concurrent workers per depth level (1 disables concurrency)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-query timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("2"),
                )
                .arg(
                    arg!(-e --"exclude" <PATTERN>)
                        .required(false)
                        .help("Extra blacklist substring patterns")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"no-blacklist" "Disable the built-in blacklist").required(false),
                )
                .arg(
                    arg!(--"blacklist-file" <PATH>)
                        .required(false)
                        .help("Newline-delimited blacklist pattern file (replaces the built-in list)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .conflicts_with("no-blacklist"),
                )
                .arg(
                    arg!(-w --"wordlist" <PATH>)
                        .required(false)
                        .help("Word list file for subdomain enumeration")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"services" <PATH>)
                        .required(false)
                        .help("SRV service label file for service scanning")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--"markdown" "Write a Markdown report next to the terminal output").required(false))
                .arg(arg!(-g --"graph" "Write a Graphviz .dot file of the map").required(false))
                .arg(arg!(--"json" "Write a JSON report").required(false))
                .arg(arg!(-v --"verbose" "Verbose logging on stderr").required(false)),
        )
}
