use clap::{Command, arg, value_parser};

use crate::common::OUTPUT_ARG;

pub const TABULATE_CMD: &str = "tabulate";

pub fn create_tabulate_cli() -> Command {
    Command::new(TABULATE_CMD)
        .about("Count the distinct values of one column, most frequent first.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <BED> "Input BED file, or - for stdin").required(true))
        .arg(
            arg!(-f --field <COLUMN> "1-based column to count (chr is 1)")
                .required(true)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--format <FORMAT> "Output format: tsv or json")
                .required(false)
                .default_value("tsv"),
        )
        .arg(
            arg!(-o --output <OUTPUT> "Output file (default: stdout)")
                .id(OUTPUT_ARG)
                .required(false),
        )
}
