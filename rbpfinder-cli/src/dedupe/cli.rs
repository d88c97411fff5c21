use clap::{Command, arg};

use crate::common::OUTPUT_ARG;

pub const DEDUPE_CMD: &str = "dedupe";

pub fn create_dedupe_cli() -> Command {
    Command::new(DEDUPE_CMD)
        .about("Remove duplicate records. Output is sorted by the full line, like sort -u.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <BED> "Input BED file, or - for stdin").required(true))
        .arg(
            arg!(-o --output <OUTPUT> "Output BED file (default: stdout)")
                .id(OUTPUT_ARG)
                .required(false),
        )
}
