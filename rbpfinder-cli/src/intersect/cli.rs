use clap::{Arg, ArgAction, Command, arg};

use crate::common::OUTPUT_ARG;

pub const INTERSECT_CMD: &str = "intersect";

pub fn create_intersect_cli() -> Command {
    Command::new(INTERSECT_CMD)
        .about("Report each query region once per overlapping reference region")
        .arg_required_else_help(true)
        .arg(
            Arg::new("query")
                .short('a')
                .value_name("BED_A")
                .required(true)
                .help("Query BED file, or - for stdin"),
        )
        .arg(
            Arg::new("reference")
                .short('b')
                .value_name("BED_B")
                .required(true)
                .help("Reference BED file, e.g. CLIP-seq peaks"),
        )
        .arg(
            Arg::new("wb")
                .long("wb")
                .action(ArgAction::SetTrue)
                .help("Append the whole overlapping reference record to each query record"),
        )
        .arg(
            Arg::new("same-strand")
                .short('s')
                .action(ArgAction::SetTrue)
                .conflicts_with("opposite-strand")
                .help("Only report overlaps on the same strand"),
        )
        .arg(
            Arg::new("opposite-strand")
                .short('S')
                .action(ArgAction::SetTrue)
                .help("Only report overlaps on opposite strands"),
        )
        .arg(
            arg!(-o --output <OUTPUT> "Output BED file (default: stdout)")
                .id(OUTPUT_ARG)
                .required(false),
        )
}
