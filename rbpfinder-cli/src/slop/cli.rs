use clap::{Command, arg, value_parser};

use crate::common::OUTPUT_ARG;

pub const SLOP_CMD: &str = "slop";

pub fn create_slop_cli() -> Command {
    Command::new(SLOP_CMD)
        .about("Expand every region on both sides, bounded by chromosome length")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <BED> "Input BED file, or - for stdin").required(true))
        .arg(
            arg!(-g --genome <CHROM_SIZES> "Chromosome size table (name and length per line)")
                .required(true),
        )
        .arg(
            arg!(-b --both <BASES> "Bases to add to each side of every region")
                .required(true)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(-o --output <OUTPUT> "Output BED file (default: stdout)")
                .id(OUTPUT_ARG)
                .required(false),
        )
}
