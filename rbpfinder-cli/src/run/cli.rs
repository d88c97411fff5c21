use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const RUN_CMD: &str = "run";

pub fn create_run_cli() -> Command {
    Command::new(RUN_CMD)
        .about("Expand targets, overlap them with CLIP-seq peaks and count binding proteins")
        .arg_required_else_help(true)
        .arg(arg!(--targets <BED> "Target regions, e.g. exons").required(true))
        .arg(arg!(--organism <ORGANISM> "Organism preset, e.g. human or mouse").required(true))
        .arg(arg!(--config <TOML> "Pipeline configuration file").required(false))
        .arg(
            Arg::new("chrom-sizes")
                .long("chrom-sizes")
                .value_name("CHROM_SIZES")
                .required(false)
                .help("Chromosome size table, overrides the organism preset"),
        )
        .arg(
            arg!(--peaks <BED> "CLIP-seq peak file, overrides the organism preset")
                .required(false),
        )
        .arg(
            arg!(--margin <BASES> "Bases to add to each side of every target")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--column <COLUMN> "1-based column of the overlaps to count")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--timeout <SECONDS> "Give up after this many seconds")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("wb")
                .long("wb")
                .action(ArgAction::SetTrue)
                .help("Append peak records to the overlaps regardless of the organism preset"),
        )
        .arg(
            arg!(--outdir <DIR> "Directory for the three output files (default: current dir)")
                .required(false),
        )
}
