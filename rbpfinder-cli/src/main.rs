mod common;
mod dedupe;
mod intersect;
mod run;
mod slop;
mod tabulate;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "rbpfinder";
    pub const BIN_NAME: &str = "rbpfinder";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Find candidate RNA-binding protein sites in target regions")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSE_ARG)
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase logging verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(slop::cli::create_slop_cli())
        .subcommand(intersect::cli::create_intersect_cli())
        .subcommand(dedupe::cli::create_dedupe_cli())
        .subcommand(tabulate::cli::create_tabulate_cli())
        .subcommand(run::cli::create_run_cli())
}

fn init_logging(matches: &ArgMatches) {
    // globals propagate down, so the subcommand sees flags given on either side
    let verbosity = match matches.subcommand() {
        Some((_, sub)) => sub.get_count(consts::VERBOSE_ARG),
        None => matches.get_count(consts::VERBOSE_ARG),
    };
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // SLOP
        //
        Some((slop::cli::SLOP_CMD, matches)) => {
            slop::handlers::run_slop(matches)?;
        }

        //
        // INTERSECT
        //
        Some((intersect::cli::INTERSECT_CMD, matches)) => {
            intersect::handlers::run_intersect(matches)?;
        }

        //
        // DEDUPE
        //
        Some((dedupe::cli::DEDUPE_CMD, matches)) => {
            dedupe::handlers::run_dedupe(matches)?;
        }

        //
        // TABULATE
        //
        Some((tabulate::cli::TABULATE_CMD, matches)) => {
            tabulate::handlers::run_tabulate(matches)?;
        }

        //
        // FULL PIPELINE
        //
        Some((run::cli::RUN_CMD, matches)) => {
            run::handlers::run_pipeline(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
