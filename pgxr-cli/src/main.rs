mod annotate;
mod common;
mod diplotype;
mod predict;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "pgxr";
    pub const BIN_NAME: &str = "pgxr";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Deterministic pharmacogenomic interpretation: phased VCF calls to diplotypes, phenotypes and CPIC drug risk.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose ...)
                .help("Increase logging verbosity (-v info, -vv debug)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(predict::cli::create_predict_cli())
        .subcommand(annotate::cli::create_annotate_cli())
        .subcommand(diplotype::cli::create_diplotype_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    // RUST_LOG still wins when set
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_module_path(false);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // PREDICT
        //
        Some((predict::cli::PREDICT_CMD, matches)) => {
            predict::handlers::run_predict(matches)?;
        }

        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        //
        // DIPLOTYPE
        //
        Some((diplotype::cli::DIPLOTYPE_CMD, matches)) => {
            diplotype::handlers::run_diplotype(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
