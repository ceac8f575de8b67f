use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use miette::GraphicalReportHandler;

use lineage::LineageError;
use lineage_cli::{Args, error_adapter::to_reportables};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(args.log_level)
        .init();
    debug!(args:?; "Parsed arguments");

    match lineage_cli::run(&args) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Prints one miette report per diagnostic to stderr.
fn report(err: &LineageError) {
    let handler = GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &reportable) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("error: {reportable}"),
        }
    }
}
