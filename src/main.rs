use anyhow::Context;
use clap::Parser;
use img_budget::batch::{create_progress_spinner, run_batch, BatchRun};
use img_budget::cli::Args;
use img_budget::logger;
use img_budget::{error, info, warn};
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let started = Instant::now();
    let args = Args::parse();

    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    match run(&args, started) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, started: Instant) -> anyhow::Result<ExitCode> {
    let options = args.to_options()?;
    info!("Desired size => ~ {} KB", options.target.kb());

    let spinner = create_progress_spinner("Starting...");
    let run = run_batch(&options, started, &spinner)
        .with_context(|| format!("Batch over {:?} aborted", options.input_dir))?;

    match run {
        BatchRun::EmptyDirectory => warn!("Images folder is empty"),
        BatchRun::NoJpegs => warn!("No jpegs found"),
        BatchRun::Completed(report) => report.print_summary(),
    }

    Ok(ExitCode::SUCCESS)
}
