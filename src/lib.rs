pub mod args;
pub mod commands;
pub mod config;
pub mod errors;
pub mod executor;
pub mod perception;
pub mod session;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use crate::args::Args;
use crate::commands::Controller;
use crate::errors::SeeMouseResult;
use crate::executor::input::{DryRunInjector, EnigoInjector, InputInjector};
use crate::executor::resolver::ActionResolver;
use crate::perception::contours::ImageprocContourFinder;
use crate::perception::matcher::Matcher;
use crate::perception::ocr::TesseractCli;
use crate::perception::pipeline::Analyzer;
use crate::perception::screenshot::{ImageFileSource, ScreenSource};
use crate::perception::traits::FrameSource;
use crate::session::Session;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Entry point for the `seemouse` binary. Environment failures (no screen,
/// no OCR engine, no input backend, bad config) exit with status 1; a query
/// that matches nothing does not.
pub fn run() -> ExitCode {
    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose);

    match try_run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_environment() {
                tracing::error!(error = %e, "environment not usable");
            } else {
                tracing::error!(error = %e, "run failed");
            }
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: &Args) -> SeeMouseResult<()> {
    let cfg = config::load_config(args.config.as_deref())?;

    if let Some(path) = &args.write_default_config {
        return config::save_config(&cfg, path);
    }

    let source: Box<dyn FrameSource> = match &args.image {
        Some(path) => Box::new(ImageFileSource::open(path)?),
        None => Box::new(ScreenSource::primary()?),
    };
    let recognizer = TesseractCli::new(&cfg.ocr)?;
    let analyzer = Analyzer::new(Box::new(recognizer), Box::new(ImageprocContourFinder::new()), &cfg);
    let session = Session::new(source, analyzer, Matcher::new(&cfg.matching));

    let injector: Box<dyn InputInjector> = if args.dry_run() {
        tracing::info!("dry run: pointer actions will only be logged");
        Box::new(DryRunInjector)
    } else {
        Box::new(EnigoInjector::new()?)
    };
    let resolver = ActionResolver::new(injector, cfg.pacing.clone());
    let mut controller = Controller::new(session, resolver, std::env::temp_dir());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.one_shot() {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        return controller.run_interactive(&mut input, &mut out);
    }

    if let Some(target) = &args.target {
        controller.act_on(target, args.action, &mut out)?;
    } else {
        // Keep stdout clean for --list JSON.
        controller.refresh(&mut io::stderr())?;
    }

    if let Some(path) = &args.annotate {
        controller.write_annotation(path)?;
    }
    if args.list {
        serde_json::to_writer_pretty(&mut out, controller.session().elements())?;
        writeln!(out)?;
    }
    Ok(())
}
