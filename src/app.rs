use crate::cli::{BatchArgs, Cli, Commands};
use anyhow::{Context, Result};
use ffbatch::config::Config;
use ffbatch::engine::worker::{BatchWorker, WorkerMessage};
use ffbatch::engine::{self, BatchRequest, JobList, ParamInput, ValidationError};
use ffbatch::logging::{self, LogTarget};
use ffbatch::ui;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

const EXIT_FAILED_FILES: i32 = 1;
const EXIT_VALIDATION: i32 = 2;

const WORKER_POLL: Duration = Duration::from_millis(200);

pub fn run(cli: Cli) {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    // Handle subcommands first
    if let Some(command) = cli.command {
        if let Err(e) = logging::init(LogTarget::Stderr, cli.verbose) {
            eprintln!("Warning: {:#}", e);
        }

        match command {
            Commands::Run { batch, json } => handle_run(&config, batch, json),
            Commands::DryRun { batch } => handle_dry_run(&config, batch),
            Commands::CheckFfmpeg => handle_check_ffmpeg(&config),
        }
        return;
    }

    // The TUI owns the terminal, so diagnostics go to a file or nowhere
    let target = cli
        .log_file
        .as_deref()
        .map(LogTarget::File)
        .unwrap_or(LogTarget::Off);
    if let Err(e) = logging::init(target, cli.verbose) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    let options = ui::UiOptions {
        paths: cli.paths,
        output_dir: cli.output_dir.or_else(|| config.defaults.output_dir.clone()),
    };

    if let Err(e) = ui::run_ui(options, &config) {
        eprintln!("Error running UI: {:#}", e);
        process::exit(1);
    }
}

/// Merge CLI flags over config defaults and validate into a request
fn prepare_request(config: &Config, batch: BatchArgs) -> Result<BatchRequest> {
    let expanded = engine::expand_inputs(&batch.paths).context("Failed to read input paths")?;

    let mut jobs = JobList::new();
    jobs.add_many(expanded);

    let defaults = config.defaults.param_input();
    let input = ParamInput {
        frame_rate: batch.fps.unwrap_or(defaults.frame_rate),
        quality_factor: batch.crf.unwrap_or(defaults.quality_factor),
        audio_bitrate: batch.audio_bitrate.unwrap_or(defaults.audio_bitrate),
    };

    let output_dir = batch
        .output_dir
        .or_else(|| config.defaults.output_dir.clone())
        .unwrap_or_else(PathBuf::new);

    let request = engine::start_batch(&jobs.snapshot(), &output_dir, &input)?;
    Ok(request)
}

fn exit_for_prepare_error(e: anyhow::Error) -> ! {
    eprintln!("Error: {:#}", e);
    if e.downcast_ref::<ValidationError>().is_some() {
        process::exit(EXIT_VALIDATION);
    }
    process::exit(1);
}

fn handle_run(config: &Config, batch: BatchArgs, json: bool) {
    let request = match prepare_request(config, batch) {
        Ok(request) => request,
        Err(e) => exit_for_prepare_error(e),
    };

    let worker = BatchWorker::new();
    if let Err(e) = worker.spawn(request, config.encoder.clone()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    let mut failed = 0usize;
    loop {
        let msg = match worker.receiver().recv_timeout(WORKER_POLL) {
            Ok(msg) => msg,
            Err(RecvTimeoutError::Timeout) if !worker.is_finished() => continue,
            // The thread is gone; anything it sent is already queued
            Err(_) => match worker.receiver().try_recv() {
                Ok(msg) => msg,
                Err(_) => {
                    eprintln!("Error: batch worker stopped before completing");
                    process::exit(1);
                }
            },
        };

        if let WorkerMessage::Outcome(ref outcome) = msg {
            if !outcome.success {
                failed += 1;
            }
        }

        if json {
            match serde_json::to_string(&msg) {
                Ok(line) => println!("{}", line),
                Err(e) => eprintln!("Warning: failed to serialize event: {}", e),
            }
        } else if let WorkerMessage::Log(ref line) = msg {
            println!(
                "[{}] {}",
                line.timestamp.format("%H:%M:%S"),
                line.display_text()
            );
        }

        if matches!(msg, WorkerMessage::BatchComplete { .. }) {
            break;
        }
    }

    if failed > 0 {
        process::exit(EXIT_FAILED_FILES);
    }
}

fn handle_dry_run(config: &Config, batch: BatchArgs) {
    let request = match prepare_request(config, batch) {
        Ok(request) => request,
        Err(e) => exit_for_prepare_error(e),
    };

    for line in engine::batch::dry_run_lines(&request, &config.encoder) {
        println!("{}", line);
    }
    println!("Total jobs: {}", request.files.len());
}

fn handle_check_ffmpeg(config: &Config) {
    match engine::ffmpeg_version(&config.encoder.program) {
        Ok(version) => {
            println!("{} found: {}", config.encoder.program, version);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
