use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lexiscope::banner::{BannerInfo, print_banner, print_session_summary};
use lexiscope::commands::{CommandResult, SessionInfo, handle_command};
use lexiscope::config::{EngineConfig, HostConfig};
use lexiscope::consts::DEFAULT_LOG_LEVEL;
use lexiscope::file::FileRef;
use lexiscope::processor::command::CommandProcessor;
use lexiscope::surface::terminal::TerminalSurface;
use lexiscope::{Outcome, PipelineController, Session};

#[derive(Parser)]
#[command(
    name = "lexiscope",
    version,
    about = "Pick a text file, hand it to an analysis engine, read the result."
)]
struct Cli {
    /// Analysis engine executable (path, or a name on PATH)
    #[arg(short, long, default_value = "text-analyzer")]
    engine: PathBuf,

    /// Extra argument for the engine (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Text file to select at startup
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Analyze --file once and exit (non-interactive)
    #[arg(short, long, default_value_t = false, requires = "file")]
    run: bool,

    /// Diagnostic log level for stderr (error, warn, info, debug, trace)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl From<Cli> for HostConfig {
    fn from(cli: Cli) -> Self {
        Self {
            engine: EngineConfig {
                program: cli.engine,
                args: cli.engine_args,
            },
            file: cli.file,
            run_once: cli.run,
            log_level: cli.log_level,
        }
    }
}

/// Attempt counts for the farewell line.
#[derive(Default)]
struct Tally {
    succeeded: u64,
    failed: u64,
}

/// The failure was already written to the log surface; only the exit
/// status is left to report.
fn exit_code(outcome: &Outcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

impl Tally {
    fn record(&mut self, outcome: &Outcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = HostConfig::from(Cli::parse());
    init_tracing(&config.log_level)?;

    print_banner(&BannerInfo {
        engine: &config.engine.program,
        engine_args: &config.engine.args,
        file: config.file.as_deref(),
    });

    let session = Arc::new(Session::new());
    let pipeline = PipelineController::new(session.clone(), Arc::new(TerminalSurface::new()));

    if let Some(path) = &config.file {
        pipeline.on_file_picked(Some(FileRef::from_path(path)));
    }

    // Engine initialization runs in the background; its completion is the
    // one-time readiness event.
    let (engine_tx, mut engine_rx) = oneshot::channel();
    let engine_config = config.engine.clone();
    tokio::spawn(async move {
        let _ = engine_tx.send(CommandProcessor::load(engine_config).await);
    });

    let mut tally = Tally::default();

    // Single attempt mode
    if config.run_once {
        let engine = engine_rx.await.context("engine loader stopped")??;
        pipeline.on_engine_ready(Arc::new(engine));
        let outcome = pipeline.analyze().await;
        tally.record(&outcome);
        print_session_summary(tally.succeeded, tally.failed);
        return Ok(exit_code(&outcome));
    }

    let engine_label = config.engine.program.display().to_string();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut engine_pending = true;

    loop {
        print!("\nlexiscope> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            loaded = &mut engine_rx, if engine_pending => {
                engine_pending = false;
                match loaded {
                    Ok(Ok(engine)) => pipeline.on_engine_ready(Arc::new(engine)),
                    Ok(Err(e)) => {
                        error!(error = %e, "engine failed to load");
                        eprintln!("\nengine failed to load: {e:#}");
                    }
                    Err(_) => eprintln!("\nengine loader stopped"),
                }
                continue;
            }
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let selected = session.selected_file();
        let log = session.log();
        let info = SessionInfo {
            engine: &engine_label,
            engine_ready: session.engine_ready(),
            state: session.state(),
            file: selected.as_ref().map(|f| f.name()),
            log: &log,
        };

        match handle_command(input, &info) {
            CommandResult::NotACommand => {
                println!("not a command; /open a file, then /analyze (see /help)");
            }
            CommandResult::Handled => {}
            CommandResult::Open(path) => pipeline.on_file_picked(Some(FileRef::from_path(path))),
            CommandResult::Clear => pipeline.on_file_picked(None),
            CommandResult::Analyze => {
                // Attempts are not cancellable; a read or engine call always
                // runs to completion.
                let outcome = pipeline.analyze().await;
                tally.record(&outcome);
            }
            CommandResult::Quit => break,
        }
    }

    print_session_summary(tally.succeeded, tally.failed);
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level: {level}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
