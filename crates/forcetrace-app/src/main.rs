//! Main application entry point.

use clap::{Parser, Subcommand};
use forcetrace_app::{
    AppResult, Replayer, TraceFiles, describe_import, import_trace, load_config, parse_log, read_text,
};
use forcetrace_core::EngineConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "forcetrace")]
#[command(about = "Capture, edit and exchange pressure traces")]
#[command(version)]
struct Cli {
    /// Engine settings as JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Canvas edge length, overrides the config
    #[arg(long, global = true)]
    size: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines input log and export the resulting trace
    Replay {
        /// Input log, one JSON step per line
        events: PathBuf,
        /// Trace name to save under --dir, prints to stdout when omitted
        #[arg(long)]
        name: Option<String>,
        /// Directory for saved traces
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Import a trace and report what could be read
    Import { trace: PathBuf },
}

fn engine_config(cli: &Cli) -> AppResult<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(size) = cli.size {
        config.total_size = size;
    }
    Ok(config)
}

fn run(cli: Cli) -> AppResult<()> {
    let config = engine_config(&cli)?;
    match cli.command {
        Command::Replay { events, name, dir } => {
            let steps = parse_log(&read_text(&events)?)?;
            let mut replayer = Replayer::new(config);
            let stats = replayer.run(&steps);
            log::info!("Replayed {} steps, {} ignored", stats.handled, stats.ignored);

            let text = replayer.engine().export_current()?;
            match name {
                Some(name) => {
                    let path = TraceFiles::new(dir)?.save(&name, &text)?;
                    println!("Exported {}", path.display());
                }
                None => println!("{}", text),
            }
        }
        Command::Import { trace } => {
            let text = read_text(&trace)?;
            let (_engine, report) = import_trace(&text, config)?;
            for row in &report.malformed {
                println!("line {}: {}", row.line, row.reason);
            }
            println!("{}", describe_import(&report));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting ForceTrace");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
