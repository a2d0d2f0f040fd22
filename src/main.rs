//! # WebP Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio del converter
//! - Mapping degli errori sui codici di uscita
//!
//! ## Esempio di utilizzo:
//! ```bash
//! webp-converter convert /path/to/photos --limit=200
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use webp_converter::{
    AssumeYes, Config, ConsolePrompt, ConvertError, Converter, JpegDecoder, RunOutcome,
    Transcoder, WebpEncoder,
};

#[derive(Parser)]
#[command(name = "webp-converter")]
#[command(about = "Convert JPEG images to WebP, keeping whichever file is smaller")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every JPEG under a folder to WebP
    Convert {
        /// Folder for search images
        folder: PathBuf,

        /// The lower limit of file size to convert in KB
        #[arg(long, default_value = "0")]
        limit: u64,

        /// Convert without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Don't draw the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Convert {
            folder,
            limit,
            yes,
            no_progress,
        } => {
            let config = Config {
                folder,
                limit_kb: limit,
                assume_yes: yes,
                show_progress: !no_progress,
                ..Default::default()
            };
            convert(config)
        }
    }
}

fn convert(config: Config) -> Result<ExitCode> {
    let transcoder = Transcoder::new(JpegDecoder, WebpEncoder, config.webp_quality);
    let mut stdout = io::stdout();

    let outcome = if config.assume_yes {
        Converter::new(config, transcoder, AssumeYes)?.run(&mut stdout)
    } else {
        Converter::new(config, transcoder, ConsolePrompt::stdio())?.run(&mut stdout)
    };

    exit_status(outcome, &mut stdout).map(ExitCode::from)
}

/// Map a run result to the process status: 1 for an invalid folder, which is
/// reported on `out`; other errors propagate.
fn exit_status<W: Write>(outcome: Result<RunOutcome, ConvertError>, out: &mut W) -> Result<u8> {
    match outcome {
        Ok(_) => Ok(0),
        Err(e @ ConvertError::InvalidPath { .. }) => {
            writeln!(out, "{}", e)?;
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
