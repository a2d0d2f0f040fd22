//! # Main Converter Orchestrator Module
//!
//! Questo è il modulo che orchestra l'intero processo di conversione.
//!
//! ## Flusso di esecuzione:
//! 1. **Risoluzione path**: La cartella deve esistere ed essere una directory
//! 2. **File discovery**: Trova tutti i JPEG sopra la soglia
//! 3. **Report**: Stampa `Found: N files` (più la soglia, se presente)
//! 4. **Conferma**: Nessun file trovato o risposta negativa = fine senza modifiche
//! 5. **Conversione**: Un file alla volta, in ordine di scansione
//! 6. **Report finale**: File convertiti e spazio risparmiato
//!
//! ## Error handling:
//! - Errori per singoli file (decode, encode, I/O) saltano il file e vengono
//!   loggati e contati
//! - Il rifiuto dell'hint di interpolazione interrompe subito l'esecuzione:
//!   i file rimanenti non vengono toccati e il riepilogo non viene stampato
//!
//! ## Esempio:
//! ```rust,no_run
//! use webp_converter::{Config, Converter, JpegDecoder, Transcoder, WebpEncoder};
//! use webp_converter::prompt::ConsolePrompt;
//!
//! let config = Config::new("photos", 100);
//! let transcoder = Transcoder::new(JpegDecoder, WebpEncoder, config.webp_quality);
//! let mut converter = Converter::new(config, transcoder, ConsolePrompt::stdio())?;
//! converter.run(&mut std::io::stdout())?;
//! # Ok::<(), webp_converter::ConvertError>(())
//! ```

use crate::{
    codec::{Decoder, Encoder},
    config::Config,
    error::Result,
    file_manager::{FileManager, ImageCandidate},
    progress::{ConversionResult, ProgressManager},
    prompt::Confirm,
    transcoder::{TranscodeOutcome, Transcoder},
};
use std::io::Write;
use tracing::{debug, info, warn};

pub const CONFIRM_PROMPT: &str = "Convert this images? All converted images will be removed.";

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No candidate matched, nothing was asked
    NothingFound,
    /// The user did not confirm, nothing was touched
    Declined { candidates: usize },
    /// Every candidate was processed
    Completed(ConversionResult),
}

/// Scan, confirm, transcode orchestrator
pub struct Converter<D, E, C> {
    config: Config,
    transcoder: Transcoder<D, E>,
    confirmer: C,
}

impl<D: Decoder, E: Encoder, C: Confirm> Converter<D, E, C> {
    pub fn new(config: Config, transcoder: Transcoder<D, E>, confirmer: C) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            transcoder,
            confirmer,
        })
    }

    /// Run the whole pipeline, writing user-facing messages to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunOutcome> {
        let root = FileManager::resolve_root(&self.config.folder)?;
        info!("Searching JPEG images in: {}", root.display());

        let candidates = FileManager::find_candidates(&root, self.config.min_size_bytes());
        info!("Found {} candidate files", candidates.len());

        writeln!(out, "{}", found_message(candidates.len(), self.config.limit_kb))?;

        if candidates.is_empty() {
            return Ok(RunOutcome::NothingFound);
        }

        out.flush()?;
        if !self.confirmer.confirm(CONFIRM_PROMPT, false)? {
            debug!("Conversion declined, {} files left untouched", candidates.len());
            return Ok(RunOutcome::Declined {
                candidates: candidates.len(),
            });
        }

        let result = self.convert_all(&candidates)?;

        writeln!(out, "{}", result.format_summary())?;
        if result.failed_count > 0 {
            writeln!(out, "Failed to convert: {} files", result.failed_count)?;
        }

        Ok(RunOutcome::Completed(result))
    }

    /// Transcode every candidate in order, stopping only on fatal errors.
    fn convert_all(&self, candidates: &[ImageCandidate]) -> Result<ConversionResult> {
        let progress = if self.config.show_progress {
            ProgressManager::new(candidates.len() as u64)
        } else {
            ProgressManager::hidden(candidates.len() as u64)
        };
        let mut result = ConversionResult::new();

        for candidate in candidates {
            let name = candidate
                .path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            let message = match self.transcoder.transcode(candidate) {
                Ok(TranscodeOutcome::Converted {
                    original_size,
                    webp_size,
                    ..
                }) => {
                    result.add_converted(original_size, webp_size);
                    format!(
                        "✅ {}: {:.1}% saved",
                        name,
                        reduction_percent(original_size, webp_size)
                    )
                }
                Ok(TranscodeOutcome::Kept { .. }) => {
                    result.add_kept();
                    format!("⏩ {}: kept original", name)
                }
                Err(e) if e.is_fatal() => {
                    progress.finish();
                    return Err(e);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", candidate.path.display(), e);
                    result.add_failed();
                    format!("❌ {}: error", name)
                }
            };

            progress.update(&message);
        }

        progress.finish();
        info!(
            "Processed {} files: {} converted, {} kept, {} failed",
            result.files_processed(),
            result.converted_count,
            result.kept_count,
            result.failed_count
        );

        Ok(result)
    }
}

/// `Found: N files`, plus the threshold when one is set
pub fn found_message(count: usize, limit_kb: u64) -> String {
    let mut message = format!("Found: {} files", count);
    if limit_kb > 0 {
        message.push_str(&format!(" with size more than {} KB", limit_kb));
    }
    message
}

fn reduction_percent(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        0.0
    } else {
        ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
    }
}
