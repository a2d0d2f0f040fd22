//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione di una singola esecuzione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri della conversione
//! - Fornisce validazione dei parametri di input
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `folder`: Cartella in cui cercare le immagini JPEG
//! - `limit_kb`: Dimensione minima in KB per considerare un file (default: 0)
//! - `webp_quality`: Qualità WebP lossy (default: 88)
//! - `assume_yes`: Salta la conferma interattiva (default: false)
//! - `show_progress`: Mostra la progress bar durante la conversione (default: true)
//!
//! La configurazione arriva solo dagli argomenti CLI: non esiste un file di
//! configurazione.

use crate::error::{ConvertError, Result};
use std::path::PathBuf;

/// Fixed lossy quality used for every conversion.
pub const DEFAULT_WEBP_QUALITY: f32 = 88.0;

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder searched recursively for JPEG files
    pub folder: PathBuf,
    /// Minimum file size in KB (1 KB = 1024 bytes)
    pub limit_kb: u64,
    /// WebP quality factor (0-100]
    pub webp_quality: f32,
    /// Answer the confirmation prompt with "yes" without reading stdin
    pub assume_yes: bool,
    /// Draw a progress bar while converting
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            limit_kb: 0,
            webp_quality: DEFAULT_WEBP_QUALITY,
            assume_yes: false,
            show_progress: true,
        }
    }
}

impl Config {
    pub fn new(folder: impl Into<PathBuf>, limit_kb: u64) -> Self {
        Self {
            folder: folder.into(),
            limit_kb,
            ..Default::default()
        }
    }

    /// Minimum candidate size in bytes.
    pub fn min_size_bytes(&self) -> u64 {
        self.limit_kb.saturating_mul(1024)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.webp_quality > 0.0 && self.webp_quality <= 100.0) {
            return Err(ConvertError::Validation(format!(
                "WebP quality must be between 0 and 100, got {}",
                self.webp_quality
            )));
        }

        Ok(())
    }
}
