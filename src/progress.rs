//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di conversione.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Progress bar con `indicatif` durante la conversione
//! - `ConversionResult`: Accumulatore dei risultati di una esecuzione
//!
//! ## Statistiche tracciate:
//! - **converted_count**: JPEG sostituiti da un WebP più piccolo
//! - **bytes_saved**: Somma di `original - webp` sui file convertiti
//! - **kept_count**: File il cui WebP era più grande (originale mantenuto)
//! - **failed_count**: File saltati per errore
//!
//! ## Visual feedback:
//! ```text
//! [00:00:12] [========================>---------------] 12/20 (60%) ✅ photo.jpg: 41.3% saved
//! ```

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages the progress bar for the transcode loop
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        Self { bar }
    }

    /// Progress manager that draws nothing
    pub fn hidden(total_files: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_files);

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Remove the bar so the summary lines print cleanly
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

/// Aggregate outcome of a conversion run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub converted_count: usize,
    pub bytes_saved: u64,
    pub kept_count: usize,
    pub failed_count: usize,
}

impl ConversionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_converted(&mut self, original_size: u64, webp_size: u64) {
        self.converted_count += 1;
        self.bytes_saved += original_size.saturating_sub(webp_size);
    }

    pub fn add_kept(&mut self) {
        self.kept_count += 1;
    }

    pub fn add_failed(&mut self) {
        self.failed_count += 1;
    }

    pub fn files_processed(&self) -> usize {
        self.converted_count + self.kept_count + self.failed_count
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Total converted images: {}. Total reduced size: {}",
            self.converted_count,
            FileManager::format_size(self.bytes_saved)
        )
    }
}
