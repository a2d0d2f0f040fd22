//! # Transcoder Module
//!
//! Worker per la conversione di un singolo JPEG in WebP.
//!
//! ## Pipeline per file:
//! 1. Legge e decodifica il JPEG
//! 2. Applica l'hint di interpolazione bicubica (errore fatale se rifiutato)
//! 3. Codifica in WebP lossy e scrive il file `.webp` accanto all'originale
//! 4. Confronta le dimensioni: tiene il file più piccolo, elimina l'altro
//!
//! Dopo ogni chiamata a `transcode` esiste esattamente uno tra originale e
//! WebP: gli errori successivi alla scrittura rimuovono il `.webp` parziale.

use crate::{
    codec::{Decoder, Encoder, Interpolation},
    error::{ConvertError, Result},
    file_manager::{FileManager, ImageCandidate},
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What happened to one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    /// WebP was not larger: original deleted, WebP kept
    Converted {
        webp_path: PathBuf,
        original_size: u64,
        webp_size: u64,
    },
    /// WebP was larger: WebP deleted, original kept
    Kept { original_size: u64, webp_size: u64 },
}

/// Converts single candidates with injected codecs
pub struct Transcoder<D, E> {
    decoder: D,
    encoder: E,
    quality: f32,
}

impl<D: Decoder, E: Encoder> Transcoder<D, E> {
    pub fn new(decoder: D, encoder: E, quality: f32) -> Self {
        Self {
            decoder,
            encoder,
            quality,
        }
    }

    /// Convert one candidate applying the keep-smaller policy
    pub fn transcode(&self, candidate: &ImageCandidate) -> Result<TranscodeOutcome> {
        let webp_path = FileManager::webp_sibling(&candidate.path);
        if webp_path.exists() {
            return Err(ConvertError::TargetExists { path: webp_path });
        }

        let bytes = fs::read(&candidate.path)?;
        let mut bitmap = self.decoder.decode(&bytes)?;
        self.decoder
            .set_interpolation(&mut bitmap, Interpolation::Bicubic)?;
        let encoded = self.encoder.encode(&bitmap, self.quality)?;

        let webp_size = write_webp(&webp_path, &encoded)?;
        let original_size = candidate.size_bytes;

        if webp_size > original_size {
            debug!(
                "WebP larger than original ({} > {}), keeping {}",
                webp_size,
                original_size,
                candidate.path.display()
            );
            fs::remove_file(&webp_path)?;
            return Ok(TranscodeOutcome::Kept {
                original_size,
                webp_size,
            });
        }

        if let Err(e) = fs::remove_file(&candidate.path) {
            discard(&webp_path);
            return Err(e.into());
        }

        debug!(
            "Converted {} -> {} ({} -> {} bytes)",
            candidate.path.display(),
            webp_path.display(),
            original_size,
            webp_size
        );

        Ok(TranscodeOutcome::Converted {
            webp_path,
            original_size,
            webp_size,
        })
    }
}

/// Write the encoded image and return its on-disk size.
fn write_webp(path: &Path, encoded: &[u8]) -> Result<u64> {
    let written = fs::write(path, encoded).and_then(|_| fs::metadata(path));
    match written {
        Ok(metadata) => Ok(metadata.len()),
        Err(e) => {
            discard(path);
            Err(e.into())
        }
    }
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
