//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom della libreria.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare tutti gli errori possibili
//! - Distingue gli errori fatali (interrompono l'intera esecuzione) da quelli
//!   per singolo file (il file viene saltato e segnalato)
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `InvalidPath`: La cartella indicata non esiste o non è una directory
//! - `Decode`: Il file non è un JPEG valido
//! - `Interpolation`: Il codec rifiuta l'hint di interpolazione (fatale)
//! - `Encode`: Errore dell'encoder WebP
//! - `TargetExists`: Esiste già un file nel path `.webp` di destinazione
//! - `Io`: Errori di I/O (permessi, disco pieno, etc.)
//! - `Validation`: Errori di validazione della configurazione
//!
//! ## Esempio:
//! ```rust
//! use webp_converter::ConvertError;
//!
//! let err = ConvertError::Interpolation("bicubic".to_string());
//! assert!(err.is_fatal());
//! ```

use std::path::PathBuf;

/// Custom error types for JPEG to WebP conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Can't find path {}", .path.display())]
    InvalidPath { path: PathBuf },

    #[error("Not a valid JPEG image: {0}")]
    Decode(String),

    #[error("Can not set interpolation: {0}")]
    Interpolation(String),

    #[error("WebP encoding error: {0}")]
    Encode(String),

    #[error("Target file already exists: {}", .path.display())]
    TargetExists { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

impl ConvertError {
    /// Whether the error aborts the whole run instead of skipping one file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConvertError::Interpolation(_))
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
