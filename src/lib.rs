//! # WebP Converter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per i test
//!
//! ## Architettura dei moduli:
//! - `config`: Parametri di esecuzione e validazione
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery dei JPEG, path helpers, formattazione dimensioni
//! - `prompt`: Conferma interattiva prima delle operazioni distruttive
//! - `codec`: Decoder JPEG / encoder WebP dietro trait iniettabili
//! - `transcoder`: Conversione di un singolo file con policy keep-smaller
//! - `progress`: Progress bar e statistiche della conversione
//! - `converter`: Orchestratore principale del processo
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use webp_converter::{AssumeYes, Config, Converter, JpegDecoder, Transcoder, WebpEncoder};
//!
//! let config = Config::new("/path/to/photos", 0);
//! let transcoder = Transcoder::new(JpegDecoder, WebpEncoder, config.webp_quality);
//! let mut converter = Converter::new(config, transcoder, AssumeYes)?;
//! converter.run(&mut std::io::stdout())?;
//! # Ok::<(), webp_converter::ConvertError>(())
//! ```

pub mod codec;
pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod progress;
pub mod prompt;
pub mod transcoder;

pub use codec::{Bitmap, Decoder, Encoder, Interpolation, JpegDecoder, WebpEncoder};
pub use config::Config;
pub use converter::{Converter, RunOutcome};
pub use error::ConvertError;
pub use file_manager::{FileManager, ImageCandidate};
pub use progress::ConversionResult;
pub use prompt::{AssumeYes, Confirm, ConsolePrompt};
pub use transcoder::{TranscodeOutcome, Transcoder};
