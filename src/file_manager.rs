//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery dei JPEG.
//!
//! ## Responsabilità:
//! - Risoluzione della cartella di input in un path assoluto esistente
//! - Discovery ricorsiva di file `.jpg`/`.jpeg` (case-insensitive)
//! - Filtro per dimensione minima (soglia in KB)
//! - Calcolo del path `.webp` accanto all'originale
//! - Formattazione human-readable delle dimensioni
//!
//! ## Ordine dei file:
//! La walk è ordinata per nome file, quindi lo stesso albero produce sempre
//! la stessa sequenza di candidati all'interno di una esecuzione.
//!
//! ## Esempio:
//! ```rust,no_run
//! use std::path::Path;
//! use webp_converter::file_manager::FileManager;
//!
//! let root = FileManager::resolve_root(Path::new("photos"))?;
//! for candidate in FileManager::scan(&root, 100 * 1024) {
//!     println!("{} ({})", candidate.path.display(), FileManager::format_size(candidate.size_bytes));
//! }
//! # Ok::<(), webp_converter::ConvertError>(())
//! ```

use crate::error::{ConvertError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;

/// A JPEG file found by the scan that meets the size threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Manages file discovery and path helpers
pub struct FileManager;

impl FileManager {
    /// Resolve `folder` to an absolute path that must be an existing directory.
    pub fn resolve_root(folder: &Path) -> Result<PathBuf> {
        let invalid = || ConvertError::InvalidPath { path: folder.to_path_buf() };

        let root = folder.canonicalize().map_err(|_| invalid())?;
        if !root.is_dir() {
            return Err(invalid());
        }

        Ok(root)
    }

    /// Lazily walk `root` yielding JPEG files of at least `min_size` bytes.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn scan(root: &Path, min_size: u64) -> impl Iterator<Item = ImageCandidate> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && Self::is_jpeg(entry.path()))
            .filter_map(move |entry| {
                let size_bytes = match entry.metadata() {
                    Ok(metadata) => metadata.len(),
                    Err(e) => {
                        warn!("Failed to read size of {}: {}", entry.path().display(), e);
                        return None;
                    }
                };

                (size_bytes >= min_size).then(|| ImageCandidate {
                    path: entry.into_path(),
                    size_bytes,
                })
            })
    }

    /// Collect all candidates under `root`, in scan order.
    pub fn find_candidates(root: &Path, min_size: u64) -> Vec<ImageCandidate> {
        Self::scan(root, min_size).collect()
    }

    /// Check if a file name ends in `.jpg` or `.jpeg` (any case).
    ///
    /// Matches on the name suffix, so a file called just `.jpg` counts too.
    pub fn is_jpeg(path: &Path) -> bool {
        path.file_name()
            .map(|name| Self::jpeg_suffix_len(&name.to_string_lossy()).is_some())
            .unwrap_or(false)
    }

    /// Path of the `.webp` file written next to `jpeg_path`.
    ///
    /// Only the final suffix is replaced, so `IMG.JPG` becomes `IMG.webp`
    /// and `.jpg` becomes `.webp`.
    pub fn webp_sibling(jpeg_path: &Path) -> PathBuf {
        let stem = jpeg_path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| Self::jpeg_suffix_len(name).map(|len| &name[..name.len() - len]));

        match stem {
            Some(stem) => jpeg_path.with_file_name(format!("{}.webp", stem)),
            None => jpeg_path.with_extension("webp"),
        }
    }

    /// Byte length of a trailing `.jpg`/`.jpeg`, if the name has one
    fn jpeg_suffix_len(name: &str) -> Option<usize> {
        let lower = name.to_ascii_lowercase();
        [".jpeg", ".jpg"]
            .iter()
            .find(|suffix| lower.ends_with(*suffix))
            .map(|suffix| suffix.len())
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        if size >= GB {
            format!("{}GB", Self::format_decimal(size as f64 / GB as f64))
        } else if size >= MB {
            format!("{}MB", Self::format_decimal(size as f64 / MB as f64))
        } else if size >= KB {
            format!("{}KB", Self::format_decimal(size as f64 / KB as f64))
        } else {
            format!("{} bytes", Self::group_thousands(&size.to_string()))
        }
    }

    /// Two decimals rounded half away from zero, period as decimal point,
    /// comma-grouped integer part.
    fn format_decimal(value: f64) -> String {
        let cents = (value * 100.0).round() as u64;
        format!(
            "{}.{:02}",
            Self::group_thousands(&(cents / 100).to_string()),
            cents % 100
        )
    }

    fn group_thousands(digits: &str) -> String {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[test]
    fn test_is_jpeg() {
        assert!(FileManager::is_jpeg(Path::new("a.jpg")));
        assert!(FileManager::is_jpeg(Path::new("a.JPEG")));
        assert!(FileManager::is_jpeg(Path::new("dir/b.JpG")));
        assert!(!FileManager::is_jpeg(Path::new("a.png")));
        assert!(!FileManager::is_jpeg(Path::new("a.jpg.bak")));
        assert!(!FileManager::is_jpeg(Path::new("jpg")));
        assert!(!FileManager::is_jpeg(Path::new("dir/photojpg")));
    }

    #[test]
    fn test_bare_suffix_name_is_jpeg() {
        assert!(FileManager::is_jpeg(Path::new(".jpg")));
        assert!(FileManager::is_jpeg(Path::new("dir/.JPEG")));
        assert_eq!(FileManager::webp_sibling(Path::new("/p/.jpg")), PathBuf::from("/p/.webp"));
        assert_eq!(FileManager::webp_sibling(Path::new("/p/.Jpeg")), PathBuf::from("/p/.webp"));

        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), ".jpg", 10);
        let found = FileManager::find_candidates(temp_dir.path(), 0);
        assert_eq!(found.len(), 1);
        assert!(found[0].path.ends_with(".jpg"));
    }

    #[test]
    fn test_webp_sibling() {
        assert_eq!(FileManager::webp_sibling(Path::new("/p/a.jpg")), PathBuf::from("/p/a.webp"));
        assert_eq!(FileManager::webp_sibling(Path::new("/p/B.JPEG")), PathBuf::from("/p/B.webp"));
        assert_eq!(
            FileManager::webp_sibling(Path::new("/p/x.jpeg.jpg")),
            PathBuf::from("/p/x.jpeg.webp")
        );
    }

    #[test]
    fn test_format_size_boundaries() {
        assert_eq!(FileManager::format_size(0), "0 bytes");
        assert_eq!(FileManager::format_size(1023), "1,023 bytes");
        assert_eq!(FileManager::format_size(1024), "1.00KB");
        assert_eq!(FileManager::format_size(1536), "1.50KB");
        assert_eq!(FileManager::format_size(1_048_576), "1.00MB");
        assert_eq!(FileManager::format_size(1_073_741_824), "1.00GB");
    }

    #[test]
    fn test_format_size_rounds_halves_up() {
        // 1.125 and 1.375 are exact in binary
        assert_eq!(FileManager::format_size(1152), "1.13KB");
        assert_eq!(FileManager::format_size(1408), "1.38KB");
        assert_eq!(FileManager::format_size(1_179_648), "1.13MB");
        assert_eq!(FileManager::format_size(1_207_959_552), "1.13GB");
    }

    #[test]
    fn test_format_size_groups_large_values() {
        assert_eq!(FileManager::format_size(1500 * GB), "1,500.00GB");
        assert_eq!(FileManager::format_size(1_048_575), "1,024.00KB");
    }

    #[test]
    fn test_resolve_root_rejects_missing_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_file(temp_dir.path(), "a.jpg", 10);

        let missing = temp_dir.path().join("nope");
        assert!(matches!(
            FileManager::resolve_root(&missing),
            Err(ConvertError::InvalidPath { .. })
        ));
        assert!(matches!(
            FileManager::resolve_root(&file),
            Err(ConvertError::InvalidPath { .. })
        ));

        let root = FileManager::resolve_root(temp_dir.path()).unwrap();
        assert!(root.is_absolute());
    }

    #[test]
    fn test_scan_filters_extension_and_size() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(root, "big.jpg", 4096);
        write_file(root, "small.jpeg", 100);
        write_file(root, "exact.JPG", 2048);
        write_file(root, "nested/deep/photo.Jpeg", 3000);
        write_file(root, "notes.txt", 5000);
        write_file(root, "image.png", 5000);

        let all: Vec<_> = FileManager::find_candidates(root, 0)
            .into_iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(all, vec!["big.jpg", "exact.JPG", "photo.Jpeg", "small.jpeg"]);

        let limited = FileManager::find_candidates(root, 2 * 1024);
        assert_eq!(limited.len(), 3);
        assert!(limited.iter().all(|c| c.size_bytes >= 2048));
    }

    #[test]
    fn test_scan_order_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["c.jpg", "a.jpg", "sub/b.jpg", "b.jpg"] {
            write_file(temp_dir.path(), name, 10);
        }

        let first = FileManager::find_candidates(temp_dir.path(), 0);
        let second = FileManager::find_candidates(temp_dir.path(), 0);
        assert_eq!(first, second);
    }
}
