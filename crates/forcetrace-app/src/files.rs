//! Trace files on disk.

use crate::{AppError, AppResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension used for exported traces.
pub const TRACE_EXTENSION: &str = "csv";

/// Directory of exported traces.
///
/// Traces are stored as `<name>.csv`; names are sanitized so any user-typed
/// file name maps to a file inside the directory.
#[derive(Debug, Clone)]
pub struct TraceFiles {
    base_path: PathBuf,
}

impl TraceFiles {
    /// Open a trace directory, creating it if it doesn't exist.
    pub fn new(base_path: PathBuf) -> AppResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                AppError::Io(format!("Failed to create trace directory {}: {}", base_path.display(), e))
            })?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a trace name.
    pub fn trace_path(&self, name: &str) -> PathBuf {
        let safe_name: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let safe_name = if safe_name.is_empty() { "default".to_string() } else { safe_name };
        self.base_path.join(format!("{}.{}", safe_name, TRACE_EXTENSION))
    }

    /// Write a trace and return where it went.
    pub fn save(&self, name: &str, text: &str) -> AppResult<PathBuf> {
        let path = self.trace_path(name);
        fs::write(&path, text)
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::info!("Saved trace to: {:?}", path);
        Ok(path)
    }

    /// Read a trace by name.
    pub fn load(&self, name: &str) -> AppResult<String> {
        read_text(&self.trace_path(name))
    }
}

/// Read a text file anywhere on disk.
pub fn read_text(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        _ => AppError::Io(format!("Failed to read {}: {}", path.display(), e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let files = TraceFiles::new(dir.path().to_path_buf()).unwrap();

        let path = files.save("session", "t,pos_x,pos_y,force\n0,0.5,0.5,1").unwrap();
        assert!(path.ends_with("session.csv"));
        assert_eq!(files.load("session").unwrap(), "t,pos_x,pos_y,force\n0,0.5,0.5,1");
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("traces").join("today");
        let files = TraceFiles::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(files.base_path(), nested.as_path());
    }

    #[test]
    fn test_sanitizes_name() {
        let dir = tempdir().unwrap();
        let files = TraceFiles::new(dir.path().to_path_buf()).unwrap();

        let path = files.trace_path("../a b:c");
        assert_eq!(path, dir.path().join("___a_b_c.csv"));
        assert_eq!(files.trace_path(""), dir.path().join("default.csv"));
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().unwrap();
        let files = TraceFiles::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(files.load("missing"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_read_text_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.csv");
        assert!(matches!(read_text(&missing), Err(AppError::NotFound(p)) if p == missing.display().to_string()));

        // A directory exists but cannot be read as text.
        assert!(matches!(read_text(dir.path()), Err(AppError::Io(_))));
    }
}
