//! Rotating file writer with size-based rotation and backup retention.
//!
//! # Rotation Strategy
//!
//! Before each write the current size is checked. Once the file is larger
//! than the limit (10 MB by default) it is renamed to
//! `<stem>.json.<UTC timestamp>` and a fresh file is started. Backups whose
//! names sort lowest are the oldest; only the newest three survive.
//!
//! ```text
//! galleria-otlp.json                            ← current
//! galleria-otlp.json.20261019T101500.120Z       ← newest backup
//! galleria-otlp.json.20261018T220301.004Z
//! galleria-otlp.json.20261017T083012.551Z       ← oldest kept
//! ```

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to a file, rotating it once it grows past a size limit.
///
/// On rotation the current file is renamed to `<stem>.json.<UTC timestamp>`
/// and only the newest [`MAX_BACKUP_FILES`] backups are kept. The file is
/// opened lazily on the first write.
pub struct FileWriter {
    file_path: PathBuf,
    max_size: u64,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default 10 MB rotation limit.
    ///
    /// No file is touched until the first [`write_line`](Self::write_line).
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_max_size(file_path, MAX_FILE_SIZE_BYTES)
    }

    /// Creates a writer that rotates once the file exceeds `max_size` bytes.
    ///
    /// # Parameters
    ///
    /// * `file_path` - File to append to
    /// * `max_size` - Size in bytes past which the next write rotates first
    pub const fn with_max_size(file_path: PathBuf, max_size: u64) -> Self {
        Self {
            file_path,
            max_size,
            writer: Mutex::new(None),
        }
    }

    /// Writes `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors during rotation or writing, or if the lock was
    /// poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }
        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_size)
    }

    /// Moves the current file aside under a timestamped name, then prunes.
    fn rotate(&self) -> io::Result<()> {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let backup_path = self.file_path.with_extension(format!("json.{timestamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    /// Deletes all but the newest backups. Individual removal failures are
    /// ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
        let file_stem = self
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_backup_of(path, file_stem))
            .collect();

        // Timestamps sort lexicographically, newest last.
        backups.sort();
        let excess = backups.len().saturating_sub(MAX_BACKUP_FILES);
        for old_backup in backups.iter().take(excess) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

fn is_backup_of(path: &Path, file_stem: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix(file_stem))
        .is_some_and(|rest| rest.starts_with(".json."))
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_size", &self.max_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups_in(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| is_backup_of(path, "trace"))
            .collect()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_when_file_exceeds_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_max_size(path.clone(), 8);

        writer.write_line("0123456789").unwrap();
        writer.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        assert_eq!(backups_in(dir.path()).len(), 1);
    }

    #[test]
    fn keeps_only_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in ["20240101T000000", "20240102T000000", "20240103T000000", "20240104T000000"] {
            fs::write(dir.path().join(format!("trace.json.{stamp}")), "old").unwrap();
        }
        fs::write(dir.path().join("unrelated.json.20240101T000000"), "keep").unwrap();

        let writer = FileWriter::new(dir.path().join("trace.json"));
        writer.cleanup_old_backups().unwrap();

        let mut remaining = backups_in(dir.path());
        remaining.sort();
        assert_eq!(remaining.len(), MAX_BACKUP_FILES);
        assert!(remaining[0].ends_with("trace.json.20240102T000000"));
        assert!(dir.path().join("unrelated.json.20240101T000000").exists());
    }
}
