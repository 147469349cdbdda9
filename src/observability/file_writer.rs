//! Rotating file writer with size-based rotation and backup retention.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files retained after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe file writer that rotates when the file grows too large.
///
/// When the current file exceeds [`MAX_FILE_SIZE_BYTES`] it is renamed
/// with a timestamp suffix (`zinema-otlp.json.1234567890`), a fresh file
/// takes its place, and backups beyond [`MAX_BACKUP_FILES`] are removed.
/// The file handle is opened lazily on first write so construction never
/// fails.
pub struct RotatingFileWriter {
    file_path: PathBuf,
    handle: Mutex<Option<fs::File>>,
}

impl RotatingFileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            handle: Mutex::new(None),
        }
    }

    /// Writes one line, rotating first if the file is over the limit.
    ///
    /// The line is flushed immediately; a crash never loses more than
    /// the in-progress write.
    ///
    /// # Errors
    ///
    /// Fails on filesystem errors (permissions, disk full) or if another
    /// thread panicked while holding the lock.
    pub fn write_line(&self, json: &str) -> std::io::Result<()> {
        let mut handle = self.handle.lock().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::Other, format!("writer lock poisoned: {e}"))
        })?;

        self.rotate_if_needed(&mut handle)?;

        if handle.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *handle = Some(file);
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "no file handle available"))?;

        writeln!(file, "{json}")?;
        file.flush()?;
        drop(handle);

        Ok(())
    }

    fn rotate_if_needed(&self, handle: &mut Option<fs::File>) -> std::io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > MAX_FILE_SIZE_BYTES {
                *handle = None;
                self.rotate()?;
            }
        }
        Ok(())
    }

    fn rotate(&self) -> std::io::Result<()> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::from_secs(0))
            .as_secs();

        let backup_path = self.file_path.with_extension(format!("json.{timestamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    /// Deletes backups beyond the retention limit, newest first kept.
    ///
    /// Individual deletion failures are ignored so one undeletable file
    /// cannot stall cleanup.
    fn cleanup_old_backups(&self) -> std::io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "trace file has no parent directory"))?;

        let file_stem = self
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "invalid trace file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(file_stem) && name.contains(".json."))
            })
            .collect();

        backups.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_lines_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zinema-otlp.json");
        let writer = RotatingFileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }
}
