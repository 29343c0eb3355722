//! Whole-file line reader/writer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flatdb_common::constants::LINE_TERMINATOR;
use flatdb_common::{DbError, DbResult};
use tracing::debug;

/// A text file accessed as a sequence of lines.
///
/// `LineFile` holds no open handle: each call re-opens the file, so the
/// contents seen are always whatever was last written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFile {
    /// The file path.
    path: PathBuf,
    /// Whether to fsync after writes.
    sync_writes: bool,
}

impl LineFile {
    /// Creates a handle for the given path. The file is not touched.
    pub fn new(path: impl Into<PathBuf>, sync_writes: bool) -> Self {
        Self {
            path: path.into(),
            sync_writes,
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads every line of the file.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped.
    pub fn read_lines(&self) -> DbResult<Vec<String>> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.map_io(e))?;
        Ok(content.lines().map(str::to_owned).collect())
    }

    /// Truncates the file and writes `lines`, each followed by a newline.
    pub fn write_lines<S: AsRef<str>>(&self, lines: &[S]) -> DbResult<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.map_io(e))?;

        let mut writer = BufWriter::new(file);
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(LINE_TERMINATOR.as_bytes())?;
        }
        writer.flush()?;

        if self.sync_writes {
            writer.get_ref().sync_all()?;
        }

        debug!(path = %self.path.display(), lines = lines.len(), "rewrote file");
        Ok(())
    }

    /// Creates the file, or truncates it if it already exists.
    pub fn create_empty(&self) -> DbResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.write_lines::<&str>(&[])
    }

    /// Copies the full contents of this file over `dest`.
    pub fn copy_to(&self, dest: &LineFile) -> DbResult<u64> {
        let bytes = fs::copy(&self.path, &dest.path).map_err(|e| self.map_io(e))?;

        if dest.sync_writes {
            File::open(&dest.path)?.sync_all()?;
        }

        debug!(
            from = %self.path.display(),
            to = %dest.path.display(),
            bytes,
            "copied file"
        );
        Ok(bytes)
    }

    /// Deletes the file. Deleting a missing file is not an error.
    pub fn remove(&self) -> DbResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Maps an I/O error, reporting a missing file as `StoreNotFound`.
    fn map_io(&self, err: io::Error) -> DbError {
        match err.kind() {
            io::ErrorKind::NotFound => DbError::StoreNotFound {
                path: self.path.clone(),
            },
            _ => DbError::Io { source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_lines() {
        let tmp = TempDir::new().unwrap();
        let file = LineFile::new(tmp.path().join("db.txt"), false);

        file.write_lines(&["#users", "id:Integer", "", "1"]).unwrap();

        let lines = file.read_lines().unwrap();
        assert_eq!(lines, vec!["#users", "id:Integer", "", "1"]);
        assert_eq!(
            fs::read_to_string(file.path()).unwrap(),
            "#users\nid:Integer\n\n1\n"
        );
    }

    #[test]
    fn test_read_crlf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("db.txt");
        fs::write(&path, "#a\r\nx:Text\r\n").unwrap();

        let lines = LineFile::new(&path, false).read_lines().unwrap();
        assert_eq!(lines, vec!["#a", "x:Text"]);
    }

    #[test]
    fn test_create_empty_truncates() {
        let tmp = TempDir::new().unwrap();
        let file = LineFile::new(tmp.path().join("nested/db.txt"), true);

        file.create_empty().unwrap();
        assert!(file.exists());
        assert!(file.read_lines().unwrap().is_empty());

        file.write_lines(&["#t"]).unwrap();
        file.create_empty().unwrap();
        assert!(file.read_lines().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let file = LineFile::new(tmp.path().join("missing.txt"), false);

        assert!(!file.exists());
        assert!(matches!(
            file.read_lines(),
            Err(DbError::StoreNotFound { .. })
        ));
        // Removing a missing file is fine.
        file.remove().unwrap();
    }

    #[test]
    fn test_copy_to() {
        let tmp = TempDir::new().unwrap();
        let src = LineFile::new(tmp.path().join("a.txt"), false);
        let dst = LineFile::new(tmp.path().join("b.txt"), true);

        src.write_lines(&["#t", "c:Bool"]).unwrap();
        dst.write_lines(&["stale"]).unwrap();
        src.copy_to(&dst).unwrap();

        assert_eq!(dst.read_lines().unwrap(), src.read_lines().unwrap());
    }
}
