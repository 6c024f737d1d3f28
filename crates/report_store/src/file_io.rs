//! File I/O operations

use crate::{Result, StoreError};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write bytes to `path` all-or-nothing
///
/// The data goes to a temp file next to the destination which is then
/// renamed over it. On failure the temp file is removed and any existing
/// file at `path` is left untouched.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    if let Err(source) = write_temp(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }

    // Atomic rename
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn write_temp(temp_path: &Path, data: &[u8]) -> std::io::Result<()> {
    let file = File::create(temp_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Hidden, unique temp file in the same directory as `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let temp_name = format!(".{}.{}.tmp", name, uuid::Uuid::new_v4().simple());
    path.with_file_name(temp_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        // No temp files left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.docx");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, StoreError::WriteFailure { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_rename_failure_keeps_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the destination makes the rename fail
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), b"keep").unwrap();

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, StoreError::WriteFailure { .. }));
        assert_eq!(fs::read(path.join("keep.txt")).unwrap(), b"keep");

        let temp_files = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(temp_files, 0);
    }
}
