//! Atomic file replacement
//!
//! tempfile + rename: the temp file lives in the target's own directory so
//! the final `persist` is a same-filesystem rename.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace `path` with `content` in one step.
///
/// Readers see either the old file or the new one, never a partial write.
/// Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let tmp = write_temp(path, content)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// First half of `atomic_write`: `content` fully written and synced to a
/// temp file next to `path`. Dropping the handle removes the temp file.
pub(crate) fn write_temp(path: &Path, content: &[u8]) -> io::Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        atomic_write(&path, b"Hello, World!").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"Hello, World!");
    }

    #[test]
    fn atomic_write_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        fs::write(&path, "Original").unwrap();
        atomic_write(&path, b"Replaced").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Replaced");
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("out.bin");

        atomic_write(&path, b"x").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");

        atomic_write(&path, b"one").unwrap();
        atomic_write(&path, b"two").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn failed_rename_keeps_target_and_cleans_temp() {
        let dir = tempdir().unwrap();
        // A non-empty directory can't be replaced by a rename
        let path = dir.path().join("out.bin");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"old").unwrap();

        let err = atomic_write(&path, b"new");

        assert!(err.is_err());
        assert_eq!(fs::read(path.join("keep")).unwrap(), b"old");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.bin")]);
    }
}
