//! 標準ファイルシステム実装（std::fs を委譲）

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::path::Path;

/// 標準ライブラリの fs をそのまま委譲する FileSystem 実装
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::io_msg(format!("Failed to read '{}': {}", path.display(), e))
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        std::fs::create_dir_all(path).map_err(|e| {
            Error::io_msg(format!("Failed to create directory '{}': {}", path.display(), e))
        })
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::io_msg(format!("Failed to open '{}' for append: {}", path.display(), e))
            })?;
        Ok(Box::new(f))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_append_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("a.txt");
        let fs = StdFileSystem;
        assert!(!fs.exists(&path));
        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.open_append(&path).unwrap().write_all(b"um\n").unwrap();
        fs.open_append(&path).unwrap().write_all(b"dois\n").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "um\ndois\n");
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StdFileSystem.read_to_string(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
