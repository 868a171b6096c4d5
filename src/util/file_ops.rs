// File Operations for RSA Encryption/Decryption
// Reads and writes plaintext, ciphertext and key record files

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::RsaError;
use crate::rsa::KeyRecord;

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid key file {}: {}", .path.display(), .source)]
    InvalidKey {
        path: PathBuf,
        #[source]
        source: RsaError,
    },
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> FileError + '_ {
    move |source| FileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read entire file into memory
pub fn read_file(path: &Path) -> FileResult<Vec<u8>> {
    let mut file = File::open(path).map_err(io_error(path))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(io_error(path))?;
    Ok(data)
}

/// Write data to file, replacing its contents
pub fn write_file(path: &Path, data: &[u8]) -> FileResult<()> {
    let mut file = File::create(path).map_err(io_error(path))?;
    file.write_all(data).map_err(io_error(path))?;
    Ok(())
}

/// Read a JSON key record
pub fn read_key_record(path: &Path) -> FileResult<KeyRecord> {
    let invalid_key = |source: RsaError| FileError::InvalidKey {
        path: path.to_path_buf(),
        source,
    };
    let text = String::from_utf8(read_file(path)?).map_err(|e| invalid_key(e.into()))?;
    KeyRecord::from_json(&text).map_err(invalid_key)
}

/// Write a key record as pretty JSON
pub fn write_key_record(path: &Path, record: &KeyRecord) -> FileResult<()> {
    let text = record.to_json().map_err(|source| FileError::InvalidKey {
        path: path.to_path_buf(),
        source,
    })?;
    write_file(path, text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::{export_key, import_key, Keypair};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rsa_edu_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_file_roundtrip() {
        let path = temp_path("data.bin");
        write_file(&path, b"some bytes").unwrap();
        assert_eq!(read_file(&path).unwrap(), b"some bytes");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_key_record_roundtrip() {
        let path = temp_path("key.json");
        let keypair = Keypair::new(from_u64(3233), from_u64(17), Some(from_u64(413))).unwrap();

        write_key_record(&path, &export_key(&keypair, true)).unwrap();
        let restored = import_key(&read_key_record(&path).unwrap()).unwrap();
        assert_eq!(restored, keypair);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("does_not_exist");
        assert!(matches!(read_file(&path), Err(FileError::Io { .. })));
    }

    #[test]
    fn test_invalid_key_file() {
        let path = temp_path("bad_key.json");
        write_file(&path, b"not json").unwrap();
        assert!(matches!(
            read_key_record(&path),
            Err(FileError::InvalidKey { .. })
        ));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_key_file_not_utf8() {
        let path = temp_path("latin1_key.json");
        write_file(&path, b"{ \"n\": \"DKE=\xFF\" }").unwrap();
        assert!(matches!(
            read_key_record(&path),
            Err(FileError::InvalidKey {
                source: RsaError::Utf8(_),
                ..
            })
        ));
        std::fs::remove_file(&path).unwrap();
    }
}
