use sha2::{Digest, Sha256};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8 * 1024;

/// SHA-256 digest of some content, compared to decide whether an output
/// changed. Never written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of_bytes(data: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data.as_ref());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hashes a file in fixed-size chunks. A missing file hashes like empty
    /// content.
    ///
    /// # Errors
    /// Any I/O error other than the file not existing.
    pub fn of_file(path: &Path) -> io::Result<Self> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::of_bytes(b"")),
            Err(err) => return Err(err),
        };

        let mut hasher = Sha256::new();
        let mut buffer = [0u8; CHUNK_SIZE];
        loop {
            let read = file.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }
        Ok(Self(hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
