//! File persistence for reference matrices
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic "GBEM" | version u8 | phrase count u32 | dimensions u32
//! phrase count x (byte length u32 | UTF-8 bytes)
//! fingerprint length u32 | fingerprint bytes
//! phrase count x dimensions x f32, one column after another
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::{Buf, BufMut, BytesMut};
use tracing::debug;

use crate::domain::goodbye::ReferenceEmbeddingMatrix;
use crate::domain::DomainError;

/// File name used inside the configured cache directory
pub const EMBEDDINGS_FILE_NAME: &str = "goodbye_embeddings.bin";

const MAGIC: &[u8; 4] = b"GBEM";
const FORMAT_VERSION: u8 = 1;

/// Serializes a matrix into the binary layout above
pub fn encode_matrix(matrix: &ReferenceEmbeddingMatrix) -> Vec<u8> {
    let phrase_bytes: usize = matrix.phrases().iter().map(|p| 4 + p.len()).sum();
    let mut buf = BytesMut::with_capacity(
        13 + phrase_bytes + 4 + matrix.fingerprint().len() + matrix.len() * matrix.dimensions() * 4,
    );

    buf.put_slice(MAGIC);
    buf.put_u8(FORMAT_VERSION);
    buf.put_u32_le(matrix.len() as u32);
    buf.put_u32_le(matrix.dimensions() as u32);

    for phrase in matrix.phrases() {
        buf.put_u32_le(phrase.len() as u32);
        buf.put_slice(phrase.as_bytes());
    }

    buf.put_u32_le(matrix.fingerprint().len() as u32);
    buf.put_slice(matrix.fingerprint().as_bytes());

    for column in matrix.columns() {
        for value in column {
            buf.put_f32_le(*value);
        }
    }

    buf.to_vec()
}

/// Parses the binary layout, rejecting truncated or inconsistent data
pub fn decode_matrix(mut data: &[u8]) -> Result<ReferenceEmbeddingMatrix, DomainError> {
    ensure_remaining(&data, 4 + 1 + 4 + 4)?;

    let mut magic = [0u8; 4];
    data.copy_to_slice(&mut magic);
    if &magic != MAGIC {
        return Err(DomainError::storage("Not a reference embeddings file"));
    }

    let version = data.get_u8();
    if version != FORMAT_VERSION {
        return Err(DomainError::storage(format!(
            "Unsupported reference embeddings format version {}",
            version
        )));
    }

    let count = data.get_u32_le() as usize;
    let dimensions = data.get_u32_le() as usize;

    let mut phrases = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        phrases.push(read_string(&mut data)?);
    }

    let fingerprint = read_string(&mut data)?;

    let expected = count
        .checked_mul(dimensions)
        .and_then(|values| values.checked_mul(4))
        .ok_or_else(|| DomainError::storage("Reference embeddings header is too large"))?;
    if data.remaining() != expected {
        return Err(DomainError::storage(format!(
            "Expected {} bytes of embedding data, found {}",
            expected,
            data.remaining()
        )));
    }

    let columns: Vec<Vec<f32>> = (0..count)
        .map(|_| (0..dimensions).map(|_| data.get_f32_le()).collect::<Vec<f32>>())
        .collect();

    ReferenceEmbeddingMatrix::from_parts(dimensions, phrases, fingerprint, columns)
}

fn ensure_remaining(data: &[u8], needed: usize) -> Result<(), DomainError> {
    if data.remaining() < needed {
        return Err(DomainError::storage("Reference embeddings file is truncated"));
    }
    Ok(())
}

fn read_string(data: &mut &[u8]) -> Result<String, DomainError> {
    ensure_remaining(data, 4)?;
    let len = data.get_u32_le() as usize;
    ensure_remaining(data, len)?;

    let text = std::str::from_utf8(&data[..len])
        .map_err(|e| DomainError::storage(format!("Invalid UTF-8 in embeddings file: {}", e)))?
        .to_string();
    data.advance(len);

    Ok(text)
}

/// Reference matrix persisted as a single file
#[derive(Debug, Clone)]
pub struct ReferenceEmbeddingFile {
    path: PathBuf,
}

impl ReferenceEmbeddingFile {
    /// File inside `directory` named [`EMBEDDINGS_FILE_NAME`]
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        Self::new(directory.as_ref().join(EMBEDDINGS_FILE_NAME))
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> Result<bool, DomainError> {
        tokio::fs::try_exists(&self.path).await.map_err(|e| {
            DomainError::storage(format!("Failed to stat {}: {}", self.path.display(), e))
        })
    }

    pub async fn read(&self) -> Result<ReferenceEmbeddingMatrix, DomainError> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), bytes = data.len(), "Loaded reference embeddings file");

        decode_matrix(&data)
    }

    /// Writes to a uniquely named temporary file in the target directory
    /// and renames it over the destination. Concurrent writers never share
    /// a temporary file; the last rename wins.
    pub async fn write(&self, matrix: &ReferenceEmbeddingMatrix) -> Result<(), DomainError> {
        let directory = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        tokio::fs::create_dir_all(&directory).await.map_err(|e| {
            DomainError::storage(format!("Failed to create {}: {}", directory.display(), e))
        })?;

        let path = self.path.clone();
        let data = encode_matrix(matrix);

        tokio::task::spawn_blocking(move || replace_file(&directory, &path, &data))
            .await
            .map_err(|e| DomainError::storage(format!("Embeddings write task failed: {}", e)))?
    }
}

fn replace_file(directory: &Path, path: &Path, data: &[u8]) -> Result<(), DomainError> {
    let mut tmp = tempfile::NamedTempFile::new_in(directory).map_err(|e| {
        DomainError::storage(format!(
            "Failed to create temporary file in {}: {}",
            directory.display(),
            e
        ))
    })?;

    tmp.write_all(data)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", tmp.path().display(), e))
        })?;

    tmp.persist(path).map_err(|e| {
        DomainError::storage(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;

    Ok(())
}
