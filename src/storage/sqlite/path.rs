// File: src/storage/sqlite/path.rs

//! Byte-key encoding of [`PostPath`] for storage and index ordering.
//!
//! Each path element is written as 8 big-endian bytes, so SQLite's
//! byte-wise BLOB comparison orders stored paths exactly as the
//! element-wise numeric comparison would. Post ids are positive, which
//! keeps the i64 -> u64 cast order-preserving.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::error::{ServerError, StorageError};
use crate::traits::PostPath;

/// Encode a path as its byte-comparable key
pub fn path_to_bytes(path: &PostPath) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(path.len() * 8);
    for &id in path.as_slice() {
        bytes.extend_from_slice(&(id as u64).to_be_bytes());
    }
    bytes
}

/// Decode a stored byte key back into a path
pub fn path_from_bytes(bytes: &[u8]) -> Result<PostPath, ServerError> {
    if bytes.is_empty() || bytes.len() % 8 != 0 {
        return Err(ServerError::Storage(StorageError::QueryFailed(format!(
            "malformed path key of {} bytes",
            bytes.len()
        ))));
    }
    let chain = bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            u64::from_be_bytes(buf) as i64
        })
        .collect();
    Ok(PostPath::from_vec(chain))
}

impl ToSql for PostPath {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(path_to_bytes(self)))
    }
}

impl FromSql for PostPath {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let bytes = value.as_blob()?;
        path_from_bytes(bytes).map_err(|e| FromSqlError::Other(Box::new(StorageFromSql(e))))
    }
}

/// Adapter so a decode failure can travel through rusqlite's FromSql
#[derive(Debug)]
struct StorageFromSql(ServerError);

impl std::fmt::Display for StorageFromSql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for StorageFromSql {}
