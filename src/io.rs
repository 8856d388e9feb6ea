//! Positioned I/O abstraction. Every participating process holds its own
//! handle and its own file descriptor; reads are not collective and may
//! interleave freely across processes (they must not interleave on the
//! *same* handle — callers serialize if sharing one).

use std::io::{Read, Seek, SeekFrom};
use std::sync::Mutex;

use crate::error::{BpError, ErrorKind, Result};

/// A positioned-read source: seek to an absolute offset, read an exact
/// number of bytes. Implementations must be safe to call from `&self` (the
/// concrete file handle is reached through interior mutability).
pub trait PositionedReader: Send + Sync {
    fn len(&self) -> Result<u64>;
    fn read_at(&self, offset: u64, count: usize) -> Result<Vec<u8>>;
}

/// Backs reads with a real file on disk.
pub struct FileHandle {
    file: Mutex<std::fs::File>,
    size: u64,
}

impl FileHandle {
    pub fn open(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            BpError::new(
                ErrorKind::FileOpenError,
                format!("cannot open '{path}': {e}"),
            )
        })?;
        let size = file
            .metadata()
            .map_err(|e| {
                BpError::new(
                    ErrorKind::FileOpenError,
                    format!("cannot stat '{path}': {e}"),
                )
            })?
            .len();
        Ok(Self {
            file: Mutex::new(file),
            size,
        })
    }
}

impl PositionedReader for FileHandle {
    fn len(&self) -> Result<u64> {
        Ok(self.size)
    }

    fn read_at(&self, offset: u64, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        let mut guard = self
            .file
            .lock()
            .map_err(|_| BpError::new(ErrorKind::FileOpenError, "file handle mutex poisoned"))?;
        guard.seek(SeekFrom::Start(offset)).map_err(|e| {
            BpError::new(ErrorKind::FileOpenError, format!("seek failed: {e}"))
        })?;
        guard.read_exact(&mut buf).map_err(|e| {
            BpError::new(
                ErrorKind::CorruptedFooter,
                format!("short read at offset {offset} for {count} bytes: {e}"),
            )
        })?;
        Ok(buf)
    }
}

/// Backs reads with an in-memory byte buffer; used by tests to exercise the
/// planner/executor without touching the filesystem.
pub struct MemoryHandle {
    data: Vec<u8>,
}

impl MemoryHandle {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl PositionedReader for MemoryHandle {
    fn len(&self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn read_at(&self, offset: u64, count: usize) -> Result<Vec<u8>> {
        let start = offset as usize;
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                BpError::new(
                    ErrorKind::CorruptedFooter,
                    format!("read past end of buffer at offset {offset} for {count} bytes"),
                )
            })?;
        Ok(self.data[start..end].to_vec())
    }
}
