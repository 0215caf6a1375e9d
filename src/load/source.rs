//! Byte sources: where package bytes come from.
//!
//! Provides bounded readers and size-limited file access so that a single
//! oversized selection cannot exhaust memory.

use crate::config::IOConfig;
use crate::error::{Result, SigviewError};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Asynchronously yields the bytes behind a user-provided handle.
#[allow(async_fn_in_trait)]
pub trait ByteSource {
    type Handle;

    async fn read(&self, handle: Self::Handle) -> Result<Vec<u8>>;
}

/// Resource limits for I/O operations.
#[derive(Debug, Clone)]
pub struct IOLimits {
    pub max_file_size: u64,
}

impl Default for IOLimits {
    fn default() -> Self {
        Self::from(&IOConfig::default())
    }
}

impl From<&IOConfig> for IOLimits {
    fn from(config: &IOConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
        }
    }
}

/// A bounded reader that limits the amount of data read.
pub struct BoundedReader<R> {
    inner: R,
    bytes_read: u64,
    limit: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: reader,
            bytes_read: 0,
            limit,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bytes_read >= self.limit {
            debug!("BoundedReader reached limit of {} bytes", self.limit);
            return Ok(0); // EOF
        }

        let remaining = self.limit - self.bytes_read;
        let max_to_read = std::cmp::min(buf.len() as u64, remaining) as usize;
        let n = self.inner.read(&mut buf[..max_to_read])?;
        self.bytes_read += n as u64;

        if self.bytes_read >= self.limit {
            warn!(
                "BoundedReader limit reached after reading {} bytes",
                self.bytes_read
            );
        }

        Ok(n)
    }
}

/// File reader that refuses files over the size limit.
pub struct SafeFileReader {
    file: File,
    size: u64,
    limits: IOLimits,
}

impl SafeFileReader {
    pub fn open<P: AsRef<Path>>(path: P, limits: IOLimits) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();

        if size > limits.max_file_size {
            warn!(
                "File too large: {} bytes (limit: {})",
                size, limits.max_file_size
            );
            return Err(SigviewError::ResourceExhausted {
                resource: "file size".to_string(),
                used: size,
                limit: limits.max_file_size,
            });
        }

        info!("Opened {:?} ({} bytes)", path, size);
        Ok(Self { file, size, limits })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read the entire file, never more than the size limit.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut reader = BoundedReader::new(&mut self.file, self.limits.max_file_size);
        let mut data = Vec::with_capacity(self.size as usize);
        reader.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// Reads package bytes from the filesystem on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct FileByteSource {
    limits: IOLimits,
}

impl FileByteSource {
    pub fn new(limits: IOLimits) -> Self {
        Self { limits }
    }
}

impl ByteSource for FileByteSource {
    type Handle = PathBuf;

    async fn read(&self, path: PathBuf) -> Result<Vec<u8>> {
        let limits = self.limits.clone();
        tokio::task::spawn_blocking(move || SafeFileReader::open(&path, limits)?.read_all())
            .await
            .map_err(|e| SigviewError::Io(io::Error::other(e)))?
    }
}
