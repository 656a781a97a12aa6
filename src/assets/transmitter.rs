//! Chunked file transmitter
//!
//! Streams an opened asset in chunks of at most `chunk_size` bytes, then one
//! zero-length terminal chunk. Every chunk except the last is full, so a file
//! of `N` bytes always yields `ceil(N / chunk_size)` data chunks.

use std::io;
use std::path::{Path, PathBuf};

use hyper::body::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

use super::AssetError;
use crate::http::body::{ChunkResult, ChunkedBody};
use crate::logger;

/// Chunks buffered between the reader task and the connection
const CHANNEL_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct ChunkedFileTransmitter {
    chunk_size: usize,
}

impl ChunkedFileTransmitter {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Open the asset for transfer
    pub async fn open(&self, path: &Path) -> Result<Transfer<File>, AssetError> {
        let file = File::open(path)
            .await
            .map_err(|source| AssetError::ResourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Transfer::new(file, path.to_path_buf(), self.chunk_size))
    }
}

/// An opened asset ready to be streamed
///
/// The reader is dropped, and the file handle released, when the transfer
/// finishes on any path.
#[derive(Debug)]
pub struct Transfer<R> {
    reader: R,
    path: PathBuf,
    chunk_size: usize,
}

impl<R> Transfer<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    pub fn new(reader: R, path: PathBuf, chunk_size: usize) -> Self {
        Self {
            reader,
            path,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Send every chunk and the terminal chunk to `tx`
    ///
    /// Returns the number of data bytes sent. On a read error the error is
    /// forwarded instead of the terminal chunk.
    pub async fn stream_to(mut self, tx: &mpsc::Sender<ChunkResult>) -> Result<u64, AssetError> {
        let mut buf = vec![0u8; self.chunk_size];
        let mut sent: u64 = 0;

        loop {
            let filled = match fill_chunk(&mut self.reader, &mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    let _ = tx.send(Err(io::Error::new(e.kind(), e.to_string()))).await;
                    return Err(self.failed(e));
                }
            };

            if filled > 0 {
                tx.send(Ok(Bytes::copy_from_slice(&buf[..filled])))
                    .await
                    .map_err(|_| self.failed(disconnected()))?;
                sent += filled as u64;
            }

            if filled < buf.len() {
                break;
            }
        }

        tx.send(Ok(Bytes::new()))
            .await
            .map_err(|_| self.failed(disconnected()))?;
        Ok(sent)
    }

    /// Spawn the transfer and return the body it feeds
    pub fn into_body(self) -> ChunkedBody {
        let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
        let label = self.path.display().to_string();

        tokio::spawn(async move {
            match self.stream_to(&tx).await {
                Ok(bytes) => logger::log_debug(&format!("Sent {bytes} bytes")),
                Err(AssetError::TransferFailed { path, source })
                    if source.kind() == io::ErrorKind::BrokenPipe =>
                {
                    logger::log_warning(&format!(
                        "Client went away during transfer of {}",
                        path.display()
                    ));
                }
                Err(e) => logger::log_error(&e.to_string()),
            }
        });

        ChunkedBody::new(rx, label)
    }

    fn failed(&self, source: io::Error) -> AssetError {
        AssetError::TransferFailed {
            path: self.path.clone(),
            source,
        }
    }
}

/// Read until `buf` is full or the reader is exhausted
async fn fill_chunk<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn disconnected() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "response receiver dropped")
}
