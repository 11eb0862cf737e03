//! Per-request pump: sequences each file through decompression and
//! filtering into one ordered output channel.
//!
//! One file fully drains (flush included) before the next is opened, which
//! is what guarantees the output never interleaves across files. The
//! channel is bounded, so the client's read pace gates how fast chunks are
//! pulled from disk and per-request memory stays at "pending buffer plus
//! one in-flight chunk" regardless of corpus size.

use crate::corpus::FileEntry;
use crate::decompress;
use crate::error::Error;
use crate::filter::{LineFilter, Predicate};
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Read size for each pull from a file or decoder.
const CHUNK_SIZE: usize = 64 * 1024;

/// Capacity of the channel feeding the response body.
pub const CHANNEL_CAPACITY: usize = 4;

enum FileStreamError {
    /// The receiving end of the channel is gone: the client disconnected.
    Disconnected,
    Source(Error),
}

/// Drive the whole corpus, in order, into `tx`.
///
/// Per-file failures (open, read, corrupt gzip) are logged and the file is
/// skipped; bytes already sent for earlier files are committed, so
/// continuing maximizes useful output. A disconnected receiver stops the
/// pump outright, before any further file is opened. Dropping the sender
/// on return is what ends the response body.
pub async fn run(corpus: Vec<FileEntry>, predicate: Predicate, tx: mpsc::Sender<Bytes>) {
    for entry in &corpus {
        if tx.is_closed() {
            debug!("client disconnected, stopping before {}", entry.name);
            return;
        }
        match stream_file(entry, &predicate, &tx).await {
            Ok(()) => debug!("drained {}", entry.name),
            Err(FileStreamError::Disconnected) => {
                debug!("client disconnected, stopping at {}", entry.name);
                return;
            }
            Err(FileStreamError::Source(err)) => {
                warn!("skipping {}: {}", entry.name, err);
            }
        }
    }
}

/// Open one file, wrap it through the decompression adapter, and forward
/// every filtered emission. Returns only after the filter has flushed.
async fn stream_file(
    entry: &FileEntry,
    predicate: &Predicate,
    tx: &mpsc::Sender<Bytes>,
) -> Result<(), FileStreamError> {
    let file = File::open(&entry.path).await.map_err(|source| {
        FileStreamError::Source(Error::FileOpen {
            name: entry.name.clone(),
            source,
        })
    })?;

    let mut reader = decompress::wrap(&entry.name, Box::pin(file));
    let mut filter = LineFilter::new(predicate.clone());
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        // A run of non-matching lines produces no sends, so a gone client
        // has to be noticed here as well, not just on a failed send.
        if tx.is_closed() {
            return Err(FileStreamError::Disconnected);
        }
        let n = reader.read(&mut buf).await.map_err(|source| {
            FileStreamError::Source(if entry.compressed {
                Error::Decompression {
                    name: entry.name.clone(),
                    source,
                }
            } else {
                Error::Read {
                    name: entry.name.clone(),
                    source,
                }
            })
        })?;
        if n == 0 {
            break;
        }
        for emission in filter.step(&buf[..n]) {
            tx.send(emission)
                .await
                .map_err(|_| FileStreamError::Disconnected)?;
        }
    }

    if let Some(tail) = filter.flush() {
        tx.send(tail)
            .await
            .map_err(|_| FileStreamError::Disconnected)?;
    }

    Ok(())
}
