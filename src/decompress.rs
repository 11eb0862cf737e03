//! Transparent streaming decompression for gzip'd log files.

use async_compression::tokio::bufread::GzipDecoder;
use std::pin::Pin;
use tokio::io::{AsyncRead, BufReader};

/// File name suffix marking a gzip-compressed log.
pub const GZIP_SUFFIX: &str = ".gz";

/// A type-erased readable byte stream.
pub type ByteStream = Pin<Box<dyn AsyncRead + Send>>;

/// Wrap `reader` in an incremental gzip decoder when `name` carries the
/// compressed suffix; plain files pass through untouched.
///
/// Decoding is fully streaming, so the whole file is never materialized.
/// Corrupt gzip content surfaces as an error from a later `read`, after
/// any bytes that decoded cleanly have already been delivered.
pub fn wrap(name: &str, reader: ByteStream) -> ByteStream {
    if name.ends_with(GZIP_SUFFIX) {
        Box::pin(GzipDecoder::new(BufReader::new(reader)))
    } else {
        reader
    }
}
