//! Fixed-offset author predicate and chunk-boundary-safe line filtering.
//!
//! Every log line carries a fixed-width timestamp prefix, so the author
//! field always starts at the same byte offset. The filter works on raw
//! bytes rather than decoded text, which keeps the offset arithmetic valid
//! regardless of the file's encoding, and it reassembles lines that span
//! chunk boundaries so correctness never depends on how the upstream
//! reader or decompressor happens to split the file.

use bytes::{BufMut, Bytes, BytesMut};

/// Byte offset where the author field starts in every log line.
pub const AUTHOR_OFFSET: usize = 28;

/// Exact-match test for the author field of a log line.
///
/// Byte-exact and case-sensitive. One predicate is built per request and
/// cloned into each file's filter.
#[derive(Debug, Clone)]
pub struct Predicate {
    name: Vec<u8>,
    offset: usize,
}

impl Predicate {
    /// Predicate matching lines authored by `name` at the standard offset.
    pub fn new(name: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            offset: AUTHOR_OFFSET,
        }
    }

    /// True iff `line` is long enough to carry the author field and the
    /// field equals the target name byte for byte. Shorter lines simply
    /// never match.
    pub fn matches(&self, line: &[u8]) -> bool {
        line.len() >= self.offset + self.name.len()
            && line[self.offset..self.offset + self.name.len()] == self.name[..]
    }
}

/// Stateful line filter over arbitrarily chunked input.
///
/// Bytes after the last newline of a chunk are held in `pending` until a
/// later chunk (or the final flush) completes them; between calls,
/// `pending` never contains a newline.
#[derive(Debug)]
pub struct LineFilter {
    pending: Vec<u8>,
    predicate: Predicate,
}

impl LineFilter {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            pending: Vec::new(),
            predicate,
        }
    }

    /// Consume one chunk, emitting every complete matching line with its
    /// newline restored. The fragment after the last newline (possibly
    /// empty) is carried over to the next call.
    pub fn step(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.pending.extend_from_slice(chunk);

        let mut emissions = Vec::new();
        let mut start = 0;
        while let Some(rel) = self.pending[start..].iter().position(|&b| b == b'\n') {
            let line = &self.pending[start..start + rel];
            if self.predicate.matches(line) {
                let mut out = BytesMut::with_capacity(line.len() + 1);
                out.put_slice(line);
                out.put_u8(b'\n');
                emissions.push(out.freeze());
            }
            start += rel + 1;
        }
        self.pending.drain(..start);
        emissions
    }

    /// End of stream: the pending tail is a complete line whose source had
    /// no terminator. Emit it as-is if it matches, and clear state.
    pub fn flush(&mut self) -> Option<Bytes> {
        let tail = std::mem::take(&mut self.pending);
        self.predicate.matches(&tail).then(|| Bytes::from(tail))
    }
}
