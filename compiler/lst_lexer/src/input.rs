//! Byte sources feeding the scanner.
//!
//! Both sources satisfy the same contract: [`InputSource::fill`] writes up to
//! `buf.len()` bytes and returns how many it produced, with `0` meaning the
//! source is exhausted. Filling never fails.

use std::io::{self, BufRead};

use tracing::warn;

/// Supplier of raw bytes for the [`Scanner`](crate::Scanner).
pub trait InputSource {
    /// Write up to `buf.len()` bytes into `buf`, returning the count.
    ///
    /// Returns `0` only when the source is exhausted (or `buf` is empty).
    fn fill(&mut self, buf: &mut [u8]) -> usize;
}

impl<S: InputSource + ?Sized> InputSource for Box<S> {
    fn fill(&mut self, buf: &mut [u8]) -> usize {
        (**self).fill(buf)
    }
}

/// Stream-backed source that collapses every `\r\n` into `\n`.
///
/// A `\r` ending a fill cannot be resolved until the next byte is seen, so
/// it is held back as `pending_cr` and emitted (as `\n` when a `\n` follows,
/// as itself otherwise) at the start of the next fill. A `\r` immediately
/// before end of file is emitted literally.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
    pending_cr: bool,
    /// Set after a read error; the stream then reads as exhausted.
    failed: bool,
}

impl<R: BufRead> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending_cr: false,
            failed: false,
        }
    }

    /// Returns `true` while a trailing `\r` is held for the next fill.
    pub fn has_pending_cr(&self) -> bool {
        self.pending_cr
    }

    /// Next buffered chunk of the underlying stream. Empty at end of file.
    fn chunk(&mut self) -> &[u8] {
        if self.failed {
            return &[];
        }
        loop {
            match self.inner.fill_buf() {
                Ok(_) => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    warn!(error = %err, "read failed, treating stream as exhausted");
                    self.failed = true;
                    return &[];
                }
            }
        }
        // The successful fill above left the bytes buffered.
        self.inner.fill_buf().unwrap_or_default()
    }
}

impl<R: BufRead> InputSource for StreamSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        let mut written = 0;
        loop {
            let mut pending_cr = self.pending_cr;
            let chunk = self.chunk();
            if chunk.is_empty() {
                if pending_cr {
                    buf[written] = b'\r';
                    written += 1;
                    self.pending_cr = false;
                }
                return written;
            }

            let mut used = 0;
            while used < chunk.len() && written < buf.len() {
                if pending_cr {
                    pending_cr = false;
                    if chunk[used] == b'\n' {
                        used += 1;
                        buf[written] = b'\n';
                    } else {
                        buf[written] = b'\r';
                    }
                    written += 1;
                    continue;
                }
                let room = buf.len() - written;
                let rest = &chunk[used..];
                let rest = &rest[..rest.len().min(room)];
                match memchr::memchr(b'\r', rest) {
                    Some(0) => {
                        pending_cr = true;
                        used += 1;
                    }
                    Some(i) => {
                        buf[written..written + i].copy_from_slice(&rest[..i]);
                        written += i;
                        used += i;
                    }
                    None => {
                        buf[written..written + rest.len()].copy_from_slice(rest);
                        written += rest.len();
                        used += rest.len();
                    }
                }
            }
            self.inner.consume(used);
            self.pending_cr = pending_cr;

            if written > 0 {
                return written;
            }
        }
    }
}

/// Memory-backed source copying a fixed byte range verbatim.
///
/// No normalization is applied; embedded NUL bytes are ordinary content.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    data: Vec<u8>,
    pos: usize,
}

impl MemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl InputSource for MemorySource {
    fn fill(&mut self, buf: &mut [u8]) -> usize {
        let n = self.remaining().min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }
}

#[cfg(test)]
mod tests;
