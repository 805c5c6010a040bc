//! Refilling read window over an [`InputSource`].
//!
//! The scanner never sees the source directly. It inspects the buffered
//! window (`chunk`), peeks up to two bytes ahead, and consumes what it has
//! classified. When fewer bytes are buffered than a peek needs, the unread
//! tail is moved to the front and the rest of the window is refilled.

use crate::input::InputSource;

/// Buffered byte reader owned by a [`Scanner`](crate::Scanner).
#[derive(Debug)]
pub(crate) struct Reader<S> {
    source: S,
    buf: Box<[u8]>,
    /// Next unread byte.
    pos: usize,
    /// End of valid data in `buf`.
    len: usize,
    /// Set once the source returned 0; it is not asked again.
    exhausted: bool,
}

impl<S: InputSource> Reader<S> {
    /// `capacity` must be at least 2 to satisfy two-byte peeks.
    pub(crate) fn new(source: S, capacity: usize) -> Self {
        debug_assert!(capacity >= 2, "reader window too small for peek_at(1)");
        Self {
            source,
            buf: vec![0u8; capacity].into_boxed_slice(),
            pos: 0,
            len: 0,
            exhausted: false,
        }
    }

    /// Ensure at least `n` bytes are buffered, refilling as needed.
    ///
    /// Returns `false` when the source ends first.
    fn ensure(&mut self, n: usize) -> bool {
        while self.len - self.pos < n {
            if self.exhausted {
                return false;
            }
            if self.pos > 0 {
                self.buf.copy_within(self.pos..self.len, 0);
                self.len -= self.pos;
                self.pos = 0;
            }
            let produced = self.source.fill(&mut self.buf[self.len..]);
            if produced == 0 {
                self.exhausted = true;
            }
            self.len += produced;
        }
        true
    }

    /// Byte at offset `n` from the current position, if the input has one.
    #[inline]
    pub(crate) fn peek_at(&mut self, n: usize) -> Option<u8> {
        if self.ensure(n + 1) {
            Some(self.buf[self.pos + n])
        } else {
            None
        }
    }

    /// Current byte, or `None` at end of input.
    #[inline]
    pub(crate) fn peek(&mut self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Buffered unread bytes; empty only at end of input.
    pub(crate) fn chunk(&mut self) -> &[u8] {
        self.ensure(1);
        &self.buf[self.pos..self.len]
    }

    /// Consume `n` bytes that were already inspected.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.len, "consuming unbuffered bytes");
        self.pos += n;
    }

    /// Consume one inspected byte.
    #[inline]
    pub(crate) fn bump(&mut self) {
        self.consume(1);
    }
}
