use super::*;
use pretty_assertions::assert_eq;
use std::io::{BufReader, Read};

/// Drain a source using fills of at most `max` bytes.
fn drain(source: &mut impl InputSource, max: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; max];
    loop {
        let n = source.fill(&mut buf);
        if n == 0 {
            break;
        }
        assert!(n <= max);
        out.extend_from_slice(&buf[..n]);
    }
    out
}

fn stream(bytes: &[u8]) -> StreamSource<&[u8]> {
    StreamSource::new(bytes)
}

/// Reader that hands out its data in fixed-size pieces.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that fails after its data runs out.
struct Failing<'a> {
    data: &'a [u8],
}

impl Read for Failing<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

// === Stream: CRLF normalization ===

#[test]
fn stream_passes_plain_bytes() {
    assert_eq!(drain(&mut stream(b"abc\ndef"), 64), b"abc\ndef");
}

#[test]
fn stream_collapses_crlf() {
    assert_eq!(drain(&mut stream(b"a\r\nb\r\n"), 64), b"a\nb\n");
}

#[test]
fn stream_keeps_lone_cr_mid_input() {
    assert_eq!(drain(&mut stream(b"a\rb"), 64), b"a\rb");
}

#[test]
fn stream_emits_trailing_cr_at_eof() {
    assert_eq!(drain(&mut stream(b"a\r"), 64), b"a\r");
    assert_eq!(drain(&mut stream(b"\r"), 64), b"\r");
}

#[test]
fn stream_cr_cr_lf() {
    assert_eq!(drain(&mut stream(b"\r\r\n"), 64), b"\r\n");
}

#[test]
fn stream_crlf_split_across_fills() {
    // A one-byte fill can never resolve a `\r` on its own.
    for max in 1..6 {
        assert_eq!(
            drain(&mut stream(b"ab\r\ncd\r\n\r"), max),
            b"ab\ncd\n\r",
            "fill size {max}"
        );
    }
}

#[test]
fn stream_crlf_split_across_reads() {
    let reader = BufReader::with_capacity(
        1,
        Trickle {
            data: b"x\r\ny\r",
            step: 1,
        },
    );
    let mut source = StreamSource::new(reader);
    assert_eq!(drain(&mut source, 8), b"x\ny\r");
}

#[test]
fn stream_holds_trailing_cr_between_fills() {
    let reader = BufReader::with_capacity(
        2,
        Trickle {
            data: b"a\r\n",
            step: 2,
        },
    );
    let mut source = StreamSource::new(reader);
    let mut buf = [0u8; 8];
    assert_eq!(source.fill(&mut buf), 1);
    assert_eq!(buf[0], b'a');
    assert!(source.has_pending_cr());
    assert_eq!(source.fill(&mut buf), 1);
    assert_eq!(buf[0], b'\n');
    assert!(!source.has_pending_cr());
    assert_eq!(source.fill(&mut buf), 0);
}

#[test]
fn stream_read_error_reads_as_exhausted() {
    let mut source = StreamSource::new(BufReader::new(Failing { data: b"ok" }));
    assert_eq!(drain(&mut source, 16), b"ok");
    let mut buf = [0u8; 4];
    assert_eq!(source.fill(&mut buf), 0);
}

#[test]
fn stream_empty_buffer_produces_nothing() {
    let mut source = stream(b"abc");
    assert_eq!(source.fill(&mut []), 0);
    assert_eq!(drain(&mut source, 4), b"abc");
}

// === Memory ===

#[test]
fn memory_copies_verbatim() {
    let mut source = MemorySource::new(b"a\r\nb\0c".to_vec());
    assert_eq!(drain(&mut source, 64), b"a\r\nb\0c");
}

#[test]
fn memory_respects_max_len() {
    let mut source = MemorySource::new(&b"abcdef"[..]);
    let mut buf = [0u8; 4];
    assert_eq!(source.fill(&mut buf), 4);
    assert_eq!(&buf, b"abcd");
    assert_eq!(source.remaining(), 2);
    assert_eq!(source.fill(&mut buf), 2);
    assert_eq!(&buf[..2], b"ef");
    assert_eq!(source.fill(&mut buf), 0);
}

#[test]
fn memory_empty() {
    let mut source = MemorySource::new(Vec::new());
    assert_eq!(drain(&mut source, 8), b"");
}

#[test]
fn boxed_source_delegates() {
    let mut source: Box<dyn InputSource> = Box::new(MemorySource::new(&b"xy"[..]));
    assert_eq!(drain(&mut source, 1), b"xy");
}
