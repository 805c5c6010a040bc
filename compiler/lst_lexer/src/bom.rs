//! Byte-order-mark detection for stream binds.
//!
//! The classification is informational only. The scanner treats every byte
//! after the marker as raw 8-bit text; deciding what to do with a UTF-16 or
//! UTF-32 file is the caller's business.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

/// Leading byte-order mark of a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bom {
    /// No recognized marker. The stream is rewound to its start.
    None,
    /// `EF BB BF`.
    Utf8,
    /// `FE FF`.
    Utf16Be,
    /// `FF FE` not followed by `00 00`.
    Utf16Le,
    /// `00 00 FE FF`.
    Utf32Be,
    /// `FF FE 00 00`.
    Utf32Le,
    /// The stream could not be read or repositioned.
    Broken,
}

impl Bom {
    /// Length of the marker in bytes.
    pub const fn len(self) -> usize {
        match self {
            Bom::None | Bom::Broken => 0,
            Bom::Utf16Be | Bom::Utf16Le => 2,
            Bom::Utf8 => 3,
            Bom::Utf32Be | Bom::Utf32Le => 4,
        }
    }

    /// Returns `true` for markers that occupy no bytes.
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Classify the first (up to four) bytes of a stream.
    pub fn classify(head: &[u8]) -> Bom {
        match head {
            [0xEF, 0xBB, 0xBF, ..] => Bom::Utf8,
            [0xFE, 0xFF, ..] => Bom::Utf16Be,
            [0x00, 0x00, 0xFE, 0xFF, ..] => Bom::Utf32Be,
            [0xFF, 0xFE, 0x00, 0x00, ..] => Bom::Utf32Le,
            [0xFF, 0xFE, ..] => Bom::Utf16Le,
            _ => Bom::None,
        }
    }
}

impl fmt::Display for Bom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bom::None => "none",
            Bom::Utf8 => "UTF-8",
            Bom::Utf16Be => "UTF-16BE",
            Bom::Utf16Le => "UTF-16LE",
            Bom::Utf32Be => "UTF-32BE",
            Bom::Utf32Le => "UTF-32LE",
            Bom::Broken => "broken",
        })
    }
}

/// Classify the leading byte-order mark of `stream` and position it just
/// past the marker.
///
/// Reads at most four bytes from the current position, which must be the
/// start of the stream. Bytes read while testing a longer marker are given
/// back by seeking, so a `FF FE` UTF-16LE marker leaves the stream at
/// offset 2 and an unrecognized head leaves it at offset 0. Any read or seek
/// failure yields [`Bom::Broken`]; after a read failure the stream is
/// rewound to offset 0 when it can be.
pub fn sniff_bom<R: Read + Seek>(stream: &mut R) -> Bom {
    let mut head = [0u8; 4];
    let read = match read_head(stream, &mut head) {
        Ok(n) => n,
        Err(err) => {
            tracing::debug!(error = %err, "byte-order mark read failed");
            // Give back whatever was read before the failure.
            if let Err(err) = stream.seek(SeekFrom::Start(0)) {
                tracing::debug!(error = %err, "byte-order mark rewind failed");
            }
            return Bom::Broken;
        }
    };
    let bom = Bom::classify(&head[..read]);
    match stream.seek(SeekFrom::Start(bom.len() as u64)) {
        Ok(_) => bom,
        Err(err) => {
            tracing::debug!(error = %err, "byte-order mark seek failed");
            Bom::Broken
        }
    }
}

/// Read until `head` is full or the stream ends.
fn read_head<R: Read>(stream: &mut R, head: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < head.len() {
        match stream.read(&mut head[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
