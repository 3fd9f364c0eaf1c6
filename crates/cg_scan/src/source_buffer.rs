//! Sentinel-terminated source buffer, grounded in the teacher's
//! `ori_lexer_core::source_buffer` -- a `0x00` sentinel after the source
//! bytes lets the scanner detect end-of-input without a bounds check on
//! every byte read.

/// Owned source bytes plus a trailing `0x00` sentinel.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: usize,
}

impl SourceBuffer {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut buf = Vec::with_capacity(source.len() + 1);
        buf.extend_from_slice(source.as_bytes());
        buf.push(0);
        SourceBuffer {
            source_len: source.len(),
            buf,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.source_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Byte at `pos`, or the sentinel `0x00` if `pos >= len()`.
    #[must_use]
    pub fn byte_at(&self, pos: usize) -> u8 {
        self.buf[pos.min(self.buf.len() - 1)]
    }

    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        std::str::from_utf8(&self.buf[start..end.min(self.source_len)]).unwrap_or("")
    }

    /// Remaining source bytes from `pos` to `len()`, excluding the
    /// sentinel, for `memchr`-based scans.
    #[must_use]
    pub fn remaining(&self, pos: usize) -> &[u8] {
        &self.buf[pos.min(self.source_len)..self.source_len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_past_end_is_sentinel() {
        let buf = SourceBuffer::new("ab");
        assert_eq!(buf.byte_at(2), 0);
        assert_eq!(buf.byte_at(100), 0);
    }

    #[test]
    fn slice_round_trips_source_text() {
        let buf = SourceBuffer::new("hello world");
        assert_eq!(buf.slice(0, 5), "hello");
    }
}
