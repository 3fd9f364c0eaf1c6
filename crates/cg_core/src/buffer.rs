//! Token buffer with speculative lookahead (spec §4.1).
//!
//! An append-only vector over the scanner's output plus an integer read
//! cursor. Checkpoints are just saved cursor values, so `mark`/`restore`
//! never touches the buffer's contents -- only `delete_tokens` and
//! `cleanup` do, and both are only ever invoked once the caller holds no
//! checkpoint earlier than the point being discarded.

use cg_ir::{Token, TokenKind, TokenSource};

/// A saved cursor position. Restoring it is a pure assignment: it never
/// reallocates or touches buffered tokens.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Checkpoint(usize);

/// Growable buffer over a lexical stream, with mark/restore, put-back,
/// and bulk excision of already-seen tokens.
///
/// Invariant: `0 <= cursor <= tokens.len()` at every observable boundary.
pub struct TokenBuffer<S> {
    source: S,
    tokens: Vec<Token>,
    cursor: usize,
    /// Token at `cursor - 1` (or the EOF sentinel if `cursor == 0`),
    /// refreshed by every operation that moves the cursor. Mirrors the
    /// source system's global `tok`.
    current: Token,
}

impl<S: TokenSource> TokenBuffer<S> {
    pub fn new(source: S) -> Self {
        TokenBuffer {
            source,
            tokens: Vec::new(),
            cursor: 0,
            current: Token::eof(),
        }
    }

    /// The token most recently returned by `next` (or put back to).
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.current
    }

    #[must_use]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current.kind
    }

    /// Advance one token, pulling from the scanner when the buffer is
    /// exhausted. Returns the new current token's kind.
    pub fn next(&mut self) -> TokenKind {
        if self.cursor == self.tokens.len() {
            let tok = self.source.next_token();
            self.tokens.push(tok);
        }
        self.current = self.tokens[self.cursor].clone();
        self.cursor += 1;
        self.current.kind
    }

    /// Return one token to the stream. Fatal (per spec §7 tier 3) if the
    /// cursor is already at zero -- the one truly unrecoverable error in
    /// the recognizer.
    ///
    /// # Errors
    /// Returns `Err(())` when `cursor == 0`; callers should surface this
    /// as `cg_diagnostic::Fatal` and abort, matching the source system's
    /// `INTERNAL ERROR: cannot return token to stream`.
    pub fn putback(&mut self) -> Result<TokenKind, ()> {
        if self.cursor == 0 {
            return Err(());
        }
        self.cursor -= 1;
        self.current = if self.cursor > 0 {
            self.tokens[self.cursor - 1].clone()
        } else {
            Token::eof()
        };
        Ok(self.current.kind)
    }

    /// Snapshot the cursor.
    #[must_use]
    pub fn mark(&self) -> Checkpoint {
        Checkpoint(self.cursor)
    }

    /// Rewind to a checkpoint, refreshing `current` from the token just
    /// before the restored cursor.
    pub fn restore(&mut self, ckpt: Checkpoint) {
        self.cursor = ckpt.0;
        self.current = if self.cursor > 0 {
            self.tokens[self.cursor - 1].clone()
        } else {
            Token::eof()
        };
    }

    /// Excise `[ckpt, cursor)` from the buffer, shifting the tail down,
    /// then restore to `ckpt`. Used to rewrite a region in place (struct
    /// tag synthesis, spec §4.3).
    pub fn delete_tokens(&mut self, ckpt: Checkpoint) {
        self.tokens.drain(ckpt.0..self.cursor);
        self.restore(ckpt);
    }

    /// Splice the buffer so that exactly `keep_from..cursor` survives
    /// (already-consumed prefix) and `extra` is appended right after it,
    /// then set `tos` to just past `extra` -- the struct-tag synthesis
    /// idiom from `fake_struct`/`parse_variable_declaration` in the
    /// source parser: truncate to `keep_from`, push one synthetic
    /// identifier token, then push the token that was held aside.
    pub fn splice_synthetic(&mut self, keep_from: usize, extra: Token, held: Token) {
        self.tokens.truncate(keep_from);
        self.tokens.push(extra);
        self.tokens.push(held);
        self.cursor = self.tokens.len();
        self.current = self.tokens[self.cursor - 1].clone();
    }

    /// The raw length of the buffer, used as the truncation point by
    /// `splice_synthetic` (the source's `tos`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Discard `[0, cursor)`, shifting the remainder down. Called between
    /// top-level declarations to bound memory; invalidates any
    /// checkpoint taken before this call.
    pub fn cleanup(&mut self) {
        self.tokens.drain(0..self.cursor);
        self.cursor = 0;
        self.current = Token::eof();
    }

    /// Borrow the tokens in `[ckpt.0, cursor)`, the window the text
    /// accumulator walks to build a declaration string.
    #[must_use]
    pub fn consumed_since(&self, ckpt: Checkpoint) -> &[Token] {
        &self.tokens[ckpt.0..self.cursor.saturating_sub(1).max(ckpt.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_ir::NoTypeNames;
    use cg_scan::Scanner;

    fn buffer(src: &'static str) -> TokenBuffer<Scanner<'static>> {
        let oracle: &'static NoTypeNames = Box::leak(Box::new(NoTypeNames));
        TokenBuffer::new(Scanner::new(src, "t.c", oracle))
    }

    #[test]
    fn mark_restore_is_a_cursor_only_operation() {
        let mut buf = buffer("a b c;");
        buf.next();
        buf.next();
        let ckpt = buf.mark();
        buf.next();
        buf.next();
        buf.restore(ckpt);
        assert_eq!(buf.mark(), ckpt);
    }

    #[test]
    fn putback_then_next_reproduces_the_same_token() {
        let mut buf = buffer("a b;");
        buf.next();
        let second = buf.next();
        buf.putback().unwrap();
        assert_eq!(buf.next(), second);
    }

    #[test]
    fn putback_at_zero_is_an_error() {
        let mut buf = buffer("a;");
        assert!(buf.putback().is_err());
    }

    #[test]
    fn cursor_never_exceeds_length() {
        let mut buf = buffer("a b c d;");
        for _ in 0..3 {
            buf.next();
            assert!(buf.mark().0 <= buf.len());
        }
    }

    #[test]
    fn cleanup_discards_consumed_prefix() {
        let mut buf = buffer("a b c;");
        buf.next();
        buf.next();
        buf.cleanup();
        assert_eq!(buf.mark(), Checkpoint(0));
    }
}
