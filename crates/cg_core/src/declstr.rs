//! Builds the one-line declaration string stored on each `Symbol` (spec
//! §4.2): a compact rendering of the tokens a declarator walk consumed,
//! close enough to the original text to be useful in a listing without
//! needing to retain source spans.

use cg_ir::{Token, TokenKind};

/// Accumulates token text into a single rendered declaration, tracking
/// just enough state to decide where a space belongs.
#[derive(Default)]
pub struct DeclStringBuilder {
    buf: String,
    /// Set after a token that should glue directly to whatever follows
    /// it (`*`, `(`) so the next `push` skips the separating space.
    suppress_space: bool,
}

fn glues_to_previous(kind: &TokenKind, text: &str) -> bool {
    matches!(kind, TokenKind::MemberOf)
        || matches!(kind, TokenKind::Char(b')' | b',' | b';' | b']'))
        || (matches!(kind, TokenKind::Char(b'(')) && text == "(")
}

impl DeclStringBuilder {
    #[must_use]
    pub fn new() -> Self {
        DeclStringBuilder::default()
    }

    /// Feed one token. Storage-class keywords and `typedef` are omitted
    /// from the rendered string entirely -- they describe linkage, not
    /// the declared type.
    pub fn push(&mut self, token: &Token) {
        if token.kind.is_storage_class() || matches!(token.kind, TokenKind::Typedef) {
            return;
        }
        let glue_before = self.suppress_space || glues_to_previous(&token.kind, &token.text);
        if !self.buf.is_empty() && !glue_before {
            self.buf.push(' ');
        }
        self.buf.push_str(&token.text);
        self.suppress_space =
            matches!(token.kind, TokenKind::Modifier) && &*token.text == "*"
                || matches!(token.kind, TokenKind::Char(b'('));
    }

    #[must_use]
    pub fn finish(self) -> Box<str> {
        Box::from(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 1)
    }

    #[test]
    fn storage_class_and_typedef_are_omitted() {
        let mut b = DeclStringBuilder::new();
        b.push(&tok(TokenKind::Static, "static"));
        b.push(&tok(TokenKind::TypeName, "int"));
        b.push(&tok(TokenKind::Identifier, "f"));
        assert_eq!(&*b.finish(), "int f");
    }

    #[test]
    fn pointer_star_glues_to_the_following_name() {
        let mut b = DeclStringBuilder::new();
        b.push(&tok(TokenKind::TypeName, "void"));
        b.push(&tok(TokenKind::Modifier, "*"));
        b.push(&tok(TokenKind::Identifier, "p"));
        assert_eq!(&*b.finish(), "void *p");
    }

    #[test]
    fn open_paren_has_no_space_after_it() {
        let mut b = DeclStringBuilder::new();
        b.push(&tok(TokenKind::Identifier, "f"));
        b.push(&tok(TokenKind::Char(b'('), "("));
        b.push(&tok(TokenKind::TypeName, "int"));
        b.push(&tok(TokenKind::Char(b')'), ")"));
        assert_eq!(&*b.finish(), "f(int)");
    }

    #[test]
    fn comma_glues_to_previous_token() {
        let mut b = DeclStringBuilder::new();
        b.push(&tok(TokenKind::TypeName, "int"));
        b.push(&tok(TokenKind::Identifier, "a"));
        b.push(&tok(TokenKind::Char(b','), ","));
        b.push(&tok(TokenKind::TypeName, "int"));
        b.push(&tok(TokenKind::Identifier, "b"));
        assert_eq!(&*b.finish(), "int a, int b");
    }
}
