//! Token kinds and the token record shared by the scanner and the core.

use std::fmt;

/// Closed enumeration of token kinds the recognizer understands.
///
/// Punctuation that carries no special grammatical role (`;`, `,`, `=`,
/// `[`, `]`, `)`, ...) is represented by `Char`, whose payload is the raw
/// byte of the character itself -- this mirrors the source system, where
/// a character literal doubles as its own token kind.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// End of input. Sticky: once returned, every further `next()` call
    /// returns it again.
    Eof,
    /// A plain identifier.
    Identifier,
    /// An identifier already known to name a type (via a prior typedef).
    TypeName,
    /// The `struct` (or `union`) keyword.
    StructKeyword,
    /// A macro-style parameter-list wrapper, e.g. `__P`.
    ParmWrapper,
    /// A pointer or qualifier modifier (`*`, `const`, `volatile`, ...).
    Modifier,
    /// `extern`.
    Extern,
    /// `static`.
    Static,
    /// `typedef`.
    Typedef,
    /// `{` recognized as an honest brace token from the scanner.
    LBrace,
    /// `}` recognized as an honest brace token from the scanner.
    RBrace,
    /// `{` synthesized from indentation (no matching scanner brace).
    LBrace0,
    /// `}` synthesized from indentation (no matching scanner brace).
    RBrace0,
    /// `.` or `->`: a member-access operator.
    MemberOf,
    /// A bare word that is neither identifier, type-name, nor keyword.
    Word,
    /// A multi-character operator the recognizer treats opaquely.
    Op,
    /// A single raw punctuation character; the payload is that character.
    Char(u8),
}

impl TokenKind {
    /// True for the token kinds `dcl`'s type-specifier prefix scan consumes.
    #[must_use]
    pub fn is_type_prefix(self) -> bool {
        matches!(
            self,
            TokenKind::TypeName
                | TokenKind::Identifier
                | TokenKind::Modifier
                | TokenKind::Static
                | TokenKind::Extern
        )
    }

    /// True for any flavor of opening or closing brace.
    #[must_use]
    pub fn is_brace(self) -> bool {
        matches!(
            self,
            TokenKind::LBrace | TokenKind::RBrace | TokenKind::LBrace0 | TokenKind::RBrace0
        )
    }

    /// True for a storage-class keyword (not `typedef`, which is handled
    /// as its own top-level dispatch arm rather than a declaration storage).
    #[must_use]
    pub fn is_storage_class(self) -> bool {
        matches!(self, TokenKind::Extern | TokenKind::Static)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "<eof>"),
            TokenKind::Identifier | TokenKind::TypeName | TokenKind::Word => write!(f, "word"),
            TokenKind::StructKeyword => write!(f, "struct"),
            TokenKind::ParmWrapper => write!(f, "parameter-wrapper"),
            TokenKind::Modifier => write!(f, "modifier"),
            TokenKind::Extern => write!(f, "extern"),
            TokenKind::Static => write!(f, "static"),
            TokenKind::Typedef => write!(f, "typedef"),
            TokenKind::LBrace | TokenKind::LBrace0 => write!(f, "{{"),
            TokenKind::RBrace | TokenKind::RBrace0 => write!(f, "}}"),
            TokenKind::MemberOf => write!(f, "member access"),
            TokenKind::Op => write!(f, "operator"),
            TokenKind::Char(c) => write!(f, "{}", *c as char),
        }
    }
}

/// A single token: its kind, its literal text, and the source line it
/// started on.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Box<str>,
    pub line: u32,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<Box<str>>, line: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
        }
    }

    /// The sentinel end-of-input token, used before any real token has
    /// been read and as the value `putback()` exposes when the cursor
    /// reaches zero.
    #[must_use]
    pub fn eof() -> Self {
        Token {
            kind: TokenKind::Eof,
            text: Box::from(""),
            line: 0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Char(c) => write!(f, "{}", c as char),
            _ if self.text.is_empty() => write!(f, "{}", self.kind),
            _ => write!(f, "{}", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_is_sticky_sentinel() {
        let t = Token::eof();
        assert_eq!(t.kind, TokenKind::Eof);
        assert_eq!(t.line, 0);
    }

    #[test]
    fn type_prefix_excludes_typedef_and_struct() {
        assert!(!TokenKind::Typedef.is_type_prefix());
        assert!(!TokenKind::StructKeyword.is_type_prefix());
        assert!(TokenKind::Modifier.is_type_prefix());
        assert!(TokenKind::Extern.is_type_prefix());
    }

    #[test]
    fn brace_flavors_both_count_as_brace() {
        assert!(TokenKind::LBrace.is_brace());
        assert!(TokenKind::RBrace0.is_brace());
        assert!(!TokenKind::Op.is_brace());
    }
}
