//! The recognizer itself: a handful of mutually recursive speculative
//! descents over a `ParserContext`'s token buffer, one module per
//! concern the way the source parser separates declarator walking from
//! expression scanning from struct-specifier skipping.

pub mod body;
pub mod decl;
pub mod expr;
pub mod struct_decl;

use cg_diagnostic::Fatal;
use cg_ir::{Token, TokenKind, TokenSource};

use crate::context::ParserContext;

/// Consume the current token, recording it into `out` and returning the
/// new current token's kind. Infallible: advancing never fails, only
/// `putback` can.
pub(crate) fn advance<S: TokenSource>(ctx: &mut ParserContext<S>, out: &mut Vec<Token>) -> TokenKind {
    let tok = ctx.buffer.current().clone();
    out.push(tok);
    ctx.buffer.next()
}

/// Recover from a malformed declaration by discarding tokens up to and
/// including the next `;`, or the next brace (whichever the input
/// offers first), giving the recognizer a clean place to resume.
pub(crate) fn recover_to_semicolon<S: TokenSource>(ctx: &mut ParserContext<S>) {
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::Char(b';') => {
                ctx.buffer.next();
                return;
            }
            TokenKind::Eof
            | TokenKind::LBrace
            | TokenKind::LBrace0
            | TokenKind::RBrace
            | TokenKind::RBrace0 => return,
            _ => {
                ctx.buffer.next();
            }
        }
    }
}

/// Drive one whole token stream to completion: every top-level
/// construct in C is, tolerantly, a declaration.
#[tracing::instrument(level = "debug", skip_all, fields(file = %ctx.filename))]
pub fn parse_translation_unit<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<(), Fatal> {
    ctx.buffer.next();
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::Eof => return Ok(()),
            TokenKind::Char(b';') => {
                ctx.buffer.next();
            }
            _ => {
                decl::parse_declaration(ctx, cg_ir::Storage::Extern)?;
                ctx.buffer.cleanup();
            }
        }
    }
}
