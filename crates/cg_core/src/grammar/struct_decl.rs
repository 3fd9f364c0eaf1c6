//! Skips a `struct`/`union`/`enum` specifier: the keyword, an optional
//! tag, and an optional brace-enclosed member list. Grounded on the
//! source parser's `skip_struct`, simplified since member declarations
//! inside a struct body never contribute call-graph edges and so are
//! discarded rather than walked.

use cg_diagnostic::{EofContext, Fatal};
use cg_ir::{Token, TokenKind, TokenSource};

use crate::context::ParserContext;
use crate::grammar::advance;

/// Consume a whole struct/union/enum specifier starting at the keyword.
/// Returns whether a `{ ... }` member list was present (a bodied
/// specifier is a complete type by itself and needs no further
/// declarator to be meaningful as a standalone declaration).
pub fn skip_struct<S: TokenSource>(
    ctx: &mut ParserContext<S>,
    out: &mut Vec<Token>,
) -> Result<bool, Fatal> {
    advance(ctx, out); // struct / union / enum
    if matches!(
        ctx.buffer.current_kind(),
        TokenKind::Identifier | TokenKind::TypeName
    ) {
        advance(ctx, out);
    }
    if !matches!(ctx.buffer.current_kind(), TokenKind::LBrace | TokenKind::LBrace0) {
        return Ok(false);
    }
    let mut depth = 0i32;
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::LBrace | TokenKind::LBrace0 => {
                depth += 1;
                advance(ctx, out);
            }
            TokenKind::RBrace | TokenKind::RBrace0 => {
                depth -= 1;
                advance(ctx, out);
                if depth == 0 {
                    return Ok(true);
                }
            }
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::Struct);
                return Ok(true);
            }
            _ => {
                advance(ctx, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx_from;

    #[test]
    fn skips_tagged_struct_with_member_list() {
        let mut ctx = ctx_from("struct Point { int x; int y; } p;");
        ctx.buffer.next();
        let mut out = Vec::new();
        let had_body = skip_struct(&mut ctx, &mut out).unwrap();
        assert!(had_body);
        assert_eq!(ctx.buffer.current_kind(), &TokenKind::Identifier);
    }

    #[test]
    fn skips_forward_declared_struct_tag_only() {
        let mut ctx = ctx_from("struct Point p;");
        ctx.buffer.next();
        let mut out = Vec::new();
        let had_body = skip_struct(&mut ctx, &mut out).unwrap();
        assert!(!had_body);
        assert_eq!(ctx.buffer.current_kind(), &TokenKind::Identifier);
    }
}
