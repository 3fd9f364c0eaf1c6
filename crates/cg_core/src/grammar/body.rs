//! Walks a function (or nested compound statement) body: local
//! declarations get `Auto` storage by default, every other statement is
//! scanned for calls and references, and nested blocks recurse so their
//! `auto` locals are purged the moment their own closing brace is seen.

use cg_diagnostic::{EofContext, Fatal, Message};
use cg_ir::{Storage, TokenKind, TokenSource};

use crate::context::ParserContext;
use crate::grammar::{decl, expr};

fn starts_a_local_declaration(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::TypeName
            | TokenKind::Typedef
            | TokenKind::Extern
            | TokenKind::Static
            | TokenKind::StructKeyword
    )
}

/// Whether a block closed the ordinary way or had its close forced by
/// an indentation-guessed brace collapsing every open level at once.
#[derive(Clone, Copy, Eq, PartialEq)]
enum Closed {
    Normally,
    Collapsed,
}

/// Consume a `{ ... }` block, dispatching each member either to a local
/// declaration or to a statement scan, and purging any `auto` locals
/// declared directly in it once its closing brace is seen.
pub fn func_body<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<(), Fatal> {
    walk(ctx).map(|_| ())
}

fn walk<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<Closed, Fatal> {
    ctx.buffer.next(); // consume the opening brace
    ctx.level += 1;
    let level = ctx.level;
    loop {
        match ctx.buffer.current_kind().clone() {
            TokenKind::RBrace0 if ctx.config.use_indentation => {
                ctx.buffer.next();
                if level != 1 && ctx.config.verbose {
                    ctx.warn_anomaly(Message::ForcedFunctionBodyClose, None);
                }
                // The guessed brace is taken as authoritative for the
                // whole function, not just this block: every level down
                // to file scope loses its autos and the body is done.
                ctx.symtab.delete_autos(0);
                ctx.level = 0;
                return Ok(Closed::Collapsed);
            }
            TokenKind::RBrace | TokenKind::RBrace0 => {
                ctx.buffer.next();
                ctx.symtab.delete_autos(level);
                ctx.level -= 1;
                return Ok(Closed::Normally);
            }
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::FunctionBody);
                ctx.symtab.delete_autos(level);
                ctx.level -= 1;
                return Ok(Closed::Normally);
            }
            TokenKind::LBrace | TokenKind::LBrace0 => {
                if walk(ctx)? == Closed::Collapsed {
                    return Ok(Closed::Collapsed);
                }
            }
            ref kind if starts_a_local_declaration(kind) => {
                decl::parse_declaration(ctx, Storage::Auto)?;
            }
            _ => {
                expr::scan_statement(ctx)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_ir::Token;

    use crate::test_support::{ctx_from, ctx_from_tokens};
    use crate::ParserConfig;

    #[test]
    fn nested_block_purges_its_own_autos_on_close() {
        let mut ctx = ctx_from("int f(void) { { int tmp; tmp = 1; } return 0; }");
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();
        assert!(ctx.symtab.lookup("tmp").is_none());
    }

    #[test]
    fn a_plain_local_declaration_defaults_to_auto_storage_and_is_excluded() {
        let mut ctx = ctx_from("int f(void) { int x; x = g(); return x; }");
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();
        assert!(ctx.symtab.lookup("x").is_none());
        assert!(ctx.symtab.lookup("g").is_some());
    }

    #[test]
    fn static_local_survives_block_close() {
        let mut ctx = ctx_from("int f(void) { static int count; count = 1; return count; }");
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();
        assert!(ctx.symtab.lookup("count").is_some());
    }

    /// An indentation-guessed close collapses every open level at once
    /// rather than just the innermost one -- the scanner never emits
    /// `RBrace0` itself, so this is exercised with a hand-built stream
    /// standing in for one.
    #[test]
    fn indentation_guessed_close_collapses_every_open_level() {
        let tokens = vec![
            Token::new(TokenKind::TypeName, "int", 1),
            Token::new(TokenKind::Identifier, "f", 1),
            Token::new(TokenKind::Char(b'('), "(", 1),
            Token::new(TokenKind::TypeName, "void", 1),
            Token::new(TokenKind::Char(b')'), ")", 1),
            Token::new(TokenKind::LBrace, "{", 1),
            Token::new(TokenKind::TypeName, "int", 2),
            Token::new(TokenKind::Identifier, "x", 2),
            Token::new(TokenKind::Char(b';'), ";", 2),
            Token::new(TokenKind::LBrace, "{", 3),
            Token::new(TokenKind::TypeName, "int", 4),
            Token::new(TokenKind::Identifier, "y", 4),
            Token::new(TokenKind::Char(b';'), ";", 4),
            Token::new(TokenKind::RBrace0, "}", 5),
        ];
        let config = ParserConfig {
            use_indentation: true,
            verbose: true,
            ..ParserConfig::default()
        };
        let mut ctx = ctx_from_tokens(tokens, config);
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();

        assert!(ctx.symtab.lookup("x").is_none());
        assert!(ctx.symtab.lookup("y").is_none());
        assert_eq!(ctx.level, 0);
        assert!(ctx
            .diagnostics
            .iter()
            .any(|d| d.message == cg_diagnostic::Message::ForcedFunctionBodyClose));
    }
}
