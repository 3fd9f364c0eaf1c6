//! Statement/expression scanning inside a function body (spec's
//! `expression`): a flat token walk that treats `name (` as a call and
//! any other bare name as a reference, recursing only through paren and
//! bracket nesting depth rather than building an expression tree.

use cg_diagnostic::{EofContext, Fatal};
use cg_ir::{TokenKind, TokenSource};

use crate::context::ParserContext;

/// Scan one statement up to (and consuming) its terminating `;` at
/// nesting depth zero. Returns without consuming a brace or EOF, so the
/// caller (`func_body`'s block loop) can handle those itself.
pub fn scan_statement<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<(), Fatal> {
    let mut depth = 0i32;
    loop {
        match ctx.buffer.current_kind().clone() {
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::Expression);
                return Ok(());
            }
            TokenKind::LBrace | TokenKind::LBrace0 | TokenKind::RBrace | TokenKind::RBrace0
                if depth == 0 =>
            {
                return Ok(());
            }
            TokenKind::Char(b'(') => maybe_skip_cast(ctx, &mut depth),
            TokenKind::Char(b'[') => {
                depth += 1;
                ctx.buffer.next();
            }
            TokenKind::Char(b')' | b']') => {
                depth -= 1;
                ctx.buffer.next();
            }
            TokenKind::Char(b';') if depth == 0 => {
                ctx.buffer.next();
                return Ok(());
            }
            TokenKind::Identifier => {
                scan_name(ctx)?;
            }
            _ => {
                ctx.buffer.next();
            }
        }
    }
}

/// Scan a single initializer expression up to the next top-level `,` or
/// `;`/`}` (spec's `initializer_list`), recognizing calls and
/// references along the way exactly like a statement.
pub fn scan_initializer<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<(), Fatal> {
    let mut depth = 0i32;
    loop {
        match ctx.buffer.current_kind().clone() {
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::InitializerList);
                return Ok(());
            }
            TokenKind::Char(b',' | b';') if depth == 0 => return Ok(()),
            TokenKind::RBrace | TokenKind::RBrace0 if depth == 0 => return Ok(()),
            TokenKind::Char(b'(') => maybe_skip_cast(ctx, &mut depth),
            TokenKind::Char(b'[') | TokenKind::LBrace | TokenKind::LBrace0 => {
                depth += 1;
                ctx.buffer.next();
            }
            TokenKind::Char(b')' | b']') | TokenKind::RBrace | TokenKind::RBrace0 => {
                depth -= 1;
                ctx.buffer.next();
            }
            TokenKind::Identifier => {
                scan_name(ctx)?;
            }
            _ => {
                ctx.buffer.next();
            }
        }
    }
}

/// `(` either opens a parenthesized subexpression or, when immediately
/// followed by a type name, introduces a cast (`(int) x`); the source
/// treats the two differently (`parser.c`'s `expression`): a real
/// subexpression bumps nesting depth, a cast is skipped outright up to
/// its closing `)` without ever looking at the type name again.
fn maybe_skip_cast<S: TokenSource>(ctx: &mut ParserContext<S>, depth: &mut i32) {
    let follower = ctx.buffer.next(); // consume '(', look at what follows
    if matches!(follower, TokenKind::TypeName) {
        skip_to_close_paren(ctx);
    } else {
        *depth += 1;
    }
}

fn skip_to_close_paren<S: TokenSource>(ctx: &mut ParserContext<S>) {
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::Char(b')') => {
                ctx.buffer.next();
                return;
            }
            TokenKind::Eof => return,
            _ => {
                ctx.buffer.next();
            }
        }
    }
}

/// One identifier was seen; look one token ahead to tell a call from a
/// plain reference, putting the lookahead back when it wasn't a call so
/// the main scan loop processes it normally.
fn scan_name<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<(), Fatal> {
    let name = ctx.buffer.current().text.clone();
    let line = ctx.buffer.current().line;
    let next_kind = ctx.buffer.next();
    if matches!(next_kind, TokenKind::Char(b'(')) {
        let file = ctx.filename.clone();
        ctx.symtab.call(&name, &file, line, ctx.caller);
    } else {
        let file = ctx.filename.clone();
        ctx.symtab.reference(&name, &file, line, ctx.caller);
        if matches!(ctx.buffer.current_kind(), TokenKind::MemberOf) {
            skip_member_chain(ctx);
        } else {
            ctx.putback()?;
        }
    }
    Ok(())
}

/// `s.field`, `p->next->data`: once a name is followed by a
/// member-access operator, the whole `.`/`->`-joined chain after it is
/// skipped rather than having each field name treated as its own
/// reference (spec's "skip the chain of member accesses"; `parser.c:384-389`).
fn skip_member_chain<S: TokenSource>(ctx: &mut ParserContext<S>) {
    while matches!(ctx.buffer.current_kind(), TokenKind::MemberOf) {
        ctx.buffer.next(); // the operator
        if matches!(ctx.buffer.current_kind(), TokenKind::Identifier | TokenKind::TypeName) {
            ctx.buffer.next(); // the field name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx_from;

    #[test]
    fn call_and_reference_are_distinguished_by_trailing_paren() {
        let mut ctx = ctx_from("int f(int x) { return g(x) + y; }");
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();
        let f = ctx.symtab.lookup("f").unwrap();
        let g = ctx.symtab.lookup("g").unwrap();
        let y = ctx.symtab.lookup("y").unwrap();
        assert_eq!(ctx.symtab.get(f).callees, vec![g, y]);
        assert_eq!(ctx.symtab.get(g).callers, vec![f]);
        assert!(ctx.symtab.get(y).callers.is_empty());
    }

    #[test]
    fn control_keywords_never_become_calls() {
        let mut ctx = ctx_from("int f(int x) { if (x) return g(x); return 0; }");
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();
        assert!(ctx.symtab.lookup("if").is_none());
        assert!(ctx.symtab.lookup("return").is_none());
        assert!(ctx.symtab.lookup("g").is_some());
    }

    #[test]
    fn member_access_chain_is_skipped_not_referenced() {
        let mut ctx = ctx_from("int f(int x) { s.field = 1; p->next->data = 2; return g(x); }");
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();
        assert!(ctx.symtab.lookup("field").is_none());
        assert!(ctx.symtab.lookup("next").is_none());
        assert!(ctx.symtab.lookup("data").is_none());
        assert!(ctx.symtab.lookup("s").is_some());
        assert!(ctx.symtab.lookup("p").is_some());
    }

    #[test]
    fn cast_type_name_is_not_referenced() {
        let mut ctx = ctx_from("int f(int x) { return (int) g(x); }");
        crate::grammar::parse_translation_unit(&mut ctx).unwrap();
        assert!(ctx.symtab.lookup("int").is_none());
        assert!(ctx.symtab.lookup("g").is_some());
    }
}
