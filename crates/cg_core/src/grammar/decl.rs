//! Declarator walking, symbol installation, and the two declaration
//! shapes that need special handling: `typedef` and old-style
//! (K&R) parameter declarations between a function's `)` and its body.
//!
//! Grounded on the source parser's `dcl`/`dirdcl`/`parmdcl`/`declare`/
//! `declare_type`/`parse_knr_dcl`/`parse_typedef`, restructured around
//! `Result<_, Fatal>` so a `putback` invariant violation propagates
//! instead of panicking.

use cg_diagnostic::{EofContext, Fatal, Message};
use cg_ir::{Storage, Token, TokenKind, TokenSource};

use crate::context::ParserContext;
use crate::declarator::Ident;
use crate::declstr::DeclStringBuilder;
use crate::grammar::struct_decl::skip_struct;
use crate::grammar::{advance, recover_to_semicolon};
use crate::symtab::SymbolKind;

fn render(prefix: &[Token], declarator: &[Token]) -> Box<str> {
    let mut b = DeclStringBuilder::new();
    for t in prefix.iter().chain(declarator.iter()) {
        b.push(t);
    }
    b.finish()
}

/// Consume storage-class keywords, `typedef`, and the type specifier
/// (a type-name word, or a `struct`/`union`/`enum` specifier) that
/// precede every declarator list. Returns the storage this group of
/// declarators takes (falling back to `default_storage` when no
/// explicit keyword appears) and whether `typedef` was seen.
fn parse_specifier<S: TokenSource>(
    ctx: &mut ParserContext<S>,
    out: &mut Vec<Token>,
    default_storage: Storage,
) -> Result<(Storage, bool), Fatal> {
    let mut storage = default_storage;
    let mut typedef_seen = false;
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::Extern => {
                storage = Storage::ExplicitExtern;
                advance(ctx, out);
            }
            TokenKind::Static => {
                storage = Storage::Static;
                advance(ctx, out);
            }
            TokenKind::Typedef => {
                typedef_seen = true;
                advance(ctx, out);
            }
            TokenKind::StructKeyword => {
                skip_struct(ctx, out)?;
            }
            TokenKind::TypeName | TokenKind::Modifier => {
                advance(ctx, out);
            }
            _ => break,
        }
    }
    Ok((storage, typedef_seen))
}

/// One declarator: optional leading pointer/qualifier modifiers, then
/// `dirdcl`.
fn dcl<S: TokenSource>(
    ctx: &mut ParserContext<S>,
    out: &mut Vec<Token>,
    ident: &mut Ident,
) -> Result<(), Fatal> {
    while matches!(ctx.buffer.current_kind(), TokenKind::Modifier) {
        advance(ctx, out);
    }
    dirdcl(ctx, out, ident)
}

/// The core of a declarator: a parenthesized sub-declarator or a bare
/// name, followed by any number of `[...]` or `(...)` suffixes. The
/// last `(...)` suffix seen determines `ident.parmcnt`.
///
/// `dcl`/`dirdcl` recurse into one another once per parenthesized
/// sub-declarator (`int (*(*f)(void))(int);` and the like), so this is
/// the one place in the descent that can run the stack dry on
/// adversarial input; `ensure_sufficient_stack` grows it on demand.
fn dirdcl<S: TokenSource>(
    ctx: &mut ParserContext<S>,
    out: &mut Vec<Token>,
    ident: &mut Ident,
) -> Result<(), Fatal> {
    cg_stack::ensure_sufficient_stack(|| dirdcl_inner(ctx, out, ident))
}

fn dirdcl_inner<S: TokenSource>(
    ctx: &mut ParserContext<S>,
    out: &mut Vec<Token>,
    ident: &mut Ident,
) -> Result<(), Fatal> {
    match ctx.buffer.current_kind() {
        TokenKind::Char(b'(') => {
            advance(ctx, out);
            dcl(ctx, out, ident)?;
            if matches!(ctx.buffer.current_kind(), TokenKind::Char(b')')) {
                advance(ctx, out);
            } else {
                let near = ctx.buffer.current().clone();
                ctx.warn_anomaly(Message::ExpectedCloseParen, Some(&near));
            }
        }
        TokenKind::Identifier | TokenKind::TypeName => {
            ident.name = ctx.buffer.current().text.clone();
            ident.line = ctx.buffer.current().line;
            advance(ctx, out);
        }
        _ => return Ok(()),
    }
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::Char(b'(') => {
                let (count, names) = parse_parm_list(ctx, out)?;
                ident.parmcnt = count;
                ident.param_names = names;
            }
            TokenKind::Char(b'[') => {
                skip_bracketed(ctx, out)?;
            }
            _ => break,
        }
    }
    Ok(())
}

/// Consume a parenthesized parameter list, returning the number of
/// comma-separated entries (`()` is `0`; `(void)` is `1`, since a
/// tolerant token count cannot tell `void` apart from a real parameter
/// -- see the decision recorded for this in the design ledger) along
/// with the bare parameter names found at the top level, so a function
/// definition can shadow them as `auto` locals in its body.
fn parse_parm_list<S: TokenSource>(
    ctx: &mut ParserContext<S>,
    out: &mut Vec<Token>,
) -> Result<(i32, Vec<Box<str>>), Fatal> {
    advance(ctx, out); // '('
    if matches!(ctx.buffer.current_kind(), TokenKind::Char(b')')) {
        advance(ctx, out);
        return Ok((0, Vec::new()));
    }
    let mut depth = 0i32;
    let mut count = 1;
    let mut names = Vec::new();
    let mut pending: Option<Box<str>> = None;
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::ParameterList);
                return Ok((count, names));
            }
            TokenKind::Char(b'(' | b'[') => {
                depth += 1;
                advance(ctx, out);
            }
            TokenKind::Char(b')') => {
                if depth == 0 {
                    if let Some(name) = pending.take() {
                        names.push(name);
                    }
                    advance(ctx, out);
                    return Ok((count, names));
                }
                depth -= 1;
                advance(ctx, out);
            }
            TokenKind::Char(b']') => {
                depth -= 1;
                advance(ctx, out);
            }
            TokenKind::Char(b',') => {
                if depth == 0 {
                    count += 1;
                    if let Some(name) = pending.take() {
                        names.push(name);
                    }
                }
                advance(ctx, out);
            }
            TokenKind::Identifier if depth == 0 => {
                pending = Some(ctx.buffer.current().text.clone());
                advance(ctx, out);
            }
            _ => {
                advance(ctx, out);
            }
        }
    }
}

fn skip_bracketed<S: TokenSource>(ctx: &mut ParserContext<S>, out: &mut Vec<Token>) -> Result<(), Fatal> {
    advance(ctx, out); // '['
    let mut depth = 0i32;
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::Eof => return Ok(()),
            TokenKind::Char(b'[') => {
                depth += 1;
                advance(ctx, out);
            }
            TokenKind::Char(b']') => {
                advance(ctx, out);
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            _ => {
                advance(ctx, out);
            }
        }
    }
}

/// Old-style parameter declarations between `)` and the function body:
/// `int f(a, b) int a; int b; { ... }`. Their types don't refine
/// anything this recognizer tracks, so each is scanned and discarded.
fn parse_knr_dcl<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<(), Fatal> {
    loop {
        match ctx.buffer.current_kind() {
            TokenKind::LBrace | TokenKind::LBrace0 => return Ok(()),
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::FunctionDeclaration);
                return Ok(());
            }
            _ => loop {
                match ctx.buffer.current_kind() {
                    TokenKind::Char(b';') => {
                        ctx.buffer.next();
                        break;
                    }
                    TokenKind::LBrace | TokenKind::LBrace0 => return Ok(()),
                    TokenKind::Eof => {
                        ctx.warn_eof(EofContext::FunctionDeclaration);
                        return Ok(());
                    }
                    _ => {
                        ctx.buffer.next();
                    }
                }
            },
        }
    }
}

/// Install (or refine) the symbol for one declarator, following the
/// source parser's `declare`: a bare function prototype (`parmcnt >= 0`
/// immediately followed by `;`) and a forward `extern` variable
/// declaration are recognized but never installed as symbols, since
/// neither is a definition or a call-graph-relevant use.
fn declare<S: TokenSource>(ctx: &mut ParserContext<S>, ident: &Ident, decl_text: &str) {
    if (ident.parmcnt >= 0 && matches!(ctx.buffer.current_kind(), TokenKind::Char(b';')))
        || (ident.parmcnt < 0 && ident.storage == Storage::ExplicitExtern)
    {
        return;
    }
    let storage = ident.storage.downgraded();
    let id = if ctx.level == 0 {
        let id = ctx.symtab.get_symbol(&ident.name);
        if let Some(prior_file) = ctx.symtab.get(id).source.clone() {
            let prior_line = ctx.symtab.get(id).def_line;
            let prior_arity = ctx.symtab.get(id).arity;
            ctx.error_redefined(&ident.name, prior_arity, &prior_file, prior_line);
        }
        id
    } else {
        // A block-scoped declaration always shadows rather than
        // redefines: two different blocks are free to reuse a name.
        ctx.symtab.install(&ident.name)
    };
    let sym = ctx.symtab.get_mut(id);
    sym.storage = storage;
    sym.kind = SymbolKind::Function;
    if ident.is_function() {
        sym.arity = ident.parmcnt;
    }
    sym.decl = Box::from(decl_text);
    sym.source = Some(ctx.filename.clone());
    sym.def_line = ident.line;
    sym.level = ctx.level;
}

/// `typedef <specifier> <declarator-list>;` -- each declared name
/// becomes a type name rather than a function/variable symbol, and is
/// registered so the scanner classifies it as `TokenName` from here on.
fn parse_typedef<S: TokenSource>(ctx: &mut ParserContext<S>) -> Result<(), Fatal> {
    loop {
        let mut declarator = Vec::new();
        let mut ident = Ident::new(Storage::TypedefAny);
        dcl(ctx, &mut declarator, &mut ident)?;
        if !ident.name.is_empty() {
            ctx.typedefs.insert(&ident.name);
        }
        match ctx.buffer.current_kind() {
            TokenKind::Char(b',') => {
                ctx.buffer.next();
                continue;
            }
            TokenKind::Char(b';') => {
                ctx.buffer.next();
                return Ok(());
            }
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::Declaration);
                return Ok(());
            }
            _ => {
                let near = ctx.buffer.current().clone();
                ctx.warn_anomaly(Message::ExpectedSemicolon, Some(&near));
                recover_to_semicolon(ctx);
                return Ok(());
            }
        }
    }
}

/// One full declaration: a specifier followed by one or more
/// comma-separated declarators, ending in `;`, or -- when the single
/// declarator is function-shaped -- a body.
#[tracing::instrument(level = "debug", skip_all, fields(line = ctx.line()))]
pub fn parse_declaration<S: TokenSource>(
    ctx: &mut ParserContext<S>,
    default_storage: Storage,
) -> Result<(), Fatal> {
    let mut prefix = Vec::new();
    let (storage, typedef_seen) = parse_specifier(ctx, &mut prefix, default_storage)?;
    if typedef_seen {
        return parse_typedef(ctx);
    }
    loop {
        let mut declarator = Vec::new();
        let mut ident = Ident::new(storage);
        dcl(ctx, &mut declarator, &mut ident)?;
        if ident.name.is_empty() {
            let near = ctx.buffer.current().clone();
            ctx.warn_anomaly(Message::ExpectedSemicolon, Some(&near));
            recover_to_semicolon(ctx);
            return Ok(());
        }

        if ident.is_function()
            && matches!(
                ctx.buffer.current_kind(),
                TokenKind::Identifier
                    | TokenKind::TypeName
                    | TokenKind::Extern
                    | TokenKind::Static
                    | TokenKind::Typedef
                    | TokenKind::StructKeyword
            )
        {
            parse_knr_dcl(ctx)?;
        }

        let decl_text = render(&prefix, &declarator);
        let is_definition =
            ident.is_function() && matches!(ctx.buffer.current_kind(), TokenKind::LBrace | TokenKind::LBrace0);
        declare(ctx, &ident, &decl_text);

        if is_definition {
            ctx.caller = ctx.symtab.lookup(&ident.name);
            let body_level = ctx.level + 1;
            for name in &ident.param_names {
                let id = ctx.symtab.install(name);
                let sym = ctx.symtab.get_mut(id);
                sym.storage = Storage::Auto;
                sym.level = body_level;
            }
            super::body::func_body(ctx)?;
            return Ok(());
        }

        if matches!(ctx.buffer.current_kind(), TokenKind::Char(b'=')) {
            ctx.buffer.next();
            super::expr::scan_initializer(ctx)?;
        }

        match ctx.buffer.current_kind() {
            TokenKind::Char(b',') => {
                ctx.buffer.next();
            }
            TokenKind::Char(b';') => {
                ctx.buffer.next();
                return Ok(());
            }
            TokenKind::Eof => {
                ctx.warn_eof(EofContext::Declaration);
                return Ok(());
            }
            _ => {
                let near = ctx.buffer.current().clone();
                ctx.warn_anomaly(Message::ExpectedSemicolon, Some(&near));
                recover_to_semicolon(ctx);
                return Ok(());
            }
        }
    }
}
