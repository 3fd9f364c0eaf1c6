//! Shared test scaffolding: a ready-made context over the real scanner,
//! so grammar unit tests exercise the same token stream the binary
//! would see rather than hand-built token vectors.

#![cfg(test)]

use cg_ir::{Token, TokenKind, TokenSource};
use cg_scan::Scanner;

use crate::context::ParserContext;
use crate::typenames::TypedefRegistry;
use crate::ParserConfig;

pub(crate) fn ctx_from(src: &'static str) -> ParserContext<Scanner<'static>> {
    ctx_from_with_config(src, ParserConfig::default())
}

pub(crate) fn ctx_from_with_config(
    src: &'static str,
    config: ParserConfig,
) -> ParserContext<Scanner<'static>> {
    let typedefs = TypedefRegistry::new();
    let oracle: &'static TypedefRegistry = Box::leak(Box::new(typedefs.clone()));
    let scanner = Scanner::new(src, "t.c", oracle);
    ParserContext::new(scanner, "t.c", config, typedefs)
}

/// A fixed token stream, for exercising token kinds the real scanner
/// never produces on its own (indentation-guessed braces), the same
/// role the source parser's injected test tokens play.
pub(crate) struct VecSource {
    tokens: std::vec::IntoIter<Token>,
}

impl VecSource {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        VecSource {
            tokens: tokens.into_iter(),
        }
    }
}

impl TokenSource for VecSource {
    fn next_token(&mut self) -> Token {
        self.tokens.next().unwrap_or_else(|| Token::new(TokenKind::Eof, "", 0))
    }

    fn filename(&self) -> &str {
        "t.c"
    }
}

pub(crate) fn ctx_from_tokens(
    tokens: Vec<Token>,
    config: ParserConfig,
) -> ParserContext<VecSource> {
    let typedefs = TypedefRegistry::new();
    ParserContext::new(VecSource::new(tokens), "t.c", config, typedefs)
}
