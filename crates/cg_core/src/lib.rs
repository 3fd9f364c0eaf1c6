//! Tolerant recognizer for a single C translation unit: a speculative,
//! lookahead-driven descent that builds a symbol table and a
//! caller/callee call graph without ever constructing a full AST.
//!
//! The entry point is [`parse_translation_unit`]: it drives a
//! [`ParserContext`] (built around any `cg_ir::TokenSource`, typically
//! `cg_scan::Scanner`) to completion, after which `ctx.symtab` holds
//! every symbol discovered and `ctx.diagnostics` holds everything that
//! went sideways along the way.

mod buffer;
mod config;
mod context;
mod declarator;
mod declstr;
pub mod grammar;
mod symtab;
#[cfg(test)]
mod test_support;
mod typenames;

pub use config::ParserConfig;
pub use context::ParserContext;
pub use declarator::Ident;
pub use grammar::parse_translation_unit;
pub use symtab::{Reference, Symbol, SymbolId, SymbolKind, SymbolTable};
pub use typenames::TypedefRegistry;
