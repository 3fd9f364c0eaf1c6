//! `cgc` -- runs the call-graph core over one or more C source files and
//! prints a plain per-symbol dump. No output formatters, no project
//! discovery: this exists so the core is runnable end to end.

use std::process::ExitCode;

use cg_core::{ParserConfig, ParserContext, Symbol, SymbolKind, TypedefRegistry};
use cg_ir::Storage;
use cg_scan::Scanner;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let mut files = Vec::new();
    let mut config = ParserConfig::default();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => config.verbose = true,
            "--ansi" => config.strict_ansi = true,
            "--debug" => config.debug = true,
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => files.push(other.to_string()),
        }
    }

    if files.is_empty() {
        print_usage();
        return ExitCode::FAILURE;
    }

    let mut failed = false;
    for path in &files {
        if let Err(err) = process_file(path, &config) {
            eprintln!("cgc: {path}: {err}");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_usage() {
    eprintln!("usage: cgc [-v|--verbose] [--ansi] [--debug] <file.c>...");
}

fn process_file(path: &str, config: &ParserConfig) -> std::io::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let typedefs = TypedefRegistry::new();
    // The scanner only ever reads the registry; `typedefs` itself is
    // handed to the context, which is the one that mutates it as
    // `typedef` declarations are recognized.
    let oracle = typedefs.clone();
    let scanner = Scanner::new(&source, path, &oracle);
    let mut ctx = ParserContext::new(scanner, path, *config, typedefs);

    match cg_core::parse_translation_unit(&mut ctx) {
        Ok(()) => {}
        Err(fatal) => {
            eprintln!("cgc: {fatal}");
        }
    }

    cg_diagnostic::emit_to_stderr(&ctx.diagnostics);
    print_symbols(&ctx);
    Ok(())
}

fn print_symbols(ctx: &ParserContext<Scanner<'_>>) {
    for id in ctx.symtab.ids() {
        let sym = ctx.symtab.get(id);
        println!("{}", format_symbol(ctx, sym));
    }
}

fn format_symbol(ctx: &ParserContext<Scanner<'_>>, sym: &Symbol) -> String {
    let kind = match sym.kind {
        SymbolKind::Function => "function",
        SymbolKind::Typedef => "typedef",
    };
    let storage = match sym.storage {
        Storage::Extern | Storage::ExplicitExtern => "extern",
        Storage::Static => "static",
        Storage::Auto => "auto",
        Storage::TypedefAny => "typedef",
    };
    let callers = names_of(ctx, &sym.callers);
    let callees = names_of(ctx, &sym.callees);
    format!(
        "{} {} {} arity={} callers=[{}] callees=[{}]",
        sym.name, kind, storage, sym.arity, callers, callees
    )
}

fn names_of(ctx: &ParserContext<Scanner<'_>>, ids: &[cg_core::SymbolId]) -> String {
    ids.iter()
        .map(|id| ctx.symtab.get(*id).name.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
