//! The parser's owned state, gathered into one struct per spec §9's
//! design note rather than threaded as a handful of loose globals (the
//! source parser's `filename`, `line_num`, `level`, `caller`, and the
//! static token stack all become fields here).

use cg_diagnostic::{Diagnostic, DiagnosticQueue, EofContext, Fatal, Message, Severity};
use cg_ir::{Token, TokenSource};

use crate::buffer::TokenBuffer;
use crate::symtab::{SymbolId, SymbolTable};
use crate::typenames::TypedefRegistry;
use crate::ParserConfig;

pub struct ParserContext<S> {
    pub(crate) buffer: TokenBuffer<S>,
    pub symtab: SymbolTable,
    pub diagnostics: DiagnosticQueue,
    pub config: ParserConfig,
    pub filename: Box<str>,
    /// Lexical nesting depth; `0` at file scope, incremented on every
    /// honest or synthesized opening brace.
    pub(crate) level: u32,
    /// The function whose body is currently being walked, if any. `None`
    /// at file scope, where `call`/`reference` have nothing to attach
    /// an edge's source end to.
    pub(crate) caller: Option<SymbolId>,
    /// Names the core has recognized as `typedef`s, shared with the
    /// scanner so later words are classified as `TypeName`.
    pub typedefs: TypedefRegistry,
}

impl<S: TokenSource> ParserContext<S> {
    pub fn new(
        source: S,
        filename: impl Into<Box<str>>,
        config: ParserConfig,
        typedefs: TypedefRegistry,
    ) -> Self {
        let filename = filename.into();
        ParserContext {
            buffer: TokenBuffer::new(source),
            symtab: SymbolTable::new(),
            diagnostics: DiagnosticQueue::new(),
            config,
            filename,
            level: 0,
            caller: None,
            typedefs,
        }
    }

    /// The current token's line, for stamping diagnostics and symbol
    /// references.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.buffer.current().line
    }

    fn push(&mut self, severity: Severity, message: Message, near: Option<&Token>) {
        if !self.config.verbose {
            return;
        }
        let mut d = Diagnostic::new(severity, &*self.filename, self.line(), message);
        if let Some(tok) = near {
            d = d.near(tok.to_string());
        }
        self.diagnostics.push(d);
    }

    /// A recoverable syntactic anomaly (spec §7 tier 1): gated behind
    /// `verbose`, parsing proceeds regardless.
    pub fn warn_anomaly(&mut self, message: Message, near: Option<&Token>) {
        self.push(Severity::Warning, message, near);
    }

    /// End of file found inside a construct that expected more tokens
    /// (spec §7 tier 2): also gated behind `verbose`.
    pub fn warn_eof(&mut self, ctx: EofContext) {
        self.push(Severity::Warning, Message::UnexpectedEof(ctx), None);
    }

    /// A redefinition: unconditional regardless of `verbose`, since it
    /// is reported as an error in the source parser, not an anomaly.
    pub fn error_redefined(&mut self, name: &str, arity: i32, prior_file: &str, prior_line: u32) {
        self.diagnostics.push(Diagnostic::new(
            Severity::Error,
            &*self.filename,
            self.line(),
            Message::Redefined {
                name: Box::from(name),
                arity,
            },
        ));
        self.diagnostics.push(Diagnostic::new(
            Severity::Error,
            prior_file,
            prior_line,
            Message::PreviousDefinitionHere,
        ));
    }

    /// Return one token to the stream, or escalate to a `Fatal` if the
    /// buffer's cursor is already at zero.
    pub fn putback(&mut self) -> Result<(), Fatal> {
        self.buffer.putback().map(|_| ()).map_err(|()| Fatal {
            file: self.filename.clone(),
            line: self.line(),
        })
    }
}
