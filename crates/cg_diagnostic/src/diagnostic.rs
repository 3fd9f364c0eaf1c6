use std::fmt;

use crate::Message;

/// Severity of a diagnostic.
///
/// `Fatal` never appears in a `DiagnosticQueue`: it is returned directly
/// from the operation that detected it (see spec §7 tier 3) so the
/// driver can abort before touching the queue.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single recoverable diagnostic: where it happened, what went wrong,
/// and optionally the token text to print after "near".
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: Box<str>,
    pub line: u32,
    pub message: Message,
    pub near: Option<Box<str>>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, file: impl Into<Box<str>>, line: u32, message: Message) -> Self {
        Diagnostic {
            severity,
            file: file.into(),
            line,
            message,
            near: None,
        }
    }

    /// Attach the "near `token`" suffix the source prints for most
    /// syntactic anomalies.
    #[must_use]
    pub fn near(mut self, token: impl Into<Box<str>>) -> Self {
        self.near = Some(token.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)?;
        if let Some(tok) = &self.near {
            write!(f, " near `{tok}`")?;
        }
        Ok(())
    }
}

/// A non-recoverable invariant violation (spec §7 tier 3): `putback` at
/// cursor zero, or an allocation failure surfaced by the allocator
/// itself (which Rust already turns into an abort, so this variant
/// exists to model the former in a way the driver can report before
/// unwinding).
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Fatal {
    pub file: Box<str>,
    pub line: u32,
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.file,
            self.line,
            Message::InternalCannotPutback
        )
    }
}

impl std::error::Error for Fatal {}
