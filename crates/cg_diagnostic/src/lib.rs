//! Diagnostic collection and emission for the call-graph core.
//!
//! Three tiers, per spec §7: recoverable anomalies and redefinitions are
//! `Diagnostic`s pushed onto a `DiagnosticQueue`; invariant violations are
//! `Fatal` and bypass the queue entirely.

pub mod diagnostic;
pub mod emitter;
pub mod message;
pub mod queue;

pub use diagnostic::{Diagnostic, Fatal, Severity};
pub use emitter::{emit_all, emit_to_stderr};
pub use message::{EofContext, Message};
pub use queue::DiagnosticQueue;
