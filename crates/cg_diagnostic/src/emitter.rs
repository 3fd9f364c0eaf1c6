//! Terminal emission of queued diagnostics, in the `file:line: message`
//! shape spec §6 mandates.

use std::io::{self, Write};

use crate::{Diagnostic, DiagnosticQueue};

/// Writes every diagnostic in a queue to `out`, one per line, in the
/// order they were pushed.
pub fn emit_all<W: Write>(queue: &DiagnosticQueue, out: &mut W) -> io::Result<()> {
    for diagnostic in queue.iter() {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(())
}

/// Convenience wrapper writing to the process's standard error stream.
pub fn emit_to_stderr(queue: &DiagnosticQueue) {
    let stderr = io::stderr();
    let mut lock = stderr.lock();
    // A failure to write diagnostics to stderr is not itself something
    // the recognizer can recover from or meaningfully report further.
    let _ = emit_all(queue, &mut lock);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{EofContext, Message};
    use crate::Severity;

    #[test]
    fn emits_one_line_per_diagnostic() {
        let mut queue = DiagnosticQueue::new();
        queue.push(Diagnostic::new(
            Severity::Warning,
            "a.c",
            4,
            Message::UnexpectedEof(EofContext::Struct),
        ));
        let mut buf = Vec::new();
        emit_all(&queue, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "a.c:4: unexpected eof in struct\n"
        );
    }
}
