//! The contract between the scanner and the core (spec §6: "External
//! interfaces").

use crate::Token;

/// What the core expects from a scanner: a pull-based stream of
/// classified tokens, plus the diagnostic-tagging context (`filename`).
/// `line_num` is exposed per-token via `Token::line`, so it is not a
/// separate method here.
pub trait TokenSource {
    /// Produce the next token. Once end-of-input is reached, every
    /// subsequent call returns another `Eof` token (the scanner, not the
    /// token buffer, is responsible for this stickiness at the source).
    fn next_token(&mut self) -> Token;

    /// The name tagged onto diagnostics for tokens this source produces.
    fn filename(&self) -> &str;
}

/// How the scanner asks whether a bare word has been established as a
/// type name by an earlier typedef, per spec §6: "The scanner may
/// consult the symbol table to reclassify identifiers as type-names."
pub trait TypeNameOracle {
    fn is_type_name(&self, word: &str) -> bool;
}

/// An oracle that never reclassifies anything; useful for tests that
/// want `identifier` kinds exactly as written.
pub struct NoTypeNames;

impl TypeNameOracle for NoTypeNames {
    fn is_type_name(&self, _word: &str) -> bool {
        false
    }
}
