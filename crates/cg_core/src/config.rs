//! Parser-wide toggles (spec §9 Design Notes: "gather global state into
//! one owned aggregate" rather than scatter it across free functions).

/// Knobs that change how tolerantly the recognizer treats its input.
#[derive(Clone, Copy, Debug)]
pub struct ParserConfig {
    /// Emit tier-1/tier-2 diagnostics (recoverable anomalies, eof inside
    /// a nested construct) rather than silently recovering.
    pub verbose: bool,
    /// Reject GNU extensions the source parser otherwise tolerates
    /// (nested functions, `__attribute__`-style wrappers); currently
    /// only gates which parameter-wrapper keywords are recognized.
    pub strict_ansi: bool,
    /// Infer brace nesting from indentation when a block is missing its
    /// closing brace, in the style of the source parser's `-i` flag.
    pub use_indentation: bool,
    pub debug: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            verbose: false,
            strict_ansi: false,
            use_indentation: false,
            debug: false,
        }
    }
}
