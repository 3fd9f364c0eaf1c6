//! Storage-class tracking for declared identifiers.

/// Storage class of a declared identifier.
///
/// `ExplicitExtern` exists only to distinguish `extern int f(void);` from
/// an implicit top-level declaration; it is downgraded to `Extern` the
/// moment a symbol is installed (see `cg_core::symtab::declare`).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub enum Storage {
    #[default]
    Extern,
    ExplicitExtern,
    Static,
    Auto,
    /// Used only for typedef names, which are not function/variable
    /// symbols and do not carry a meaningful storage class otherwise.
    TypedefAny,
}

impl Storage {
    /// Downgrade `ExplicitExtern` to `Extern`; every other variant passes
    /// through unchanged. Applied exactly once, at symbol installation.
    #[must_use]
    pub fn downgraded(self) -> Storage {
        match self {
            Storage::ExplicitExtern => Storage::Extern,
            other => other,
        }
    }
}
