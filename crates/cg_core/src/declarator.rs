//! The identifier record a declarator walk fills in as it unwinds
//! (`Ident` in the source parser).

use cg_ir::Storage;

/// What `dirdcl` discovered about one declared name by the time control
/// returns to `parse_dcl`.
#[derive(Clone, Debug)]
pub struct Ident {
    pub name: Box<str>,
    /// Index into the declaration-string buffer marking where the type
    /// suffix (the part after the name) begins; `None` until a name has
    /// been seen.
    pub type_end_index: usize,
    /// `-1` for a non-function declarator, `>= 0` (parameter count) once
    /// `dirdcl` walks a `(...)` suffix.
    pub parmcnt: i32,
    pub line: u32,
    pub storage: Storage,
    /// Bare parameter names captured from the most recently parsed
    /// `(...)` suffix, so a function definition can shadow them as
    /// `auto` locals for the duration of its body.
    pub param_names: Vec<Box<str>>,
}

impl Ident {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Ident {
            name: Box::from(""),
            type_end_index: 0,
            parmcnt: -1,
            line: 0,
            storage,
            param_names: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        self.parmcnt >= 0
    }
}
