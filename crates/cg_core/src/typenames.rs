//! A typedef-name registry shared between the scanner and the core.
//!
//! The scanner classifies a word as `TokenKind::TypeName` by consulting
//! a `TypeNameOracle` (spec §6's scanner/core contract); this registry
//! is the mutable side of that contract, grown by `declare_type` as the
//! core recognizes `typedef` declarations and consulted by the scanner
//! on every word it reads afterward. Shared via `Rc<RefCell<_>>` since
//! scanner and core run on the same thread and the handoff is purely
//! sequential.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use cg_ir::TypeNameOracle;

#[derive(Clone, Default)]
pub struct TypedefRegistry(Rc<RefCell<FxHashSet<Box<str>>>>);

impl TypedefRegistry {
    #[must_use]
    pub fn new() -> Self {
        TypedefRegistry::default()
    }

    pub fn insert(&self, name: &str) {
        self.0.borrow_mut().insert(Box::from(name));
    }
}

impl TypeNameOracle for TypedefRegistry {
    fn is_type_name(&self, word: &str) -> bool {
        self.0.borrow().contains(word)
    }
}
