//! Symbol table and call-graph edges (spec §5).
//!
//! An arena of `Symbol`s addressed by a typed index, with a name index
//! on top for `lookup`/`get_symbol`. Mirrors `ori_ir::arena`'s
//! Vec-plus-u32-id shape rather than the source parser's `Symbol *next`
//! linked buckets, since graph edges here are symmetric and an
//! adjacency list of indices is both cheaper and impossible to leak.

use rustc_hash::FxHashMap;

use cg_ir::Storage;

/// What kind of name a symbol denotes. Spec's two kinds: `Function`
/// covers every declarator that isn't a type name -- a plain variable
/// is a function-kind symbol with arity `-1`, same as the source
/// parser's `SymIdentifier` covering both (`parser.c:912`).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum SymbolKind {
    Function,
    Typedef,
}

/// A reference to one apparent use of a name: where a name was either
/// called, referenced, or (re)declared.
#[derive(Clone, Debug)]
pub struct Reference {
    pub file: Box<str>,
    pub line: u32,
}

/// One entry in the symbol table: a name plus everything learned about
/// it and its place in the call graph.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: Box<str>,
    pub kind: SymbolKind,
    pub storage: Storage,
    /// `-1` until a declaration fixes an arity; for a function, the
    /// parameter count from the winning declaration.
    pub arity: i32,
    pub decl: Box<str>,
    pub source: Option<Box<str>>,
    pub def_line: u32,
    /// Lexical nesting depth at the point of declaration; `0` at file
    /// scope. Symbols with `storage == Auto` are purged when their
    /// level's block closes and never appear in a call graph.
    pub level: u32,
    pub refs: Vec<Reference>,
    pub callers: Vec<SymbolId>,
    pub callees: Vec<SymbolId>,
}

impl Symbol {
    fn new(name: Box<str>) -> Self {
        Symbol {
            name,
            kind: SymbolKind::Function,
            storage: Storage::Extern,
            arity: -1,
            decl: Box::from(""),
            source: None,
            def_line: 0,
            level: 0,
            refs: Vec::new(),
            callers: Vec::new(),
            callees: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SymbolId(u32);

/// Name-indexed arena of symbols plus the edges between them.
pub struct SymbolTable {
    arena: Vec<Symbol>,
    by_name: FxHashMap<Box<str>, Vec<SymbolId>>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        SymbolTable {
            arena: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.arena[id.0 as usize]
    }

    /// Every symbol id currently in the arena, in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.arena.len()).map(|i| SymbolId(u32::try_from(i).expect("symbol table overflow")))
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.arena[id.0 as usize]
    }

    /// Find an existing symbol by name at any level, without creating
    /// one. Mirrors the source parser's plain `lookup`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).and_then(|ids| ids.last().copied())
    }

    /// Find-or-create, mirroring `get_symbol`: return the first
    /// function-kind symbol in the name's bucket (a type-kind symbol of
    /// the same name is never reused for this), or install a fresh
    /// function-kind stub.
    pub fn get_symbol(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.lookup_function(name) {
            return id;
        }
        self.install(name)
    }

    /// The innermost (most recently declared) function-kind symbol
    /// named `name`, skipping over any type-kind symbol sharing the
    /// name.
    fn lookup_function(&self, name: &str) -> Option<SymbolId> {
        self.by_name
            .get(name)?
            .iter()
            .rev()
            .copied()
            .find(|id| self.get(*id).kind == SymbolKind::Function)
    }

    /// Unconditionally create a new symbol, shadowing any earlier one
    /// with the same name rather than reusing it. Used for local
    /// declarations, so a block-scoped name never gets confused with an
    /// outer symbol of the same spelling and `lookup`/`add_reference`
    /// resolve to the innermost one until `delete_autos` pops it.
    pub fn install(&mut self, name: &str) -> SymbolId {
        let id = SymbolId(u32::try_from(self.arena.len()).expect("symbol table overflow"));
        self.arena.push(Symbol::new(Box::from(name)));
        self.by_name.entry(Box::from(name)).or_default().push(id);
        id
    }

    /// Record one textual use of `name` at `file:line`, creating the
    /// symbol if this is the first mention. Auto-storage symbols are
    /// never tracked here: they fall out of scope with their block and
    /// a call graph has nothing useful to say about them.
    pub fn add_reference(&mut self, name: &str, file: &str, line: u32) -> Option<SymbolId> {
        let id = self.get_symbol(name);
        if self.get(id).storage == Storage::Auto {
            return None;
        }
        self.get_mut(id).refs.push(Reference {
            file: Box::from(file),
            line,
        });
        Some(id)
    }

    /// Record that `caller` calls `callee` by name, creating a
    /// caller/callee edge in both directions. Matches the source
    /// parser's `call`: bumps `-1` arity to `0` on first sight (a call
    /// site proves at least zero arguments are meaningful) and dedups
    /// both adjacency lists by identity.
    pub fn call(&mut self, callee_name: &str, file: &str, line: u32, caller: Option<SymbolId>) {
        let Some(callee) = self.add_reference(callee_name, file, line) else {
            return;
        };
        if self.get(callee).arity < 0 {
            self.get_mut(callee).arity = 0;
        }
        let Some(caller) = caller else { return };
        if !self.get(callee).callers.contains(&caller) {
            self.get_mut(callee).callers.push(caller);
        }
        if !self.get(caller).callees.contains(&callee) {
            self.get_mut(caller).callees.push(callee);
        }
    }

    /// Record that `caller` mentions `name` in a non-call expression
    /// context. Unlike `call`, this never adds `caller` to the callee's
    /// `callers` list -- a plain reference does not prove a call
    /// relationship in the other direction.
    pub fn reference(&mut self, name: &str, file: &str, line: u32, caller: Option<SymbolId>) {
        let Some(referenced) = self.add_reference(name, file, line) else {
            return;
        };
        let Some(caller) = caller else { return };
        if !self.get(caller).callees.contains(&referenced) {
            self.get_mut(caller).callees.push(referenced);
        }
    }

    /// Remove every symbol whose storage is `Auto` and whose level is
    /// `>= level`, called when a block at that level closes. Matches
    /// `cleanup_stack`'s auto-variable sweep, but operating on the
    /// symbol table directly rather than a parse-time stack since autos
    /// are excluded from the graph entirely.
    pub fn delete_autos(&mut self, level: u32) {
        let doomed: Vec<Box<str>> = self
            .arena
            .iter()
            .filter(|s| s.storage == Storage::Auto && s.level >= level)
            .map(|s| s.name.clone())
            .collect();
        for name in doomed {
            if let Some(ids) = self.by_name.get_mut(&name) {
                ids.retain(|id| {
                    let sym = &self.arena[id.0 as usize];
                    !(sym.storage == Storage::Auto && sym.level >= level)
                });
                if ids.is_empty() {
                    self.by_name.remove(&name);
                }
            }
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_symbol_is_idempotent_by_name() {
        let mut t = SymbolTable::new();
        let a = t.get_symbol("f");
        let b = t.get_symbol("f");
        assert_eq!(a, b);
    }

    #[test]
    fn get_symbol_skips_a_type_kind_symbol_of_the_same_name() {
        let mut t = SymbolTable::new();
        let ty = t.install("Point");
        t.get_mut(ty).kind = SymbolKind::Typedef;
        let sym = t.get_symbol("Point");
        assert_ne!(sym, ty);
        assert_eq!(t.get(sym).kind, SymbolKind::Function);
        assert_eq!(t.get_symbol("Point"), sym);
    }

    #[test]
    fn call_creates_bidirectional_edge_and_bumps_arity() {
        let mut t = SymbolTable::new();
        let caller = t.get_symbol("main");
        t.call("g", "t.c", 3, Some(caller));
        let callee = t.lookup("g").unwrap();
        assert_eq!(t.get(callee).arity, 0);
        assert_eq!(t.get(callee).callers, vec![caller]);
        assert_eq!(t.get(caller).callees, vec![callee]);
    }

    #[test]
    fn call_dedups_repeated_edges() {
        let mut t = SymbolTable::new();
        let caller = t.get_symbol("main");
        t.call("g", "t.c", 3, Some(caller));
        t.call("g", "t.c", 4, Some(caller));
        let callee = t.lookup("g").unwrap();
        assert_eq!(t.get(callee).callers.len(), 1);
        assert_eq!(t.get(caller).callees.len(), 1);
        assert_eq!(t.get(callee).refs.len(), 2);
    }

    #[test]
    fn reference_never_adds_caller_to_callers_list() {
        let mut t = SymbolTable::new();
        let caller = t.get_symbol("main");
        t.reference("count", "t.c", 3, Some(caller));
        let referenced = t.lookup("count").unwrap();
        assert!(t.get(referenced).callers.is_empty());
        assert_eq!(t.get(caller).callees, vec![referenced]);
    }

    #[test]
    fn auto_storage_symbols_are_excluded_from_references() {
        let mut t = SymbolTable::new();
        let id = t.get_symbol("x");
        t.get_mut(id).storage = Storage::Auto;
        assert!(t.add_reference("x", "t.c", 1).is_none());
    }

    #[test]
    fn delete_autos_removes_only_matching_level_and_storage() {
        let mut t = SymbolTable::new();
        let auto_inner = t.get_symbol("tmp");
        t.get_mut(auto_inner).storage = Storage::Auto;
        t.get_mut(auto_inner).level = 2;
        let global = t.get_symbol("g");
        t.get_mut(global).level = 0;
        t.delete_autos(1);
        assert!(t.lookup("tmp").is_none());
        assert!(t.lookup("g").is_some());
    }
}
