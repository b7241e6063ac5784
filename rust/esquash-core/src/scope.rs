//! Scope representation and the scope arena (§3, §9).
//!
//! Scopes form a tree, but each `Scope` only needs to walk *up* toward the
//! program scope, so rather than give every scope an owning reference to its
//! parent (which Rust's borrow checker does not let a tree of `Box`-owned
//! AST nodes hold cyclically anyway, per the design note in §9) we keep all
//! scopes in one arena `Vec` and have children refer to parents by index.

use std::collections::HashMap;

use crate::ast::NodeId;

/// Index into a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

/// An insertion-ordered string-keyed map.
///
/// `std::collections::HashMap` does not preserve insertion order, and the
/// rename pass breaks reference-count ties by declaration order (§4.2), so
/// scopes need an ordered map without pulling in a dependency the rest of
/// the crate has no other use for.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: String, value: V) {
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if let Some(&i) = self.index.get(key) {
            Some(&mut self.entries[i].1)
        } else {
            None
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single lexical scope: the program scope, or one per function.
///
/// `declarations`, `references`, and the rename maps are all populated by
/// later passes ([`crate::scope_builder`], [`crate::reference`],
/// [`crate::rename`]); a freshly built scope only has `parent` and
/// `is_program` set.
#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// The program scope is always protected regardless of `uses_with`/
    /// `uses_eval` (§3).
    pub is_program: bool,
    /// Set by the scope builder (§4.6) on this scope and every ancestor
    /// when a `WithStatement` is found anywhere inside it.
    pub uses_with: bool,
    /// Set by the scope builder (§4.6) on this scope and every ancestor
    /// when a `Name` valued `eval` is found anywhere inside it. Read
    /// through [`Scope::is_protected`], which filters out the case where
    /// `eval` is itself a local declared on the resolution chain.
    pub uses_eval: bool,
    /// All declarations in this scope, keyed by name -> declaring node.
    pub declarations: OrderedMap<NodeId>,
    /// Subset of `declarations` introduced by function declarations /
    /// named function expressions.
    pub functions: OrderedMap<NodeId>,
    /// Subset of `declarations` introduced by formal parameters.
    pub parameters: OrderedMap<NodeId>,
    /// Subset of `declarations` introduced by `var`.
    pub variables: OrderedMap<NodeId>,
    /// Name -> the scope (possibly an ancestor) it resolved to. Populated
    /// by the reference collector (§4.7).
    pub references: OrderedMap<ScopeId>,
    /// Name -> number of `Name` expression nodes anywhere in this scope's
    /// subtree (stopping at nested function boundaries) that resolved to a
    /// declaration made *in* this scope. Drives rename priority (§4.2):
    /// most-referenced gets the shortest name.
    pub reference_counts: OrderedMap<u32>,
    /// Populated by the renamer (§4.8): original name -> chosen short name.
    /// Empty (and never consulted) on a protected scope.
    pub original_to_new: OrderedMap<String>,
    /// The reverse of `original_to_new`, used to keep newly generated names
    /// from colliding with a name some outer scope already picked.
    pub new_to_original: OrderedMap<String>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, is_program: bool) -> Self {
        Self {
            parent,
            is_program,
            uses_with: false,
            uses_eval: false,
            declarations: OrderedMap::new(),
            functions: OrderedMap::new(),
            parameters: OrderedMap::new(),
            variables: OrderedMap::new(),
            references: OrderedMap::new(),
            reference_counts: OrderedMap::new(),
            original_to_new: OrderedMap::new(),
            new_to_original: OrderedMap::new(),
        }
    }

    /// A scope is protected (locals must not be renamed) iff it is the
    /// program scope, it uses `with`, or it uses `eval` in a way that isn't
    /// shadowed by a local `eval` declaration on its own resolution chain
    /// (§3, §4.6).
    pub fn is_protected(&self, eval_is_local: bool) -> bool {
        self.is_program || self.uses_with || (self.uses_eval && !eval_is_local)
    }
}

/// Owns every `Scope` built for one compilation; scopes refer to each other
/// by [`ScopeId`] rather than by reference.
#[derive(Debug, Clone, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    pub fn create(&mut self, parent: Option<ScopeId>, is_program: bool) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(parent, is_program));
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Marks `id`, and every scope on its path up to the program scope, as
    /// using `with` (§4.6).
    pub fn mark_uses_with(&mut self, mut id: Option<ScopeId>) {
        while let Some(scope_id) = id {
            let scope = self.get_mut(scope_id);
            scope.uses_with = true;
            id = scope.parent;
        }
    }

    /// Marks `id`, and every scope on its path up to the program scope, as
    /// using `eval` (§4.6). Marking is unconditional; whether it actually
    /// protects a given scope is decided later by [`Scope::is_protected`].
    pub fn mark_uses_eval(&mut self, mut id: Option<ScopeId>) {
        while let Some(scope_id) = id {
            let scope = self.get_mut(scope_id);
            scope.uses_eval = true;
            id = scope.parent;
        }
    }

    /// Whether `eval` is declared as a local anywhere on the resolution
    /// chain starting at `id` (§4.6's filter on `uses_eval`).
    pub fn eval_is_local(&self, mut id: Option<ScopeId>) -> bool {
        while let Some(scope_id) = id {
            let scope = self.get(scope_id);
            if scope.declarations.contains_key("eval") {
                return true;
            }
            id = scope.parent;
        }
        false
    }
}
