//! Scope chain for the Mamba transpiler
//!
//! Tracks which variables are visible at the point of emission so that an annotated assignment to an existing name is
//! emitted as a re-assignment instead of a second declaration.
//!
//! Levels live in a single `Vec` owned by the chain; each level points at its parent by index. The root level is
//! created with the chain and can never be popped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use miette::Diagnostic;
use thiserror::Error;

/// Name of the level every chain starts with.
pub const ROOT_SCOPE_NAME: &str = "root";

/// Level ids are unique across every chain in the process, so a handle only matches the chain that issued it.
static NEXT_SCOPE_ID: AtomicUsize = AtomicUsize::new(0);

fn next_scope_id() -> usize {
    NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A name was defined while an earlier definition is still visible.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("symbol `{name}` is already defined in scope `{scope}`")]
#[diagnostic(code(mamba::scope::duplicate_symbol))]
pub struct DuplicateSymbol {
    pub name: String,
    /// Level holding the earlier definition
    pub scope: String,
}

/// Attempt to pop below the root level (or with a handle that no longer refers to an open level).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("cannot pop scope: no open scope above the root")]
#[diagnostic(
    code(mamba::scope::empty_pop),
    help("every push must be matched by exactly one pop")
)]
pub struct EmptyPopError;

/// Proof of a `push`, consumed by the matching `pop`.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pushed scope should be closed with `ScopeChain::pop`"]
pub struct ScopeHandle {
    depth: usize,
    id: usize,
}

/// A single level of the chain
#[derive(Debug)]
pub struct Scope {
    pub name: String,
    pub parent: Option<usize>,
    /// Symbol name -> declared source type
    pub symbols: HashMap<String, String>,
    id: usize,
}

impl Scope {
    fn new(name: String, parent: Option<usize>, id: usize) -> Self {
        Self {
            name,
            parent,
            symbols: HashMap::new(),
            id,
        }
    }
}

/// Chain of nested scopes, innermost last
#[derive(Debug)]
pub struct ScopeChain {
    levels: Vec<Scope>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    /// Create a chain holding only the root level.
    pub fn new() -> Self {
        Self {
            levels: vec![Scope::new(ROOT_SCOPE_NAME.to_string(), None, next_scope_id())],
        }
    }

    /// Define `name` with type tag `decltype` in the current level.
    ///
    /// Fails if the name is visible anywhere along the chain, not only in the current level.
    pub fn define(&mut self, name: &str, decltype: &str) -> Result<(), DuplicateSymbol> {
        if let Some(existing) = self.defining_scope(name) {
            return Err(DuplicateSymbol {
                name: name.to_string(),
                scope: existing.name.clone(),
            });
        }
        let current = self.current_mut();
        tracing::trace!(name, decltype, scope = %current.name, "define symbol");
        current.symbols.insert(name.to_string(), decltype.to_string());
        Ok(())
    }

    /// Whether `name` is visible from the current level.
    ///
    /// With `decltype`, some visible level must also have recorded exactly that type tag for it.
    pub fn has_symbol(&self, name: &str, decltype: Option<&str>) -> bool {
        self.levels_outward().any(|scope| match decltype {
            Some(ty) => scope.symbols.get(name).is_some_and(|t| t == ty),
            None => scope.symbols.contains_key(name),
        })
    }

    /// Type tag of the innermost visible definition of `name`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.defining_scope(name)
            .and_then(|scope| scope.symbols.get(name))
            .map(String::as_str)
    }

    /// Open a nested level whose parent is the current level.
    pub fn push(&mut self, name: impl Into<String>) -> ScopeHandle {
        let parent = self.levels.len() - 1;
        let id = next_scope_id();
        self.levels.push(Scope::new(name.into(), Some(parent), id));
        tracing::trace!(depth = parent + 1, "push scope");
        ScopeHandle { depth: parent + 1, id }
    }

    /// Close the level `handle` was issued for, along with anything still open above it.
    pub fn pop(&mut self, handle: ScopeHandle) -> Result<(), EmptyPopError> {
        let open = self
            .levels
            .get(handle.depth)
            .is_some_and(|scope| scope.id == handle.id);
        if handle.depth == 0 || !open {
            return Err(EmptyPopError);
        }
        self.levels.truncate(handle.depth);
        tracing::trace!(depth = handle.depth, "pop scope");
        Ok(())
    }

    /// Close the current level.
    pub fn exit(&mut self) -> Result<(), EmptyPopError> {
        if self.levels.len() <= 1 {
            return Err(EmptyPopError);
        }
        self.levels.pop();
        Ok(())
    }

    /// Number of open levels above the root.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn current(&self) -> &Scope {
        &self.levels[self.levels.len() - 1]
    }

    pub fn current_name(&self) -> &str {
        &self.current().name
    }

    fn current_mut(&mut self) -> &mut Scope {
        let idx = self.levels.len() - 1;
        &mut self.levels[idx]
    }

    /// Innermost level that defines `name`.
    fn defining_scope(&self, name: &str) -> Option<&Scope> {
        self.levels_outward().find(|scope| scope.symbols.contains_key(name))
    }

    /// Current level first, then each parent up to the root.
    fn levels_outward(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self.current()), |scope| scope.parent.map(|p| &self.levels[p]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chain_is_root_only() {
        let chain = ScopeChain::new();
        assert_eq!(chain.depth(), 0);
        assert_eq!(chain.current_name(), ROOT_SCOPE_NAME);
        assert!(chain.current().parent.is_none());
        assert!(!chain.has_symbol("x", None));
    }

    #[test]
    fn test_shadowing_and_sibling_scopes() {
        let mut chain = ScopeChain::new();
        chain.define("x", "int").unwrap();

        let b = chain.push("b");
        assert!(chain.has_symbol("x", None));
        chain.define("y", "str").unwrap();
        assert!(chain.has_symbol("y", None));
        chain.pop(b).unwrap();

        // Sibling of `b` sees root's `x` but nothing defined only in `b`
        let c = chain.push("c");
        assert!(chain.has_symbol("x", None));
        assert!(!chain.has_symbol("y", None));
        chain.pop(c).unwrap();

        assert!(chain.has_symbol("x", None));
        assert!(!chain.has_symbol("y", None));
    }

    #[test]
    fn test_define_twice_in_one_level_fails() {
        let mut chain = ScopeChain::new();
        chain.define("x", "int").unwrap();
        let err = chain.define("x", "int").unwrap_err();
        assert_eq!(
            err,
            DuplicateSymbol {
                name: "x".to_string(),
                scope: ROOT_SCOPE_NAME.to_string(),
            }
        );
        assert_eq!(chain.lookup("x"), Some("int"));
    }

    #[test]
    fn test_ancestor_definition_is_visible_from_child() {
        let mut chain = ScopeChain::new();
        chain.define("x", "int").unwrap();
        let inner = chain.push("inner");

        // Visible, so an emitter routes this to re-assignment rather than `define`
        assert!(chain.has_symbol("x", None));
        let err = chain.define("x", "float").unwrap_err();
        assert_eq!(err.scope, ROOT_SCOPE_NAME);

        chain.pop(inner).unwrap();
    }

    #[test]
    fn test_has_symbol_with_type_tag() {
        let mut chain = ScopeChain::new();
        chain.define("x", "int").unwrap();
        let _inner = chain.push("inner");
        chain.define("y", "str").unwrap();

        assert!(chain.has_symbol("x", Some("int")));
        assert!(!chain.has_symbol("x", Some("str")));
        assert!(chain.has_symbol("y", Some("str")));
        assert!(!chain.has_symbol("z", Some("int")));
    }

    #[test]
    fn test_lookup_prefers_innermost_definition() {
        let mut chain = ScopeChain::new();
        chain.define("x", "int").unwrap();
        let _inner = chain.push("inner");
        // Bypass `define` to model a shadowing definition recorded by a different pass
        chain.current_mut().symbols.insert("x".to_string(), "str".to_string());
        assert_eq!(chain.lookup("x"), Some("str"));
        assert!(chain.has_symbol("x", Some("int")));
    }

    #[test]
    fn test_pop_floor() {
        let mut chain = ScopeChain::new();
        chain.define("x", "int").unwrap();
        assert_eq!(chain.exit(), Err(EmptyPopError));
        assert_eq!(chain.depth(), 0);
        assert_eq!(chain.current_name(), ROOT_SCOPE_NAME);
        assert!(chain.has_symbol("x", None));
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut chain = ScopeChain::new();
        let first = chain.push("first");
        chain.exit().unwrap();
        let second = chain.push("second");

        // `first` refers to a level that was already closed
        assert_eq!(chain.pop(first), Err(EmptyPopError));
        assert_eq!(chain.current_name(), "second");
        chain.pop(second).unwrap();
        assert_eq!(chain.depth(), 0);
    }

    #[test]
    fn test_handle_from_another_chain_is_rejected() {
        let mut first = ScopeChain::new();
        let mut second = ScopeChain::new();
        let foreign = first.push("block");
        let own = second.push("block");

        assert_eq!(second.pop(foreign), Err(EmptyPopError));
        assert_eq!(second.depth(), 1);
        second.pop(own).unwrap();
        assert_eq!(second.depth(), 0);
        assert_eq!(first.depth(), 1);
    }

    #[test]
    fn test_pop_closes_levels_left_open_above_handle() {
        let mut chain = ScopeChain::new();
        let outer = chain.push("outer");
        let _middle = chain.push("middle");
        let _inner = chain.push("inner");
        assert_eq!(chain.depth(), 3);

        chain.pop(outer).unwrap();
        assert_eq!(chain.depth(), 0);
        assert_eq!(chain.current_name(), ROOT_SCOPE_NAME);
    }

    #[test]
    fn test_parent_links_form_a_chain() {
        let mut chain = ScopeChain::new();
        let _a = chain.push("a");
        let _b = chain.push("b");
        let names: Vec<&str> = chain.levels_outward().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", ROOT_SCOPE_NAME]);
    }
}
