//! Lexical scope tree.
//!
//! Scopes are never freed while generating: the call validation pass runs
//! after lowering and needs every scope's recorded calls and visible
//! function signatures. The tree is a flat `Vec` indexed by [`ScopeId`],
//! each scope pointing at its parent.
//!
//! Variable lookup walks the parent chain but stops at the scope that opens
//! a function body. Slots are relative to the simulated stack of the code
//! being lowered, and a function body runs on the caller's stack, not on the
//! one in effect where it was defined. Function lookup walks the full chain.

use bc_ir::{Position, TypeName};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Index into a [`ScopeTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The program's top-level scope.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    const fn from_index(index: usize) -> Self {
        ScopeId(index as u32)
    }
}

/// A declared variable: the simulated slot it lives in and its type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Variable {
    pub slot: usize,
    pub ty: TypeName,
}

/// Parameter types of a function, most functions take only a few.
pub type TypeList = SmallVec<[TypeName; 4]>;

/// Argument types of a call; `None` when the type is not known.
pub type ArgTypes = SmallVec<[Option<TypeName>; 4]>;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Signature {
    pub params: TypeList,
    pub return_ty: TypeName,
    pub position: Position,
}

/// A call recorded for validation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CallSite {
    pub name: String,
    pub arg_types: ArgTypes,
    pub position: Position,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScopeKind {
    Root,
    Block,
    /// The scope holding a function's parameters and body.
    Function,
}

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Stack depth when the scope was entered.
    pub floor: usize,
    variables: FxHashMap<String, Variable>,
    functions: FxHashMap<String, Signature>,
    calls: Vec<CallSite>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>, floor: usize) -> Self {
        Scope {
            kind,
            parent,
            floor,
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[CallSite] {
        &self.calls
    }

    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.variables.get(name).copied()
    }

    pub fn function(&self, name: &str) -> Option<&Signature> {
        self.functions.get(name)
    }
}

/// All scopes of one program plus a cursor on the one being lowered.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::new(ScopeKind::Root, None, 0)],
            current: ScopeId::ROOT,
        }
    }

    #[inline]
    pub fn current(&self) -> ScopeId {
        self.current
    }

    #[inline]
    #[track_caller]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[inline]
    fn current_mut(&mut self) -> &mut Scope {
        &mut self.scopes[self.current.index()]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Open a child of the current scope with `floor` as its stack floor.
    pub fn enter(&mut self, kind: ScopeKind, floor: usize) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(Scope::new(kind, Some(self.current), floor));
        self.current = id;
        id
    }

    /// Close the current scope and return its floor.
    pub fn exit(&mut self) -> usize {
        let scope = self.get(self.current);
        let floor = scope.floor;
        debug_assert!(scope.parent.is_some(), "exit called on the root scope");
        if let Some(parent) = scope.parent {
            self.current = parent;
        }
        floor
    }

    /// `id` followed by each of its ancestors, innermost first.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = (ScopeId, &Scope)> {
        std::iter::successors(Some(id), |&id| self.get(id).parent).map(|id| (id, self.get(id)))
    }

    /// Every scope in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(index, scope)| (ScopeId::from_index(index), scope))
    }

    // ===== Variables =====

    pub fn define_variable(&mut self, name: &str, variable: Variable) {
        self.current_mut()
            .variables
            .insert(name.to_string(), variable);
    }

    /// `name` as declared in the current scope itself, ignoring parents.
    pub fn local_variable(&self, name: &str) -> Option<Variable> {
        self.get(self.current).variable(name)
    }

    /// Resolve `name` from the current scope up to the enclosing function body.
    pub fn lookup_variable(&self, name: &str) -> Option<Variable> {
        for (_, scope) in self.ancestors(self.current) {
            if let Some(variable) = scope.variable(name) {
                return Some(variable);
            }
            if scope.kind == ScopeKind::Function {
                break;
            }
        }
        None
    }

    // ===== Functions =====

    pub fn define_function(&mut self, name: &str, signature: Signature) {
        self.current_mut()
            .functions
            .insert(name.to_string(), signature);
    }

    /// Resolve `name` from `from` up to the root.
    pub fn lookup_function(&self, from: ScopeId, name: &str) -> Option<&Signature> {
        self.ancestors(from).find_map(|(_, scope)| scope.function(name))
    }

    pub fn record_call(&mut self, call: CallSite) {
        self.current_mut().calls.push(call);
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
