//! Call stack implementation
//!
//! This module provides the variable environment for function execution:
//! - [`Stack`]: The call stack containing frames, plus the slot arena every
//!   variable lives in
//! - [`StackFrame`]: A single function's activation record, a stack of scopes
//! - [`Scope`]: One lexical block's bindings from name to [`SlotId`]
//!
//! # Visibility
//!
//! Name lookup searches the scopes of the current frame only, innermost
//! first. A caller's locals are reachable from a callee only through pointers.
//! Closing a scope frees its slots, so pointers to them start failing.

use super::arena::{Slot, SlotArena, SlotId};
use super::value::Value;
use crate::parser::ast::Type;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("'{0}' is already declared in this scope")]
    AlreadyDeclared(String),
    #[error("no active scope to declare '{0}' in")]
    NoScope(String),
}

/// Bindings introduced by one block
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, SlotId>,
    declared: Vec<SlotId>, // Declaration order
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<SlotId> {
        self.bindings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

/// Stack frame for a function call
#[derive(Debug)]
pub struct StackFrame {
    pub function_name: String,
    scopes: Vec<Scope>,
}

impl StackFrame {
    /// A frame with its root scope already open
    pub fn new(function_name: impl Into<String>) -> Self {
        StackFrame {
            function_name: function_name.into(),
            scopes: vec![Scope::default()],
        }
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Innermost binding of `name` in this frame
    pub fn lookup(&self, name: &str) -> Option<SlotId> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

/// The call stack
#[derive(Debug, Default)]
pub struct Stack {
    frames: Vec<StackFrame>,
    arena: SlotArena,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    /// Number of active frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn push_frame(&mut self, function_name: impl Into<String>) {
        self.frames.push(StackFrame::new(function_name));
    }

    /// Pop the current frame, freeing every slot still open in it
    pub fn pop_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            for scope in frame.scopes {
                self.free_scope(scope);
            }
        }
    }

    /// Enter a new scope in the current frame
    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.scopes.push(Scope::default());
        }
    }

    /// Exit the innermost scope of the current frame, freeing its slots
    pub fn pop_scope(&mut self) {
        let scope = self.frames.last_mut().and_then(|frame| frame.scopes.pop());
        if let Some(scope) = scope {
            self.free_scope(scope);
        }
    }

    fn free_scope(&mut self, scope: Scope) {
        for id in scope.declared {
            self.arena.free(id);
        }
    }

    /// Declare a variable in the innermost scope. Shadowing an outer scope's
    /// binding is fine; repeating a name within one scope is not.
    pub fn declare(&mut self, name: &str, ty: Type) -> Result<SlotId, StackError> {
        let scope = self
            .frames
            .last_mut()
            .and_then(|frame| frame.scopes.last_mut())
            .ok_or_else(|| StackError::NoScope(name.to_string()))?;

        if scope.bindings.contains_key(name) {
            return Err(StackError::AlreadyDeclared(name.to_string()));
        }

        let id = self.arena.allocate(Slot::new(name, ty));
        scope.bindings.insert(name.to_string(), id);
        scope.declared.push(id);
        Ok(id)
    }

    /// Resolve a name in the current frame
    pub fn lookup(&self, name: &str) -> Option<SlotId> {
        self.frames.last()?.lookup(name)
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.arena.get(id)
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.arena.get_mut(id)
    }

    pub fn read(&self, id: SlotId) -> Option<&Value> {
        self.slot(id).map(|slot| &slot.value)
    }

    pub fn arena(&self) -> &SlotArena {
        &self.arena
    }
}
