//! Per-compile mutable state
//!
//! One `CompileContext` is created per `find` call and threaded through
//! the recursive descent; nothing here outlives a single compilation.

use xsift_core::{BindValue, Error, Result};

/// State accumulated while compiling one search expression
#[derive(Debug)]
pub struct CompileContext {
    /// Join clauses in first-reference order, duplicates included;
    /// deduplicated at assembly
    pub joins: Vec<String>,

    /// Condition-fragment stack; every compiled predicate leaves exactly
    /// one fragment on top
    pub conditions: Vec<String>,

    /// Bound parameter values, in placeholder order
    pub values: Vec<BindValue>,

    /// How many times each literal must bind. Normally 1; doubled for
    /// the duration of a `not(...)` body, multiplicatively when nested.
    pub values_needed: usize,
}

impl CompileContext {
    pub fn new() -> Self {
        Self {
            joins: Vec::new(),
            conditions: Vec::new(),
            values: Vec::new(),
            values_needed: 1,
        }
    }

    pub fn add_join(&mut self, join: &str) {
        self.joins.push(join.to_string());
    }

    pub fn bind(&mut self, value: BindValue) {
        self.values.push(value);
    }

    pub fn push_condition(&mut self, condition: String) {
        self.conditions.push(condition);
    }

    /// Pop the condition the most recent predicate produced.
    ///
    /// An empty stack here is a compiler bug, not a query error.
    pub fn pop_condition(&mut self) -> Result<String> {
        self.conditions
            .pop()
            .ok_or_else(|| Error::Internal("condition stack underflow".to_string()))
    }
}

impl Default for CompileContext {
    fn default() -> Self {
        Self::new()
    }
}
