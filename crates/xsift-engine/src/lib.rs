//! xsift Search Engine
//!
//! Compiles restricted XPath search expressions into parameterized SQL
//! and executes them against the relational store.
//!
//! # Overview
//!
//! The pipeline per query:
//! raw text → xpath parser → walker (entity resolution, axis checks) →
//! predicate compiler (conditions, joins, bound values) → assembler
//! (dedup, SELECT DISTINCT) → store.
//!
//! Compilation is synchronous and stateless across calls; a fresh
//! [`context::CompileContext`] is created per `find` and discarded after
//! the query runs.

pub mod assembler;
pub mod context;
mod predicate;
pub mod walker;

pub use assembler::SqlQuery;
pub use context::CompileContext;
pub use predicate::XpathFunc;
pub use walker::CompiledQuery;

use std::sync::Arc;
use tracing::debug;
use xsift_catalog::Catalog;
use xsift_core::{AccessPolicy, OpenAccess, Result};
use xsift_store::SearchStore;

/// The search compiler and its collaborators
pub struct XpathEngine {
    catalog: Catalog,
    store: Arc<SearchStore>,
    policy: Box<dyn AccessPolicy + Send + Sync>,
}

impl XpathEngine {
    /// Create an engine with no visibility restrictions
    pub fn new(store: Arc<SearchStore>) -> Self {
        Self::with_policy(store, OpenAccess)
    }

    /// Create an engine enforcing the given access policy
    pub fn with_policy<P>(store: Arc<SearchStore>, policy: P) -> Self
    where
        P: AccessPolicy + Send + Sync + 'static,
    {
        Self {
            catalog: Catalog::new(),
            store,
            policy: Box::new(policy),
        }
    }

    /// Find the ids of all entities matching a search expression.
    ///
    /// Compilation errors surface before any store I/O; the result is
    /// duplicate-free and carries no ordering guarantee.
    pub fn find(&self, xpath: &str) -> Result<Vec<i64>> {
        let query = self.compile(xpath)?;
        debug!(sql = %query.sql, values = query.values.len(), "executing compiled search");
        self.store.select_ids(&query.sql, &query.values)
    }

    /// Compile a search expression without executing it
    pub fn compile(&self, xpath: &str) -> Result<SqlQuery> {
        debug!(%xpath, "compiling search expression");
        let tree = xsift_xpath::parse(xpath)?;
        let compiled = walker::compile(&self.catalog, &tree)?;
        Ok(assembler::assemble(compiled, self.policy.as_ref()))
    }
}
