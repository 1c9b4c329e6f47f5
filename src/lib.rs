//! xsift - XPath-subset search compiler for package build-service metadata
//!
//! This is the main library crate that re-exports all xsift components.

pub use xsift_catalog as catalog;
pub use xsift_core as core;
pub use xsift_engine as engine;
pub use xsift_store as store;
pub use xsift_xpath as xpath;

// Re-export commonly used types
pub use xsift_core::{AccessPolicy, BindValue, DenyProjects, EntityKind, Error, OpenAccess, Result};

pub use xsift_catalog::{AttributeSpec, BindMode, Catalog};
pub use xsift_engine::{SqlQuery, XpathEngine};
pub use xsift_store::{SearchStore, StoreOptions};
