//! xsift Schema Catalog
//!
//! The static, per-entity mapping from attribute-path strings to column
//! expressions, required joins, and bind modes. The catalog's shape is
//! the design contract between the predicate compiler and the store; its
//! contents are mechanical enumeration.

pub mod catalog;
mod tables;

pub use catalog::{AttributeSpec, BindMode, Catalog};
