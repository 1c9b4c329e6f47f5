//! Attribute descriptors and the per-entity catalog
//!
//! The catalog maps attribute-path strings (as they appear in query
//! predicates, e.g. `person/@userid`) to the column expression and joins
//! that make them resolvable against the base relation. It is built once
//! at startup and read-only afterwards.

use crate::tables;
use std::collections::HashMap;
use xsift_core::EntityKind;

/// How a literal compared against an attribute is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindMode {
    /// One placeholder, one value
    Plain,
    /// The literal must split into exactly two parts on the delimiter;
    /// both parts bind (the column expression carries the first
    /// placeholder itself)
    Split(char),
    /// The literal binds twice; the column expression compares two
    /// columns with an embedded OR
    Double,
    /// Recognized but inert: comparisons never match and bind nothing.
    /// Kept so query shapes produced by one API remain accepted here.
    Empty,
}

/// One catalog entry: how to turn an attribute path into SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    /// SQL fragment usable on either side of a comparison
    pub expression: &'static str,

    /// JOIN clauses required for `expression` to resolve, deduplicated
    /// by exact string identity before emission
    pub joins: &'static [&'static str],

    /// Special handling for the compared literal
    pub mode: BindMode,
}

impl AttributeSpec {
    /// A column with no joins
    pub const fn column(expression: &'static str) -> Self {
        Self {
            expression,
            joins: &[],
            mode: BindMode::Plain,
        }
    }

    /// A column reachable through joins
    pub const fn joined(expression: &'static str, joins: &'static [&'static str]) -> Self {
        Self {
            expression,
            joins,
            mode: BindMode::Plain,
        }
    }

    /// A two-part attribute split on `delimiter`
    pub const fn split(
        expression: &'static str,
        joins: &'static [&'static str],
        delimiter: char,
    ) -> Self {
        Self {
            expression,
            joins,
            mode: BindMode::Split(delimiter),
        }
    }

    /// A two-column OR expression binding the literal twice
    pub const fn double(expression: &'static str, joins: &'static [&'static str]) -> Self {
        Self {
            expression,
            joins,
            mode: BindMode::Double,
        }
    }

    /// A recognized-but-inert path
    pub const fn empty() -> Self {
        Self {
            expression: "",
            joins: &[],
            mode: BindMode::Empty,
        }
    }
}

/// The static schema catalog, one attribute table per entity kind
#[derive(Debug)]
pub struct Catalog {
    tables: HashMap<EntityKind, HashMap<&'static str, AttributeSpec>>,
}

impl Catalog {
    /// Build the catalog. Call once at startup; the result is immutable.
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        tables.insert(EntityKind::Project, tables::projects());
        tables.insert(EntityKind::Package, tables::packages());
        tables.insert(EntityKind::User, tables::users());
        tables.insert(EntityKind::Repository, tables::repositories());
        tables.insert(EntityKind::Issue, tables::issues());
        tables.insert(EntityKind::Request, tables::requests());
        Self { tables }
    }

    /// Look up one attribute path for an entity kind
    pub fn lookup(&self, kind: EntityKind, path: &str) -> Option<&AttributeSpec> {
        self.tables.get(&kind)?.get(path)
    }

    /// The full attribute table for an entity kind, if it has one
    pub fn attributes(&self, kind: EntityKind) -> Option<&HashMap<&'static str, AttributeSpec>> {
        self.tables.get(&kind)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
