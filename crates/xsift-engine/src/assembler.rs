//! Query assembly
//!
//! Turns a compiled query into one executable SELECT: picks the base
//! relation, applies the repository visibility floor, deduplicates joins
//! and condition fragments by string identity in first-seen order, and
//! lines the bound values up with the placeholders.

use crate::walker::CompiledQuery;
use xsift_core::{AccessPolicy, BindValue, EntityKind};

/// An executable query: SQL text plus positional parameter values
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub values: Vec<BindValue>,
}

/// Assemble the final SELECT for a compiled query
pub fn assemble(compiled: CompiledQuery, policy: &dyn AccessPolicy) -> SqlQuery {
    let table = compiled.kind.table();
    let mut conditions: Vec<String> = Vec::new();
    let mut values: Vec<BindValue> = Vec::new();

    // The visibility floor is applied ahead of any user-supplied
    // predicate and cannot be bypassed by one.
    if compiled.kind == EntityKind::Repository {
        let forbidden = policy.forbidden_projects();
        if !forbidden.is_empty() {
            let marks = vec!["?"; forbidden.len()].join(", ");
            conditions.push(format!("repositories.project_id NOT IN ({marks})"));
            values.extend(forbidden.into_iter().map(BindValue::Integer));
        }
    }

    conditions.extend(dedup(compiled.conditions));
    values.extend(compiled.values);

    let mut sql = format!("SELECT DISTINCT {table}.id FROM {table}");
    for join in dedup(compiled.joins) {
        sql.push(' ');
        sql.push_str(&join);
    }
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    SqlQuery { sql, values }
}

/// Unique by exact string identity, preserving first-seen order
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
