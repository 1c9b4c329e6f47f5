//! Token-stream walker
//!
//! Consumes the outer, non-predicate part of the parsed path expression:
//! validates that it is absolute and rooted at a known entity, discards
//! top-level child steps, rejects every other axis, and hands each
//! predicate to the predicate compiler.

use crate::predicate::PredicateCompiler;
use tracing::error;
use xsift_catalog::Catalog;
use xsift_core::{BindValue, EntityKind, Error, Result};
use xsift_xpath::{Axis, XpNode};

/// The result of compiling one search expression, before assembly
#[derive(Debug)]
pub struct CompiledQuery {
    pub kind: EntityKind,
    pub joins: Vec<String>,
    pub conditions: Vec<String>,
    pub values: Vec<BindValue>,
}

/// Walk a parsed expression and compile its predicates
pub fn compile(catalog: &Catalog, tree: &XpNode) -> Result<CompiledQuery> {
    let XpNode::Document(items) = tree else {
        return Err(Error::illegal("expression must be an absolute path"));
    };

    let mut iter = items.iter();
    let kind = match iter.next() {
        Some(XpNode::Step {
            axis: Axis::Child,
            name,
        }) => EntityKind::from_root_name(&name.name)
            .ok_or_else(|| Error::illegal(format!("unknown search root '{}'", name.name)))?,
        Some(XpNode::Step { axis, .. }) => {
            return Err(Error::illegal(format!(
                "axis '{}' not supported",
                axis.name()
            )));
        }
        _ => return Err(Error::illegal("expression must be rooted at an entity element")),
    };

    if catalog.attributes(kind).is_none() {
        // A resolved kind with no catalog table is a cataloguing bug, not
        // bad user input; degrade to a query matching nothing.
        error!(kind = %kind, "no catalog entries for resolved entity kind");
        return Ok(CompiledQuery {
            kind,
            joins: Vec::new(),
            conditions: vec!["0".to_string()],
            values: Vec::new(),
        });
    }

    let mut compiler = PredicateCompiler::new(catalog, kind);
    for item in iter {
        match item {
            XpNode::Step {
                axis: Axis::Child, ..
            } => {
                // Step names outside predicates carry no filter; further
                // qualification happens inside predicates in this subset.
            }
            XpNode::Step { axis, .. } => {
                return Err(Error::illegal(format!(
                    "axis '{}' not supported",
                    axis.name()
                )));
            }
            XpNode::Predicate(expr) => compiler.parse_predicate(expr)?,
            _ => return Err(Error::illegal("Unhandled token")),
        }
    }

    let ctx = compiler.ctx;
    Ok(CompiledQuery {
        kind,
        joins: ctx.joins,
        conditions: ctx.conditions,
        values: ctx.values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsift_xpath::parse;

    fn compile_str(input: &str) -> Result<CompiledQuery> {
        let catalog = Catalog::new();
        let tree = parse(input)?;
        compile(&catalog, &tree)
    }

    #[test]
    fn test_resolves_entity_kind() {
        let compiled = compile_str("/package[@name='gcc']").unwrap();
        assert_eq!(compiled.kind, EntityKind::Package);
        assert_eq!(compiled.conditions, vec!["packages.name = ?"]);
    }

    #[test]
    fn test_person_root_resolves_users() {
        let compiled = compile_str("/person[@login='alice']").unwrap();
        assert_eq!(compiled.kind, EntityKind::User);
    }

    #[test]
    fn test_path_without_predicates_compiles_unfiltered() {
        let compiled = compile_str("/project").unwrap();
        assert_eq!(compiled.kind, EntityKind::Project);
        assert!(compiled.conditions.is_empty());
        assert!(compiled.values.is_empty());
    }

    #[test]
    fn test_unknown_root_is_rejected() {
        let err = compile_str("/widget[@name='x']").unwrap_err();
        assert!(err.to_string().contains("unknown search root 'widget'"));
    }

    #[test]
    fn test_unsupported_axis_is_rejected() {
        let err = compile_str("/package/parent::node()").unwrap_err();
        assert_eq!(
            err.to_string(),
            "illegal xpath: axis 'parent' not supported"
        );
    }

    #[test]
    fn test_every_unsupported_axis_is_named() {
        for axis in [
            "ancestor",
            "ancestor-or-self",
            "descendant",
            "descendant-or-self",
            "following",
            "following-sibling",
            "namespace",
            "parent",
            "preceding",
            "preceding-sibling",
            "self",
        ] {
            let err = compile_str(&format!("/package/{axis}::node()")).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("illegal xpath: axis '{axis}' not supported")
            );
        }
    }

    #[test]
    fn test_intermediate_child_steps_are_discarded() {
        let compiled = compile_str("/package/foo[@name='gcc']").unwrap();
        assert_eq!(compiled.conditions, vec!["packages.name = ?"]);
    }

    #[test]
    fn test_multiple_predicates_stack_conditions() {
        let compiled = compile_str("/package[@project='P'][@name='n']").unwrap();
        assert_eq!(
            compiled.conditions,
            vec!["projects.name = ?", "packages.name = ?"]
        );
        assert_eq!(compiled.values.len(), 2);
    }
}
