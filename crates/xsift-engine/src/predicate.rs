//! Predicate compilation
//!
//! Interprets one predicate's parse tree as a boolean expression,
//! accumulating SQL condition fragments, joins, and bound values into the
//! compile context. Operators and functions are closed enums dispatched
//! by pattern match, so an unknown function is a data error here rather
//! than a missing method somewhere else.

use crate::context::CompileContext;
use xsift_catalog::{AttributeSpec, BindMode, Catalog};
use xsift_core::{BindValue, EntityKind, Error, Result};
use xsift_xpath::XpNode;

/// The boolean functions the search subset supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpathFunc {
    Contains,
    Not,
    StartsWith,
    EndsWith,
}

impl XpathFunc {
    /// Resolve a function name from query text
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "contains" => Some(XpathFunc::Contains),
            "not" => Some(XpathFunc::Not),
            "starts-with" => Some(XpathFunc::StartsWith),
            "ends-with" => Some(XpathFunc::EndsWith),
            _ => None,
        }
    }
}

/// One side of a comparison after operand resolution
enum Operand {
    /// A column expression from the catalog
    Column(&'static str),
    /// A bound literal
    Placeholder,
    /// An inert attribute; the enclosing comparison degenerates
    Inert,
}

impl Operand {
    fn sql(&self) -> &str {
        match self {
            Operand::Column(expression) => expression,
            Operand::Placeholder => "?",
            Operand::Inert => "",
        }
    }

    fn is_inert(&self) -> bool {
        matches!(self, Operand::Inert)
    }
}

/// Compiles predicate parse trees into SQL condition fragments
pub(crate) struct PredicateCompiler<'a> {
    catalog: &'a Catalog,
    kind: EntityKind,
    /// Scoped stack of path segments pushed by nested child steps
    root: Vec<String>,
    /// The attribute most recently resolved in the current comparison;
    /// its bind mode applies to the next literal
    pending: Option<&'a AttributeSpec>,
    pub ctx: CompileContext,
}

impl<'a> PredicateCompiler<'a> {
    pub fn new(catalog: &'a Catalog, kind: EntityKind) -> Self {
        Self {
            catalog,
            kind,
            root: Vec::new(),
            pending: None,
            ctx: CompileContext::new(),
        }
    }

    /// Compile one predicate expression, leaving exactly one condition
    /// fragment on the context stack
    pub fn parse_predicate(&mut self, expr: &XpNode) -> Result<()> {
        match expr {
            XpNode::Eq(left, right) => self.op_eq(left, right),
            XpNode::Neq(left, right) => self.op_neq(left, right),
            XpNode::And(left, right) => self.op_and(left, right),
            XpNode::Or(left, right) => self.op_or(left, right),
            XpNode::Call(name, args) => self.call(name, args),
            XpNode::Child { name, rest } => {
                // A nested step carrying its own predicate, e.g.
                // `person[@userid='x']`. The step name scopes every
                // attribute path resolved inside.
                let Some(rest) = rest else {
                    return Err(Error::illegal("Unhandled token"));
                };
                self.root.push(name.name.clone());
                let result = match &**rest {
                    XpNode::Predicate(inner) => self.parse_predicate(inner),
                    nested @ XpNode::Child { .. } => self.parse_predicate(nested),
                    _ => Err(Error::illegal("Unhandled token")),
                };
                self.root.pop();
                result
            }
            _ => Err(Error::illegal("Unhandled token")),
        }
    }

    fn op_eq(&mut self, left: &XpNode, right: &XpNode) -> Result<()> {
        let l = self.evaluate_expr(left, false)?;
        let r = self.evaluate_expr(right, false)?;
        self.pending = None;
        if l.is_inert() || r.is_inert() {
            // Comparing an attribute the system does not track matches
            // nothing.
            self.ctx.push_condition("0".to_string());
        } else {
            self.ctx.push_condition(format!("{} = {}", l.sql(), r.sql()));
        }
        Ok(())
    }

    fn op_neq(&mut self, left: &XpNode, right: &XpNode) -> Result<()> {
        let l = self.evaluate_expr(left, false)?;
        let r = self.evaluate_expr(right, false)?;
        self.pending = None;
        if l.is_inert() || r.is_inert() {
            // "not equal to an attribute the system does not track"
            // matches everything.
            self.ctx.push_condition("1".to_string());
        } else {
            self.ctx.push_condition(format!("{} != {}", l.sql(), r.sql()));
        }
        Ok(())
    }

    fn op_and(&mut self, left: &XpNode, right: &XpNode) -> Result<()> {
        self.parse_predicate(left)?;
        let c1 = self.ctx.pop_condition()?;
        self.parse_predicate(right)?;
        let c2 = self.ctx.pop_condition()?;
        self.ctx.push_condition(format!("({c1} AND {c2})"));
        Ok(())
    }

    fn op_or(&mut self, left: &XpNode, right: &XpNode) -> Result<()> {
        self.parse_predicate(left)?;
        let c1 = self.ctx.pop_condition()?;
        self.parse_predicate(right)?;
        let c2 = self.ctx.pop_condition()?;
        if c1 == "0" {
            self.ctx.push_condition(c2);
        } else if c2 == "0" {
            self.ctx.push_condition(c1);
        } else {
            self.ctx.push_condition(format!("({c1} OR {c2})"));
        }
        Ok(())
    }

    fn call(&mut self, name: &str, args: &[XpNode]) -> Result<()> {
        let func = XpathFunc::from_name(name)
            .ok_or_else(|| Error::illegal(format!("unknown xpath function '{name}'")))?;
        match func {
            XpathFunc::Contains => {
                self.expect_arity(name, args, 2)?;
                self.func_contains(&args[0], &args[1])
            }
            XpathFunc::Not => {
                self.expect_arity(name, args, 1)?;
                self.func_not(&args[0])
            }
            XpathFunc::StartsWith => {
                self.expect_arity(name, args, 2)?;
                self.func_starts_with(&args[0], &args[1])
            }
            XpathFunc::EndsWith => {
                self.expect_arity(name, args, 2)?;
                self.func_ends_with(&args[0], &args[1])
            }
        }
    }

    fn expect_arity(&self, name: &str, args: &[XpNode], arity: usize) -> Result<()> {
        if args.len() == arity {
            Ok(())
        } else {
            Err(Error::illegal(format!(
                "function '{name}' expects {arity} argument(s), got {}",
                args.len()
            )))
        }
    }

    fn func_contains(&mut self, haystack: &XpNode, needle: &XpNode) -> Result<()> {
        let h = self.evaluate_expr(haystack, false)?;
        let n = self.evaluate_expr(needle, true)?;
        self.pending = None;
        if h.is_inert() || n.is_inert() {
            self.ctx.push_condition("0".to_string());
        } else {
            self.ctx.push_condition(format!(
                "LOWER({}) LIKE LOWER(CONCAT('%', {}, '%'))",
                h.sql(),
                n.sql()
            ));
        }
        Ok(())
    }

    fn func_starts_with(&mut self, left: &XpNode, right: &XpNode) -> Result<()> {
        let l = self.evaluate_expr(left, false)?;
        let r = self.evaluate_expr(right, true)?;
        self.pending = None;
        if l.is_inert() || r.is_inert() {
            self.ctx.push_condition("0".to_string());
        } else {
            self.ctx
                .push_condition(format!("{} LIKE CONCAT({}, '%')", l.sql(), r.sql()));
        }
        Ok(())
    }

    fn func_ends_with(&mut self, left: &XpNode, right: &XpNode) -> Result<()> {
        let l = self.evaluate_expr(left, false)?;
        let r = self.evaluate_expr(right, true)?;
        self.pending = None;
        if l.is_inert() || r.is_inert() {
            self.ctx.push_condition("0".to_string());
        } else {
            self.ctx
                .push_condition(format!("{} LIKE CONCAT('%', {})", l.sql(), r.sql()));
        }
        Ok(())
    }

    /// SQL cannot negate a LEFT-JOINed comparison and still match rows
    /// where the joined value is NULL, so the negated condition text is
    /// emitted twice and every literal inside the body must bind twice.
    /// The multiplier composes multiplicatively under nesting.
    fn func_not(&mut self, expr: &XpNode) -> Result<()> {
        self.ctx.values_needed *= 2;
        let compiled = self.parse_predicate(expr);
        self.ctx.values_needed /= 2;
        compiled?;
        let cond = self.ctx.pop_condition()?;
        self.ctx
            .push_condition(format!("(NOT {cond} OR {cond} IS NULL)"));
        Ok(())
    }

    /// Resolve one comparison operand: a literal binds and becomes a
    /// placeholder; an attribute path resolves through the catalog to a
    /// column expression, pulling in its joins.
    fn evaluate_expr(&mut self, node: &XpNode, escape: bool) -> Result<Operand> {
        match node {
            XpNode::Literal(value) => self.bind_literal(value, escape),
            XpNode::Child { .. } | XpNode::Attribute(_) => {
                let mut segments = self.root.clone();
                collect_path(node, &mut segments)?;
                let key = segments.join("/");
                let spec = self.catalog.lookup(self.kind, &key).ok_or_else(|| {
                    Error::illegal(format!(
                        "unable to evaluate '{key}' for '{}'",
                        self.kind.table()
                    ))
                })?;
                for join in spec.joins {
                    self.ctx.add_join(join);
                }
                self.pending = Some(spec);
                if spec.mode == BindMode::Empty {
                    Ok(Operand::Inert)
                } else {
                    Ok(Operand::Column(spec.expression))
                }
            }
            _ => Err(Error::illegal("Unhandled token")),
        }
    }

    fn bind_literal(&mut self, value: &str, escape: bool) -> Result<Operand> {
        let value = if escape {
            escape_like(value)
        } else {
            value.to_string()
        };
        let mode = self
            .pending
            .take()
            .map(|spec| spec.mode)
            .unwrap_or(BindMode::Plain);
        match mode {
            BindMode::Empty => Ok(Operand::Inert),
            BindMode::Split(delimiter) => {
                let parts: Vec<&str> = value.split(delimiter).collect();
                if parts.len() != 2 {
                    return Err(Error::illegal("attributes must be $NAMESPACE:$NAME"));
                }
                for _ in 0..self.ctx.values_needed {
                    self.ctx.bind(BindValue::Text(parts[0].to_string()));
                    self.ctx.bind(BindValue::Text(parts[1].to_string()));
                }
                Ok(Operand::Placeholder)
            }
            BindMode::Double => {
                for _ in 0..self.ctx.values_needed {
                    self.ctx.bind(BindValue::Text(value.clone()));
                    self.ctx.bind(BindValue::Text(value.clone()));
                }
                Ok(Operand::Placeholder)
            }
            BindMode::Plain => {
                for _ in 0..self.ctx.values_needed {
                    self.ctx.bind(BindValue::Text(value.clone()));
                }
                Ok(Operand::Placeholder)
            }
        }
    }
}

/// Flatten a relative-path operand into its `/`-joined key segments
fn collect_path(node: &XpNode, segments: &mut Vec<String>) -> Result<()> {
    match node {
        XpNode::Child { name, rest } => {
            segments.push(name.name.clone());
            match rest {
                Some(rest) => collect_path(rest, segments),
                None => Ok(()),
            }
        }
        XpNode::Attribute(name) => {
            segments.push(format!("@{}", name.name));
            Ok(())
        }
        _ => Err(Error::illegal("Unhandled token")),
    }
}

/// Escape SQL LIKE metacharacters in a literal before binding
pub(crate) fn escape_like(value: &str) -> String {
    value.replace('_', "\\_").replace('%', "\\%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use xsift_xpath::QName;

    fn compiler(kind: EntityKind, catalog: &Catalog) -> PredicateCompiler<'_> {
        PredicateCompiler::new(catalog, kind)
    }

    fn eq(path: XpNode, value: &str) -> XpNode {
        XpNode::Eq(Box::new(path), Box::new(XpNode::Literal(value.to_string())))
    }

    fn attr(name: &str) -> XpNode {
        XpNode::Attribute(QName::local(name))
    }

    fn child(name: &str, rest: XpNode) -> XpNode {
        XpNode::Child {
            name: QName::local(name),
            rest: Some(Box::new(rest)),
        }
    }

    fn placeholders(condition: &str) -> usize {
        condition.matches('?').count()
    }

    #[test]
    fn test_simple_eq() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        c.parse_predicate(&eq(attr("name"), "gcc")).unwrap();

        assert_eq!(c.ctx.conditions, vec!["packages.name = ?"]);
        assert_eq!(c.ctx.values, vec![BindValue::Text("gcc".to_string())]);
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let err = c.parse_predicate(&eq(attr("nonexistent"), "x")).unwrap_err();

        assert!(err.is_client_error());
        assert!(err
            .to_string()
            .contains("unable to evaluate '@nonexistent' for 'packages'"));
    }

    #[test]
    fn test_nested_path_operand() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Project, &catalog);
        c.parse_predicate(&eq(child("person", attr("userid")), "alice"))
            .unwrap();

        assert_eq!(c.ctx.conditions, vec!["users.login = ?"]);
        assert_eq!(c.ctx.joins.len(), 2);
    }

    #[test]
    fn test_nested_step_predicate_scopes_the_path() {
        // person[@userid='alice'] resolves the same key as
        // person/@userid='alice'
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Project, &catalog);
        let nested = XpNode::Child {
            name: QName::local("person"),
            rest: Some(Box::new(XpNode::Predicate(Box::new(eq(
                attr("userid"),
                "alice",
            ))))),
        };
        c.parse_predicate(&nested).unwrap();

        assert_eq!(c.ctx.conditions, vec!["users.login = ?"]);
    }

    #[test]
    fn test_join_accumulates_per_reference() {
        // Dedup happens at assembly; the context keeps every reference
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let pred = XpNode::Or(
            Box::new(eq(attr("project"), "a")),
            Box::new(eq(attr("project"), "b")),
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(c.ctx.joins.len(), 2);
        assert_eq!(c.ctx.joins[0], c.ctx.joins[1]);
    }

    #[test]
    fn test_and_combination() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let pred = XpNode::And(
            Box::new(eq(attr("project"), "TestProj")),
            Box::new(eq(attr("name"), "foo")),
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(
            c.ctx.conditions,
            vec!["(projects.name = ? AND packages.name = ?)"]
        );
        assert_eq!(c.ctx.values.len(), 2);
    }

    #[test]
    fn test_or_elides_inert_side() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Request, &catalog);
        let pred = XpNode::Or(
            Box::new(eq(
                child("submit", child("target", attr("project"))),
                "legacy",
            )),
            Box::new(eq(attr("creator"), "alice")),
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(c.ctx.conditions, vec!["requests.creator = ?"]);
        assert_eq!(c.ctx.values.len(), 1);
    }

    #[test]
    fn test_eq_against_inert_attribute_is_always_false() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Request, &catalog);
        c.parse_predicate(&eq(
            child("submit", child("target", attr("project"))),
            "anything",
        ))
        .unwrap();

        assert_eq!(c.ctx.conditions, vec!["0"]);
        assert!(c.ctx.values.is_empty());
    }

    #[test]
    fn test_neq_against_inert_attribute_is_always_true() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Request, &catalog);
        let pred = XpNode::Neq(
            Box::new(child("submit", child("target", attr("project")))),
            Box::new(XpNode::Literal("anything".to_string())),
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(c.ctx.conditions, vec!["1"]);
        assert!(c.ctx.values.is_empty());
    }

    #[test]
    fn test_split_attribute_binds_two_values() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        c.parse_predicate(&eq(child("attribute", attr("name")), "Build:Maintained"))
            .unwrap();

        assert_eq!(
            c.ctx.conditions,
            vec!["attrib_namespaces.name = ? AND attrib_types.name = ?"]
        );
        assert_eq!(
            c.ctx.values,
            vec![
                BindValue::Text("Build".to_string()),
                BindValue::Text("Maintained".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_without_delimiter_is_rejected() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let err = c
            .parse_predicate(&eq(child("attribute", attr("name")), "Maintained"))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "illegal xpath: attributes must be $NAMESPACE:$NAME"
        );
    }

    #[test]
    fn test_double_attribute_binds_twice() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Request, &catalog);
        c.parse_predicate(&eq(child("person", attr("userid")), "alice"))
            .unwrap();

        assert_eq!(
            c.ctx.conditions,
            vec!["history_users.login = ? OR requests.creator = ?"]
        );
        assert_eq!(c.ctx.values.len(), 2);
    }

    #[test]
    fn test_not_doubles_bindings_and_condition_text() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Project, &catalog);
        let pred = XpNode::Call(
            "not".to_string(),
            vec![eq(attr("kind"), "maintenance_incident")],
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(
            c.ctx.conditions,
            vec!["(NOT project_types.name = ? OR project_types.name = ? IS NULL)"]
        );
        assert_eq!(c.ctx.values.len(), 2);
        assert_eq!(c.ctx.values_needed, 1);
    }

    #[test]
    fn test_nested_not_composes_multiplicatively() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let inner = XpNode::Call("not".to_string(), vec![eq(attr("name"), "x")]);
        let outer = XpNode::Call("not".to_string(), vec![inner]);
        c.parse_predicate(&outer).unwrap();

        // The innermost comparison appears four times in the final text
        let condition = &c.ctx.conditions[0];
        assert_eq!(placeholders(condition), 4);
        assert_eq!(c.ctx.values.len(), 4);
        assert_eq!(c.ctx.values_needed, 1);
    }

    #[test]
    fn test_not_over_split_keeps_tuple_order() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let pred = XpNode::Call(
            "not".to_string(),
            vec![eq(child("attribute", attr("name")), "a:b")],
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(placeholders(&c.ctx.conditions[0]), 4);
        let texts: Vec<String> = c.ctx.values.iter().map(|v| v.as_text()).collect();
        assert_eq!(texts, ["a", "b", "a", "b"]);
    }

    #[test]
    fn test_contains_is_case_insensitive_like() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let pred = XpNode::Call(
            "contains".to_string(),
            vec![attr("name"), XpNode::Literal("Lib".to_string())],
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(
            c.ctx.conditions,
            vec!["LOWER(packages.name) LIKE LOWER(CONCAT('%', ?, '%'))"]
        );
        assert_eq!(c.ctx.values, vec![BindValue::Text("Lib".to_string())]);
    }

    #[test]
    fn test_contains_escapes_like_metacharacters() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let pred = XpNode::Call(
            "contains".to_string(),
            vec![attr("name"), XpNode::Literal("50%_off".to_string())],
        );
        c.parse_predicate(&pred).unwrap();

        assert_eq!(
            c.ctx.values,
            vec![BindValue::Text("50\\%\\_off".to_string())]
        );
    }

    #[test]
    fn test_starts_with_and_ends_with_shapes() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let pred = XpNode::Call(
            "starts-with".to_string(),
            vec![attr("name"), XpNode::Literal("lib".to_string())],
        );
        c.parse_predicate(&pred).unwrap();
        assert_eq!(c.ctx.conditions, vec!["packages.name LIKE CONCAT(?, '%')"]);

        let mut c = compiler(EntityKind::Package, &catalog);
        let pred = XpNode::Call(
            "ends-with".to_string(),
            vec![attr("name"), XpNode::Literal("-devel".to_string())],
        );
        c.parse_predicate(&pred).unwrap();
        assert_eq!(c.ctx.conditions, vec!["packages.name LIKE CONCAT('%', ?)"]);
    }

    #[test]
    fn test_unknown_function_is_rejected() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let err = c
            .parse_predicate(&XpNode::Call("string-length".to_string(), vec![attr("name")]))
            .unwrap_err();

        assert!(err.to_string().contains("unknown xpath function"));
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let catalog = Catalog::new();
        let mut c = compiler(EntityKind::Package, &catalog);
        let err = c
            .parse_predicate(&XpNode::Call("contains".to_string(), vec![attr("name")]))
            .unwrap_err();

        assert!(err.is_client_error());
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("plain"), "plain");
    }

    // P1: placeholder/value parity over arbitrary predicate trees.

    #[derive(Debug, Clone)]
    enum Leaf {
        Plain,
        Joined,
        Split,
        Double,
    }

    fn leaf_node(leaf: &Leaf) -> XpNode {
        match leaf {
            // Package attributes for plain/joined/split; the request
            // double path is compiled against EntityKind::Request below.
            Leaf::Plain => eq(attr("name"), "value"),
            Leaf::Joined => eq(attr("project"), "value"),
            Leaf::Split => eq(child("attribute", attr("name")), "ns:name"),
            Leaf::Double => eq(child("person", attr("userid")), "value"),
        }
    }

    fn tree_strategy(leaves: Vec<Leaf>) -> impl Strategy<Value = XpNode> {
        let leaf = proptest::sample::select(leaves).prop_map(|l| leaf_node(&l));
        leaf.prop_recursive(4, 24, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone())
                    .prop_map(|(l, r)| XpNode::And(Box::new(l), Box::new(r))),
                (inner.clone(), inner.clone())
                    .prop_map(|(l, r)| XpNode::Or(Box::new(l), Box::new(r))),
                inner.prop_map(|e| XpNode::Call("not".to_string(), vec![e])),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_placeholder_value_parity_packages(
            pred in tree_strategy(vec![Leaf::Plain, Leaf::Joined, Leaf::Split])
        ) {
            let catalog = Catalog::new();
            let mut c = compiler(EntityKind::Package, &catalog);
            c.parse_predicate(&pred).unwrap();
            prop_assert_eq!(c.ctx.conditions.len(), 1);
            prop_assert_eq!(placeholders(&c.ctx.conditions[0]), c.ctx.values.len());
            prop_assert_eq!(c.ctx.values_needed, 1);
        }

        #[test]
        fn prop_placeholder_value_parity_requests(
            pred in tree_strategy(vec![Leaf::Plain, Leaf::Double])
        ) {
            let catalog = Catalog::new();
            let mut c = compiler(EntityKind::Request, &catalog);
            // Requests have no plain '@name'; remap the plain leaf
            let pred = remap_plain_to_creator(pred);
            c.parse_predicate(&pred).unwrap();
            prop_assert_eq!(c.ctx.conditions.len(), 1);
            prop_assert_eq!(placeholders(&c.ctx.conditions[0]), c.ctx.values.len());
        }
    }

    fn remap_plain_to_creator(node: XpNode) -> XpNode {
        match node {
            XpNode::Eq(left, right) => {
                let left = match *left {
                    XpNode::Attribute(q) if q.name == "name" => attr("creator"),
                    XpNode::Attribute(q) if q.name == "project" => attr("creator"),
                    other => other,
                };
                XpNode::Eq(Box::new(left), right)
            }
            XpNode::And(l, r) => XpNode::And(
                Box::new(remap_plain_to_creator(*l)),
                Box::new(remap_plain_to_creator(*r)),
            ),
            XpNode::Or(l, r) => XpNode::Or(
                Box::new(remap_plain_to_creator(*l)),
                Box::new(remap_plain_to_creator(*r)),
            ),
            XpNode::Call(name, args) => XpNode::Call(
                name,
                args.into_iter().map(remap_plain_to_creator).collect(),
            ),
            other => other,
        }
    }
}
