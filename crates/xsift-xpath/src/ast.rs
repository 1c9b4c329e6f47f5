//! Prefix parse tree for XPath expressions
//!
//! The parser flattens an absolute path into a `Document` node whose
//! children are the steps and predicates in stream order, the canonical
//! prefix form the compiler walks. Inside predicates, relative paths
//! appear as right-nested `Child` chains ending in an `Attribute` leaf.

use serde::{Deserialize, Serialize};

/// A qualified name: optional namespace prefix plus local part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QName {
    pub prefix: Option<String>,
    pub name: String,
}

impl QName {
    /// A name with no namespace prefix
    pub fn local<S: Into<String>>(name: S) -> Self {
        Self {
            prefix: None,
            name: name.into(),
        }
    }
}

/// The thirteen XPath 1.0 axes.
///
/// The parser accepts all of them; which axes the search subset actually
/// supports is the walker's decision, so unsupported-axis errors carry
/// the axis name rather than a generic parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Ancestor,
    AncestorOrSelf,
    Attribute,
    Child,
    Descendant,
    DescendantOrSelf,
    Following,
    FollowingSibling,
    Namespace,
    Parent,
    Preceding,
    PrecedingSibling,
    SelfAxis,
}

impl Axis {
    /// The axis name as written in XPath
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Ancestor => "ancestor",
            Axis::AncestorOrSelf => "ancestor-or-self",
            Axis::Attribute => "attribute",
            Axis::Child => "child",
            Axis::Descendant => "descendant",
            Axis::DescendantOrSelf => "descendant-or-self",
            Axis::Following => "following",
            Axis::FollowingSibling => "following-sibling",
            Axis::Namespace => "namespace",
            Axis::Parent => "parent",
            Axis::Preceding => "preceding",
            Axis::PrecedingSibling => "preceding-sibling",
            Axis::SelfAxis => "self",
        }
    }

    /// Resolve an axis name from query text
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ancestor" => Some(Axis::Ancestor),
            "ancestor-or-self" => Some(Axis::AncestorOrSelf),
            "attribute" => Some(Axis::Attribute),
            "child" => Some(Axis::Child),
            "descendant" => Some(Axis::Descendant),
            "descendant-or-self" => Some(Axis::DescendantOrSelf),
            "following" => Some(Axis::Following),
            "following-sibling" => Some(Axis::FollowingSibling),
            "namespace" => Some(Axis::Namespace),
            "parent" => Some(Axis::Parent),
            "preceding" => Some(Axis::Preceding),
            "preceding-sibling" => Some(Axis::PrecedingSibling),
            "self" => Some(Axis::SelfAxis),
            _ => None,
        }
    }
}

/// One node in the prefix parse tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XpNode {
    /// The document root; children are steps and predicates in order
    Document(Vec<XpNode>),

    /// A location step outside any predicate
    Step { axis: Axis, name: QName },

    /// A `[...]` filter attached to the preceding step
    Predicate(Box<XpNode>),

    /// `left = right`
    Eq(Box<XpNode>, Box<XpNode>),

    /// `left != right`
    Neq(Box<XpNode>, Box<XpNode>),

    /// `left and right`
    And(Box<XpNode>, Box<XpNode>),

    /// `left or right`
    Or(Box<XpNode>, Box<XpNode>),

    /// A function call; the supported set is the compiler's concern
    Call(String, Vec<XpNode>),

    /// A child step inside a predicate operand, e.g. the `person` in
    /// `person/@userid`. `rest` is the remainder of the relative path,
    /// absent for a bare element operand such as `title`.
    Child {
        name: QName,
        rest: Option<Box<XpNode>>,
    },

    /// An attribute leaf inside a predicate operand, e.g. `@userid`
    Attribute(QName),

    /// A constant to bind as a SQL parameter
    Literal(String),
}
