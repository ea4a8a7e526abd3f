//! Syntax tree for seqshape sequence diagrams.
//!
//! This crate defines the tree a notation parser hands to the seqshape
//! pipeline. Parsing text into this tree happens upstream; the types here are
//! plain data with a small builder API, and they implement serde traits so a
//! tree can be exchanged as structured data.
//!
//! # Shape of the tree
//!
//! A [`Diagram`] is a list of [`Statement`]s. Edge, fragment and group
//! statements may contain nested statements, exposed uniformly through
//! [`Statement::children`].
//!
//! # Example
//!
//! ```
//! use seqshape_syntax::{Diagram, EdgeStatement, FragmentStatement, Statement};
//!
//! // foo -> bar -> baz [label = "chained"];
//! // loop { bar => baz; }
//! let diagram = Diagram::new(vec![
//!     EdgeStatement::chain("foo", &[("->", "bar"), ("->", "baz")])
//!         .unwrap()
//!         .with_option("label", "chained")
//!         .into(),
//!     FragmentStatement::new("loop", vec![
//!         EdgeStatement::chain("bar", &[("=>", "baz")]).unwrap().into(),
//!     ])
//!     .into(),
//! ]);
//!
//! assert_eq!(diagram.statements().len(), 2);
//! assert_eq!(diagram.statements()[1].children().len(), 1);
//! ```

mod arrow;
mod error;

pub use arrow::Arrow;
pub use error::SyntaxError;

use serde::{Deserialize, Serialize};

/// Root of a parsed diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    statements: Vec<Statement>,
}

impl Diagram {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// One statement of the notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    /// One or more chained arrows, e.g. `a -> b -> c [label = "x"] { ... }`.
    Edge(EdgeStatement),
    /// A typed block such as `loop { ... }`.
    Fragment(FragmentStatement),
    /// A transparent block without any visual representation.
    Group(GroupStatement),
    /// A bare participant declaration.
    Node(NodeStatement),
    /// A labeled horizontal marker, `=== text ===` or `... text ...`.
    Separator(SeparatorStatement),
}

impl Statement {
    /// Returns the nested statements of container statements.
    ///
    /// Edges without a block, nodes and separators have no children.
    pub fn children(&self) -> &[Statement] {
        match self {
            Self::Edge(edge) => edge.block().unwrap_or_default(),
            Self::Fragment(fragment) => fragment.statements(),
            Self::Group(group) => group.statements(),
            Self::Node(_) | Self::Separator(_) => &[],
        }
    }
}

/// A single arrow between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    left: String,
    arrow: Arrow,
    right: String,
}

impl Hop {
    pub fn new(left: impl Into<String>, arrow: Arrow, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            arrow,
            right: right.into(),
        }
    }

    /// The participant written on the left of the arrow.
    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn arrow(&self) -> Arrow {
        self.arrow
    }

    /// The participant written on the right of the arrow.
    pub fn right(&self) -> &str {
        &self.right
    }
}

/// A `key = "value"` option attached to an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeOption {
    key: String,
    value: String,
}

impl EdgeOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Chained arrows sharing one option list and an optional nested block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStatement {
    hops: Vec<Hop>,
    #[serde(default)]
    options: Vec<EdgeOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block: Option<Vec<Statement>>,
}

impl EdgeStatement {
    /// Creates an edge from already built hops.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::EmptyEdge`] when `hops` is empty.
    pub fn new(hops: Vec<Hop>) -> Result<Self, SyntaxError> {
        if hops.is_empty() {
            return Err(SyntaxError::EmptyEdge);
        }
        Ok(Self {
            hops,
            options: Vec::new(),
            block: None,
        })
    }

    /// Builds the chain `first arrow₁ name₁ arrow₂ name₂ ...`, the way the
    /// notation writes `a -> b -> c`. Each hop starts at the previous hop's
    /// right participant.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownArrow`] for an unrecognized lexeme and
    /// [`SyntaxError::EmptyEdge`] when `rest` is empty.
    pub fn chain(first: &str, rest: &[(&str, &str)]) -> Result<Self, SyntaxError> {
        let mut left = first;
        let mut hops = Vec::with_capacity(rest.len());
        for &(lexeme, right) in rest {
            hops.push(Hop::new(left, lexeme.parse()?, right));
            left = right;
        }
        Self::new(hops)
    }

    /// Adds an option such as `label` or `note`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(EdgeOption::new(key, value));
        self
    }

    /// Attaches a nested block of statements.
    pub fn with_block(mut self, statements: Vec<Statement>) -> Self {
        self.block = Some(statements);
        self
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn options(&self) -> &[EdgeOption] {
        &self.options
    }

    /// Returns the value of the first option named `key`.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.key == key)
            .map(EdgeOption::value)
    }

    pub fn block(&self) -> Option<&[Statement]> {
        self.block.as_deref()
    }
}

/// A typed block: `loop { ... }`, `alt { ... }` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentStatement {
    keyword: String,
    #[serde(default)]
    statements: Vec<Statement>,
}

impl FragmentStatement {
    pub fn new(keyword: impl Into<String>, statements: Vec<Statement>) -> Self {
        Self {
            keyword: keyword.into(),
            statements,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// A block without keyword or visual box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStatement {
    #[serde(default)]
    statements: Vec<Statement>,
}

impl GroupStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// A bare participant declaration, used to fix participant order up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatement {
    name: String,
}

impl NodeStatement {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Visual flavor of a separator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorKind {
    /// `=== text ===`
    #[default]
    Divider,
    /// `... text ...`
    Delay,
}

/// A labeled horizontal marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorStatement {
    #[serde(default)]
    kind: SeparatorKind,
    text: String,
}

impl SeparatorStatement {
    pub fn new(kind: SeparatorKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn divider(text: impl Into<String>) -> Self {
        Self::new(SeparatorKind::Divider, text)
    }

    pub fn delay(text: impl Into<String>) -> Self {
        Self::new(SeparatorKind::Delay, text)
    }

    pub fn kind(&self) -> SeparatorKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<EdgeStatement> for Statement {
    fn from(edge: EdgeStatement) -> Self {
        Self::Edge(edge)
    }
}

impl From<FragmentStatement> for Statement {
    fn from(fragment: FragmentStatement) -> Self {
        Self::Fragment(fragment)
    }
}

impl From<GroupStatement> for Statement {
    fn from(group: GroupStatement) -> Self {
        Self::Group(group)
    }
}

impl From<NodeStatement> for Statement {
    fn from(node: NodeStatement) -> Self {
        Self::Node(node)
    }
}

impl From<SeparatorStatement> for Statement {
    fn from(separator: SeparatorStatement) -> Self {
        Self::Separator(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_links_hops() {
        let edge = EdgeStatement::chain("a", &[("=>", "b"), ("-->", "c")]).unwrap();
        let hops = edge.hops();

        assert_eq!(hops.len(), 2);
        assert_eq!((hops[0].left(), hops[0].right()), ("a", "b"));
        assert_eq!(hops[0].arrow(), Arrow::RoundTrip);
        assert_eq!((hops[1].left(), hops[1].right()), ("b", "c"));
        assert_eq!(hops[1].arrow(), Arrow::Dashed);
    }

    #[test]
    fn test_chain_rejects_unknown_arrow() {
        let err = EdgeStatement::chain("a", &[("~>", "b")]).unwrap_err();
        assert_eq!(err, SyntaxError::UnknownArrow("~>".to_string()));
    }

    #[test]
    fn test_chain_rejects_empty_edge() {
        let err = EdgeStatement::chain("a", &[]).unwrap_err();
        assert_eq!(err, SyntaxError::EmptyEdge);
    }

    #[test]
    fn test_option_lookup_first_match_wins() {
        let edge = EdgeStatement::chain("a", &[("->", "b")])
            .unwrap()
            .with_option("label", "first")
            .with_option("label", "second")
            .with_option("note", "n");

        assert_eq!(edge.option("label"), Some("first"));
        assert_eq!(edge.option("note"), Some("n"));
        assert_eq!(edge.option("leftnote"), None);
        assert_eq!(edge.options().len(), 3);
    }

    #[test]
    fn test_children_of_each_statement_kind() {
        let inner: Statement = NodeStatement::new("x").into();

        let edge: Statement = EdgeStatement::chain("a", &[("->", "b")])
            .unwrap()
            .with_block(vec![inner.clone()])
            .into();
        let bare_edge: Statement = EdgeStatement::chain("a", &[("->", "b")]).unwrap().into();
        let fragment: Statement = FragmentStatement::new("alt", vec![inner.clone()]).into();
        let group: Statement = GroupStatement::new(vec![inner.clone(), inner.clone()]).into();
        let separator: Statement = SeparatorStatement::divider("x").into();

        assert_eq!(edge.children().len(), 1);
        assert!(bare_edge.children().is_empty());
        assert_eq!(fragment.children().len(), 1);
        assert_eq!(group.children().len(), 2);
        assert!(inner.children().is_empty());
        assert!(separator.children().is_empty());
    }

    #[test]
    fn test_separator_kinds() {
        assert_eq!(SeparatorStatement::divider("a").kind(), SeparatorKind::Divider);
        assert_eq!(SeparatorStatement::delay("b").kind(), SeparatorKind::Delay);
        assert_eq!(SeparatorStatement::delay("b").text(), "b");
    }

    #[test]
    fn test_deserialize_tree_from_toml() {
        let source = r#"
            [[statements]]
            type = "node"
            name = "browser"

            [[statements]]
            type = "edge"
            hops = [{ left = "browser", arrow = "=>", right = "web" }]
            options = [{ key = "label", value = "GET /" }]

            [[statements]]
            type = "separator"
            kind = "delay"
            text = "later"

            [[statements]]
            type = "fragment"
            keyword = "loop"
            statements = [
                { type = "edge", hops = [{ left = "web", arrow = "<--", right = "db" }] },
            ]
        "#;

        let diagram: Diagram = toml::from_str(source).expect("valid tree");
        let statements = diagram.statements();

        assert_eq!(statements.len(), 4);
        assert_eq!(statements[0], NodeStatement::new("browser").into());
        let Statement::Edge(edge) = &statements[1] else {
            panic!("expected edge, got {:?}", statements[1]);
        };
        assert_eq!(edge.hops()[0].arrow(), Arrow::RoundTrip);
        assert_eq!(edge.option("label"), Some("GET /"));
        assert_eq!(statements[2], SeparatorStatement::delay("later").into());
        assert_eq!(statements[3].children().len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_unknown_arrow() {
        let source = r#"
            [[statements]]
            type = "edge"
            hops = [{ left = "a", arrow = "=>>", right = "b" }]
        "#;

        let err = toml::from_str::<Diagram>(source).unwrap_err();
        assert!(err.to_string().contains("=>>"));
    }
}
