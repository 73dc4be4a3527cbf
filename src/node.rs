//! Opaque host nodes.
//!
//! A host node is an object the engine does not own (a document element, a
//! widget handle). The engine only carries its markup: [`HostNode::to_markup`]
//! on the way out, the engine's [`NodeParser`] on the way in.

use crate::Result;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A host object that can render itself as markup.
pub trait HostNode {
    /// The node's element name, e.g. `div`.
    fn node_name(&self) -> &str;

    fn to_markup(&self) -> String;

    fn as_any(&self) -> &dyn Any;
}

/// Turns markup back into a host node at decode time.
pub trait NodeParser: Send + Sync {
    fn parse(&self, markup: &str) -> Result<Node>;
}

/// Shared handle to a host node.
#[derive(Clone)]
pub struct Node(Rc<dyn HostNode>);

impl Node {
    pub fn new<N: HostNode + 'static>(node: N) -> Self {
        Node(Rc::new(node))
    }

    #[must_use]
    pub fn node_name(&self) -> &str {
        self.0.node_name()
    }

    #[must_use]
    pub fn markup(&self) -> String {
        self.0.to_markup()
    }

    #[must_use]
    pub fn downcast_ref<N: HostNode + 'static>(&self) -> Option<&N> {
        self.0.as_any().downcast_ref::<N>()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.node_name())
    }
}

/// The default host node: a markup fragment and the name of its first
/// element (`#text` when the fragment does not start with a tag).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupNode {
    name: String,
    markup: String,
}

impl MarkupNode {
    pub fn new(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let name = markup
            .trim_start()
            .strip_prefix('<')
            .map(|rest| {
                rest.chars()
                    .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == ':')
                    .collect::<String>()
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "#text".to_string());
        MarkupNode { name, markup }
    }
}

impl HostNode for MarkupNode {
    fn node_name(&self) -> &str {
        &self.name
    }

    fn to_markup(&self) -> String {
        self.markup.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parser producing [`MarkupNode`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkupParser;

impl NodeParser for MarkupParser {
    fn parse(&self, markup: &str) -> Result<Node> {
        Ok(Node::new(MarkupNode::new(markup)))
    }
}
