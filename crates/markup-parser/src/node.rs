//! Parse Tree
//!
//! A node owns its children outright; there are no parent links.

use serde::Serialize;

use crate::attributes::Attributes;

/// Root-level nodes of a parse, in document order
pub type Forest = Vec<Node>;

/// One parsed element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Tag name, `[A-Za-z0-9_-]+`
    pub tag: String,

    /// Attributes from the opening tag
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,

    /// Child elements in document order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Text directly inside this element, trimmed.
    /// Text inside child elements is not included.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Node {
    /// Create an empty node with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Get attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First node with `tag` in pre-order, starting with `self`
    pub fn find(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|node| node.tag == tag)
    }

    /// Pre-order walk over this node and everything below it
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut leaf = Node::new("leaf");
        leaf.text = "deep".into();

        let mut left = Node::new("left");
        left.children.push(leaf);

        let mut root = Node::new("root");
        root.attributes.insert("id".into(), "r".into());
        root.children.push(left);
        root.children.push(Node::new("right"));
        root
    }

    #[test]
    fn test_descendants_pre_order() {
        let root = sample();
        let tags: Vec<&str> = root.descendants().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, ["root", "left", "leaf", "right"]);
    }

    #[test]
    fn test_find() {
        let root = sample();
        assert_eq!(root.find("leaf").map(|n| n.text.as_str()), Some("deep"));
        assert_eq!(root.find("root").map(|n| n.tag.as_str()), Some("root"));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn test_attribute() {
        let root = sample();
        assert_eq!(root.attribute("id"), Some("r"));
        assert_eq!(root.attribute("class"), None);
    }
}
