//! Debug listing of parse trees
//!
//! One line per node, two spaces of indent per level:
//! `<Tag=div Attrs={id="main"} Text="hello">`. Diagnostic only, not meant
//! to be parsed back.

use std::fmt;

use crate::node::Node;

/// `Display` adapter that renders a forest as an indented listing
pub struct TreeDump<'a> {
    nodes: &'a [Node],
}

impl<'a> TreeDump<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self { nodes }
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.nodes {
            write_node(f, node, 0)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);

    write!(f, "{indent}<Tag={} Attrs={{", node.tag)?;
    for (i, (name, value)) in node.attributes.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{name}={value:?}")?;
    }
    writeln!(f, "}} Text={:?}>", node.text)?;

    for child in &node.children {
        write_node(f, child, depth + 1)?;
    }
    Ok(())
}

/// Render a whole forest
pub fn dump_forest(nodes: &[Node]) -> String {
    TreeDump::new(nodes).to_string()
}

impl Node {
    /// Render this node and its subtree
    pub fn dump(&self) -> String {
        dump_forest(std::slice::from_ref(self))
    }
}
