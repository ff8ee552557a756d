//! Markup Parser
//!
//! Recursive-descent parser for a small HTML-like markup language.
//! Turns nested tags, double-quoted attributes and text into a forest of
//! [`Node`]s.
//!
//! Not supported: self-closing tags, comments, CDATA, entity decoding and
//! namespaces. Closing tags are found by literal search for `</name>`, so
//! by default a nested element with the same name as its ancestor closes
//! the ancestor (see [`CloseMatching`]).
//!
//! # Example
//! ```
//! let forest = markup_parser::parse(r#"<p class="intro">Hello <b>world</b></p>"#).unwrap();
//! assert_eq!(forest[0].tag, "p");
//! assert_eq!(forest[0].attribute("class"), Some("intro"));
//! assert_eq!(forest[0].text, "Hello");
//! assert_eq!(forest[0].children[0].text, "world");
//! ```

mod attributes;
mod config;
mod dump;
mod node;
mod parser;
mod scan;

pub use attributes::{Attributes, parse_attributes};
pub use config::{CloseMatching, ParserConfig};
pub use dump::{TreeDump, dump_forest};
pub use node::{Descendants, Forest, Node};
pub use parser::MarkupParser;

/// Parse a markup string into its root nodes with the default configuration
pub fn parse(input: &str) -> Result<Forest, ParseError> {
    MarkupParser::new().parse(input)
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid tag start at byte {offset}: {snippet:?}")]
    InvalidTagStart { offset: usize, snippet: String },

    #[error("No closing tag for <{tag}> opened at byte {offset}")]
    UnclosedTag { tag: String, offset: usize },

    #[error("Nesting depth exceeds limit of {limit}")]
    MaxDepthExceeded { limit: usize },
}
