//! Recursive-descent markup parser
//!
//! The driver walks root-level input and hands each tag to the node parser.
//! The node parser finds the element's closing marker and hands the body to
//! the children parser, which recurses back into the node parser.
//!
//! Errors are handled differently at the two levels: a failure while
//! parsing a root element aborts the whole parse, while a failure inside an
//! element body only ends that body early. `MaxDepthExceeded` always
//! propagates.

use crate::ParseError;
use crate::attributes::parse_attributes;
use crate::config::{CloseMatching, ParserConfig};
use crate::node::{Forest, Node};
use crate::scan::{TAG_SCANNER, find_char};

/// Characters of offending input kept in `InvalidTagStart`
const SNIPPET_CHARS: usize = 32;

/// Markup parser
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    config: ParserConfig,
}

impl MarkupParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a markup string into a forest of root nodes.
    ///
    /// Text outside root elements is discarded. The first root element
    /// that fails to parse fails the whole call.
    pub fn parse(&self, input: &str) -> Result<Forest, ParseError> {
        tracing::debug!(len = input.len(), "Parsing markup");

        let run = ParseRun::new(input, &self.config);
        let mut nodes = Forest::new();
        let mut rest = input.trim();

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            if !rest.starts_with('<') {
                match rest.find('<') {
                    Some(i) => {
                        rest = &rest[i..];
                        continue;
                    }
                    None => break,
                }
            }

            let (node, consumed) = run.parse_node(rest, 0)?;
            nodes.push(node);
            rest = &rest[consumed..];
        }

        tracing::debug!(roots = nodes.len(), "Parsed markup");
        Ok(nodes)
    }

    /// Parse the element opening at the start of `input`.
    ///
    /// Returns the node and the number of bytes consumed through the end of
    /// its closing marker.
    pub fn parse_node(&self, input: &str) -> Result<(Node, usize), ParseError> {
        ParseRun::new(input, &self.config).parse_node(input, 0)
    }

    /// Parse an element body into child nodes and trimmed residual text.
    ///
    /// A child that fails to parse stops the scan; whatever was collected
    /// before it is returned. Only `MaxDepthExceeded` is reported as an error.
    pub fn parse_children(&self, body: &str) -> Result<(Vec<Node>, String), ParseError> {
        ParseRun::new(body, &self.config).parse_children(body, 0)
    }
}

/// State for one parse call
struct ParseRun<'a> {
    source: &'a str,
    config: &'a ParserConfig,
}

impl<'a> ParseRun<'a> {
    fn new(source: &'a str, config: &'a ParserConfig) -> Self {
        Self { source, config }
    }

    /// Byte offset of `slice` within the source
    fn offset_of(&self, slice: &str) -> usize {
        slice.as_ptr() as usize - self.source.as_ptr() as usize
    }

    fn parse_node(&self, input: &'a str, depth: usize) -> Result<(Node, usize), ParseError> {
        let Some(open) = TAG_SCANNER.match_open_tag(input) else {
            return Err(ParseError::InvalidTagStart {
                offset: self.offset_of(input),
                snippet: snippet(input),
            });
        };

        let attributes = parse_attributes(open.raw_attributes);
        let rem = &input[open.len..];

        let marker = format!("</{}>", open.name);
        let Some(close) = self.find_close(rem, open.name, &marker) else {
            return Err(ParseError::UnclosedTag {
                tag: open.name.to_owned(),
                offset: self.offset_of(input),
            });
        };

        // Only an element that actually closes counts toward the limit
        if let Some(limit) = self.config.max_depth {
            if depth >= limit {
                return Err(ParseError::MaxDepthExceeded { limit });
            }
        }

        let (children, text) = self.parse_children(&rem[..close], depth + 1)?;

        let node = Node {
            tag: open.name.to_owned(),
            attributes,
            children,
            text,
        };
        tracing::trace!(tag = %node.tag, depth, children = node.children.len(), "Parsed node");

        Ok((node, open.len + close + marker.len()))
    }

    fn parse_children(
        &self,
        body: &'a str,
        depth: usize,
    ) -> Result<(Vec<Node>, String), ParseError> {
        let mut children = Vec::new();
        let mut text = String::new();
        let mut rest = body;

        loop {
            rest = rest.trim();
            if rest.is_empty() {
                break;
            }

            if !rest.starts_with('<') {
                let end = rest.find('<').unwrap_or(rest.len());
                text.push_str(&rest[..end]);
                rest = &rest[end..];
                continue;
            }

            match self.parse_node(rest, depth) {
                Ok((node, consumed)) => {
                    children.push(node);
                    rest = &rest[consumed..];
                }
                Err(err @ ParseError::MaxDepthExceeded { .. }) => return Err(err),
                Err(err) => {
                    tracing::trace!(error = %err, "Truncating element body");
                    break;
                }
            }
        }

        Ok((children, text.trim().to_owned()))
    }

    /// Offset of the closing marker for `name` within `rem`
    fn find_close(&self, rem: &str, name: &str, marker: &str) -> Option<usize> {
        match self.config.close_matching {
            CloseMatching::Naive => rem.find(marker),
            CloseMatching::DepthAware => find_balanced_close(rem, name, marker),
        }
    }
}

/// Closing marker that balances an already-consumed `<name ...>`.
///
/// Every opening tag is skipped as a whole, so a `<name` inside its
/// attribute text is not counted.
fn find_balanced_close(rem: &str, name: &str, marker: &str) -> Option<usize> {
    let bytes = rem.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(offset) = find_char(&bytes[pos..], b'<') {
        let at = pos + offset;
        let tail = &rem[at..];

        if tail.starts_with(marker) {
            if depth == 0 {
                return Some(at);
            }
            depth -= 1;
            pos = at + marker.len();
        } else if let Some(open) = TAG_SCANNER.match_open_tag(tail) {
            if open.name == name {
                depth += 1;
            }
            pos = at + open.len;
        } else {
            pos = at + 1;
        }
    }

    None
}

fn snippet(input: &str) -> String {
    match input.char_indices().nth(SNIPPET_CHARS) {
        Some((end, _)) => format!("{}...", &input[..end]),
        None => input.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive() -> MarkupParser {
        MarkupParser::new()
    }

    fn depth_aware() -> MarkupParser {
        MarkupParser::with_config(ParserConfig::new().with_close_matching(CloseMatching::DepthAware))
    }

    #[test]
    fn test_parse_node_consumed_length() {
        let input = "<a><b></b></a> trailing";
        let (node, consumed) = naive().parse_node(input).unwrap();
        assert_eq!(node.tag, "a");
        assert_eq!(&input[..consumed], "<a><b></b></a>");
    }

    #[test]
    fn test_parse_node_invalid_start() {
        let err = naive().parse_node("text <a></a>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidTagStart { offset: 0, .. }));
    }

    #[test]
    fn test_parse_node_unclosed() {
        let err = naive().parse_node("<a><b></b>").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnclosedTag {
                tag: "a".into(),
                offset: 0
            }
        );
    }

    #[test]
    fn test_closing_marker_is_case_sensitive() {
        let err = naive().parse_node("<Div></div>").unwrap_err();
        assert!(matches!(err, ParseError::UnclosedTag { .. }));
    }

    #[test]
    fn test_children_text_segments_concatenate() {
        let (children, text) = naive().parse_children("  one <b>x</b> two <i></i>three ").unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(text, "one two three");
    }

    #[test]
    fn test_children_text_segments_are_not_separated() {
        let (_, text) = naive().parse_children("a<b></b>c").unwrap();
        assert_eq!(text, "ac");
    }

    #[test]
    fn test_children_stop_at_malformed_child() {
        let (children, text) = naive()
            .parse_children("before <ok></ok> mid <broken> after <late></late>")
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag, "ok");
        assert_eq!(text, "before mid");
    }

    #[test]
    fn test_children_stop_at_stray_angle_bracket() {
        let (children, text) = naive().parse_children("a < b <c></c>").unwrap();
        assert!(children.is_empty());
        assert_eq!(text, "a");
    }

    #[test]
    fn test_balanced_close_skips_nested_same_name() {
        assert_eq!(find_balanced_close("<a></a></a>", "a", "</a>"), Some(7));
        assert_eq!(find_balanced_close("<ab></ab></a>", "a", "</a>"), Some(9));
        assert_eq!(find_balanced_close("<a x=\"1\"></a>", "a", "</a>"), None);
    }

    #[test]
    fn test_depth_aware_nesting() {
        let forest = depth_aware().parse("<a><a>inner</a>outer</a>").unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].text, "outer");
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].text, "inner");
    }

    #[test]
    fn test_max_depth_exceeded_propagates_from_children() {
        let parser = MarkupParser::with_config(ParserConfig::new().with_max_depth(2));
        assert!(parser.parse("<a><b></b></a>").is_ok());

        let err = parser.parse("<a><b><c></c></b></a>").unwrap_err();
        assert_eq!(err, ParseError::MaxDepthExceeded { limit: 2 });
    }

    #[test]
    fn test_max_depth_ignores_malformed_child() {
        let parser = MarkupParser::with_config(ParserConfig::new().with_max_depth(1));
        let forest = parser.parse("<a>text </b></a>").unwrap();
        assert_eq!(forest[0].text, "text");
    }

    #[test]
    fn test_max_depth_ignores_unclosed_child() {
        let parser = MarkupParser::with_config(ParserConfig::new().with_max_depth(1));
        let forest = parser.parse("<a>text <b> more</a>").unwrap();
        assert_eq!(forest.len(), 1);
        assert!(forest[0].children.is_empty());
        assert_eq!(forest[0].text, "text");
    }

    #[test]
    fn test_balanced_close_skips_tag_inside_attribute() {
        assert_eq!(find_balanced_close(r#"<b t="<a>"></b></a>"#, "a", "</a>"), Some(15));

        let forest = depth_aware().parse(r#"<a><b t="<a>"></b></a>"#).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].tag, "b");
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkupParser>();
        assert_send_sync::<ParserConfig>();
    }

    #[test]
    fn test_error_offset_is_absolute() {
        let err = naive().parse("  <a></a>\n  <b>").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnclosedTag {
                tag: "b".into(),
                offset: 12
            }
        );
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let long = "é".repeat(40);
        let s = snippet(&long);
        assert!(s.ends_with("..."));
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 3);
        assert_eq!(snippet("<short"), "<short");
    }
}
