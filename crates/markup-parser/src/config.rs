//! Parser Configuration

/// How an element's closing marker is located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseMatching {
    /// First literal `</name>` after the opening tag.
    ///
    /// A nested element with the same name closes its ancestor early.
    #[default]
    Naive,
    /// Count same-named opening tags and closing markers, closing at the
    /// marker that balances the opening tag.
    ///
    /// Opening tags are skipped whole, but a tag ends at its first `>`, so
    /// a quoted attribute value containing `>` can still expose a `<name`
    /// that gets counted.
    DepthAware,
}

/// Parser configuration options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum element nesting depth (roots are depth 0).
    /// `None` leaves recursion unbounded.
    pub max_depth: Option<usize>,

    /// Closing marker lookup strategy
    pub close_matching: CloseMatching,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `MaxDepthExceeded` when elements nest deeper than `depth` levels
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_close_matching(mut self, close_matching: CloseMatching) -> Self {
        self.close_matching = close_matching;
        self
    }
}
