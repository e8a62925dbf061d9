//! Parser configuration.

/// Default limit on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration for a [`Parser`](crate::Parser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Require the root and product namespaces to match the declared family.
    pub strict_namespaces: bool,
    /// Reject elements outside the family vocabulary instead of skipping them.
    pub reject_unknown_elements: bool,
    /// Maximum element nesting accepted by the decoder.
    pub max_depth: usize,
}

impl ParserConfig {
    /// Create a config with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set namespace checking.
    pub fn with_strict_namespaces(mut self, strict: bool) -> Self {
        self.strict_namespaces = strict;
        self
    }

    /// Set whether unknown elements are an error.
    pub fn with_reject_unknown_elements(mut self, reject: bool) -> Self {
        self.reject_unknown_elements = reject;
        self
    }

    /// Set the maximum element nesting.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict_namespaces: true,
            reject_unknown_elements: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
