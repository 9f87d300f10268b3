//! Parse options: syntax variant and charset.

use serde::{Deserialize, Serialize};

/// Charset used when none is given explicitly.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Which URL grammar to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    /// Generic URI reference: relative references are accepted, a `#fragment`
    /// is split off and written back on serialization. The query ends at the
    /// first `#`, so a `?` that only appears inside the fragment
    /// (`/p#frag?x=1`) yields no parameters.
    #[default]
    Scheme,
    /// Absolute web URL: a scheme is required, the input must satisfy the
    /// WHATWG URL parser, and fragments are not tracked.
    Protocol,
}

impl Syntax {
    pub fn supports_fragment(self) -> bool {
        matches!(self, Syntax::Scheme)
    }
}

/// Options for [`ParsedUrl::parse_with`](super::ParsedUrl::parse_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub syntax: Syntax,
    /// Charset label for value encoding; `None` stores and returns values untouched.
    pub charset: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            syntax: Syntax::Scheme,
            charset: Some(DEFAULT_CHARSET.to_string()),
        }
    }
}

impl ParseOptions {
    /// Options with encoding disabled (raw passthrough).
    pub fn raw() -> Self {
        Self {
            charset: None,
            ..Self::default()
        }
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn with_charset(mut self, charset: Option<&str>) -> Self {
        self.charset = charset.map(str::to_string);
        self
    }
}
