//! Route matching module
//!
//! Implements exact and wildcard path patterns.

use std::fmt;

use super::RouteError;

/// A parsed route pattern
///
/// `/api/hello` is an exact pattern. `/vendor/*` is a wildcard pattern with
/// the fixed prefix `/vendor/`; it matches every path under that prefix and
/// the bare `/vendor` as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoutePattern {
    Exact(String),
    Wildcard { prefix: String },
}

impl RoutePattern {
    /// Parse a pattern; `*` is only allowed as the final segment
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &'static str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        match pattern.strip_suffix('*') {
            Some(prefix) if prefix.contains('*') => Err(invalid("only one trailing '*' allowed")),
            Some(prefix) if !prefix.ends_with('/') => Err(invalid("'*' must follow '/'")),
            Some(prefix) => Ok(Self::Wildcard {
                prefix: prefix.to_string(),
            }),
            None if pattern.contains('*') => Err(invalid("'*' must be the last character")),
            None => Ok(Self::Exact(pattern.to_string())),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Wildcard { prefix } => {
                path.starts_with(prefix.as_str()) || path == &prefix[..prefix.len() - 1]
            }
        }
    }

    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard { .. })
    }

    /// Length of the fixed part, used to rank wildcard matches
    pub fn fixed_len(&self) -> usize {
        match self {
            Self::Exact(exact) => exact.len(),
            Self::Wildcard { prefix } => prefix.len(),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(exact) => write!(f, "{exact}"),
            Self::Wildcard { prefix } => write!(f, "{prefix}*"),
        }
    }
}
