//! Route registry
//!
//! Built once at startup with [`RouterBuilder`], read-only afterwards.
//! Resolution order: exact path + method, then the wildcard with the longest
//! fixed prefix, then the fallback handler.

use hyper::Method;
use thiserror::Error;

use super::matcher::RoutePattern;

/// Registration errors, reported at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
    #[error("route {method} {pattern} registered twice")]
    Duplicate { method: Method, pattern: String },
    #[error("wildcard {method} {pattern} overlaps an existing wildcard with the same prefix")]
    Ambiguous { method: Method, pattern: String },
}

/// No registered route for the request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route for {method} {path}")]
pub struct RouteNotMatched {
    pub method: Method,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    pub method: Method,
    pub pattern: RoutePattern,
    pub handler: H,
}

#[derive(Debug)]
pub struct RouterBuilder<H> {
    entries: Vec<RouteEntry<H>>,
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouterBuilder<H> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a handler for `method` on `pattern`
    pub fn route(mut self, method: Method, pattern: &str, handler: H) -> Result<Self, RouteError> {
        let pattern = RoutePattern::parse(pattern)?;

        if self
            .entries
            .iter()
            .any(|e| e.method == method && e.pattern == pattern)
        {
            return Err(if pattern.is_wildcard() {
                RouteError::Ambiguous {
                    method,
                    pattern: pattern.to_string(),
                }
            } else {
                RouteError::Duplicate {
                    method,
                    pattern: pattern.to_string(),
                }
            });
        }

        self.entries.push(RouteEntry {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    /// Freeze the registry; `not_found` handles every unmatched request
    pub fn build(self, not_found: H) -> Router<H> {
        let (exact, mut wildcards): (Vec<_>, Vec<_>) = self
            .entries
            .into_iter()
            .partition(|e| !e.pattern.is_wildcard());

        // Longest prefix first; stable so equal lengths keep registration order
        wildcards.sort_by(|a, b| b.pattern.fixed_len().cmp(&a.pattern.fixed_len()));

        Router {
            exact,
            wildcards,
            not_found,
        }
    }
}

#[derive(Debug)]
pub struct Router<H> {
    exact: Vec<RouteEntry<H>>,
    wildcards: Vec<RouteEntry<H>>,
    not_found: H,
}

impl<H> Router<H> {
    pub const fn builder() -> RouterBuilder<H> {
        RouterBuilder::new()
    }

    /// Find the best registered route for `method` and `path`
    pub fn resolve(&self, method: &Method, path: &str) -> Result<&RouteEntry<H>, RouteNotMatched> {
        self.exact
            .iter()
            .find(|e| e.method == *method && e.pattern.matches(path))
            .or_else(|| {
                self.wildcards
                    .iter()
                    .find(|e| e.method == *method && e.pattern.matches(path))
            })
            .ok_or_else(|| RouteNotMatched {
                method: method.clone(),
                path: path.to_string(),
            })
    }

    /// Handler to invoke for the request, falling back to the not-found handler
    pub fn dispatch(&self, method: &Method, path: &str) -> &H {
        self.resolve(method, path)
            .map_or(&self.not_found, |entry| &entry.handler)
    }

    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry<H>> {
        self.exact.iter().chain(self.wildcards.iter())
    }
}
