//! Request scope: which requests fall under an engine's jurisdiction.
//!
//! The spec shapes are a closed enum, so an unrecognized shape is
//! unrepresentable and the per-request check is a plain match — no runtime
//! type inspection.

use std::fmt;
use std::sync::Arc;

use crate::request::RequestMeta;

/// Custom scope predicate. Captures any host context it needs.
pub type ScopeFn = Arc<dyn Fn(&dyn RequestMeta) -> bool + Send + Sync>;

/// Scope specification, fixed at engine construction.
#[derive(Clone)]
pub enum ScopeSpec {
    /// In scope iff the request path starts with the prefix.
    Prefix(String),
    /// In scope iff the path starts with any of the prefixes.
    Prefixes(Vec<String>),
    /// Delegates entirely to the closure.
    Predicate(ScopeFn),
}

impl Default for ScopeSpec {
    /// The entire request space.
    fn default() -> Self {
        Self::Prefix("/".to_owned())
    }
}

impl ScopeSpec {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    pub fn prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Prefixes(prefixes.into_iter().map(Into::into).collect())
    }

    pub fn predicate(f: impl Fn(&dyn RequestMeta) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// The uniform in-scope check.
    pub fn matches(&self, req: &dyn RequestMeta) -> bool {
        match self {
            Self::Prefix(prefix) => req.path().starts_with(prefix.as_str()),
            Self::Prefixes(prefixes) => prefixes
                .iter()
                .any(|prefix| req.path().starts_with(prefix.as_str())),
            Self::Predicate(in_scope) => in_scope(req),
        }
    }
}

impl fmt::Debug for ScopeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            Self::Prefixes(prefixes) => f.debug_tuple("Prefixes").field(prefixes).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
