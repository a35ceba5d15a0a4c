//! Per-request realm publication.

use std::sync::Arc;

/// Realms published on a request by the engine instances that accepted it.
///
/// Each engine instance appends its own realm only when its own scope and
/// credentials matched, so independently-scoped auth zones on one pipeline
/// never overwrite each other. Handlers read it with
/// `Option<Extension<AuthRealms>>`; the extension is absent when no engine
/// authenticated the request.
#[derive(Debug, Clone, Default)]
pub struct AuthRealms {
    realms: Vec<Arc<str>>,
}

impl AuthRealms {
    /// The most recently published realm, if any.
    pub fn current(&self) -> Option<&str> {
        self.realms.last().map(|realm| &**realm)
    }

    /// All published realms, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.realms.iter().map(|realm| &**realm)
    }

    /// Whether the given realm authenticated this request.
    pub fn contains(&self, realm: &str) -> bool {
        self.realms.iter().any(|published| &**published == realm)
    }

    pub(crate) fn publish(&mut self, realm: &str) {
        self.realms.push(Arc::from(realm));
    }
}
