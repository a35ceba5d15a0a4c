//! Request abstraction consumed by the engine.
//!
//! Keeps the core crate free of any web framework: adapters implement
//! [`RequestMeta`] over their native request type. An impl for
//! `http::Request` ships behind the `http` feature.

use std::collections::HashMap;

/// Minimal view of an HTTP request: method, path, and header lookup.
pub trait RequestMeta {
    /// Request method, e.g. `GET` or `OPTIONS`.
    fn method(&self) -> &str;

    /// URL path component, starting with `/`.
    fn path(&self) -> &str;

    /// Header value by case-insensitive name, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;
}

#[cfg(feature = "http")]
impl<B> RequestMeta for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }
}

/// Owned [`RequestMeta`] implementation for tests and non-framework hosts.
#[derive(Debug, Clone)]
pub struct SimpleRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
}

impl SimpleRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: HashMap::new(),
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }
}

impl RequestMeta for SimpleRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = SimpleRequest::get("/x").with_header("Authorization", "Basic abc");
        assert_eq!(req.header("authorization"), Some("Basic abc"));
        assert_eq!(req.header("AUTHORIZATION"), Some("Basic abc"));
        assert_eq!(req.header("X-Other"), None);
    }
}
