//! Portcullis Axum — HTTP transport adapter for the Portcullis engine.
//!
//! Maps [`portcullis::Decision`] values onto axum responses:
//! - `NotApplicable` and `Authenticated` run the inner service
//!   (`Authenticated` first publishes the realm, see [`AuthRealms`]),
//! - `Challenge` short-circuits with the configured status, the message as
//!   the body, and a `WWW-Authenticate: Basic realm="…"` header.
//!
//! Mount one middleware per auth zone; each carries its own engine and only
//! ever answers for its own scope and realm.

pub mod middleware;
pub mod realm;

pub use middleware::basic_auth;
pub use realm::AuthRealms;
