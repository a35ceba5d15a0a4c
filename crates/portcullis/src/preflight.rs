//! CORS preflight detection.

use crate::request::RequestMeta;

/// Header a preflight probe uses to announce the real request's method.
const CROSS_ORIGIN_REQUEST_METHOD: &str = "Cross-Origin-Request-Method";

/// Returns `true` for CORS preflight probes: an `OPTIONS` request carrying
/// both `Origin` and `Cross-Origin-Request-Method` headers.
///
/// A heuristic, not a CORS implementation — it exists solely so preflights
/// can be exempted from the credential check when so configured.
pub fn is_preflight(req: &dyn RequestMeta) -> bool {
    req.method().eq_ignore_ascii_case("OPTIONS")
        && req.header("Origin").is_some()
        && req.header(CROSS_ORIGIN_REQUEST_METHOD).is_some()
}
