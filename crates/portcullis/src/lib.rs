//! Portcullis — framework-independent HTTP Basic Authentication (RFC 7617).
//!
//! This crate contains all transport-agnostic gating logic: credential
//! loading and lookup, timing-safe verification, header decoding, scope and
//! preflight policy, and the resulting three-way per-request [`Decision`].
//!
//! Transport adapters (`portcullis-axum`) depend on this crate and map
//! `Decision` values onto their framework's responses.
//!
//! **Zero web-framework dependencies** — no axum, no tower, no wire code.

pub mod compare;
pub mod credentials;
pub mod error;
pub mod header;
pub mod preflight;
pub mod request;
pub mod scope;

pub use credentials::{Credential, CredentialSource, CredentialStore};
pub use error::ConfigError;
pub use request::{RequestMeta, SimpleRequest};
pub use scope::{ScopeFn, ScopeSpec};

/// Engine configuration, read-only for the engine's lifetime.
#[derive(Debug, Clone)]
pub struct AuthOptions {
    /// Header inspected for credentials.
    pub header: String,
    /// Realm echoed in challenges and published on success.
    pub realm: String,
    /// Status code for challenge responses.
    pub unauthorized_status: u16,
    /// Body for challenge responses.
    pub unauthorized_message: String,
    /// Which requests are subject to the check.
    pub scope: ScopeSpec,
    /// Let CORS preflight probes through without credentials.
    pub skip_preflight: bool,
    /// Master switch; a disabled engine never gates anything.
    pub enabled: bool,
    /// Where the credential set comes from.
    pub credentials: CredentialSource,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            header: "Authorization".to_owned(),
            realm: "Secure Area".to_owned(),
            unauthorized_status: 401,
            unauthorized_message: "Unauthorized".to_owned(),
            scope: ScopeSpec::default(),
            skip_preflight: false,
            enabled: true,
            credentials: CredentialSource::default(),
        }
    }
}

impl AuthOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, source: CredentialSource) -> Self {
        self.credentials = source;
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    pub fn with_unauthorized_status(mut self, status: u16) -> Self {
        self.unauthorized_status = status;
        self
    }

    pub fn with_unauthorized_message(mut self, message: impl Into<String>) -> Self {
        self.unauthorized_message = message.into();
        self
    }

    pub fn with_scope(mut self, scope: ScopeSpec) -> Self {
        self.scope = scope;
        self
    }

    pub fn skip_preflight(mut self, skip: bool) -> Self {
        self.skip_preflight = skip;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Challenge payload: what the host must send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub realm: String,
    pub message: String,
    pub status: u16,
}

impl Challenge {
    /// `WWW-Authenticate` header value for this challenge.
    pub fn www_authenticate(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

/// Outcome of evaluating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Disabled engine, out-of-scope request, or bypassed preflight.
    /// The host passes the request on; no side effects.
    NotApplicable,
    /// Valid credentials. The host should publish the realm to downstream
    /// handlers and pass the request on.
    Authenticated { realm: String },
    /// Missing or invalid credentials. The host must respond with the
    /// challenge's status, message body, and `WWW-Authenticate` header.
    Challenge(Challenge),
}

/// The request-gating engine: orchestrates store, scope, preflight policy
/// and timing-safe verification into a single [`evaluate`](Self::evaluate)
/// call.
///
/// Immutable after construction — share one instance across any number of
/// concurrent requests without locking (adapters typically wrap it in an
/// `Arc`).
#[derive(Clone)]
pub struct AuthEngine {
    options: AuthOptions,
    store: CredentialStore,
}

impl AuthEngine {
    /// Builds an engine, loading credentials from the configured source.
    ///
    /// Fails fast: an unreadable credential file aborts construction so a
    /// misconfigured engine never serves a request.
    pub fn new(options: AuthOptions) -> Result<Self, ConfigError> {
        let store = CredentialStore::load(&options.credentials)?;
        tracing::debug!(
            realm = %options.realm,
            credentials = store.len(),
            enabled = options.enabled,
            "auth engine initialized"
        );
        Ok(Self { options, store })
    }

    /// The realm this engine guards.
    pub fn realm(&self) -> &str {
        &self.options.realm
    }

    /// Evaluates one request: synchronous, no I/O, no side effects.
    ///
    /// All failure causes (missing header, wrong scheme, malformed token,
    /// unknown user, wrong password) collapse into one uniform
    /// [`Decision::Challenge`] so the response discloses nothing about why
    /// authentication failed.
    pub fn evaluate(&self, req: &dyn RequestMeta) -> Decision {
        if !self.options.enabled {
            return Decision::NotApplicable;
        }
        if !self.options.scope.matches(req) {
            return Decision::NotApplicable;
        }
        if self.options.skip_preflight && preflight::is_preflight(req) {
            tracing::debug!(path = req.path(), "preflight probe exempt from auth");
            return Decision::NotApplicable;
        }

        let Some(value) = self.basic_header(req) else {
            tracing::warn!(
                path = req.path(),
                realm = %self.options.realm,
                "missing or non-basic authorization header"
            );
            return self.challenge();
        };

        let supplied = header::decode(value);
        if self.verify(&supplied) {
            tracing::debug!(
                path = req.path(),
                realm = %self.options.realm,
                username = %supplied.username,
                "authenticated"
            );
            Decision::Authenticated {
                realm: self.options.realm.clone(),
            }
        } else {
            tracing::warn!(
                path = req.path(),
                realm = %self.options.realm,
                "invalid credentials"
            );
            self.challenge()
        }
    }

    /// The configured header's value, if present with a `Basic` scheme.
    ///
    /// `get(..6)` rather than slicing: a multibyte value whose sixth byte
    /// is not a char boundary is simply not `basic `.
    fn basic_header<'a>(&self, req: &'a dyn RequestMeta) -> Option<&'a str> {
        let value = req.header(&self.options.header)?;
        value
            .get(..6)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("basic "))
            .then_some(value)
    }

    /// Timing-uniform verification: both comparisons always run, with
    /// empty-string references when the username lookup misses, so
    /// unknown-user and wrong-password failures share a timing profile.
    fn verify(&self, supplied: &Credential) -> bool {
        let reference = self.store.find(&supplied.username);
        let (ref_username, ref_password) =
            reference.map_or(("", ""), |c| (c.username.as_str(), c.password.as_str()));

        let mut valid = !supplied.username.is_empty() && !supplied.password.is_empty();
        valid &= compare::timing_safe_eq(supplied.username.as_bytes(), ref_username.as_bytes());
        valid &= compare::timing_safe_eq(supplied.password.as_bytes(), ref_password.as_bytes());
        valid
    }

    fn challenge(&self) -> Decision {
        Decision::Challenge(Challenge {
            realm: self.options.realm.clone(),
            message: self.options.unauthorized_message.clone(),
            status: self.options.unauthorized_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_options() -> AuthOptions {
        AuthOptions::new()
            .with_credentials(CredentialSource::List(vec![Credential::new(
                "admin", "admin",
            )]))
    }

    fn admin_engine() -> AuthEngine {
        AuthEngine::new(admin_options()).unwrap()
    }

    fn authorized(path: &str) -> SimpleRequest {
        SimpleRequest::get(path).with_header("Authorization", header::encode("admin", "admin"))
    }

    #[test]
    fn valid_credentials_authenticate() {
        let decision = admin_engine().evaluate(&authorized("/private"));
        assert_eq!(
            decision,
            Decision::Authenticated {
                realm: "Secure Area".to_owned()
            }
        );
    }

    #[test]
    fn missing_header_challenges_with_defaults() {
        let decision = admin_engine().evaluate(&SimpleRequest::get("/private"));
        let Decision::Challenge(challenge) = decision else {
            panic!("expected a challenge");
        };
        assert_eq!(challenge.status, 401);
        assert_eq!(challenge.message, "Unauthorized");
        assert_eq!(challenge.realm, "Secure Area");
        assert_eq!(challenge.www_authenticate(), "Basic realm=\"Secure Area\"");
    }

    #[test]
    fn bearer_scheme_is_rejected() {
        let req = SimpleRequest::get("/private")
            .with_header("Authorization", "Bearer YWRtaW46YWRtaW4=");
        assert!(matches!(
            admin_engine().evaluate(&req),
            Decision::Challenge(_)
        ));
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        let token = header::encode("admin", "admin");
        let shouty = format!("BASIC {}", token.strip_prefix("Basic ").unwrap());
        let req = SimpleRequest::get("/private").with_header("Authorization", shouty);
        assert!(matches!(
            admin_engine().evaluate(&req),
            Decision::Authenticated { .. }
        ));
    }

    #[test]
    fn multibyte_header_value_never_panics() {
        let req = SimpleRequest::get("/private").with_header("Authorization", "aaaa€x");
        assert!(matches!(
            admin_engine().evaluate(&req),
            Decision::Challenge(_)
        ));
    }

    #[test]
    fn failure_causes_are_indistinguishable() {
        let engine = admin_engine();
        let wrong_password = SimpleRequest::get("/private")
            .with_header("Authorization", header::encode("admin", "nope"));
        let unknown_user = SimpleRequest::get("/private")
            .with_header("Authorization", header::encode("ghost", "admin"));
        let empty_username = SimpleRequest::get("/private")
            .with_header("Authorization", header::encode("", "admin"));
        let empty_password = SimpleRequest::get("/private")
            .with_header("Authorization", header::encode("admin", ""));
        let malformed = SimpleRequest::get("/private").with_header("Authorization", "Basic !!!");

        let outcomes: Vec<Decision> = [
            &wrong_password,
            &unknown_user,
            &empty_username,
            &empty_password,
            &malformed,
        ]
        .into_iter()
        .map(|req| engine.evaluate(req))
        .collect();

        for outcome in &outcomes {
            assert_eq!(outcome, &outcomes[0]);
            assert!(matches!(outcome, Decision::Challenge(_)));
        }
    }

    #[test]
    fn out_of_scope_is_not_applicable_regardless_of_headers() {
        let engine = AuthEngine::new(admin_options().with_scope(ScopeSpec::prefix("/private")))
            .unwrap();
        assert_eq!(
            engine.evaluate(&SimpleRequest::get("/public")),
            Decision::NotApplicable
        );
        let garbage = SimpleRequest::get("/public").with_header("Authorization", "Basic !!!");
        assert_eq!(engine.evaluate(&garbage), Decision::NotApplicable);
    }

    #[test]
    fn prefix_set_scope_gates_each_member() {
        let engine = AuthEngine::new(
            admin_options().with_scope(ScopeSpec::prefixes(["/private", "/admin"])),
        )
        .unwrap();
        assert!(matches!(
            engine.evaluate(&SimpleRequest::get("/private/x")),
            Decision::Challenge(_)
        ));
        assert!(matches!(
            engine.evaluate(&SimpleRequest::get("/admin")),
            Decision::Challenge(_)
        ));
        assert_eq!(
            engine.evaluate(&SimpleRequest::get("/public")),
            Decision::NotApplicable
        );
    }

    #[test]
    fn predicate_scope_delegates() {
        let engine = AuthEngine::new(
            admin_options().with_scope(ScopeSpec::predicate(|req| req.path().ends_with("1234"))),
        )
        .unwrap();
        assert!(matches!(
            engine.evaluate(&SimpleRequest::get("/private/1234")),
            Decision::Challenge(_)
        ));
        assert_eq!(
            engine.evaluate(&SimpleRequest::get("/private/5678")),
            Decision::NotApplicable
        );
    }

    #[test]
    fn disabled_engine_gates_nothing() {
        let engine = AuthEngine::new(admin_options().enabled(false)).unwrap();
        assert_eq!(
            engine.evaluate(&SimpleRequest::get("/private")),
            Decision::NotApplicable
        );
    }

    #[test]
    fn preflight_bypass_is_opt_in() {
        let preflight = SimpleRequest::new("OPTIONS", "/private")
            .with_header("Origin", "foreignhost")
            .with_header("Cross-Origin-Request-Method", "GET");

        let skipping = AuthEngine::new(admin_options().skip_preflight(true)).unwrap();
        assert_eq!(skipping.evaluate(&preflight), Decision::NotApplicable);

        // Default: preflights are challenged like anything else.
        assert!(matches!(
            admin_engine().evaluate(&preflight),
            Decision::Challenge(_)
        ));

        // A bare OPTIONS without the CORS headers is not a preflight.
        let bare_options = SimpleRequest::new("OPTIONS", "/private");
        assert!(matches!(
            skipping.evaluate(&bare_options),
            Decision::Challenge(_)
        ));
    }

    #[test]
    fn custom_header_status_and_message() {
        let engine = AuthEngine::new(
            admin_options()
                .with_header("Proxy-Authorization")
                .with_unauthorized_status(407)
                .with_unauthorized_message("Proxy Authentication Required"),
        )
        .unwrap();

        let Decision::Challenge(challenge) = engine.evaluate(&SimpleRequest::get("/x")) else {
            panic!("expected a challenge");
        };
        assert_eq!(challenge.status, 407);
        assert_eq!(challenge.message, "Proxy Authentication Required");

        let proxied = SimpleRequest::get("/x")
            .with_header("Proxy-Authorization", header::encode("admin", "admin"));
        assert!(matches!(
            engine.evaluate(&proxied),
            Decision::Authenticated { .. }
        ));

        // The default Authorization header is ignored by this engine.
        let wrong_slot = authorized("/x");
        assert!(matches!(
            engine.evaluate(&wrong_slot),
            Decision::Challenge(_)
        ));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let engine = admin_engine();
        let req = authorized("/private");
        assert_eq!(engine.evaluate(&req), engine.evaluate(&req));

        let anon = SimpleRequest::get("/private");
        assert_eq!(engine.evaluate(&anon), engine.evaluate(&anon));
    }

    #[test]
    fn disjoint_engines_do_not_cross_challenge() {
        let realm_a = AuthEngine::new(
            admin_options()
                .with_realm("Realm A")
                .with_scope(ScopeSpec::prefix("/private/a")),
        )
        .unwrap();
        let realm_b = AuthEngine::new(
            admin_options()
                .with_realm("Realm B")
                .with_scope(ScopeSpec::prefix("/private/b")),
        )
        .unwrap();

        let anon_a = SimpleRequest::get("/private/a");
        let Decision::Challenge(challenge) = realm_a.evaluate(&anon_a) else {
            panic!("expected a challenge from realm A");
        };
        assert_eq!(challenge.realm, "Realm A");
        assert_eq!(realm_b.evaluate(&anon_a), Decision::NotApplicable);
    }

    #[test]
    fn default_env_source_yields_engine_that_challenges_everyone() {
        let engine = AuthEngine::new(
            AuthOptions::new()
                .with_credentials(CredentialSource::Env("PORTCULLIS_TEST_NO_SUCH_VAR".into())),
        )
        .unwrap();
        assert!(matches!(
            engine.evaluate(&authorized("/private")),
            Decision::Challenge(_)
        ));
    }
}
