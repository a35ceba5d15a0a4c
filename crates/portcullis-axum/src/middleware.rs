//! Basic-auth middleware over [`portcullis::AuthEngine`].

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use portcullis::{AuthEngine, Challenge, Decision};

use crate::realm::AuthRealms;

/// Gates requests through the given engine.
///
/// Mount with [`axum::middleware::from_fn_with_state`], one layer per auth
/// zone:
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{Router, middleware, routing::get};
/// use portcullis::{AuthEngine, AuthOptions, Credential, CredentialSource};
/// use portcullis_axum::basic_auth;
///
/// let engine = AuthEngine::new(
///     AuthOptions::new().with_credentials(CredentialSource::List(vec![
///         Credential::new("admin", "admin"),
///     ])),
/// )
/// .expect("invalid auth configuration");
///
/// let app: Router = Router::new()
///     .route("/private", get(|| async { "private" }))
///     .layer(middleware::from_fn_with_state(Arc::new(engine), basic_auth));
/// ```
pub async fn basic_auth(
    State(engine): State<Arc<AuthEngine>>,
    mut req: Request,
    next: Next,
) -> Response {
    match engine.evaluate(&req) {
        Decision::NotApplicable => next.run(req).await,
        Decision::Authenticated { realm } => {
            publish_realm(&mut req, &realm);
            next.run(req).await
        }
        Decision::Challenge(challenge) => challenge_response(&challenge),
    }
}

/// Appends the realm to the request's [`AuthRealms`] extension, creating it
/// on first publication.
fn publish_realm(req: &mut Request, realm: &str) {
    if let Some(realms) = req.extensions_mut().get_mut::<AuthRealms>() {
        realms.publish(realm);
    } else {
        let mut realms = AuthRealms::default();
        realms.publish(realm);
        req.extensions_mut().insert(realms);
    }
}

fn challenge_response(challenge: &Challenge) -> Response {
    let status = StatusCode::from_u16(challenge.status).unwrap_or_else(|_| {
        tracing::warn!(
            status = challenge.status,
            "configured unauthorized status is not a valid HTTP status, using 401"
        );
        StatusCode::UNAUTHORIZED
    });
    let www_authenticate = HeaderValue::from_str(&challenge.www_authenticate())
        .unwrap_or_else(|_| HeaderValue::from_static("Basic"));

    (
        status,
        [(header::WWW_AUTHENTICATE, www_authenticate)],
        challenge.message.clone(),
    )
        .into_response()
}
