//! Demo server: public and private routes behind basic auth.
//!
//! Run with `cargo run -p portcullis-axum --example protected`, then:
//!
//! ```text
//! curl http://127.0.0.1:3000/public
//! curl http://127.0.0.1:3000/private/123            # 401
//! curl -u admin:admin http://127.0.0.1:3000/private/realm
//! ```

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router, middleware};
use portcullis::{AuthEngine, AuthOptions, Credential, CredentialSource, ScopeSpec};
use portcullis_axum::{AuthRealms, basic_auth};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let engine = AuthEngine::new(
        AuthOptions::new()
            .with_credentials(CredentialSource::List(vec![Credential::new(
                "admin", "admin",
            )]))
            .with_scope(ScopeSpec::prefix("/private"))
            .with_realm("Private Area")
            .skip_preflight(true),
    )
    .expect("invalid auth configuration");

    let app = Router::new()
        // out of scope path
        .route("/public", get(|| async { "public" }))
        // pathname matches scope
        .route(
            "/private/123",
            get(|| async { "private by pathname prefix" }).options(|| async {
                "public for CORS preflight requests"
            }),
        )
        // realm readback within a handler, returns "Private Area"
        .route("/private/realm", get(realm))
        .layer(middleware::from_fn_with_state(Arc::new(engine), basic_auth));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("failed to bind");
    tracing::info!("listening on http://127.0.0.1:3000");
    axum::serve(listener, app).await.expect("server error");
}

async fn realm(realms: Option<Extension<AuthRealms>>) -> String {
    realms
        .and_then(|Extension(realms)| realms.current().map(str::to_owned))
        .unwrap_or_default()
}
