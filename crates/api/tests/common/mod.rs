#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use argon2::Params;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use faker_auth::{AuthConfig, AuthCoordinator, AuthDeps, JwtConfig};
use faker_cache::{EphemeralStore, MemoryStore};
use faker_test_support::{MemoryDirectory, RecordingNotifier, StaticPlanCatalog};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use faker_api::config::ServerConfig;
use faker_api::middleware::auth::API_KEY_HEADER;
use faker_api::routes;
use faker_api::state::{AppState, HealthProbe};

pub const PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig {
            secret: "api-test-secret-long-enough".to_string(),
            access_token_ttl: Duration::from_secs(900),
            refresh_token_ttl: Duration::from_secs(30 * 24 * 3600),
        },
        verification_code_ttl: Duration::from_secs(600),
        password_params: Params::new(8, 1, 1, None).unwrap(),
    }
}

/// Health probe with fixed answers.
pub struct StaticProbe {
    pub database: bool,
    pub store: bool,
}

#[async_trait]
impl HealthProbe for StaticProbe {
    async fn database_healthy(&self) -> bool {
        self.database
    }

    async fn ephemeral_store_healthy(&self) -> bool {
        self.store
    }
}

/// The application router plus handles on its in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub directory: Arc<MemoryDirectory>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn build_test_app() -> TestApp {
    build_test_app_with(0, 0, Arc::new(MemoryStore::new()), healthy())
}

pub fn build_test_app_with_limits(internal: i64, external: i64) -> TestApp {
    build_test_app_with(internal, external, Arc::new(MemoryStore::new()), healthy())
}

pub fn healthy() -> StaticProbe {
    StaticProbe {
        database: true,
        store: true,
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app_with(
    internal: i64,
    external: i64,
    ephemeral: Arc<dyn EphemeralStore>,
    probe: StaticProbe,
) -> TestApp {
    let directory = Arc::new(MemoryDirectory::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let coordinator = AuthCoordinator::new(
        AuthDeps {
            users: directory.clone(),
            sessions: directory.clone(),
            plans: Arc::new(StaticPlanCatalog::with_basic_limits(internal, external)),
            notifier: notifier.clone(),
            ephemeral,
        },
        &auth_config(),
    );

    let state = AppState {
        coordinator: Arc::new(coordinator),
        health: Arc::new(probe),
    };

    let config = test_config();
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .map(|o| o.parse().unwrap())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    TestApp {
        router,
        directory,
        notifier,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &TestApp, request: Request<Body>) -> Response {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &TestApp, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_api_key(app: &TestApp, uri: &str, key: &str) -> Response {
    let request = Request::get(uri)
        .header(API_KEY_HEADER, key)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(
    app: &TestApp,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    json_request(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(
    app: &TestApp,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    json_request(app, Method::PUT, uri, Some(token), body).await
}

pub async fn patch_json_auth(
    app: &TestApp,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    json_request(app, Method::PATCH, uri, Some(token), body).await
}

async fn json_request(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// The eight-digit code on its own line in the latest email to `email`.
pub fn last_code_sent_to(app: &TestApp, email: &str) -> String {
    let mail = app
        .notifier
        .last_to(email)
        .unwrap_or_else(|| panic!("no email sent to {email}"));
    mail.body
        .lines()
        .map(str::trim)
        .find(|line| line.len() == 8 && line.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or_else(|| panic!("no code in email body: {}", mail.body))
        .to_string()
}

/// Sign up and confirm `email` over HTTP.
pub async fn register_confirmed(app: &TestApp, email: &str) {
    let body = serde_json::json!({
        "first_name": "ada",
        "last_name": "lovelace",
        "email": email,
        "password": PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/sign-up", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let code = last_code_sent_to(app, email);
    let body = serde_json::json!({ "email": email, "code": code });
    let response = post_json(app, "/api/v1/auth/confirm-email", body).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// Sign in over HTTP and return the response body.
pub async fn sign_in(app: &TestApp, email: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": PASSWORD });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Register, confirm and sign in; returns the sign-in body.
pub async fn signed_in(app: &TestApp, email: &str) -> serde_json::Value {
    register_confirmed(app, email).await;
    sign_in(app, email).await
}

pub fn access_token(sign_in_body: &serde_json::Value) -> String {
    sign_in_body["tokens"]["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}
