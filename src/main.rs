#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;

mod helpers;
mod http_api;
mod admin_api;

use std::time::Duration;

use axum::http::{header, Method};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;

use helpers::*;

pub fn app(max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .merge(http_api::routes())
        .merge(admin_api::routes())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    info!("Starting.");
    check_env_vars();

    let run_migrations = *RUN_MIGRATIONS;
    let has_admins = tokio::task::spawn_blocking(move || -> lashon_backend::Result<bool> {
            let conn = POOL.get()?;
            lashon_backend::check_db(&conn, run_migrations)
        })
        .await
        .expect("The database check panicked!")
        .expect("Something funny with the DB!");
    info!("Database OK.");
    if !has_admins {
        warn!("Nobody is in the admins group. Add somebody with `user grant <name> admins`.");
    }

    let listener = TcpListener::bind(*SERVER_BINDING).await
        .expect("Can't bind the server address!");
    info!("Ready. Running on {}", *SERVER_BINDING);

    axum::serve(listener, app(*MAX_BODY_BYTES))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error!");

    info!("Server shut down.");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(req: Request<Body>) -> (StatusCode, Value) {
        let resp = app(1024).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_session() {
        let (status, body) = call(get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() {
        let (status, body) = call(get("/api/stats")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not logged in.");

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/admin/vocab/sets/3")
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_token_is_unauthorized() {
        let req = Request::builder()
            .uri("/api/progress")
            .header(header::COOKIE, "session_id=not-a-token")
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn undecodable_body_is_bad_request() {
        let (status, body) = call(post_json("/api/vocab/card-result", "{\"word_id\": \"seven\"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn session_is_checked_before_input_values() {
        let requests = vec![
            post_json("/api/xp/add", "{\"amount\": 5000}"),
            get("/api/vocab/search?q=shalom&limit=0"),
            get("/api/study-sessions?limit=1000"),
            get("/api/strongs/G2316"),
            post_json("/api/progress/bulk-update", "{\"updates\": []}"),
            post_json("/api/study-sessions", "{\"kind\": \"gaming\", \"duration_seconds\": -1}"),
            post_json("/api/admin/vocab/sets", "{\"name\": \"\", \"words\": []}"),
        ];
        for req in requests {
            let uri = req.uri().to_string();
            let (status, body) = call(req).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
            assert_eq!(body["error"], "Not logged in.", "{}", uri);
        }
    }

    #[tokio::test]
    async fn unparseable_path_is_bad_request() {
        let (status, body) = call(get("/api/vocab/sets/genesis")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_answers_in_json() {
        let (status, body) = call(get("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No such resource.");

        let (status, body) = call(get("/api/logout")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let body = format!("{{\"name\": \"{}\"}}", "x".repeat(2048));
        let req = Request::builder()
            .method("POST")
            .uri("/api/admin/vocab/sets")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"].is_string());
    }
}
