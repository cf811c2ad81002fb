//! Health-check web server for external uptime monitors.

use crate::i18n::BotStrings;
use axum::{response::Html, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the router serving `/` and `/health`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

/// Serve the health endpoints on `0.0.0.0:{port}` until the process exits.
///
/// Bind and serve errors are logged; the bot keeps running without the
/// health server.
pub async fn serve(port: u16) {
    let addr = format!("0.0.0.0:{}", port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Health server failed to bind to {}: {}", addr, e);
            return;
        }
    };

    info!("🌐 Health server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router()).await {
        error!("Health server error: {}", e);
    }
}

async fn home() -> Html<&'static str> {
    Html(BotStrings::get().health_page_html)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "bot": "running",
        "message": BotStrings::get().health_message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_returns_ok_json() {
        let (status, body) = get_body("/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["bot"], "running");
        assert_eq!(json["message"], "Bot ishlayapti ✅");
    }

    #[tokio::test]
    async fn test_home_returns_html_page() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Telegram Translation Bot</title>"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, _) = get_body("/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_is_get_only() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_serve_on_real_socket() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        tokio::spawn(serve(port));

        let url = format!("http://127.0.0.1:{}/health", port);
        let mut last_err = None;
        for _ in 0..50 {
            match reqwest::get(&url).await {
                Ok(response) => {
                    assert!(response.status().is_success());
                    return;
                }
                Err(e) => last_err = Some(e),
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("health server never came up: {:?}", last_err);
    }
}
