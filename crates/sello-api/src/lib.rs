//! # sello-api — HTTP Services for the Sello Stack
//!
//! Verifier portal and share service over the sealed-proof protocol.
//!
//! ## API Surface
//!
//! | Prefix                  | Module              | Domain                     |
//! |-------------------------|---------------------|----------------------------|
//! | `POST /v1/proofs`       | [`routes::proofs`]  | Demo generation + anchoring |
//! | `GET /v1/proofs/{id}`   | [`routes::proofs`]  | Path A verification        |
//! | `POST /v1/proofs/{id}/revoke` | [`routes::proofs`] | Revocation          |
//! | `/v1/shares/*`          | [`routes::shares`]  | Token issue/audit/revoke   |
//! | `GET /v1/verify/{token}`| [`routes::verify`]  | Path B verification        |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! `/health` and `/metrics` sit outside the metrics middleware. The
//! OpenAPI 3 spec is generated via utoipa at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::{metrics_handler, track};
use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::proofs::router())
        .merge(routes::shares::router())
        .merge(routes::verify::router())
        .layer(from_fn_with_state(state.clone(), track))
        // 256 KiB is generous for every body this API accepts.
        .layer(DefaultBodyLimit::max(256 * 1024));

    Router::new()
        .merge(api)
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/openapi.json", get(openapi::serve))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sello_core::{ChainId, WalletAddress};
    use tower::ServiceExt;
    use url::Url;

    fn test_state() -> AppState {
        AppState::new(
            ChainId::new(534_351),
            WalletAddress::new(format!("0x{:040x}", 0xad)).unwrap(),
            Url::parse("https://app.sello.dev/").unwrap(),
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn generate_then_verify_path_a_over_http() {
        let app = app(test_state());
        let owner = format!("0x{:040x}", 0x11);

        let response = app
            .clone()
            .oneshot(
                Request::post("/v1/proofs")
                    .header("content-type", "application/json")
                    .body(Body::from(format!("{{\"owner\":\"{owner}\"}}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["mirrored"].as_bool().unwrap());
        let proof_id = body["proof"]["proof_id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::get(format!("/v1/proofs/{proof_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["summary"]["valid"].as_bool().unwrap());
        assert_eq!(body["summary"]["owner"].as_str().unwrap(), owner);
    }

    #[tokio::test]
    async fn generate_on_wrong_chain_conflicts() {
        let response = app(test_state())
            .oneshot(
                Request::post("/v1/proofs")
                    .header("content-type", "application/json")
                    .body(Body::from(format!(
                        "{{\"owner\":\"0x{:040x}\",\"chain_id\":1}}",
                        0x11
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn share_then_verify_path_b_over_http() {
        let app = app(test_state());
        let owner = format!("0x{:040x}", 0x22);

        let response = app
            .clone()
            .oneshot(
                Request::post("/v1/proofs")
                    .header("content-type", "application/json")
                    .body(Body::from(format!("{{\"owner\":\"{owner}\"}}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        let proof_id = body_json(response).await["proof"]["proof_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::post("/v1/shares")
                    .header("content-type", "application/json")
                    .body(Body::from(format!("{{\"proof_id\":\"{proof_id}\"}}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let share = body_json(response).await;
        let token = share["token"].as_str().unwrap().to_string();
        assert!(share["url"].as_str().unwrap().contains("/verify/"));

        let response = app
            .oneshot(
                Request::get(format!("/v1/verify/{token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["on_chain"].as_str().unwrap(), "valid");
        assert_eq!(body["acceptability"].as_str().unwrap(), "acceptable");
    }

    #[tokio::test]
    async fn unknown_token_is_404_with_code() {
        let response = app(test_state())
            .oneshot(
                Request::get("/v1/verify/proof_doesnotexist123456")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"].as_str().unwrap(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn revoked_proof_maps_to_410() {
        let app = app(test_state());
        let owner = format!("0x{:040x}", 0x33);

        let response = app
            .clone()
            .oneshot(
                Request::post("/v1/proofs")
                    .header("content-type", "application/json")
                    .body(Body::from(format!("{{\"owner\":\"{owner}\"}}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        let proof_id = body_json(response).await["proof"]["proof_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::post(format!("/v1/proofs/{proof_id}/revoke"))
                    .header("content-type", "application/json")
                    .body(Body::from(format!("{{\"caller\":\"{owner}\"}}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::get(format!("/v1/proofs/{proof_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GONE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"].as_str().unwrap(), "PROOF_REVOKED");
    }
}
