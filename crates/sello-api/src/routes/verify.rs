//! # Verifier Portal
//!
//! Path B: third parties resolve a share token (or full share URL) into
//! bands, outcome, and validity — without holder authentication and
//! without any personal data.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sello_core::{Acceptability, Timestamp};
use sello_gateway::{verify_by_token, OnChainValidity};

use crate::error::AppError;
use crate::routes::{ProofView, ShareView};
use crate::state::AppState;

/// Path B verification response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    pub proof: ProofView,
    pub share: ShareView,
    /// `valid`, `revoked`, or `unknown` (ledger unreachable — on-chain
    /// verification pending).
    pub on_chain: String,
    /// `acceptable`, `revoked`, or `expired`.
    pub acceptability: String,
}

/// Build the verifier router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/verify/:token", get(verify_token))
}

/// GET /v1/verify/{token} — resolve a share token.
#[utoipa::path(
    get,
    path = "/v1/verify/{token}",
    params(("token" = String, Path, description = "Share token or full share URL")),
    responses(
        (status = 200, description = "Verification report", body = VerificationResponse),
        (status = 404, description = "Token or proof not found"),
        (status = 410, description = "Token expired"),
    ),
    tag = "verify"
)]
pub(crate) async fn verify_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<VerificationResponse>, AppError> {
    let now = Timestamp::now();
    let report = verify_by_token(&*state.ledger, &*state.store, &token, now).await?;

    let on_chain = match report.on_chain {
        OnChainValidity::Valid => "valid",
        OnChainValidity::Revoked => "revoked",
        OnChainValidity::Unknown => "unknown",
    };
    let acceptability = match report.acceptability(now) {
        Acceptability::Acceptable => "acceptable",
        Acceptability::Revoked => "revoked",
        Acceptability::Expired => "expired",
    };

    Ok(Json(VerificationResponse {
        proof: (&report.proof).into(),
        share: ShareView::render(&report.share, &state.share_base_url),
        on_chain: on_chain.to_string(),
        acceptability: acceptability.to_string(),
    }))
}
