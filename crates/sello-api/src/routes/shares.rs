//! # Share API
//!
//! Holder-side token management: issue, audit, revoke.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use sello_core::{ProofId, Timestamp};
use sello_gateway::{issue_share, revoke_share, shares_for_proof};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::ShareView;
use crate::state::AppState;

/// Request to issue a share token.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ShareRequest {
    /// The anchored proof id to bind the token to.
    pub proof_id: String,
}

impl Validate for ShareRequest {
    fn validate(&self) -> Result<(), String> {
        if self.proof_id.trim().is_empty() {
            return Err("proof_id must not be empty".to_string());
        }
        Ok(())
    }
}

/// Build the shares router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/shares", post(issue))
        .route("/v1/proofs/:id/shares", get(list))
        .route("/v1/shares/:token", delete(revoke))
}

/// POST /v1/shares — issue a new token for a proof.
#[utoipa::path(
    post,
    path = "/v1/shares",
    request_body = ShareRequest,
    responses(
        (status = 201, description = "Token issued", body = ShareView),
        (status = 404, description = "Proof not found"),
    ),
    tag = "shares"
)]
pub(crate) async fn issue(
    State(state): State<AppState>,
    body: Result<Json<ShareRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShareView>), AppError> {
    let req = extract_validated_json(body)?;
    let proof_id = ProofId::from_hex(&req.proof_id)?;

    let record = issue_share(&*state.store, proof_id, Timestamp::now(), &state.issue).await?;
    Ok((
        StatusCode::CREATED,
        Json(ShareView::render(&record, &state.share_base_url)),
    ))
}

/// GET /v1/proofs/{id}/shares — every live token for a proof.
#[utoipa::path(
    get,
    path = "/v1/proofs/{id}/shares",
    params(("id" = String, Path, description = "0x-prefixed 32-byte proof id")),
    responses(
        (status = 200, description = "Issued tokens", body = [ShareView]),
    ),
    tag = "shares"
)]
pub(crate) async fn list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ShareView>>, AppError> {
    let id = ProofId::from_hex(&id)?;
    let records = shares_for_proof(&*state.store, id).await?;
    Ok(Json(
        records
            .iter()
            .map(|r| ShareView::render(r, &state.share_base_url))
            .collect(),
    ))
}

/// DELETE /v1/shares/{token} — revoke one issued token.
#[utoipa::path(
    delete,
    path = "/v1/shares/{token}",
    params(("token" = String, Path, description = "The issued share token")),
    responses(
        (status = 204, description = "Token deleted"),
        (status = 404, description = "Token not found"),
    ),
    tag = "shares"
)]
pub(crate) async fn revoke(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, AppError> {
    if revoke_share(&*state.store, &token).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("share token not found".to_string()))
    }
}
