//! # Proof API
//!
//! Demo generation, direct (Path A) verification by proof id, and
//! revocation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sello_core::{ChainId, ProofId, Timestamp, WalletAddress};
use sello_gateway::verify_by_proof_id;
use sello_ledger::{CreditLedger, LedgerError, MockWallet};
use sello_proof::{MirrorStatus, ProofGenerator};
use sello_store::ProofStore;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::{LedgerProofView, ProofView};
use crate::state::AppState;

/// Request to generate and anchor a proof for a holder.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// The holder's wallet address.
    pub owner: String,
    /// Chain the holder's wallet is connected to. Defaults to the
    /// ledger's chain.
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl Validate for GenerateRequest {
    fn validate(&self) -> Result<(), String> {
        if self.owner.trim().is_empty() {
            return Err("owner must not be empty".to_string());
        }
        Ok(())
    }
}

/// Response to a successful generation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub proof: ProofView,
    /// False when the anchor succeeded but the off-chain mirror write
    /// failed; sharing is degraded until re-mirrored.
    pub mirrored: bool,
}

/// Request to revoke a proof.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RevokeRequest {
    /// The caller claiming authority; must be the owner or admin.
    pub caller: String,
}

impl Validate for RevokeRequest {
    fn validate(&self) -> Result<(), String> {
        if self.caller.trim().is_empty() {
            return Err("caller must not be empty".to_string());
        }
        Ok(())
    }
}

/// Path A verification response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PathAResponse {
    pub summary: LedgerProofView,
    /// Informational expiry from the off-chain mirror, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Build the proofs router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/proofs", post(generate_proof))
        .route("/v1/proofs/:id", get(get_proof))
        .route("/v1/proofs/:id/revoke", post(revoke_proof))
}

/// POST /v1/proofs — generate, anchor, and mirror a sealed proof.
#[utoipa::path(
    post,
    path = "/v1/proofs",
    request_body = GenerateRequest,
    responses(
        (status = 201, description = "Proof anchored", body = GenerateResponse),
        (status = 401, description = "No wallet connected"),
        (status = 409, description = "Wrong chain or proof id collision"),
    ),
    tag = "proofs"
)]
pub(crate) async fn generate_proof(
    State(state): State<AppState>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let owner = WalletAddress::new(req.owner)?;
    let chain = req
        .chain_id
        .map(ChainId::new)
        .unwrap_or_else(|| state.ledger.chain_id());
    let wallet = MockWallet::connected(owner, chain);

    let generated = ProofGenerator::new(&wallet, &*state.oracle, &*state.ledger, &*state.store)
        .with_config(state.generator.clone())
        .generate()
        .await?;

    let mirrored = matches!(generated.mirror, MirrorStatus::Stored);
    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            proof: (&generated.record).into(),
            mirrored,
        }),
    ))
}

/// GET /v1/proofs/{id} — Path A: resolve a proof id against the ledger.
#[utoipa::path(
    get,
    path = "/v1/proofs/{id}",
    params(("id" = String, Path, description = "0x-prefixed 32-byte proof id")),
    responses(
        (status = 200, description = "Proof summary", body = PathAResponse),
        (status = 404, description = "Proof not found"),
        (status = 410, description = "Proof revoked or expired"),
    ),
    tag = "proofs"
)]
pub(crate) async fn get_proof(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PathAResponse>, AppError> {
    let id = ProofId::from_hex(&id)?;
    let report =
        verify_by_proof_id(&*state.ledger, &*state.store, id, Timestamp::now()).await?;
    Ok(Json(PathAResponse {
        summary: (&report.summary).into(),
        expires_at: report.expires_at.map(|t| t.to_string()),
    }))
}

/// POST /v1/proofs/{id}/revoke — revoke on the ledger and mirror.
#[utoipa::path(
    post,
    path = "/v1/proofs/{id}/revoke",
    params(("id" = String, Path, description = "0x-prefixed 32-byte proof id")),
    request_body = RevokeRequest,
    responses(
        (status = 204, description = "Proof revoked"),
        (status = 403, description = "Caller is not the owner or admin"),
        (status = 404, description = "Proof not found"),
    ),
    tag = "proofs"
)]
pub(crate) async fn revoke_proof(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RevokeRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = extract_validated_json(body)?;
    let id = ProofId::from_hex(&id)?;
    let caller = WalletAddress::new(req.caller)?;

    state.ledger.revoke_proof(&caller, id).await.map_err(ledger_error)?;

    // Mirror the flag; the ledger is already authoritative if this fails.
    if let Err(e) = state.store.revoke_proof(id, &caller).await {
        tracing::warn!(proof_id = %id, error = %e, "mirror revocation failed");
    }
    Ok(StatusCode::NO_CONTENT)
}

fn ledger_error(err: LedgerError) -> AppError {
    match &err {
        LedgerError::NotFound { .. } => AppError::NotFound(err.to_string()),
        LedgerError::NotAuthorized { .. } => AppError::Forbidden(err.to_string()),
        LedgerError::DuplicateId { .. } => AppError::Conflict(err.to_string()),
        LedgerError::WrongLedgerContext { .. } => AppError::Conflict(err.to_string()),
        LedgerError::Unavailable(_) => AppError::Unavailable(err.to_string()),
    }
}
