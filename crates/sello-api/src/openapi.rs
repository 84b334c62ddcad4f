//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use crate::routes;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sello API — Sealed Credit-Proof Stack",
        version = "0.3.2",
        description = "Verifier portal and share service over the sealed-proof protocol.\n\nProvides:\n- **Demo generation**: anchor a commitment and mirror the record\n- **Path A verification**: direct ledger lookup by proof id\n- **Path B verification**: share-token lookup with best-effort on-chain cross-check\n- **Share management**: issue, audit, and revoke capability tokens",
        license(name = "BUSL-1.1")
    ),
    paths(
        routes::proofs::generate_proof,
        routes::proofs::get_proof,
        routes::proofs::revoke_proof,
        routes::shares::issue,
        routes::shares::list,
        routes::shares::revoke,
        routes::verify::verify_token,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        routes::FactorsView,
        routes::ProofView,
        routes::LedgerProofView,
        routes::ShareView,
        routes::proofs::GenerateRequest,
        routes::proofs::GenerateResponse,
        routes::proofs::RevokeRequest,
        routes::proofs::PathAResponse,
        routes::shares::ShareRequest,
        routes::verify::VerificationResponse,
    )),
    tags(
        (name = "proofs", description = "Generation, Path A verification, revocation"),
        (name = "shares", description = "Share token issuance and audit"),
        (name = "verify", description = "Verifier portal (Path B)"),
    )
)]
pub struct ApiDoc;

/// GET /openapi.json — the generated spec.
pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
