//! # Hosted REST Store
//!
//! Typed client for a hosted PostgREST-style database — the backing the
//! original deployment used for proofs, shares, users, and reminders.
//! Filters follow the `column=eq.value` convention; every request carries
//! the project API key.
//!
//! Row payloads are the serde forms of the record types (factors as a
//! nested object, matching the hosted schema the original deployment
//! used).

use std::time::Duration;

use url::Url;

use sello_core::{ProofId, RecordId, Timestamp, UserId, WalletAddress};

use crate::error::StoreError;
use crate::records::{ProofRecord, ReminderRecord, ShareRecord, UserRecord};
use crate::traits::{ProofStore, ReminderStore, ShareStore, UserStore};

/// Configuration for the hosted database.
///
/// Custom `Debug` implementation redacts the API key to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct RestStoreConfig {
    /// Base URL of the REST endpoint (e.g. `https://<project>.supabase.co/rest/v1/`).
    pub base_url: Url,
    /// Project API key, sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RestStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RestStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables: `SELLO_DB_URL` (required), `SELLO_DB_API_KEY` (required),
    /// `SELLO_DB_TIMEOUT_SECS` (default: 30).
    pub fn from_env() -> Result<Self, StoreError> {
        let raw_url = std::env::var("SELLO_DB_URL")
            .map_err(|_| StoreError::Backend("SELLO_DB_URL is not set".to_string()))?;
        let api_key = std::env::var("SELLO_DB_API_KEY")
            .map_err(|_| StoreError::Backend("SELLO_DB_API_KEY is not set".to_string()))?;
        Ok(Self {
            base_url: Url::parse(&raw_url)
                .map_err(|e| StoreError::Backend(format!("invalid SELLO_DB_URL: {e}")))?,
            api_key,
            timeout_secs: std::env::var("SELLO_DB_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }
}

/// REST implementation of all four store traits.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: reqwest::Client,
    config: RestStoreConfig,
}

impl RestStore {
    /// Build a client from configuration.
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Backend(format!("client init failed: {e}")))?;
        Ok(Self { http, config })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.config
            .base_url
            .join(table)
            .map_err(|e| StoreError::Backend(format!("bad table url for {table}: {e}")))
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .authed(self.http.get(self.table_url(table)?))
            .query(filters)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("GET {table}: {e}")))?;
        let response = response
            .error_for_status()
            .map_err(|e| StoreError::Backend(format!("GET {table}: {e}")))?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("GET {table}: malformed body: {e}")))
    }

    async fn insert_row<T: serde::Serialize>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<reqwest::StatusCode, StoreError> {
        let response = self
            .authed(self.http.post(self.table_url(table)?))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("POST {table}: {e}")))?;
        Ok(response.status())
    }
}

impl ProofStore for RestStore {
    async fn put_proof(&self, record: ProofRecord) -> Result<(), StoreError> {
        let status = self.insert_row("proofs", &record).await?;
        if status == reqwest::StatusCode::CONFLICT {
            return Err(StoreError::DuplicateId {
                id: record.proof_id,
            });
        }
        if !status.is_success() {
            return Err(StoreError::Backend(format!("POST proofs: HTTP {status}")));
        }
        Ok(())
    }

    async fn get_proof(&self, id: ProofId) -> Result<Option<ProofRecord>, StoreError> {
        let rows: Vec<ProofRecord> = self
            .fetch_rows(
                "proofs",
                &[
                    ("proof_id", format!("eq.{}", id.to_hex())),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn proofs_for_owner(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<ProofRecord>, StoreError> {
        self.fetch_rows(
            "proofs",
            &[
                ("owner", format!("eq.{owner}")),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    async fn revoke_proof(
        &self,
        id: ProofId,
        authority: &WalletAddress,
    ) -> Result<(), StoreError> {
        let response = self
            .authed(self.http.patch(self.table_url("proofs")?))
            .query(&[
                ("proof_id", format!("eq.{}", id.to_hex())),
                ("owner", format!("eq.{authority}")),
            ])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "valid": false }))
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("PATCH proofs: {e}")))?
            .error_for_status()
            .map_err(|e| StoreError::Backend(format!("PATCH proofs: {e}")))?;

        let updated: Vec<ProofRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("PATCH proofs: malformed body: {e}")))?;
        if !updated.is_empty() {
            return Ok(());
        }

        // Nothing matched: distinguish a missing row from a wrong caller.
        match self.get_proof(id).await? {
            Some(_) => Err(StoreError::NotAuthorized {
                caller: authority.to_string(),
            }),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

impl ShareStore for RestStore {
    async fn put_share(&self, record: ShareRecord) -> Result<(), StoreError> {
        let status = self.insert_row("shares", &record).await?;
        if !status.is_success() {
            return Err(StoreError::Backend(format!("POST shares: HTTP {status}")));
        }
        Ok(())
    }

    async fn get_share(&self, token: &str) -> Result<Option<ShareRecord>, StoreError> {
        let rows: Vec<ShareRecord> = self
            .fetch_rows(
                "shares",
                &[
                    ("token", format!("eq.{token}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn shares_for_proof(&self, id: ProofId) -> Result<Vec<ShareRecord>, StoreError> {
        self.fetch_rows(
            "shares",
            &[
                ("proof_id", format!("eq.{}", id.to_hex())),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    async fn delete_share(&self, token: &str) -> Result<bool, StoreError> {
        let response = self
            .authed(self.http.delete(self.table_url("shares")?))
            .query(&[("token", format!("eq.{token}"))])
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("DELETE shares: {e}")))?
            .error_for_status()
            .map_err(|e| StoreError::Backend(format!("DELETE shares: {e}")))?;

        let removed: Vec<ShareRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("DELETE shares: malformed body: {e}")))?;
        Ok(!removed.is_empty())
    }
}

impl UserStore for RestStore {
    async fn upsert_user(&self, wallet: &WalletAddress) -> Result<UserRecord, StoreError> {
        if let Some(existing) = self.get_user_by_wallet(wallet).await? {
            return Ok(existing);
        }
        let record = UserRecord {
            user_id: UserId::new(),
            wallet: wallet.clone(),
            created_at: Timestamp::now(),
        };
        let status = self.insert_row("users", &record).await?;
        if status == reqwest::StatusCode::CONFLICT {
            // Raced another writer; the row is there now.
            return self
                .get_user_by_wallet(wallet)
                .await?
                .ok_or_else(|| StoreError::Backend("user vanished after conflict".to_string()));
        }
        if !status.is_success() {
            return Err(StoreError::Backend(format!("POST users: HTTP {status}")));
        }
        Ok(record)
    }

    async fn get_user_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<UserRecord>, StoreError> {
        let rows: Vec<UserRecord> = self
            .fetch_rows(
                "users",
                &[
                    ("wallet", format!("eq.{wallet}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

impl ReminderStore for RestStore {
    async fn put_reminder(&self, record: ReminderRecord) -> Result<(), StoreError> {
        let status = self.insert_row("reminders", &record).await?;
        if !status.is_success() {
            return Err(StoreError::Backend(format!(
                "POST reminders: HTTP {status}"
            )));
        }
        Ok(())
    }

    async fn reminders_for_owner(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<ReminderRecord>, StoreError> {
        self.fetch_rows(
            "reminders",
            &[
                ("owner", format!("eq.{owner}")),
                ("order", "remind_at.asc".to_string()),
            ],
        )
        .await
    }

    async fn due_reminders(&self, now: &Timestamp) -> Result<Vec<ReminderRecord>, StoreError> {
        self.fetch_rows(
            "reminders",
            &[
                ("status", "eq.pending".to_string()),
                ("remind_at", format!("lte.{now}")),
            ],
        )
        .await
    }

    async fn complete_reminder(&self, id: RecordId) -> Result<(), StoreError> {
        let response = self
            .authed(self.http.patch(self.table_url("reminders")?))
            .query(&[("reminder_id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "status": "done" }))
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("PATCH reminders: {e}")))?
            .error_for_status()
            .map_err(|e| StoreError::Backend(format!("PATCH reminders: {e}")))?;

        let updated: Vec<ReminderRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Backend(format!("PATCH reminders: malformed body: {e}")))?;
        if updated.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
