//! # Postgres Store
//!
//! `sqlx`-backed implementation of the store traits. Row constraints are
//! enforced at the application layer, matching the other backends; the
//! unique index on `proofs.proof_id` is the one invariant the database
//! also enforces, since duplicate-anchor rejection must hold even across
//! concurrent writers.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use sello_core::{
    Commitment, Epoch, FactorSet, Outcome, ProofId, RecordId, Timestamp, TxHash, UserId,
    WalletAddress,
};

use crate::error::StoreError;
use crate::records::{ProofRecord, ReminderRecord, ReminderStatus, ShareRecord, UserRecord};
use crate::traits::{ProofStore, ReminderStore, ShareStore, UserStore};

/// Postgres-backed implementation of all four store traits.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS proofs (
                record_id UUID PRIMARY KEY,
                proof_id TEXT NOT NULL UNIQUE,
                owner TEXT NOT NULL,
                status TEXT NOT NULL,
                stability TEXT NOT NULL,
                inflows TEXT NOT NULL,
                risk TEXT NOT NULL,
                commitment TEXT NOT NULL,
                epoch BIGINT NOT NULL,
                valid BOOLEAN NOT NULL,
                tx_hash TEXT,
                created_at TIMESTAMPTZ NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS shares (
                token TEXT PRIMARY KEY,
                proof_id TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                user_id UUID PRIMARY KEY,
                wallet TEXT NOT NULL UNIQUE,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS reminders (
                reminder_id UUID PRIMARY KEY,
                owner TEXT NOT NULL,
                remind_at TIMESTAMPTZ NOT NULL,
                status TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct ProofRow {
    record_id: Uuid,
    proof_id: String,
    owner: String,
    status: String,
    stability: String,
    inflows: String,
    risk: String,
    commitment: String,
    epoch: i64,
    valid: bool,
    tx_hash: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

fn band_from_letter(letter: &str) -> Result<sello_core::Band, StoreError> {
    match letter {
        "A" => Ok(sello_core::Band::A),
        "B" => Ok(sello_core::Band::B),
        "C" => Ok(sello_core::Band::C),
        other => Err(StoreError::Backend(format!("unknown band letter: {other}"))),
    }
}

impl ProofRow {
    fn into_record(self) -> Result<ProofRecord, StoreError> {
        let status = match self.status.as_str() {
            "apto" => Outcome::Apto,
            "casi" => Outcome::Casi,
            other => return Err(StoreError::Backend(format!("unknown status: {other}"))),
        };
        let tx_hash = self
            .tx_hash
            .map(TxHash::new)
            .transpose()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(ProofRecord {
            record_id: RecordId::from_uuid(self.record_id),
            proof_id: ProofId::from_hex(&self.proof_id)
                .map_err(|e| StoreError::Backend(e.to_string()))?,
            owner: WalletAddress::new(self.owner).map_err(|e| StoreError::Backend(e.to_string()))?,
            status,
            factors: FactorSet::new(
                band_from_letter(&self.stability)?,
                band_from_letter(&self.inflows)?,
                band_from_letter(&self.risk)?,
            ),
            commitment: Commitment::from_hex(&self.commitment)
                .map_err(|e| StoreError::Backend(e.to_string()))?,
            epoch: Epoch::new(self.epoch.max(0) as u64),
            valid: self.valid,
            tx_hash,
            created_at: Timestamp::from_datetime(self.created_at),
            expires_at: Timestamp::from_datetime(self.expires_at),
        })
    }
}

#[derive(sqlx::FromRow)]
struct ShareRow {
    token: String,
    proof_id: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl ShareRow {
    fn into_record(self) -> Result<ShareRecord, StoreError> {
        Ok(ShareRecord {
            token: self.token,
            proof_id: ProofId::from_hex(&self.proof_id)
                .map_err(|e| StoreError::Backend(e.to_string()))?,
            created_at: Timestamp::from_datetime(self.created_at),
            expires_at: Timestamp::from_datetime(self.expires_at),
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    wallet: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> Result<UserRecord, StoreError> {
        Ok(UserRecord {
            user_id: UserId::from_uuid(self.user_id),
            wallet: WalletAddress::new(self.wallet)
                .map_err(|e| StoreError::Backend(e.to_string()))?,
            created_at: Timestamp::from_datetime(self.created_at),
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReminderRow {
    reminder_id: Uuid,
    owner: String,
    remind_at: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
}

impl ReminderRow {
    fn into_record(self) -> Result<ReminderRecord, StoreError> {
        let status = match self.status.as_str() {
            "pending" => ReminderStatus::Pending,
            "done" => ReminderStatus::Done,
            other => {
                return Err(StoreError::Backend(format!(
                    "unknown reminder status: {other}"
                )))
            }
        };
        Ok(ReminderRecord {
            reminder_id: RecordId::from_uuid(self.reminder_id),
            owner: WalletAddress::new(self.owner).map_err(|e| StoreError::Backend(e.to_string()))?,
            remind_at: Timestamp::from_datetime(self.remind_at),
            status,
            created_at: Timestamp::from_datetime(self.created_at),
        })
    }
}

// ---------------------------------------------------------------------------
// Trait implementations
// ---------------------------------------------------------------------------

impl ProofStore for PgStore {
    async fn put_proof(&self, record: ProofRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO proofs
                (record_id, proof_id, owner, status, stability, inflows, risk,
                 commitment, epoch, valid, tx_hash, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             ON CONFLICT (proof_id) DO NOTHING",
        )
        .bind(record.record_id.as_uuid())
        .bind(record.proof_id.to_hex())
        .bind(record.owner.as_str())
        .bind(record.status.to_string())
        .bind(record.factors.stability.letter())
        .bind(record.factors.inflows.letter())
        .bind(record.factors.risk.letter())
        .bind(record.commitment.to_hex())
        .bind(record.epoch.as_u64() as i64)
        .bind(record.valid)
        .bind(record.tx_hash.as_ref().map(|t| t.as_str().to_string()))
        .bind(*record.created_at.as_datetime())
        .bind(*record.expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateId {
                id: record.proof_id,
            });
        }
        Ok(())
    }

    async fn get_proof(&self, id: ProofId) -> Result<Option<ProofRecord>, StoreError> {
        let row = sqlx::query_as::<_, ProofRow>(
            "SELECT record_id, proof_id, owner, status, stability, inflows, risk,
                    commitment, epoch, valid, tx_hash, created_at, expires_at
             FROM proofs WHERE proof_id = $1",
        )
        .bind(id.to_hex())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(ProofRow::into_record).transpose()
    }

    async fn proofs_for_owner(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<ProofRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ProofRow>(
            "SELECT record_id, proof_id, owner, status, stability, inflows, risk,
                    commitment, epoch, valid, tx_hash, created_at, expires_at
             FROM proofs WHERE owner = $1 ORDER BY created_at DESC",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(ProofRow::into_record).collect()
    }

    async fn revoke_proof(
        &self,
        id: ProofId,
        authority: &WalletAddress,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE proofs SET valid = FALSE WHERE proof_id = $1 AND owner = $2")
            .bind(id.to_hex())
            .bind(authority.as_str())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Distinguish a missing row from a wrong caller.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM proofs WHERE proof_id = $1)")
                .bind(id.to_hex())
                .fetch_one(&self.pool)
                .await
                .map_err(backend)?;
        if exists {
            Err(StoreError::NotAuthorized {
                caller: authority.to_string(),
            })
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }
}

impl ShareStore for PgStore {
    async fn put_share(&self, record: ShareRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO shares (token, proof_id, created_at, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&record.token)
        .bind(record.proof_id.to_hex())
        .bind(*record.created_at.as_datetime())
        .bind(*record.expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get_share(&self, token: &str) -> Result<Option<ShareRecord>, StoreError> {
        let row = sqlx::query_as::<_, ShareRow>(
            "SELECT token, proof_id, created_at, expires_at FROM shares WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(ShareRow::into_record).transpose()
    }

    async fn shares_for_proof(&self, id: ProofId) -> Result<Vec<ShareRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ShareRow>(
            "SELECT token, proof_id, created_at, expires_at
             FROM shares WHERE proof_id = $1 ORDER BY created_at",
        )
        .bind(id.to_hex())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(ShareRow::into_record).collect()
    }

    async fn delete_share(&self, token: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM shares WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }
}

impl UserStore for PgStore {
    async fn upsert_user(&self, wallet: &WalletAddress) -> Result<UserRecord, StoreError> {
        let fresh_id = *UserId::new().as_uuid();
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (user_id, wallet, created_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (wallet) DO UPDATE SET wallet = EXCLUDED.wallet
             RETURNING user_id, wallet, created_at",
        )
        .bind(fresh_id)
        .bind(wallet.as_str())
        .bind(*Timestamp::now().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row.into_record()
    }

    async fn get_user_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, wallet, created_at FROM users WHERE wallet = $1",
        )
        .bind(wallet.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(UserRow::into_record).transpose()
    }
}

impl ReminderStore for PgStore {
    async fn put_reminder(&self, record: ReminderRecord) -> Result<(), StoreError> {
        let status = match record.status {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Done => "done",
        };
        sqlx::query(
            "INSERT INTO reminders (reminder_id, owner, remind_at, status, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.reminder_id.as_uuid())
        .bind(record.owner.as_str())
        .bind(*record.remind_at.as_datetime())
        .bind(status)
        .bind(*record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn reminders_for_owner(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<ReminderRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ReminderRow>(
            "SELECT reminder_id, owner, remind_at, status, created_at
             FROM reminders WHERE owner = $1 ORDER BY remind_at",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(ReminderRow::into_record).collect()
    }

    async fn due_reminders(&self, now: &Timestamp) -> Result<Vec<ReminderRecord>, StoreError> {
        let rows = sqlx::query_as::<_, ReminderRow>(
            "SELECT reminder_id, owner, remind_at, status, created_at
             FROM reminders WHERE status = 'pending' AND remind_at <= $1",
        )
        .bind(*now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(ReminderRow::into_record).collect()
    }

    async fn complete_reminder(&self, id: RecordId) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE reminders SET status = 'done' WHERE reminder_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
