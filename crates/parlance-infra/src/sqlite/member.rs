//! SQLite member repository implementation (onboarding flow).

use sqlx::Row;

use parlance_core::repository::member::MemberRepository;
use parlance_types::error::RepositoryError;
use parlance_types::member::Member;

use super::agent::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `MemberRepository`.
pub struct SqliteMemberRepository {
    pool: DatabasePool,
}

impl SqliteMemberRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Member.
struct MemberRow {
    tg_id: i64,
    tg_handle: String,
    wallet_address: Option<String>,
    dob: Option<String>,
    created_at: String,
    verified_at: Option<String>,
}

impl MemberRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tg_id: row.try_get("tg_id")?,
            tg_handle: row.try_get("tg_handle")?,
            wallet_address: row.try_get("wallet_address")?,
            dob: row.try_get("dob")?,
            created_at: row.try_get("created_at")?,
            verified_at: row.try_get("verified_at")?,
        })
    }

    fn into_member(self) -> Result<Member, RepositoryError> {
        Ok(Member {
            tg_id: self.tg_id,
            tg_handle: self.tg_handle,
            wallet_address: self.wallet_address,
            dob: self.dob,
            created_at: parse_datetime(&self.created_at)?,
            verified_at: self
                .verified_at
                .as_deref()
                .map(parse_datetime)
                .transpose()?,
        })
    }
}

impl MemberRepository for SqliteMemberRepository {
    async fn insert_member(&self, tg_id: i64, tg_handle: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO members (tg_id, tg_handle, created_at)
             VALUES (?, ?, ?)
             ON CONFLICT (tg_id) DO NOTHING",
        )
        .bind(tg_id)
        .bind(tg_handle)
        .bind(format_datetime(&chrono::Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn verify_member(
        &self,
        tg_handle: &str,
        wallet_address: &str,
        dob: &str,
    ) -> Result<Option<i64>, RepositoryError> {
        let row = sqlx::query(
            "UPDATE members SET wallet_address = ?, dob = ?, verified_at = ?
             WHERE tg_handle = ?
             RETURNING tg_id",
        )
        .bind(wallet_address)
        .bind(dob)
        .bind(format_datetime(&chrono::Utc::now()))
        .bind(tg_handle)
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let tg_id: i64 = row
                    .try_get("tg_id")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(tg_id))
            }
            None => Ok(None),
        }
    }

    async fn get_member(&self, tg_id: i64) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM members WHERE tg_id = ?")
            .bind(tg_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let member_row =
                    MemberRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(member_row.into_member()?))
            }
            None => Ok(None),
        }
    }
}
