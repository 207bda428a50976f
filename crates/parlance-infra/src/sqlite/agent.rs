//! SQLite agent repository implementation.
//!
//! Implements `AgentRepository` from `parlance-core` using sqlx with split
//! read/write pools.

use chrono::{DateTime, Utc};
use sqlx::Row;

use parlance_core::repository::agent::AgentRepository;
use parlance_types::agent::{Agent, TokenAddress};
use parlance_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `AgentRepository`.
pub struct SqliteAgentRepository {
    pool: DatabasePool,
}

impl SqliteAgentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Agent.
struct AgentRow {
    token_address: String,
    owner_address: String,
    created_at: String,
}

impl AgentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            token_address: row.try_get("token_address")?,
            owner_address: row.try_get("owner_address")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_agent(self) -> Result<Agent, RepositoryError> {
        Ok(Agent {
            token_address: TokenAddress::new(&self.token_address),
            owner_address: self.owner_address,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl AgentRepository for SqliteAgentRepository {
    async fn ensure_agent(
        &self,
        token_address: &TokenAddress,
        owner_address: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO agents (token_address, owner_address, created_at)
             VALUES (?, ?, ?)
             ON CONFLICT (token_address) DO NOTHING",
        )
        .bind(token_address.as_str())
        .bind(owner_address.to_ascii_lowercase())
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_agent(
        &self,
        token_address: &TokenAddress,
    ) -> Result<Option<Agent>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM agents WHERE token_address = ?")
            .bind(token_address.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let agent_row =
                    AgentRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(agent_row.into_agent()?))
            }
            None => Ok(None),
        }
    }
}
