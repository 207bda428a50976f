//! SQLite instruction repository implementation.
//!
//! Follows the same patterns as `SqliteAgentRepository`: raw queries,
//! private Row structs, split reader/writer pool usage. Listing orders by
//! id because instruction ids are monotonic and their creation order forms
//! the system prompt.

use sqlx::Row;

use parlance_core::repository::instruction::InstructionRepository;
use parlance_types::agent::{Instruction, TokenAddress};
use parlance_types::error::RepositoryError;

use super::agent::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `InstructionRepository`.
pub struct SqliteInstructionRepository {
    pool: DatabasePool,
}

impl SqliteInstructionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Instruction.
struct InstructionRow {
    id: i64,
    token_address: String,
    content: String,
    created_at: String,
}

impl InstructionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            token_address: row.try_get("token_address")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_instruction(self) -> Result<Instruction, RepositoryError> {
        Ok(Instruction {
            id: self.id,
            token_address: TokenAddress::new(&self.token_address),
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl InstructionRepository for SqliteInstructionRepository {
    async fn insert(
        &self,
        token_address: &TokenAddress,
        content: &str,
    ) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO agent_instructions (token_address, content, created_at)
             VALUES (?, ?, ?)",
        )
        .bind(token_address.as_str())
        .bind(content)
        .bind(format_datetime(&chrono::Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn list(
        &self,
        token_address: &TokenAddress,
    ) -> Result<Vec<Instruction>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM agent_instructions WHERE token_address = ? ORDER BY id ASC",
        )
        .bind(token_address.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut instructions = Vec::with_capacity(rows.len());
        for row in &rows {
            let instruction_row =
                InstructionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            instructions.push(instruction_row.into_instruction()?);
        }

        Ok(instructions)
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE agent_instructions SET content = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM agent_instructions WHERE id = ?")
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
