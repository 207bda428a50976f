//! SQLite message repository implementation.
//!
//! The role column stores the historical smallint encoding (0 = user,
//! 1 = assistant); the mapping to `MessageRole` lives here and nowhere
//! else. `append_turn` writes both rows of a turn inside one transaction
//! so a half-written turn is never visible to readers.

use sqlx::Row;

use parlance_core::repository::message::MessageRepository;
use parlance_types::agent::{TokenAddress, UserAddress};
use parlance_types::error::RepositoryError;
use parlance_types::message::{Message, MessageRole};

use super::agent::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Role smallint mapping (persistence edge only)
// ---------------------------------------------------------------------------

fn role_to_smallint(role: MessageRole) -> Result<i64, RepositoryError> {
    match role {
        MessageRole::User => Ok(0),
        MessageRole::Assistant => Ok(1),
        MessageRole::System => Err(RepositoryError::Query(
            "system role is never persisted".to_string(),
        )),
    }
}

fn role_from_smallint(value: i64) -> Result<MessageRole, RepositoryError> {
    match value {
        0 => Ok(MessageRole::User),
        1 => Ok(MessageRole::Assistant),
        other => Err(RepositoryError::Query(format!(
            "invalid stored role: {other}"
        ))),
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: i64,
    token_address: String,
    user_address: String,
    role: i64,
    content: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            token_address: row.try_get("token_address")?,
            user_address: row.try_get("user_address")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        Ok(Message {
            id: self.id,
            token_address: TokenAddress::new(&self.token_address),
            user_address: UserAddress::new(&self.user_address),
            role: role_from_smallint(self.role)?,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl MessageRepository for SqliteMessageRepository {
    async fn append_turn(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
        user_message: &str,
        assistant_message: &str,
    ) -> Result<(), RepositoryError> {
        let created_at = format_datetime(&chrono::Utc::now());

        // Both rows or neither: a transaction on the writer pool. Dropping
        // the transaction without commit rolls back the first insert when
        // the second fails.
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for (role, content) in [
            (MessageRole::User, user_message),
            (MessageRole::Assistant, assistant_message),
        ] {
            sqlx::query(
                "INSERT INTO agent_messages (token_address, user_address, role, content, created_at)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(token_address.as_str())
            .bind(user_address.as_str())
            .bind(role_to_smallint(role)?)
            .bind(content)
            .bind(&created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list(
        &self,
        token_address: &TokenAddress,
        user_address: &UserAddress,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM agent_messages
             WHERE token_address = ? AND user_address = ?
             ORDER BY id ASC",
        )
        .bind(token_address.as_str())
        .bind(user_address.as_str())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let message_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(message_row.into_message()?);
        }

        Ok(messages)
    }
}
