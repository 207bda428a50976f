//! Infrastructure layer for Parlance.
//!
//! Contains implementations of the repository and collaborator traits
//! defined in `parlance-core`: SQLite storage, the Ollama-compatible model
//! client, and best-effort Telegram delivery.

pub mod llm;
pub mod sqlite;
pub mod telegram;
