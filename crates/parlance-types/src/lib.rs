//! Shared domain types for Parlance.
//!
//! This crate contains the core domain types used across the Parlance
//! backend: Agent, Instruction, Message, Member, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod error;
pub mod llm;
pub mod member;
pub mod message;
