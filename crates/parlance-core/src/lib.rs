//! Business logic and repository trait definitions for Parlance.
//!
//! This crate defines the "ports" (repository and collaborator traits) that
//! the infrastructure layer implements, plus the pure pieces of the core:
//! the access gate, the context assembler, and the services orchestrating
//! them. It depends only on `parlance-types` -- never on `parlance-infra`
//! or any database/IO crate.

pub mod auth;
pub mod context;
pub mod llm;
pub mod notify;
pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
