//! Repository trait definitions ("ports" implemented by parlance-infra).

pub mod agent;
pub mod instruction;
pub mod member;
pub mod message;
