//! Deterministic conversation-context assembly.

mod assembler;

pub use assembler::{assemble_context, system_prompt};
