//! Model-invocation clients.

pub mod ollama;

pub use ollama::OllamaProvider;
