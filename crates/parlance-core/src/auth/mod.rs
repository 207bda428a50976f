//! Shared-secret access control for the v2 surface.

mod gate;

pub use gate::AccessGate;
