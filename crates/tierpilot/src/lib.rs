//! Top-level facade crate for tierpilot.
//!
//! Re-exports the engine and the gateway service so users can depend on a single crate.

pub mod core {
    pub use tierpilot_core::*;
}

pub mod gateway {
    pub use tierpilot_gateway::*;
}
