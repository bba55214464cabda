//! Project workflow helpers
//!
//! Convenience operations for the project / stage / task / attachment
//! models, expressed purely as calls into the generic CRUD facade and the
//! batch executor. Nothing here talks to the wire directly.

pub mod attachment;
pub mod project;
pub mod stage;
pub mod task;
