//! Error handling helpers for the client crate

mod conversions;

pub use conversions::TransportError;
