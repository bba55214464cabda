//! HTTP transport layer

mod client;

pub use client::{HttpTransport, HttpTransportBuilder};
