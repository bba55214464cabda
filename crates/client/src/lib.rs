//! # Odoo Client
//!
//! JSON-RPC client SDK for Odoo 18.
//!
//! This crate contains:
//! - HTTP transport with bounded retry and exponential backoff
//! - JSON-RPC envelope framing and request correlation
//! - Session lifecycle with lazy authentication
//! - Generic CRUD facade over arbitrary models
//! - Batch executor for multi-call round trips
//! - Pagination helper for large result sets
//! - Project / stage / task / attachment convenience helpers
//!
//! ## Example
//!
//! ```no_run
//! use odoo_client::OdooClient;
//! use odoo_domain::OdooConfig;
//! use serde_json::json;
//!
//! # async fn example() -> odoo_domain::Result<()> {
//! let config = OdooConfig::new("https://my.odoo.com/jsonrpc", "my", "bot@example.com", "***");
//! let odoo = OdooClient::new(config)?;
//!
//! let project_id = odoo.create_project(json!({"name": "LLM Playground"})).await?;
//! let task_id = odoo.create_task(json!({"name": "Write docs", "project_id": project_id})).await?;
//! odoo.set_task_description(task_id, "<p>ready</p>").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod http;
pub mod observability;
pub mod paging;
pub mod rpc;

mod batch;

// Re-export commonly used items
pub use client::{OdooClient, SearchOptions, SearchReadOptions};
pub use helpers::attachment::AttachOptions;
pub use helpers::stage::StageOptions;
pub use observability::{BufferWarnSink, NoopWarnSink, TracingWarnSink, WarnSink};
pub use odoo_domain::{BatchCall, Domain, DomainTerm, OdooConfig, OdooError, RecordId, Result};
pub use paging::{PageOptions, SearchReadPager};
