//! Port contracts for TickTick synchronization.
//!
//! Ports define infrastructure-agnostic interfaces used by sync services.

pub mod api;
pub mod events;

pub use api::{TaskApi, TaskApiError, TaskApiResult};
pub use events::EventSink;
