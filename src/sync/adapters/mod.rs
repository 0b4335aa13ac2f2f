//! Adapter implementations of the sync ports.

pub mod http;
pub mod memory;
