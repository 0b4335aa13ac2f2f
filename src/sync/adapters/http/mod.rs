//! HTTP adapter for the TickTick open API.

mod client;

pub use client::{DEFAULT_BASE_URL, TickTickClient};
