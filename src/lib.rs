//! Tickbridge: an embeddable synchronization core for the TickTick open
//! API.
//!
//! The crate polls the provider on an interval, normalizes the results into
//! an immutable in-memory snapshot of projects and tasks, and raises change
//! notifications (task created, task completed, task due soon) through a
//! host-provided event sink. Mutating operations pass through the API
//! client and become visible after the next successful refresh.
//!
//! # Architecture
//!
//! Tickbridge follows hexagonal architecture principles:
//!
//! - **Domain**: Pure data model with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote API and the host
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory)
//!
//! The host owns scheduling, credential acquisition, and event delivery;
//! the coordinator owns fetching, diffing, and snapshot publication.

pub mod sync;
