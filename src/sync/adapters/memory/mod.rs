//! In-memory adapters backing coordinator and service tests.

mod api;
mod clock;
mod events;

pub use api::InMemoryTaskApi;
pub use clock::FixedClock;
pub use events::RecordingEventSink;
