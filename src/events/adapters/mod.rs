//! Adapter implementations for event publishing.

mod logging;
pub mod memory;

pub use logging::LoggingEventPublisher;
