//! In-memory adapters for engagement ports.

mod board;
mod matching;

pub use board::InMemoryEngagementRepository;
pub use matching::StaticMatchScorer;
