//! In-memory adapters for rating ports.

mod review;

pub use review::InMemoryReviewRepository;
