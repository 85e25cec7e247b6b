//! Adapter implementations of the rating ports.

pub mod memory;
pub mod postgres;
