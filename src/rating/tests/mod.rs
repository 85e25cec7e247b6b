//! Unit tests for the rating bounded context.
