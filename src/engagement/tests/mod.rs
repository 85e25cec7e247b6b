//! Unit tests for the engagement bounded context.

mod job_status_tests;
