//! Integration test modules.

mod concurrent_progress_test;
