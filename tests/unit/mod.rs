//! Unit test modules.

mod auditor_test;
mod catalog_test;
mod classifier_test;
mod factory_test;
mod level_test;
mod lifecycle_test;
