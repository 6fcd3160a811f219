//! Storage module for database and configuration.

pub mod challenge_store;
pub mod config;
pub mod database;
pub mod schema;

pub use challenge_store::{ChallengeStore, CreateOutcome, IncrementOutcome, SqliteChallengeStore};
pub use config::{AppConfig, AuditSettings, ConfigError, DisplaySettings};
pub use database::{Database, DatabaseError};
