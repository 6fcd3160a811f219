//! Challenge and gamification engine.
//!
//! Provides:
//! - The challenge/achievement catalog and XP level table
//! - Level calculation from cumulative XP
//! - Challenge instantiation and lifecycle
//! - Classification of which challenges can be tracked automatically
//! - Auditing and repair proposals for stored challenges

pub mod auditor;
pub mod catalog;
pub mod classifier;
pub mod factory;
pub mod level;
pub mod lifecycle;
pub mod manager;
pub mod summary;
pub mod types;

// Re-exports for convenience
pub use auditor::{AuditResult, AuditSummary, BatchAudit, ChallengeAuditor};
pub use level::{level_for_xp, LevelInfo};
pub use lifecycle::{LifecycleError, LifecycleEvent, ProgressOutcome};
pub use manager::{ChallengeManager, ManagerError};
pub use summary::GamificationSummary;
pub use types::*;
