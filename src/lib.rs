//! FitQuest - Challenge & Gamification Engine
//!
//! The gamification core of a personal fitness and nutrition tracker: a catalog
//! of challenges and achievements, an XP level curve, challenge instantiation
//! and lifecycle, and an auditor that detects and proposes repairs for broken
//! stored challenges.

pub mod gamification;
pub mod storage;

// Re-export commonly used types
pub use gamification::auditor::ChallengeAuditor;
pub use gamification::level::level_for_xp;
pub use gamification::manager::ChallengeManager;
pub use storage::challenge_store::{ChallengeStore, SqliteChallengeStore};
pub use storage::config::AppConfig;
