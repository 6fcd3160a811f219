//! Per-user gamification summary.

use serde::Serialize;

use super::level::{level_for_xp, LevelInfo};
use super::types::{Achievement, Challenge, ChallengeStatus};

/// XP, level and challenge counts for one user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationSummary {
    pub total_xp: u64,
    pub level: LevelInfo,
    pub active: usize,
    pub paused: usize,
    pub completed: usize,
    pub expired: usize,
    pub achievements_unlocked: usize,
}

impl GamificationSummary {
    /// Build a summary from a user's stored records.
    ///
    /// XP is earned by completed challenges and unlocked achievements.
    pub fn from_records(challenges: &[Challenge], achievements: &[Achievement]) -> Self {
        let mut summary = GamificationSummary {
            total_xp: 0,
            level: level_for_xp(0),
            active: 0,
            paused: 0,
            completed: 0,
            expired: 0,
            achievements_unlocked: achievements.len(),
        };

        for challenge in challenges {
            match challenge.status {
                ChallengeStatus::Active => summary.active += 1,
                ChallengeStatus::Paused => summary.paused += 1,
                ChallengeStatus::Completed => {
                    summary.completed += 1;
                    summary.total_xp += challenge.definition.xp_reward as u64;
                }
                ChallengeStatus::Expired => summary.expired += 1,
            }
        }

        summary.total_xp += achievements
            .iter()
            .map(|a| a.definition.xp_reward as u64)
            .sum::<u64>();
        summary.level = level_for_xp(summary.total_xp);
        summary
    }
}
