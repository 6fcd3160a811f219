//! XP to level conversion.

use serde::{Deserialize, Serialize};

use super::catalog::{self, LevelTableEntry};

/// Position of a cumulative XP total on the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub level: u32,
    /// XP earned since reaching `level`
    pub current_level_xp: u64,
    /// XP span of the current level; 0 once the table is exhausted
    pub next_level_xp: u64,
}

impl LevelInfo {
    /// Whether the top of the level table has been reached.
    pub fn is_max_level(&self) -> bool {
        self.next_level_xp == 0
    }

    /// Progress through the current level (0..100).
    pub fn progress_percentage(&self) -> f32 {
        if self.next_level_xp == 0 {
            return 100.0;
        }
        ((self.current_level_xp as f64 / self.next_level_xp as f64) * 100.0).min(100.0) as f32
    }
}

/// Compute the level reached with `total_xp`.
pub fn level_for_xp(total_xp: u64) -> LevelInfo {
    level_in_table(catalog::level_table(), total_xp)
}

/// Compute the level against an arbitrary sorted table.
///
/// Past the last entry the level is clamped and `next_level_xp` is 0.
pub fn level_in_table(table: &[LevelTableEntry], total_xp: u64) -> LevelInfo {
    if let Some(entry) = table
        .iter()
        .find(|e| e.xp_required.saturating_add(e.xp_to_next) > total_xp)
    {
        return LevelInfo {
            level: entry.level,
            current_level_xp: total_xp.saturating_sub(entry.xp_required),
            next_level_xp: entry.xp_to_next,
        };
    }

    match table.last() {
        Some(last) => LevelInfo {
            level: last.level,
            current_level_xp: total_xp.saturating_sub(last.xp_required),
            next_level_xp: 0,
        },
        None => LevelInfo {
            level: 1,
            current_level_xp: total_xp,
            next_level_xp: 0,
        },
    }
}

/// Cumulative XP needed to reach `level`, if the table defines it.
pub fn xp_for_level(level: u32) -> Option<u64> {
    catalog::level_table()
        .iter()
        .find(|e| e.level == level)
        .map(|e| e.xp_required)
}

/// Highest level defined by the table.
pub fn max_level() -> u32 {
    catalog::level_table().last().map(|e| e.level).unwrap_or(1)
}
