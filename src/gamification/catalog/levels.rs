//! XP level table.

use serde::{Deserialize, Serialize};

/// One row of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTableEntry {
    pub level: u32,
    /// Cumulative XP needed to reach this level
    pub xp_required: u64,
    /// XP between this level and the next
    pub xp_to_next: u64,
}

const fn entry(level: u32, xp_required: u64, xp_to_next: u64) -> LevelTableEntry {
    LevelTableEntry {
        level,
        xp_required,
        xp_to_next,
    }
}

/// Levels 1 through 20, sorted by level.
pub const LEVEL_TABLE: [LevelTableEntry; 20] = [
    entry(1, 0, 100),
    entry(2, 100, 200),
    entry(3, 300, 300),
    entry(4, 600, 400),
    entry(5, 1_000, 500),
    entry(6, 1_500, 600),
    entry(7, 2_100, 700),
    entry(8, 2_800, 800),
    entry(9, 3_600, 900),
    entry(10, 4_500, 1_000),
    entry(11, 5_500, 1_100),
    entry(12, 6_600, 1_200),
    entry(13, 7_800, 1_300),
    entry(14, 9_100, 1_400),
    entry(15, 10_500, 1_500),
    entry(16, 12_000, 1_600),
    entry(17, 13_600, 1_700),
    entry(18, 15_300, 1_800),
    entry(19, 17_100, 1_900),
    entry(20, 19_000, 2_000),
];
