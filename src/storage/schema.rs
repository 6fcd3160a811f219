//! Database schema definitions for FitQuest.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Per-user challenge instances
CREATE TABLE IF NOT EXISTS challenges (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    challenge_type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    icon TEXT NOT NULL,
    category TEXT NOT NULL,
    target REAL NOT NULL,
    unit TEXT NOT NULL,
    xp_reward INTEGER NOT NULL,
    is_repeatable INTEGER NOT NULL,
    difficulty TEXT NOT NULL,
    current REAL NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'active',
    start_date TEXT,
    end_date TEXT,
    completed_at TEXT,
    created_at TEXT NOT NULL
);

-- Append-only achievement unlocks
CREATE TABLE IF NOT EXISTS achievements (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    achievement_type TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    icon TEXT NOT NULL,
    rarity TEXT NOT NULL,
    xp_reward INTEGER NOT NULL,
    unlock_condition TEXT NOT NULL,
    unlocked_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE(user_id, name)
);

CREATE INDEX IF NOT EXISTS idx_challenges_user_status ON challenges(user_id, status);
CREATE INDEX IF NOT EXISTS idx_achievements_user ON achievements(user_id);
"#;

/// Schema version table creation.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
