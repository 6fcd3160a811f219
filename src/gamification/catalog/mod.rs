//! Challenge and achievement catalog.
//!
//! Process-wide registries built once on first access and never mutated
//! afterwards, plus read-only lookup and search helpers over them.

pub mod achievements;
pub mod challenges;
pub mod levels;

use std::sync::OnceLock;

use super::types::{
    AchievementDefinition, AchievementType, ChallengeCategory, ChallengeDefinition,
    ChallengeType, Difficulty, Rarity,
};
pub use levels::{LevelTableEntry, LEVEL_TABLE};

static CHALLENGE_REGISTRY: OnceLock<Vec<ChallengeDefinition>> = OnceLock::new();
static ACHIEVEMENT_REGISTRY: OnceLock<Vec<AchievementDefinition>> = OnceLock::new();

/// All challenge definitions.
pub fn challenge_definitions() -> &'static [ChallengeDefinition] {
    CHALLENGE_REGISTRY.get_or_init(challenges::all_challenges)
}

/// All achievement definitions.
pub fn achievement_definitions() -> &'static [AchievementDefinition] {
    ACHIEVEMENT_REGISTRY.get_or_init(achievements::all_achievements)
}

/// The XP level table, sorted by level.
pub fn level_table() -> &'static [LevelTableEntry] {
    &LEVEL_TABLE
}

/// Look up a challenge definition by its title.
pub fn find_challenge(title: &str) -> Option<&'static ChallengeDefinition> {
    challenge_definitions().iter().find(|c| c.title == title)
}

/// Look up an achievement definition by its name.
pub fn find_achievement(name: &str) -> Option<&'static AchievementDefinition> {
    achievement_definitions().iter().find(|a| a.name == name)
}

pub fn challenges_by_category(category: &ChallengeCategory) -> Vec<&'static ChallengeDefinition> {
    challenge_definitions()
        .iter()
        .filter(|c| &c.category == category)
        .collect()
}

pub fn challenges_by_difficulty(difficulty: Difficulty) -> Vec<&'static ChallengeDefinition> {
    challenge_definitions()
        .iter()
        .filter(|c| c.difficulty == difficulty)
        .collect()
}

pub fn challenges_by_type(challenge_type: &ChallengeType) -> Vec<&'static ChallengeDefinition> {
    challenge_definitions()
        .iter()
        .filter(|c| &c.challenge_type == challenge_type)
        .collect()
}

/// Case-insensitive substring search over title and description.
///
/// An empty query matches every definition.
pub fn search_challenges(query: &str) -> Vec<&'static ChallengeDefinition> {
    let needle = query.to_lowercase();
    challenge_definitions()
        .iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn achievements_by_rarity(rarity: Rarity) -> Vec<&'static AchievementDefinition> {
    achievement_definitions()
        .iter()
        .filter(|a| a.rarity == rarity)
        .collect()
}

pub fn achievements_by_type(
    achievement_type: AchievementType,
) -> Vec<&'static AchievementDefinition> {
    achievement_definitions()
        .iter()
        .filter(|a| a.achievement_type == achievement_type)
        .collect()
}

/// Case-insensitive substring search over name and description.
pub fn search_achievements(query: &str) -> Vec<&'static AchievementDefinition> {
    let needle = query.to_lowercase();
    achievement_definitions()
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&needle)
                || a.description.to_lowercase().contains(&needle)
        })
        .collect()
}
