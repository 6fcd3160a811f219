//! Unit tests for the challenge and achievement catalog.

use std::collections::HashSet;

use fitquest::gamification::catalog;
use fitquest::gamification::types::{ChallengeCategory, ChallengeType, Difficulty, Rarity};

#[test]
fn test_titles_are_unique() {
    let defs = catalog::challenge_definitions();
    let titles: HashSet<&str> = defs.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles.len(), defs.len());

    let achievements = catalog::achievement_definitions();
    let names: HashSet<&str> = achievements.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names.len(), achievements.len());
}

#[test]
fn test_every_definition_has_positive_target_and_reward() {
    for def in catalog::challenge_definitions() {
        assert!(def.target > 0.0, "{} has no target", def.title);
        assert!(def.xp_reward > 0, "{} has no reward", def.title);
        assert!(!def.unit.is_empty(), "{} has no unit", def.title);
    }
}

#[test]
fn test_repas_complet_definition() {
    let def = catalog::find_challenge("Repas Complet").expect("catalog entry");
    assert_eq!(def.challenge_type, ChallengeType::Nutrition);
    assert_eq!(def.category, ChallengeCategory::Daily);
    assert_eq!(def.target, 3.0);
    assert_eq!(def.xp_reward, 50);
    assert_eq!(def.difficulty, Difficulty::Easy);
    assert!(def.is_repeatable);
}

#[test]
fn test_registry_is_shared() {
    let a = catalog::challenge_definitions();
    let b = catalog::challenge_definitions();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn test_filters_partition_by_category() {
    let categories = [
        ChallengeCategory::Daily,
        ChallengeCategory::Weekly,
        ChallengeCategory::Monthly,
        ChallengeCategory::Special,
    ];
    let total: usize = categories
        .iter()
        .map(|c| catalog::challenges_by_category(c).len())
        .sum();
    assert_eq!(total, catalog::challenge_definitions().len());
}

#[test]
fn test_filter_by_type_and_difficulty() {
    for def in catalog::challenges_by_type(&ChallengeType::Training) {
        assert_eq!(def.challenge_type, ChallengeType::Training);
    }
    for def in catalog::challenges_by_difficulty(Difficulty::Hard) {
        assert_eq!(def.difficulty, Difficulty::Hard);
    }
    assert!(catalog::challenges_by_type(&ChallengeType::Other("yoga".into())).is_empty());
}

#[test]
fn test_search_is_case_insensitive() {
    let hits = catalog::search_challenges("REPAS");
    assert!(hits.iter().any(|d| d.title == "Repas Complet"));

    assert_eq!(
        catalog::search_challenges("").len(),
        catalog::challenge_definitions().len()
    );
    assert!(catalog::search_challenges("no such challenge anywhere").is_empty());
}

#[test]
fn test_achievement_lookups() {
    let first = catalog::find_achievement("Premier Pas").expect("catalog entry");
    assert_eq!(first.rarity, Rarity::Common);
    assert_eq!(first.xp_reward, 50);

    for a in catalog::achievements_by_rarity(Rarity::Legendary) {
        assert_eq!(a.rarity, Rarity::Legendary);
    }
    assert!(catalog::find_achievement("Inconnu").is_none());
}
