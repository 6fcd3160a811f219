//! Unit tests for the XP level curve

use fitquest::gamification::catalog;
use fitquest::gamification::level::{level_for_xp, level_in_table, LevelInfo};
use fitquest::gamification::catalog::LevelTableEntry;

/// Test the first level
#[test]
fn test_new_user_is_level_one() {
    assert_eq!(
        level_for_xp(0),
        LevelInfo {
            level: 1,
            current_level_xp: 0,
            next_level_xp: 100,
        }
    );
}

/// 250 XP falls in the 100..300 band of level 2
#[test]
fn test_level_two_band() {
    assert_eq!(
        level_for_xp(250),
        LevelInfo {
            level: 2,
            current_level_xp: 150,
            next_level_xp: 200,
        }
    );
}

#[test]
fn test_monotonic_over_pairs() {
    let samples: Vec<u64> = vec![0, 1, 99, 100, 101, 299, 300, 999, 1_000, 18_999, 19_000, 20_999, 21_000, 50_000];
    for (i, &a) in samples.iter().enumerate() {
        for &b in &samples[i..] {
            assert!(level_for_xp(a).level <= level_for_xp(b).level, "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_table_entries_round_trip() {
    for entry in catalog::level_table() {
        let info = level_for_xp(entry.xp_required);
        assert_eq!(info.level, entry.level);
        assert_eq!(info.current_level_xp, 0);
        assert_eq!(info.next_level_xp, entry.xp_to_next);
    }
}

#[test]
fn test_max_level_clamp() {
    let last = catalog::level_table().last().unwrap();
    let info = level_for_xp(last.xp_required + 1_000_000_000);
    assert_eq!(info.level, last.level);
    assert_eq!(info.next_level_xp, 0);
}

/// Custom tables follow the same rules
#[test]
fn test_custom_table() {
    let table = [
        LevelTableEntry { level: 1, xp_required: 0, xp_to_next: 10 },
        LevelTableEntry { level: 2, xp_required: 10, xp_to_next: 20 },
    ];
    assert_eq!(level_in_table(&table, 15).level, 2);
    assert_eq!(level_in_table(&table, 15).current_level_xp, 5);

    let capped = level_in_table(&table, 30);
    assert_eq!(capped.level, 2);
    assert_eq!(capped.current_level_xp, 20);
    assert_eq!(capped.next_level_xp, 0);
}
