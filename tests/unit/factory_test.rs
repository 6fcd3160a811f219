//! Unit tests for challenge instantiation.

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use fitquest::gamification::factory::{create_challenge_at, end_date_for};
use fitquest::gamification::types::{ChallengeCategory, ChallengeStatus, StoredDate};
use fitquest::gamification::catalog;

#[test]
fn test_windows_per_category() {
    let start = Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap();

    assert_eq!(end_date_for(&ChallengeCategory::Daily, start), start + Duration::days(1));
    assert_eq!(end_date_for(&ChallengeCategory::Weekly, start), start + Duration::days(7));
    assert_eq!(
        end_date_for(&ChallengeCategory::Monthly, start),
        Utc.with_ymd_and_hms(2024, 4, 10, 8, 30, 0).unwrap()
    );
    assert_eq!(
        end_date_for(&ChallengeCategory::Special, start),
        Utc.with_ymd_and_hms(2024, 6, 10, 8, 30, 0).unwrap()
    );
}

#[test]
fn test_month_end_clamps() {
    let start = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
    assert_eq!(
        end_date_for(&ChallengeCategory::Monthly, start),
        Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
    );
}

#[test]
fn test_unknown_category_uses_weekly_window() {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let category = ChallengeCategory::Other("seasonal".into());
    assert_eq!(end_date_for(&category, start), start + Duration::days(7));
}

#[test]
fn test_every_catalog_entry_instantiates() {
    let user = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();

    for def in catalog::challenge_definitions() {
        let challenge = create_challenge_at(def, user, now);
        assert_eq!(challenge.user_id, user);
        assert_eq!(challenge.current, 0.0);
        assert_eq!(challenge.status, ChallengeStatus::Active);
        assert_eq!(challenge.start_date, StoredDate::Valid(now));
        assert_eq!(&challenge.definition, def);

        let end = challenge.end_date.as_datetime().expect("valid end date");
        assert!(end > now, "{} ends before it starts", def.title);
        assert!(challenge.completed_at.is_none());
    }
}

#[test]
fn test_instances_get_fresh_ids() {
    let def = catalog::find_challenge("Séance du Jour").unwrap();
    let now = Utc::now();
    let a = create_challenge_at(def, Uuid::nil(), now);
    let b = create_challenge_at(def, Uuid::nil(), now);
    assert_ne!(a.id, b.id);
}
