//! Challenge instantiation.
//!
//! Turns a catalog definition into a user-owned challenge with a computed
//! start/end window.

use chrono::{DateTime, Duration, Months, Utc};
use uuid::Uuid;

use super::types::{Challenge, ChallengeCategory, ChallengeDefinition, ChallengeStatus, StoredDate};

/// End of the lifecycle window for a challenge of `category` starting at `start`.
///
/// Unrecognized categories get the weekly window.
pub fn end_date_for(category: &ChallengeCategory, start: DateTime<Utc>) -> DateTime<Utc> {
    match category {
        ChallengeCategory::Daily => start + Duration::days(1),
        ChallengeCategory::Weekly => start + Duration::days(7),
        ChallengeCategory::Monthly => add_months(start, 1),
        ChallengeCategory::Special => add_months(start, 3),
        ChallengeCategory::Other(_) => start + Duration::days(7),
    }
}

// Calendar months, clamped to the last day of shorter months.
fn add_months(start: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    start
        .checked_add_months(Months::new(months))
        .unwrap_or_else(|| start + Duration::days(30 * months as i64))
}

/// Create a challenge starting now.
pub fn create_challenge(definition: &ChallengeDefinition, user_id: Uuid) -> Challenge {
    create_challenge_at(definition, user_id, Utc::now())
}

/// Create a challenge starting at `now`.
pub fn create_challenge_at(
    definition: &ChallengeDefinition,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Challenge {
    debug_assert!(
        !definition.title.trim().is_empty(),
        "challenge definition without a title"
    );
    debug_assert!(
        definition.target.is_finite(),
        "challenge definition {:?} has a non-finite target",
        definition.title
    );

    let end = end_date_for(&definition.category, now);
    tracing::debug!(
        "Instantiating '{}' for {} ({} -> {})",
        definition.title,
        user_id,
        now,
        end
    );

    Challenge {
        id: Uuid::new_v4(),
        user_id,
        definition: definition.clone(),
        current: 0.0,
        status: ChallengeStatus::Active,
        start_date: StoredDate::Valid(now),
        end_date: StoredDate::Valid(end),
        completed_at: None,
        created_at: None,
        unrecognized: Vec::new(),
    }
}
