//! Unit tests for the challenge state machine and progress.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use fitquest::gamification::catalog;
use fitquest::gamification::factory::create_challenge_at;
use fitquest::gamification::lifecycle::{
    ensure_can_instantiate, progress_percentage, LifecycleError, LifecycleEvent, ProgressOutcome,
};
use fitquest::gamification::types::{Challenge, ChallengeStatus, StoredDate};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

fn weekly_warrior() -> Challenge {
    // Weekly, 4 sessions
    let def = catalog::find_challenge("Guerrier de la Semaine").unwrap();
    create_challenge_at(def, Uuid::new_v4(), start())
}

#[test]
fn test_transition_table() {
    use ChallengeStatus::*;
    use LifecycleEvent::*;

    assert_eq!(Active.next(Pause).unwrap(), Paused);
    assert_eq!(Paused.next(Resume).unwrap(), Active);
    assert_eq!(Active.next(Complete).unwrap(), Completed);
    assert_eq!(Active.next(Expire).unwrap(), Expired);
    assert_eq!(Paused.next(Expire).unwrap(), Expired);

    assert!(Paused.next(Complete).is_err());
    assert!(Active.next(Resume).is_err());
    for terminal in [Completed, Expired] {
        for event in [Pause, Resume, Complete, Expire] {
            assert!(
                matches!(terminal.next(event), Err(LifecycleError::InvalidTransition { .. })),
                "{:?} accepted {:?}",
                terminal,
                event
            );
        }
    }
}

#[test]
fn test_progress_until_completion() {
    let mut challenge = weekly_warrior();
    let now = start() + Duration::days(1);

    assert_eq!(
        challenge.record_progress(1.0, now).unwrap(),
        ProgressOutcome::Advanced { current: 1.0 }
    );
    assert_eq!(challenge.progress_percentage(), 25);

    challenge.record_progress(2.0, now).unwrap();
    let outcome = challenge.record_progress(2.0, now).unwrap();
    assert_eq!(outcome, ProgressOutcome::Completed { current: 5.0 });
    assert_eq!(challenge.status, ChallengeStatus::Completed);
    assert_eq!(challenge.completed_at, Some(now));
    assert_eq!(challenge.progress_percentage(), 100);

    // Further progress is a no-op
    assert_eq!(
        challenge.record_progress(1.0, now).unwrap(),
        ProgressOutcome::AlreadyCompleted
    );
    assert_eq!(challenge.current, 5.0);
}

#[test]
fn test_paused_rejects_progress() {
    let mut challenge = weekly_warrior();
    let now = start() + Duration::hours(2);
    challenge.pause(now).unwrap();

    assert!(matches!(
        challenge.record_progress(1.0, now),
        Err(LifecycleError::NotActive(ChallengeStatus::Paused))
    ));
    assert_eq!(challenge.current, 0.0);

    challenge.resume(now).unwrap();
    assert!(challenge.record_progress(1.0, now).is_ok());
}

#[test]
fn test_invalid_amounts() {
    let mut challenge = weekly_warrior();
    let now = start();
    assert!(matches!(
        challenge.record_progress(-1.0, now),
        Err(LifecycleError::InvalidAmount(_))
    ));
    assert!(challenge.record_progress(f64::NAN, now).is_err());
    assert!(challenge.record_progress(f64::INFINITY, now).is_err());
}

#[test]
fn test_expiry_boundary() {
    let mut challenge = weekly_warrior();
    let end = challenge.end_date.as_datetime().unwrap();

    assert!(!challenge.is_expired_at(end));
    assert!(challenge.is_expired_at(end + Duration::seconds(1)));

    let late = end + Duration::days(1);
    assert!(matches!(
        challenge.record_progress(1.0, late),
        Err(LifecycleError::NotActive(ChallengeStatus::Expired))
    ));
    assert_eq!(challenge.status, ChallengeStatus::Expired);
}

#[test]
fn test_paused_challenge_expires() {
    let mut challenge = weekly_warrior();
    challenge.pause(start()).unwrap();
    let late = challenge.end_date.as_datetime().unwrap() + Duration::days(3);

    assert!(challenge.refresh_expiry(late));
    assert_eq!(challenge.status, ChallengeStatus::Expired);
}

#[test]
fn test_complete_requires_target() {
    let mut challenge = weekly_warrior();
    challenge.current = 3.0;
    assert!(matches!(
        challenge.apply_event(LifecycleEvent::Complete, start()),
        Err(LifecycleError::TargetNotReached { .. })
    ));
}

#[test]
fn test_expire_rejected_before_end_date() {
    let mut challenge = weekly_warrior();
    let end = challenge.end_date.as_datetime().unwrap();

    for early in [start() + Duration::hours(1), end] {
        assert!(matches!(
            challenge.apply_event(LifecycleEvent::Expire, early),
            Err(LifecycleError::NotYetDue { .. })
        ));
        assert_eq!(challenge.status, ChallengeStatus::Active);
    }

    challenge.pause(start()).unwrap();
    assert!(matches!(
        challenge.apply_event(LifecycleEvent::Expire, start() + Duration::days(2)),
        Err(LifecycleError::NotYetDue { .. })
    ));
    assert_eq!(challenge.status, ChallengeStatus::Paused);

    assert_eq!(
        challenge.apply_event(LifecycleEvent::Expire, end + Duration::seconds(1)),
        Ok(ChallengeStatus::Expired)
    );
}

#[test]
fn test_expire_without_end_date_is_rejected() {
    let mut challenge = weekly_warrior();
    challenge.end_date = StoredDate::Missing;
    assert!(challenge
        .apply_event(LifecycleEvent::Expire, start() + Duration::days(365))
        .is_err());
}

#[test]
fn test_percentage_formula() {
    assert_eq!(progress_percentage(0.0, 3.0), 0);
    assert_eq!(progress_percentage(1.0, 3.0), 33);
    assert_eq!(progress_percentage(2.0, 3.0), 67);
    assert_eq!(progress_percentage(10.0, 3.0), 100);
    assert_eq!(progress_percentage(5.0, 0.0), 0);
    assert_eq!(progress_percentage(5.0, -2.0), 0);
}

#[test]
fn test_instantiation_rules() {
    let def = catalog::find_challenge("Première Séance").unwrap();
    assert!(!def.is_repeatable);

    let mut existing = create_challenge_at(def, Uuid::new_v4(), start());
    assert!(matches!(
        ensure_can_instantiate(def, std::slice::from_ref(&existing)),
        Err(LifecycleError::AlreadyInProgress(_))
    ));

    existing.status = ChallengeStatus::Completed;
    assert!(matches!(
        ensure_can_instantiate(def, std::slice::from_ref(&existing)),
        Err(LifecycleError::AlreadyCompleted(_))
    ));

    existing.status = ChallengeStatus::Expired;
    assert!(ensure_can_instantiate(def, &[existing]).is_ok());

    let repeatable = catalog::find_challenge("Repas Complet").unwrap();
    let mut done = create_challenge_at(repeatable, Uuid::new_v4(), start());
    done.status = ChallengeStatus::Completed;
    assert!(ensure_can_instantiate(repeatable, &[done]).is_ok());
}
