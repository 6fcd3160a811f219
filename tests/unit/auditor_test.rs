//! Unit tests for the challenge integrity auditor.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use fitquest::gamification::auditor::{render_report, ChallengeAuditor};
use fitquest::gamification::catalog;
use fitquest::gamification::factory::create_challenge_at;
use fitquest::gamification::types::{Challenge, ChallengeType, StoredDate};

fn audit_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 7, 0, 0).unwrap()
}

fn challenge(title: &str) -> Challenge {
    let def = catalog::find_challenge(title).unwrap();
    create_challenge_at(def, Uuid::new_v4(), audit_time() - Duration::days(2))
}

#[test]
fn test_healthy_challenge_needs_nothing() {
    let auditor = ChallengeAuditor::at(audit_time());
    let result = auditor.audit(&challenge("Marathon Mensuel"));

    assert!(result.date_validation.is_valid);
    assert!(result.definition_validation.is_valid);
    assert!(result.suggested_fixes.is_empty());
    assert!(!result.needs_update);
}

#[test]
fn test_missing_dates_get_fresh_window() {
    let auditor = ChallengeAuditor::at(audit_time());
    let mut broken = challenge("Repas Complet");
    broken.start_date = StoredDate::Missing;
    broken.end_date = StoredDate::Missing;

    let result = auditor.audit(&broken);
    // Missing is not malformed
    assert!(result.date_validation.is_valid);
    assert!(result.needs_update);
    assert_eq!(result.suggested_fixes.start_date, Some(audit_time()));
    assert_eq!(
        result.suggested_fixes.end_date,
        Some(audit_time() + Duration::days(1))
    );
}

#[test]
fn test_invalid_end_date_keeps_valid_start() {
    let auditor = ChallengeAuditor::at(audit_time());
    let mut broken = challenge("Guerrier de la Semaine");
    let start = broken.start_date.as_datetime().unwrap();
    broken.end_date = StoredDate::parse(Some("not-a-date"));

    let result = auditor.audit(&broken);
    assert!(!result.date_validation.is_valid);
    assert_eq!(result.date_validation.errors.len(), 1);
    assert!(result.date_validation.errors[0].contains("endDate"));
    assert_eq!(result.suggested_fixes.start_date, None);
    assert_eq!(result.suggested_fixes.end_date, Some(start + Duration::days(7)));
}

#[test]
fn test_definition_matches_by_description_and_type() {
    let auditor = ChallengeAuditor::at(audit_time());
    let mut renamed = challenge("Séance du Jour");
    renamed.definition.title = "Ancien Titre".to_string();

    let result = auditor.validate_definition(&renamed);
    assert!(result.is_valid);
    assert_eq!(result.matched_definition.unwrap().title, "Séance du Jour");

    renamed.definition.challenge_type = ChallengeType::Other("legacy".into());
    assert!(!auditor.validate_definition(&renamed).is_valid);
}

#[test]
fn test_applying_fixes_converges() {
    let auditor = ChallengeAuditor::at(audit_time());
    let mut broken = challenge("Mois de Fer");
    broken.start_date = StoredDate::parse(Some("31/02/2024"));
    broken.end_date = StoredDate::Missing;

    let first = auditor.audit(&broken);
    assert!(first.needs_update);
    first.suggested_fixes.apply_to(&mut broken);

    let second = auditor.audit(&broken);
    assert!(!second.needs_update);
    assert!(second.suggested_fixes.is_empty());
}

#[test]
fn test_audit_is_idempotent() {
    let auditor = ChallengeAuditor::at(audit_time());
    let mut broken = challenge("Journal Quotidien");
    broken.end_date = StoredDate::Invalid("garbage".into());

    assert_eq!(auditor.audit(&broken), auditor.audit(&broken));
}

#[test]
fn test_parallel_batch_matches_sequential() {
    let auditor = ChallengeAuditor::at(audit_time());
    let mut batch: Vec<Challenge> = catalog::challenge_definitions()
        .iter()
        .map(|def| create_challenge_at(def, Uuid::nil(), audit_time()))
        .collect();
    batch[0].start_date = StoredDate::Missing;
    batch[3].end_date = StoredDate::Invalid("??".into());
    batch[5].definition.title = "Défi Disparu".into();
    batch[5].definition.description = "plus au catalogue".into();

    let sequential = auditor.audit_batch(&batch);
    let parallel = auditor.audit_batch_parallel(&batch);
    assert_eq!(sequential, parallel);

    assert_eq!(sequential.summary.total, batch.len());
    assert_eq!(sequential.summary.needing_fixes, 2);
    assert_eq!(sequential.summary.invalid_dates, 1);
    assert_eq!(sequential.summary.unknown_definitions, 1);
    assert_eq!(sequential.summary.valid, batch.len() - 3);
    assert_eq!(sequential.fixable().count(), 2);
}

#[test]
fn test_report_lists_problems() {
    let auditor = ChallengeAuditor::at(audit_time());
    let clean = vec![challenge("Repas Complet")];
    assert!(auditor.generate_report(&clean).contains("No issues found."));

    let mut broken = challenge("Repas Complet");
    broken.end_date = StoredDate::Invalid("bad".into());
    let report = render_report(&auditor.audit_batch(&[broken]));
    assert!(report.starts_with("=== Challenge Audit Report ==="));
    assert!(report.contains("Challenges needing attention:"));
    assert!(report.contains("Repas Complet"));
}
