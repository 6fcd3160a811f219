//! Integrity checks for stored challenges.
//!
//! The auditor never writes: it reports problems and proposes patches, and the
//! caller decides whether to apply them.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use uuid::Uuid;

use super::catalog;
use super::factory::end_date_for;
use super::types::{Challenge, ChallengeDefinition, ChallengePatch, StoredDate, UnrecognizedField};

/// Outcome of checking a challenge's dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Outcome of matching a challenge against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionValidation {
    pub is_valid: bool,
    pub matched_definition: Option<&'static ChallengeDefinition>,
}

/// Full audit of one challenge.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult {
    pub challenge_id: Uuid,
    pub title: String,
    pub date_validation: DateValidation,
    pub definition_validation: DefinitionValidation,
    pub suggested_fixes: ChallengePatch,
    pub needs_update: bool,
    /// Stored enum values read with a fallback; reported, never fixed
    pub unrecognized_fields: Vec<UnrecognizedField>,
}

/// Counts over an audited batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub total: usize,
    /// Sound dates, nothing to fix, known definition, all values recognized
    pub valid: usize,
    pub needing_fixes: usize,
    pub invalid_dates: usize,
    pub unknown_definitions: usize,
    pub unrecognized_values: usize,
}

impl AuditSummary {
    fn from_results(results: &[AuditResult]) -> Self {
        let mut summary = AuditSummary {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            if result.needs_update {
                summary.needing_fixes += 1;
            }
            if !result.date_validation.is_valid {
                summary.invalid_dates += 1;
            }
            if !result.definition_validation.is_valid {
                summary.unknown_definitions += 1;
            }
            if !result.unrecognized_fields.is_empty() {
                summary.unrecognized_values += 1;
            }
            if !result.needs_update
                && result.definition_validation.is_valid
                && result.unrecognized_fields.is_empty()
            {
                summary.valid += 1;
            }
        }
        summary
    }
}

/// Audit results in input order, with their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAudit {
    pub results: Vec<AuditResult>,
    pub summary: AuditSummary,
}

impl BatchAudit {
    /// Results that carry a patch worth applying.
    pub fn fixable(&self) -> impl Iterator<Item = &AuditResult> {
        self.results
            .iter()
            .filter(|r| r.needs_update && !r.suggested_fixes.is_empty())
    }
}

/// Challenge auditor pinned to a reference instant.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeAuditor {
    now: DateTime<Utc>,
}

impl Default for ChallengeAuditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeAuditor {
    /// Create an auditor that proposes the current time for missing dates.
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Create an auditor with a fixed reference time.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Check that stored dates are either absent or parseable.
    pub fn validate_dates(&self, challenge: &Challenge) -> DateValidation {
        let mut errors = Vec::new();

        if let StoredDate::Invalid(raw) = &challenge.start_date {
            errors.push(format!("Invalid startDate: {:?}", raw));
        }
        if let StoredDate::Invalid(raw) = &challenge.end_date {
            errors.push(format!("Invalid endDate: {:?}", raw));
        }

        DateValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Match by exact title, falling back to description and type.
    pub fn validate_definition(&self, challenge: &Challenge) -> DefinitionValidation {
        let definitions = catalog::challenge_definitions();
        let stored = &challenge.definition;

        let matched = definitions
            .iter()
            .find(|d| d.title == stored.title)
            .or_else(|| {
                definitions.iter().find(|d| {
                    d.description == stored.description
                        && d.challenge_type == stored.challenge_type
                })
            });

        DefinitionValidation {
            is_valid: matched.is_some(),
            matched_definition: matched,
        }
    }

    /// Propose values for missing or unparseable dates.
    ///
    /// A replacement end date is computed from the proposed start, using the
    /// stored category.
    pub fn propose_date_fixes(&self, challenge: &Challenge) -> ChallengePatch {
        let mut patch = ChallengePatch::default();

        let start = match &challenge.start_date {
            StoredDate::Valid(start) => *start,
            StoredDate::Missing | StoredDate::Invalid(_) => {
                patch.start_date = Some(self.now);
                self.now
            }
        };

        if !challenge.end_date.is_valid() {
            patch.end_date = Some(end_date_for(&challenge.definition.category, start));
        }

        patch
    }

    /// Audit one challenge.
    pub fn audit(&self, challenge: &Challenge) -> AuditResult {
        let date_validation = self.validate_dates(challenge);
        let definition_validation = self.validate_definition(challenge);
        let suggested_fixes = self.propose_date_fixes(challenge);
        let needs_update = !date_validation.is_valid || !suggested_fixes.is_empty();

        AuditResult {
            challenge_id: challenge.id,
            title: challenge.definition.title.clone(),
            date_validation,
            definition_validation,
            suggested_fixes,
            needs_update,
            unrecognized_fields: challenge.unrecognized.clone(),
        }
    }

    /// Audit a batch sequentially.
    pub fn audit_batch(&self, challenges: &[Challenge]) -> BatchAudit {
        let results: Vec<AuditResult> = challenges.iter().map(|c| self.audit(c)).collect();
        self.finish_batch(results)
    }

    /// Audit a batch on the rayon pool. Output order matches input order.
    pub fn audit_batch_parallel(&self, challenges: &[Challenge]) -> BatchAudit {
        let results: Vec<AuditResult> = challenges.par_iter().map(|c| self.audit(c)).collect();
        self.finish_batch(results)
    }

    fn finish_batch(&self, results: Vec<AuditResult>) -> BatchAudit {
        let summary = AuditSummary::from_results(&results);

        if summary.needing_fixes > 0
            || summary.unknown_definitions > 0
            || summary.unrecognized_values > 0
        {
            tracing::warn!(
                "Audit found {} of {} challenges needing fixes, {} with unknown definitions, {} with unrecognized values",
                summary.needing_fixes,
                summary.total,
                summary.unknown_definitions,
                summary.unrecognized_values
            );
        } else {
            tracing::debug!("Audit found all {} challenges valid", summary.total);
        }

        BatchAudit { results, summary }
    }

    /// Human-readable digest of a batch audit.
    pub fn generate_report(&self, challenges: &[Challenge]) -> String {
        render_report(&self.audit_batch(challenges))
    }
}

/// Render an already computed batch audit.
pub fn render_report(batch: &BatchAudit) -> String {
    let summary = &batch.summary;
    let mut out = String::new();

    let _ = writeln!(out, "=== Challenge Audit Report ===");
    let _ = writeln!(out, "Total challenges:    {}", summary.total);
    let _ = writeln!(out, "Valid:               {}", summary.valid);
    let _ = writeln!(out, "Needing fixes:       {}", summary.needing_fixes);
    let _ = writeln!(out, "Invalid dates:       {}", summary.invalid_dates);
    let _ = writeln!(out, "Unknown definitions: {}", summary.unknown_definitions);
    let _ = writeln!(out, "Unrecognized values: {}", summary.unrecognized_values);

    let flagged: Vec<&AuditResult> = batch
        .results
        .iter()
        .filter(|r| {
            r.needs_update
                || !r.definition_validation.is_valid
                || !r.unrecognized_fields.is_empty()
        })
        .collect();

    if flagged.is_empty() {
        let _ = writeln!(out, "\nNo issues found.");
        return out;
    }

    let _ = writeln!(out, "\nChallenges needing attention:");
    for result in flagged {
        let _ = writeln!(out, "- {} ({})", result.title, result.challenge_id);
        for error in &result.date_validation.errors {
            let _ = writeln!(out, "    error: {}", error);
        }
        if let Some(start) = result.suggested_fixes.start_date {
            let _ = writeln!(out, "    fix startDate -> {}", StoredDate::Valid(start));
        }
        if let Some(end) = result.suggested_fixes.end_date {
            let _ = writeln!(out, "    fix endDate   -> {}", StoredDate::Valid(end));
        }
        if !result.definition_validation.is_valid {
            let _ = writeln!(out, "    unknown definition, review manually");
        }
        for field in &result.unrecognized_fields {
            let _ = writeln!(out, "    unrecognized {}: {:?}, review manually", field.field, field.raw);
        }
    }

    out
}
