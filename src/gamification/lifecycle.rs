//! Challenge lifecycle state machine.
//!
//! ```text
//!   active ──pause──▶ paused ──resume──▶ active
//!   active ──complete (current >= target)──▶ completed
//!   active | paused ──expire (now > endDate)──▶ expired
//! ```
//!
//! `completed` and `expired` are terminal. Progress is only accepted while
//! `active` and never decreases `current`.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::types::{Challenge, ChallengeDefinition, ChallengePatch, ChallengeStatus, StoredDate};

/// Event that may move a challenge to another state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Pause,
    Resume,
    Complete,
    Expire,
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Pause => "pause",
            LifecycleEvent::Resume => "resume",
            LifecycleEvent::Complete => "complete",
            LifecycleEvent::Expire => "expire",
        }
    }
}

/// Lifecycle errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    #[error("Cannot {} a challenge that is {from}", .event.as_str())]
    InvalidTransition {
        from: ChallengeStatus,
        event: LifecycleEvent,
    },

    #[error("Progress rejected: challenge is {0}")]
    NotActive(ChallengeStatus),

    #[error("Progress amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),

    #[error("Target not reached: {current} of {target}")]
    TargetNotReached { current: f64, target: f64 },

    #[error("Challenge is not due to expire (ends {end})")]
    NotYetDue { end: StoredDate },

    #[error("'{0}' is already in progress")]
    AlreadyInProgress(String),

    #[error("'{0}' was already completed and cannot be repeated")]
    AlreadyCompleted(String),
}

impl ChallengeStatus {
    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChallengeStatus::Completed | ChallengeStatus::Expired)
    }

    /// Transition table.
    pub fn next(self, event: LifecycleEvent) -> Result<ChallengeStatus, LifecycleError> {
        use ChallengeStatus::*;
        use LifecycleEvent::*;

        match (self, event) {
            (Active, Pause) => Ok(Paused),
            (Paused, Resume) => Ok(Active),
            (Active, Complete) => Ok(Completed),
            (Active | Paused, Expire) => Ok(Expired),
            (from, event) => Err(LifecycleError::InvalidTransition { from, event }),
        }
    }
}

/// Result of a progress update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressOutcome {
    /// Progress recorded, target not yet met
    Advanced { current: f64 },
    /// Progress recorded and the challenge completed
    Completed { current: f64 },
    /// Challenge was already completed; nothing changed
    AlreadyCompleted,
}

impl Challenge {
    /// Apply a lifecycle event at `now`.
    pub fn apply_event(
        &mut self,
        event: LifecycleEvent,
        now: DateTime<Utc>,
    ) -> Result<ChallengeStatus, LifecycleError> {
        let next = self.status.next(event)?;

        match event {
            LifecycleEvent::Complete if self.current < self.target() => {
                return Err(LifecycleError::TargetNotReached {
                    current: self.current,
                    target: self.target(),
                });
            }
            LifecycleEvent::Expire if !self.is_expired_at(now) => {
                return Err(LifecycleError::NotYetDue {
                    end: self.end_date.clone(),
                });
            }
            _ => {}
        }

        self.status = next;
        if next == ChallengeStatus::Completed {
            self.completed_at = Some(now);
        }
        Ok(next)
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        self.apply_event(LifecycleEvent::Pause, now).map(|_| ())
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        self.apply_event(LifecycleEvent::Resume, now).map(|_| ())
    }

    /// Whether the challenge should be expired at `now`.
    ///
    /// Challenges without a valid end date never expire on their own; the
    /// auditor repairs those.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.end_date
            .as_datetime()
            .map(|end| now > end)
            .unwrap_or(false)
    }

    /// Expire the challenge if its window has passed. Returns whether it did.
    pub fn refresh_expiry(&mut self, now: DateTime<Utc>) -> bool {
        self.is_expired_at(now) && self.apply_event(LifecycleEvent::Expire, now).is_ok()
    }

    /// Add `amount` to `current`.
    pub fn record_progress(
        &mut self,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<ProgressOutcome, LifecycleError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LifecycleError::InvalidAmount(amount));
        }
        self.accept_progress(self.current + amount, now)
    }

    /// Raise `current` to `value`, as computed from activity facts.
    ///
    /// Lower values are ignored so the counter never goes backwards.
    pub fn set_progress(
        &mut self,
        value: f64,
        now: DateTime<Utc>,
    ) -> Result<ProgressOutcome, LifecycleError> {
        if !value.is_finite() || value < 0.0 {
            return Err(LifecycleError::InvalidAmount(value));
        }
        self.accept_progress(value.max(self.current), now)
    }

    fn accept_progress(
        &mut self,
        new_value: f64,
        now: DateTime<Utc>,
    ) -> Result<ProgressOutcome, LifecycleError> {
        self.refresh_expiry(now);

        match self.status {
            ChallengeStatus::Completed => return Ok(ProgressOutcome::AlreadyCompleted),
            ChallengeStatus::Active => {}
            other => return Err(LifecycleError::NotActive(other)),
        }

        self.current = new_value;
        if self.current >= self.target() {
            self.apply_event(LifecycleEvent::Complete, now)?;
            return Ok(ProgressOutcome::Completed {
                current: self.current,
            });
        }

        Ok(ProgressOutcome::Advanced {
            current: self.current,
        })
    }

    /// Displayed completion percentage (0..=100).
    pub fn progress_percentage(&self) -> u32 {
        progress_percentage(self.current, self.target())
    }

    /// Whole days left before the end date, if it is known.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.end_date
            .as_datetime()
            .map(|end| (end - now).num_days().max(0))
    }

    /// Patch carrying this challenge's status fields.
    pub fn status_patch(&self) -> ChallengePatch {
        ChallengePatch {
            status: Some(self.status),
            completed_at: self.completed_at,
            ..Default::default()
        }
    }
}

/// `min(100, round(current / target * 100))`, or 0 for a non-positive target.
pub fn progress_percentage(current: f64, target: f64) -> u32 {
    if target <= 0.0 || !current.is_finite() || current <= 0.0 {
        return 0;
    }
    (current / target * 100.0).round().min(100.0) as u32
}

/// Check whether `user_challenges` allow starting `definition` again.
///
/// A definition cannot be started while an instance is active or paused, and a
/// non-repeatable one never again once completed.
pub fn ensure_can_instantiate(
    definition: &ChallengeDefinition,
    user_challenges: &[Challenge],
) -> Result<(), LifecycleError> {
    let same = user_challenges
        .iter()
        .filter(|c| c.definition.title == definition.title);

    for existing in same {
        match existing.status {
            ChallengeStatus::Active | ChallengeStatus::Paused => {
                return Err(LifecycleError::AlreadyInProgress(definition.title.clone()));
            }
            ChallengeStatus::Completed if !definition.is_repeatable => {
                return Err(LifecycleError::AlreadyCompleted(definition.title.clone()));
            }
            _ => {}
        }
    }

    Ok(())
}
