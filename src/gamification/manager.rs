//! Challenge management.
//!
//! Wires the catalog, factory, lifecycle and auditor to a [`ChallengeStore`].

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::auditor::{BatchAudit, ChallengeAuditor};
use super::catalog;
use super::factory;
use super::lifecycle::{self, LifecycleError, LifecycleEvent};
use super::summary::GamificationSummary;
use super::types::{Achievement, Challenge, ChallengeDefinition, ChallengeStatus};
use crate::storage::challenge_store::{ChallengeStore, CreateOutcome, IncrementOutcome};
use crate::storage::database::DatabaseError;

/// Challenge manager.
pub struct ChallengeManager<S: ChallengeStore> {
    store: S,
    parallel_audit: bool,
}

impl<S: ChallengeStore> ChallengeManager<S> {
    /// Create a new challenge manager.
    pub fn new(store: S) -> Self {
        Self {
            store,
            parallel_audit: false,
        }
    }

    /// Audit batches on the rayon pool.
    pub fn with_parallel_audit(mut self, parallel: bool) -> Self {
        self.parallel_audit = parallel;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a catalog challenge for a user.
    pub fn start_challenge(&self, user_id: Uuid, title: &str) -> Result<Challenge, ManagerError> {
        let definition = catalog::find_challenge(title)
            .ok_or_else(|| ManagerError::UnknownChallenge(title.to_string()))?;

        let now = Utc::now();
        let challenge = factory::create_challenge_at(definition, user_id, now);

        match self.store.create_challenge_exclusive(&challenge, now)? {
            CreateOutcome::Created(stored) => Ok(stored),
            CreateOutcome::Blocked(err) => {
                tracing::debug!("Not starting '{}' for {}: {}", title, user_id, err);
                Err(err.into())
            }
        }
    }

    /// Catalog challenges the user could start right now.
    pub fn available_definitions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<&'static ChallengeDefinition>, ManagerError> {
        let existing = self.refreshed_challenges(user_id)?;
        Ok(catalog::challenge_definitions()
            .iter()
            .filter(|def| lifecycle::ensure_can_instantiate(def, &existing).is_ok())
            .collect())
    }

    /// Add `amount` to a challenge's progress.
    pub fn record_progress(&self, challenge_id: Uuid, amount: f64) -> Result<Challenge, ManagerError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LifecycleError::InvalidAmount(amount).into());
        }

        let now = Utc::now();
        let challenge = self.require_writable(challenge_id)?;
        if challenge.status == ChallengeStatus::Completed {
            return Ok(challenge);
        }
        let challenge = self.expire_if_due(challenge)?;

        match self.store.increment_progress(challenge_id, amount, now)? {
            IncrementOutcome::Applied(updated) => {
                if updated.status == ChallengeStatus::Completed {
                    tracing::info!(
                        "Challenge '{}' completed by {} (+{} XP)",
                        updated.title(),
                        updated.user_id,
                        updated.definition.xp_reward
                    );
                } else {
                    tracing::debug!(
                        "Challenge '{}' progress {}/{}",
                        updated.title(),
                        updated.current,
                        updated.target()
                    );
                }
                Ok(updated)
            }
            // Completed between our read and the write
            IncrementOutcome::NotActive(current) if current.status == ChallengeStatus::Completed => {
                Ok(current)
            }
            IncrementOutcome::NotActive(current) => {
                tracing::warn!(
                    "Rejected progress on '{}': challenge is {}",
                    challenge.title(),
                    current.status
                );
                Err(LifecycleError::NotActive(current.status).into())
            }
        }
    }

    pub fn pause(&self, challenge_id: Uuid) -> Result<Challenge, ManagerError> {
        self.transition(challenge_id, LifecycleEvent::Pause)
    }

    pub fn resume(&self, challenge_id: Uuid) -> Result<Challenge, ManagerError> {
        self.transition(challenge_id, LifecycleEvent::Resume)
    }

    fn transition(&self, challenge_id: Uuid, event: LifecycleEvent) -> Result<Challenge, ManagerError> {
        let mut challenge = self.expire_if_due(self.require_writable(challenge_id)?)?;
        challenge.apply_event(event, Utc::now())?;
        Ok(self
            .store
            .apply_patch(challenge_id, &challenge.status_patch())?)
    }

    /// Expire every overdue challenge of a user. Returns the expired ones.
    pub fn sweep_expired(&self, user_id: Uuid) -> Result<Vec<Challenge>, ManagerError> {
        let now = Utc::now();
        let mut expired = Vec::new();

        for mut challenge in self.store.fetch_challenges(user_id)? {
            if challenge.unrecognized_status().is_some() {
                continue;
            }
            if challenge.refresh_expiry(now) {
                expired.push(self.store.apply_patch(challenge.id, &challenge.status_patch())?);
            }
        }

        if !expired.is_empty() {
            tracing::info!("Expired {} challenges for user {}", expired.len(), user_id);
        }
        Ok(expired)
    }

    /// Audit all of a user's challenges without changing them.
    pub fn audit_user(&self, user_id: Uuid) -> Result<BatchAudit, ManagerError> {
        let challenges = self.store.fetch_challenges(user_id)?;
        let auditor = ChallengeAuditor::new();

        Ok(if self.parallel_audit {
            auditor.audit_batch_parallel(&challenges)
        } else {
            auditor.audit_batch(&challenges)
        })
    }

    /// Audit a user's challenges and write the proposed date fixes.
    ///
    /// Challenges with unknown definitions are left for manual review.
    pub fn apply_audit_fixes(&self, user_id: Uuid) -> Result<Vec<Challenge>, ManagerError> {
        let audit = self.audit_user(user_id)?;
        let mut patched = Vec::new();

        for result in audit.fixable() {
            tracing::info!(
                "Applying audit fix to '{}' ({})",
                result.title,
                result.challenge_id
            );
            patched.push(
                self.store
                    .apply_patch(result.challenge_id, &result.suggested_fixes)?,
            );
        }

        Ok(patched)
    }

    /// Unlock a catalog achievement. Returns `None` if the user already has it.
    pub fn unlock_achievement(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Option<Achievement>, ManagerError> {
        let definition = catalog::find_achievement(name)
            .ok_or_else(|| ManagerError::UnknownAchievement(name.to_string()))?;

        let unlocked = self.store.fetch_achievements(user_id)?;
        if unlocked.iter().any(|a| a.definition.name == definition.name) {
            return Ok(None);
        }

        let achievement = Achievement::unlock(definition, user_id, Utc::now());
        Ok(Some(self.store.create_achievement(&achievement)?))
    }

    /// XP, level and counts for a user.
    pub fn summary(&self, user_id: Uuid) -> Result<GamificationSummary, ManagerError> {
        let challenges = self.refreshed_challenges(user_id)?;
        let achievements = self.store.fetch_achievements(user_id)?;
        Ok(GamificationSummary::from_records(&challenges, &achievements))
    }

    fn require(&self, challenge_id: Uuid) -> Result<Challenge, ManagerError> {
        self.store
            .get_challenge(challenge_id)?
            .ok_or(ManagerError::ChallengeNotFound(challenge_id))
    }

    /// Like `require`, but refuses records whose stored status would be
    /// overwritten by a fallback.
    fn require_writable(&self, challenge_id: Uuid) -> Result<Challenge, ManagerError> {
        let challenge = self.require(challenge_id)?;
        if let Some(raw) = challenge.unrecognized_status() {
            return Err(ManagerError::UnrecognizedStatus {
                id: challenge_id,
                raw: raw.to_string(),
            });
        }
        Ok(challenge)
    }

    fn expire_if_due(&self, mut challenge: Challenge) -> Result<Challenge, ManagerError> {
        if challenge.refresh_expiry(Utc::now()) {
            tracing::info!("Challenge '{}' ({}) expired", challenge.title(), challenge.id);
            return Ok(self
                .store
                .apply_patch(challenge.id, &challenge.status_patch())?);
        }
        Ok(challenge)
    }

    // Lazy expiry on read, without writing back.
    fn refreshed_challenges(&self, user_id: Uuid) -> Result<Vec<Challenge>, ManagerError> {
        let now = Utc::now();
        let mut challenges = self.store.fetch_challenges(user_id)?;
        for challenge in &mut challenges {
            challenge.refresh_expiry(now);
        }
        Ok(challenges)
    }
}

/// Challenge manager errors.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Challenge not found: {0}")]
    ChallengeNotFound(Uuid),

    #[error("No catalog challenge titled '{0}'")]
    UnknownChallenge(String),

    #[error("No catalog achievement named '{0}'")]
    UnknownAchievement(String),

    #[error("Challenge {id} has unrecognized status '{raw}'")]
    UnrecognizedStatus { id: Uuid, raw: String },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
