//! Challenge and achievement persistence.
//!
//! Provides:
//! - The store contract the gamification engine relies on
//! - A SQLite implementation of it
//!
//! Progress increments are applied as a read-modify-write inside a single
//! transaction so concurrent activity events never lose an update. Starting a
//! challenge checks the user's existing instances and inserts in one
//! transaction for the same reason.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::gamification::lifecycle::{self, LifecycleError};
use crate::gamification::types::{
    Achievement, AchievementDefinition, AchievementType, Challenge, ChallengeCategory,
    ChallengeDefinition, ChallengePatch, ChallengeStatus, ChallengeType, Difficulty, Rarity,
    StoredDate, UnrecognizedField,
};
use crate::storage::database::{Database, DatabaseError};

/// Result of an atomic progress increment.
#[derive(Debug, Clone, PartialEq)]
pub enum IncrementOutcome {
    /// Increment applied; the returned challenge may now be completed
    Applied(Challenge),
    /// Challenge was not active, nothing written
    NotActive(Challenge),
}

/// Result of a guarded challenge insert.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Challenge inserted, with `created_at` set
    Created(Challenge),
    /// An existing instance of the same definition blocks the insert
    Blocked(LifecycleError),
}

/// Storage contract for challenge and achievement documents.
pub trait ChallengeStore {
    /// All challenges owned by `user_id`, oldest first.
    fn fetch_challenges(&self, user_id: Uuid) -> Result<Vec<Challenge>, DatabaseError>;

    /// Challenges owned by `user_id` with the given status.
    fn fetch_challenges_with_status(
        &self,
        user_id: Uuid,
        status: ChallengeStatus,
    ) -> Result<Vec<Challenge>, DatabaseError>;

    fn get_challenge(&self, id: Uuid) -> Result<Option<Challenge>, DatabaseError>;

    /// Persist a new challenge. Returns it with `created_at` set.
    fn create_challenge(&self, challenge: &Challenge) -> Result<Challenge, DatabaseError>;

    /// Persist a new challenge unless the owner already holds an instance of
    /// the same definition that forbids it (see
    /// [`lifecycle::ensure_can_instantiate`]).
    ///
    /// Overdue instances are expired at `now` first. The check and the insert
    /// happen in one transaction.
    fn create_challenge_exclusive(
        &self,
        challenge: &Challenge,
        now: DateTime<Utc>,
    ) -> Result<CreateOutcome, DatabaseError>;

    /// Apply a partial update. Returns the updated challenge.
    fn apply_patch(&self, id: Uuid, patch: &ChallengePatch) -> Result<Challenge, DatabaseError>;

    /// Atomically add `amount` to `current` if the challenge is active,
    /// completing it when the target is reached.
    fn increment_progress(
        &self,
        id: Uuid,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<IncrementOutcome, DatabaseError>;

    fn fetch_achievements(&self, user_id: Uuid) -> Result<Vec<Achievement>, DatabaseError>;

    /// Persist a new achievement. Achievements are never updated or deleted.
    fn create_achievement(&self, achievement: &Achievement) -> Result<Achievement, DatabaseError>;
}

const CHALLENGE_COLUMNS: &str = "id, user_id, challenge_type, title, description, icon, category,
     target, unit, xp_reward, is_repeatable, difficulty, current, status,
     start_date, end_date, completed_at, created_at";

const ACHIEVEMENT_COLUMNS: &str = "id, user_id, achievement_type, name, description, icon, rarity,
     xp_reward, unlock_condition, unlocked_at, created_at";

/// SQLite-backed store.
#[derive(Clone)]
pub struct SqliteChallengeStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteChallengeStore {
    /// Create a store over an open database.
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Create a store over a fresh in-memory database.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>, DatabaseError> {
        self.db.lock().map_err(|_| DatabaseError::LockPoisoned)
    }

    fn require_challenge(conn: &Connection, id: Uuid) -> Result<Challenge, DatabaseError> {
        query_challenge(conn, id)?.ok_or_else(|| DatabaseError::NotFound(id.to_string()))
    }
}

impl ChallengeStore for SqliteChallengeStore {
    fn fetch_challenges(&self, user_id: Uuid) -> Result<Vec<Challenge>, DatabaseError> {
        let db = self.lock()?;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM challenges WHERE user_id = ?1 ORDER BY created_at, rowid",
            CHALLENGE_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_id.to_string()], parse_challenge_row)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::from)
    }

    fn fetch_challenges_with_status(
        &self,
        user_id: Uuid,
        status: ChallengeStatus,
    ) -> Result<Vec<Challenge>, DatabaseError> {
        let db = self.lock()?;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM challenges WHERE user_id = ?1 AND status = ?2
             ORDER BY created_at, rowid",
            CHALLENGE_COLUMNS
        ))?;

        let rows = stmt.query_map(
            params![user_id.to_string(), status.as_str()],
            parse_challenge_row,
        )?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::from)
    }

    fn get_challenge(&self, id: Uuid) -> Result<Option<Challenge>, DatabaseError> {
        let db = self.lock()?;
        query_challenge(db.connection(), id)
    }

    fn create_challenge(&self, challenge: &Challenge) -> Result<Challenge, DatabaseError> {
        let db = self.lock()?;
        insert_challenge(db.connection(), challenge, Utc::now())
    }

    fn create_challenge_exclusive(
        &self,
        challenge: &Challenge,
        now: DateTime<Utc>,
    ) -> Result<CreateOutcome, DatabaseError> {
        let mut db = self.lock()?;
        let tx = db.immediate_transaction()?;

        let mut existing = {
            let mut stmt = tx.prepare(&format!(
                "SELECT {} FROM challenges WHERE user_id = ?1 AND title = ?2",
                CHALLENGE_COLUMNS
            ))?;
            let rows = stmt.query_map(
                params![challenge.user_id.to_string(), challenge.definition.title],
                parse_challenge_row,
            )?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        for instance in &mut existing {
            if instance.unrecognized_status().is_none() && instance.refresh_expiry(now) {
                tx.execute(
                    "UPDATE challenges SET status = ?1 WHERE id = ?2",
                    params![instance.status.as_str(), instance.id.to_string()],
                )?;
                tracing::info!("Challenge '{}' ({}) expired", instance.title(), instance.id);
            }
        }

        if let Err(err) = lifecycle::ensure_can_instantiate(&challenge.definition, &existing) {
            // Expiry updates still stand
            tx.commit()
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
            return Ok(CreateOutcome::Blocked(err));
        }

        let stored = insert_challenge(&tx, challenge, now)?;
        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Ok(CreateOutcome::Created(stored))
    }

    fn apply_patch(&self, id: Uuid, patch: &ChallengePatch) -> Result<Challenge, DatabaseError> {
        let mut db = self.lock()?;
        let tx = db.transaction()?;

        // Fails with NotFound before writing anything
        Self::require_challenge(&tx, id)?;

        if let Some(start) = patch.start_date {
            tx.execute(
                "UPDATE challenges SET start_date = ?1 WHERE id = ?2",
                params![StoredDate::Valid(start).to_raw(), id.to_string()],
            )?;
        }
        if let Some(end) = patch.end_date {
            tx.execute(
                "UPDATE challenges SET end_date = ?1 WHERE id = ?2",
                params![StoredDate::Valid(end).to_raw(), id.to_string()],
            )?;
        }
        if let Some(status) = patch.status {
            tx.execute(
                "UPDATE challenges SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id.to_string()],
            )?;
        }
        if let Some(completed_at) = patch.completed_at {
            tx.execute(
                "UPDATE challenges SET completed_at = ?1 WHERE id = ?2",
                params![completed_at.to_rfc3339(), id.to_string()],
            )?;
        }

        let updated = Self::require_challenge(&tx, id)?;
        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Ok(updated)
    }

    fn increment_progress(
        &self,
        id: Uuid,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<IncrementOutcome, DatabaseError> {
        let mut db = self.lock()?;
        let tx = db.transaction()?;

        let changed = tx.execute(
            "UPDATE challenges SET current = current + ?1 WHERE id = ?2 AND status = 'active'",
            params![amount, id.to_string()],
        )?;

        if changed == 0 {
            let challenge = Self::require_challenge(&tx, id)?;
            return Ok(IncrementOutcome::NotActive(challenge));
        }

        tx.execute(
            "UPDATE challenges SET status = 'completed', completed_at = ?1
             WHERE id = ?2 AND status = 'active' AND current >= target",
            params![now.to_rfc3339(), id.to_string()],
        )?;

        let updated = Self::require_challenge(&tx, id)?;
        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Ok(IncrementOutcome::Applied(updated))
    }

    fn fetch_achievements(&self, user_id: Uuid) -> Result<Vec<Achievement>, DatabaseError> {
        let db = self.lock()?;
        let mut stmt = db.connection().prepare(&format!(
            "SELECT {} FROM achievements WHERE user_id = ?1 ORDER BY unlocked_at, rowid",
            ACHIEVEMENT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_id.to_string()], parse_achievement_row)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::from)
    }

    fn create_achievement(&self, achievement: &Achievement) -> Result<Achievement, DatabaseError> {
        let db = self.lock()?;
        let now = Utc::now();
        let def = &achievement.definition;

        db.connection().execute(
            "INSERT INTO achievements (id, user_id, achievement_type, name, description, icon,
             rarity, xp_reward, unlock_condition, unlocked_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                achievement.id.to_string(),
                achievement.user_id.to_string(),
                def.achievement_type.as_str(),
                def.name,
                def.description,
                def.icon,
                def.rarity.as_str(),
                def.xp_reward,
                def.condition,
                achievement.unlocked_at.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        tracing::info!(
            "Unlocked achievement '{}' for user {}",
            def.name,
            achievement.user_id
        );

        let mut stored = achievement.clone();
        stored.created_at = Some(now);
        Ok(stored)
    }
}

fn insert_challenge(
    conn: &Connection,
    challenge: &Challenge,
    now: DateTime<Utc>,
) -> Result<Challenge, DatabaseError> {
    let def = &challenge.definition;

    conn.execute(
        "INSERT INTO challenges (id, user_id, challenge_type, title, description, icon, category,
         target, unit, xp_reward, is_repeatable, difficulty, current, status,
         start_date, end_date, completed_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        params![
            challenge.id.to_string(),
            challenge.user_id.to_string(),
            def.challenge_type.as_str(),
            def.title,
            def.description,
            def.icon,
            def.category.as_str(),
            def.target,
            def.unit,
            def.xp_reward,
            def.is_repeatable,
            def.difficulty.as_str(),
            challenge.current,
            challenge.status.as_str(),
            challenge.start_date.to_raw(),
            challenge.end_date.to_raw(),
            challenge.completed_at.map(|dt| dt.to_rfc3339()),
            now.to_rfc3339(),
        ],
    )?;

    tracing::info!(
        "Created challenge '{}' ({}) for user {}",
        def.title,
        challenge.id,
        challenge.user_id
    );

    let mut stored = challenge.clone();
    stored.created_at = Some(now);
    Ok(stored)
}

fn query_challenge(conn: &Connection, id: Uuid) -> Result<Option<Challenge>, DatabaseError> {
    conn.query_row(
        &format!("SELECT {} FROM challenges WHERE id = ?1", CHALLENGE_COLUMNS),
        params![id.to_string()],
        parse_challenge_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

fn parse_uuid(idx: usize, raw: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| StoredDate::parse(Some(&s)).as_datetime())
}

/// Map a challenge row. Malformed dates and unknown enum strings are kept so
/// the auditor can see them.
fn parse_challenge_row(row: &Row<'_>) -> rusqlite::Result<Challenge> {
    let id_str: String = row.get(0)?;
    let user_str: String = row.get(1)?;
    let type_str: String = row.get(2)?;
    let category_str: String = row.get(6)?;
    let difficulty_str: String = row.get(11)?;
    let status_str: String = row.get(13)?;
    let start_raw: Option<String> = row.get(14)?;
    let end_raw: Option<String> = row.get(15)?;

    let mut unrecognized = Vec::new();

    // Unknown statuses read as paused: no progress, no XP
    let status = ChallengeStatus::from_str(&status_str).unwrap_or_else(|| {
        tracing::warn!("Challenge {} has unknown status '{}'", id_str, status_str);
        unrecognized.push(UnrecognizedField {
            field: "status",
            raw: status_str.clone(),
        });
        ChallengeStatus::Paused
    });
    let difficulty = Difficulty::from_str(&difficulty_str).unwrap_or_else(|| {
        unrecognized.push(UnrecognizedField {
            field: "difficulty",
            raw: difficulty_str.clone(),
        });
        Difficulty::Medium
    });

    Ok(Challenge {
        id: parse_uuid(0, &id_str)?,
        user_id: parse_uuid(1, &user_str)?,
        definition: ChallengeDefinition {
            challenge_type: ChallengeType::parse(&type_str),
            title: row.get(3)?,
            description: row.get(4)?,
            icon: row.get(5)?,
            category: ChallengeCategory::parse(&category_str),
            target: row.get(7)?,
            unit: row.get(8)?,
            xp_reward: row.get(9)?,
            is_repeatable: row.get(10)?,
            difficulty,
        },
        current: row.get(12)?,
        status,
        start_date: StoredDate::parse(start_raw.as_deref()),
        end_date: StoredDate::parse(end_raw.as_deref()),
        completed_at: parse_timestamp(row.get(16)?),
        created_at: parse_timestamp(row.get(17)?),
        unrecognized,
    })
}

fn parse_achievement_row(row: &Row<'_>) -> rusqlite::Result<Achievement> {
    let id_str: String = row.get(0)?;
    let user_str: String = row.get(1)?;
    let type_str: String = row.get(2)?;
    let rarity_str: String = row.get(6)?;
    let unlocked_str: String = row.get(9)?;

    let unlocked_at = parse_timestamp(Some(unlocked_str)).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            9,
            rusqlite::types::Type::Text,
            "unparseable unlocked_at".into(),
        )
    })?;

    Ok(Achievement {
        id: parse_uuid(0, &id_str)?,
        user_id: parse_uuid(1, &user_str)?,
        definition: AchievementDefinition {
            achievement_type: AchievementType::from_str(&type_str)
                .unwrap_or(AchievementType::Special),
            name: row.get(3)?,
            description: row.get(4)?,
            icon: row.get(5)?,
            rarity: Rarity::from_str(&rarity_str).unwrap_or(Rarity::Common),
            xp_reward: row.get(7)?,
            condition: row.get(8)?,
        },
        unlocked_at,
        created_at: parse_timestamp(row.get(10)?),
    })
}
