//! Core types for challenges and achievements.
//!
//! Defines catalog definitions, per-user instances, and the enums they share.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Kind of activity a challenge is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChallengeType {
    Nutrition,
    Training,
    Streak,
    Social,
    Special,
    /// Value read from storage that no longer names a known type
    Other(String),
}

impl ChallengeType {
    pub fn as_str(&self) -> &str {
        match self {
            ChallengeType::Nutrition => "nutrition",
            ChallengeType::Training => "training",
            ChallengeType::Streak => "streak",
            ChallengeType::Social => "social",
            ChallengeType::Special => "special",
            ChallengeType::Other(raw) => raw,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "nutrition" => ChallengeType::Nutrition,
            "training" => ChallengeType::Training,
            "streak" => ChallengeType::Streak,
            "social" => ChallengeType::Social,
            "special" => ChallengeType::Special,
            other => ChallengeType::Other(other.to_string()),
        }
    }
}

impl From<String> for ChallengeType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ChallengeType> for String {
    fn from(t: ChallengeType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Challenge category, which determines how long an instance lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChallengeCategory {
    /// One day
    Daily,
    /// Seven days
    Weekly,
    /// One calendar month
    Monthly,
    /// Three calendar months
    Special,
    /// Unrecognized value; lives as long as a weekly challenge
    Other(String),
}

impl ChallengeCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ChallengeCategory::Daily => "daily",
            ChallengeCategory::Weekly => "weekly",
            ChallengeCategory::Monthly => "monthly",
            ChallengeCategory::Special => "special",
            ChallengeCategory::Other(raw) => raw,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "daily" => ChallengeCategory::Daily,
            "weekly" => ChallengeCategory::Weekly,
            "monthly" => ChallengeCategory::Monthly,
            "special" => ChallengeCategory::Special,
            other => ChallengeCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for ChallengeCategory {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ChallengeCategory> for String {
    fn from(c: ChallengeCategory) -> Self {
        c.as_str().to_string()
    }
}

impl std::fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Challenge difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Legendary,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Legendary => "legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "legendary" => Some(Difficulty::Legendary),
            _ => None,
        }
    }
}

/// Lifecycle state of a challenge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Expired,
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeStatus::Active => "active",
            ChallengeStatus::Paused => "paused",
            ChallengeStatus::Completed => "completed",
            ChallengeStatus::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ChallengeStatus::Active),
            "paused" => Some(ChallengeStatus::Paused),
            "completed" => Some(ChallengeStatus::Completed),
            "expired" => Some(ChallengeStatus::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Achievement family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementType {
    Milestone,
    Streak,
    Performance,
    Special,
}

impl AchievementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementType::Milestone => "milestone",
            AchievementType::Streak => "streak",
            AchievementType::Performance => "performance",
            AchievementType::Special => "special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "milestone" => Some(AchievementType::Milestone),
            "streak" => Some(AchievementType::Streak),
            "performance" => Some(AchievementType::Performance),
            "special" => Some(AchievementType::Special),
            _ => None,
        }
    }
}

/// Achievement rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// Catalog entry a challenge instance is created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDefinition {
    #[serde(rename = "type")]
    pub challenge_type: ChallengeType,
    /// Display title, unique within the catalog
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: ChallengeCategory,
    /// Numeric goal, expressed in `unit`
    pub target: f64,
    pub unit: String,
    pub xp_reward: u32,
    pub is_repeatable: bool,
    pub difficulty: Difficulty,
}

/// Catalog entry for a one-time unlock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    #[serde(rename = "type")]
    pub achievement_type: AchievementType,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    pub xp_reward: u32,
    /// Human-readable unlock rule. Display only, never evaluated.
    pub condition: String,
}

/// A date field as it was persisted.
///
/// Stored records may carry empty or malformed dates; those are kept as-is so
/// they can be audited instead of failing the whole read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoredDate {
    /// Absent or empty
    #[default]
    Missing,
    /// Parsed instant
    Valid(DateTime<Utc>),
    /// Present but unparseable
    Invalid(String),
}

impl StoredDate {
    /// Parse a raw persisted value.
    ///
    /// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and a
    /// bare `YYYY-MM-DD` (midnight UTC).
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return StoredDate::Missing;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return StoredDate::Missing;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return StoredDate::Valid(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return StoredDate::Valid(naive.and_utc());
        }
        if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return StoredDate::Valid(midnight.and_utc());
        }

        StoredDate::Invalid(raw.to_string())
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            StoredDate::Valid(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, StoredDate::Valid(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, StoredDate::Missing)
    }

    /// Value to persist. Missing dates become an empty string.
    pub fn to_raw(&self) -> String {
        match self {
            StoredDate::Missing => String::new(),
            StoredDate::Valid(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            StoredDate::Invalid(raw) => raw.clone(),
        }
    }
}

impl From<DateTime<Utc>> for StoredDate {
    fn from(dt: DateTime<Utc>) -> Self {
        StoredDate::Valid(dt)
    }
}

impl std::fmt::Display for StoredDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoredDate::Missing => write!(f, "<missing>"),
            StoredDate::Valid(_) => write!(f, "{}", self.to_raw()),
            StoredDate::Invalid(raw) => write!(f, "{:?}", raw),
        }
    }
}

impl Serialize for StoredDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw())
    }
}

impl<'de> Deserialize<'de> for StoredDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(StoredDate::parse(raw.as_deref()))
    }
}

/// A user-owned challenge instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub definition: ChallengeDefinition,
    /// Progress counter, starts at 0
    pub current: f64,
    pub status: ChallengeStatus,
    #[serde(rename = "startDate", default)]
    pub start_date: StoredDate,
    #[serde(rename = "endDate", default)]
    pub end_date: StoredDate,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Set by the store on insert
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Stored enum values that were read with a fallback
    #[serde(skip)]
    pub unrecognized: Vec<UnrecognizedField>,
}

/// A persisted enum value the reader did not recognize.
///
/// The typed field holds a fallback; the raw value is kept here so it can be
/// reported and is never written back over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedField {
    pub field: &'static str,
    pub raw: String,
}

impl Challenge {
    pub fn title(&self) -> &str {
        &self.definition.title
    }

    /// Raw stored status, if it was not a known one.
    pub fn unrecognized_status(&self) -> Option<&str> {
        self.unrecognized
            .iter()
            .find(|u| u.field == "status")
            .map(|u| u.raw.as_str())
    }

    pub fn target(&self) -> f64 {
        self.definition.target
    }
}

/// Partial update of a stored challenge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengePatch {
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ChallengeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ChallengePatch {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
            && self.completed_at.is_none()
    }

    /// Apply the patch to an in-memory copy.
    pub fn apply_to(&self, challenge: &mut Challenge) {
        if let Some(start) = self.start_date {
            challenge.start_date = StoredDate::Valid(start);
        }
        if let Some(end) = self.end_date {
            challenge.end_date = StoredDate::Valid(end);
        }
        if let Some(status) = self.status {
            challenge.status = status;
        }
        if let Some(completed_at) = self.completed_at {
            challenge.completed_at = Some(completed_at);
        }
    }
}

/// A permanent unlock record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub definition: AchievementDefinition,
    #[serde(rename = "unlockedAt")]
    pub unlocked_at: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Create an unlock record for a user.
    pub fn unlock(definition: &AchievementDefinition, user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            definition: definition.clone(),
            unlocked_at: now,
            created_at: None,
        }
    }
}
