//! Core types for review scheduling.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Milliseconds in one scheduling day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Opaque card identifier owned by an external card store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Milliseconds since the Unix epoch. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    /// Create from epoch milliseconds, rejecting negative values.
    pub fn from_millis(millis: i64) -> Result<Self> {
        if millis < 0 {
            return Err(ValidationError::NegativeTimestamp(millis));
        }
        Ok(Self(millis))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Create from a chrono UTC datetime.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Result<Self> {
        Self::from_millis(datetime.timestamp_millis())
    }

    /// Convert to a chrono UTC datetime, if chrono can represent it.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Shift forward by whole scheduling days.
    pub fn add_days(self, days: u32) -> Result<Self> {
        i64::from(days)
            .checked_mul(MS_PER_DAY)
            .and_then(|offset| self.0.checked_add(offset))
            .map(Self)
            .ok_or(ValidationError::TimestampOverflow)
    }
}

impl TryFrom<i64> for Timestamp {
    type Error = ValidationError;

    fn try_from(millis: i64) -> Result<Self> {
        Self::from_millis(millis)
    }
}

impl From<Timestamp> for i64 {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty judgment for a reviewed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Grade {
    Easy,
    Medium,
    Hard,
}

impl Grade {
    pub const ALL: [Grade; 3] = [Grade::Easy, Grade::Medium, Grade::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Convert to the 3-point button value (1 = hard, 3 = easy).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Hard => 1,
            Self::Medium => 2,
            Self::Easy => 3,
        }
    }

    /// Create from the 3-point button value.
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Hard),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Easy),
            other => Err(ValidationError::UnknownGrade(other.to_string())),
        }
    }
}

/// Lenient parse for user input: surrounding whitespace and case are ignored.
impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ValidationError::UnknownGrade(s.to_string())),
        }
    }
}

/// Exact lowercase names only; this is the persisted form.
impl TryFrom<String> for Grade {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str() == s)
            .ok_or(ValidationError::UnknownGrade(s))
    }
}

impl From<Grade> for &'static str {
    fn from(grade: Grade) -> Self {
        grade.as_str()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling metadata for one graded card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    pub card_id: CardId,
    pub last_reviewed_at: Timestamp,
    pub last_grade: Grade,
    pub next_review_at: Timestamp,
    pub interval_days: u32,
    pub repetitions: u32,
}

impl ReviewState {
    /// Whether the card is due at `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_at <= now
    }

    /// Check the invariants every graded state must hold.
    ///
    /// Used when state crosses a persistence boundary.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| ValidationError::InvalidState {
            card_id: self.card_id.to_string(),
            reason: reason.to_string(),
        };

        if self.interval_days < 1 {
            return Err(invalid("interval_days must be at least 1"));
        }
        match self.last_grade {
            Grade::Hard if self.repetitions != 0 => {
                return Err(invalid("repetitions must be 0 after a hard grade"));
            }
            Grade::Easy | Grade::Medium if self.repetitions == 0 => {
                return Err(invalid("repetitions must be positive after a passing grade"));
            }
            _ => {}
        }
        let expected = self
            .last_reviewed_at
            .add_days(self.interval_days)
            .map_err(|_| invalid("next_review_at out of range"))?;
        if self.next_review_at != expected {
            return Err(invalid(
                "next_review_at must equal last_reviewed_at plus interval_days",
            ));
        }
        Ok(())
    }
}

/// Where a card sits in the review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// Never graded.
    New,
    /// Graded, next review in the future.
    Scheduled,
    /// Graded, next review reached.
    Due,
}

impl CardStatus {
    pub fn of(state: Option<&ReviewState>, now: Timestamp) -> Self {
        match state {
            None => Self::New,
            Some(state) if state.is_due(now) => Self::Due,
            Some(_) => Self::Scheduled,
        }
    }
}
