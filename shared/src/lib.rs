use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Response envelope used by every dashboard endpoint.
///
/// Older endpoints still answer with `status`/`msg`, and some send both
/// spellings at once; `success` and a non-empty `message` win when they do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEnvelope<T>")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

/// Wire shape accepting either spelling of every envelope field
#[derive(Deserialize)]
struct RawEnvelope<T> {
    success: Option<bool>,
    status: Option<bool>,
    message: Option<String>,
    msg: Option<String>,
    data: Option<T>,
}

impl<T> TryFrom<RawEnvelope<T>> for ApiEnvelope<T> {
    type Error = String;

    fn try_from(raw: RawEnvelope<T>) -> Result<Self, Self::Error> {
        let success = raw
            .success
            .or(raw.status)
            .ok_or_else(|| "missing field `success`".to_string())?;
        let message = raw
            .message
            .filter(|m| !m.is_empty())
            .or(raw.msg)
            .unwrap_or_default();
        Ok(Self {
            success,
            message,
            data: raw.data,
        })
    }
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Reason a child was awarded coins. Each category is worth a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinCategory {
    #[serde(rename = "class", alias = "class-completion", alias = "class_completion")]
    ClassCompletion,
    #[serde(rename = "homework", alias = "homework-submission", alias = "homework_submission")]
    HomeworkSubmission,
    #[serde(rename = "game", alias = "game-completion", alias = "game_completion")]
    GameCompletion,
}

impl CoinCategory {
    pub const ALL: [CoinCategory; 3] = [
        CoinCategory::ClassCompletion,
        CoinCategory::HomeworkSubmission,
        CoinCategory::GameCompletion,
    ];

    /// Fixed coin value awarded for this category
    pub fn points(self) -> u64 {
        match self {
            CoinCategory::ClassCompletion => 10,
            CoinCategory::HomeworkSubmission => 5,
            CoinCategory::GameCompletion => 15,
        }
    }

    /// Short key used on the wire and inside transaction ids
    pub fn key(self) -> &'static str {
        match self {
            CoinCategory::ClassCompletion => "class",
            CoinCategory::HomeworkSubmission => "homework",
            CoinCategory::GameCompletion => "game",
        }
    }

    /// Label shown next to a transaction
    pub fn label(self) -> &'static str {
        match self {
            CoinCategory::ClassCompletion => "Class completed",
            CoinCategory::HomeworkSubmission => "Homework submitted",
            CoinCategory::GameCompletion => "Game completed",
        }
    }
}

impl fmt::Display for CoinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CoinCategory {
    type Err = CoinCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" | "class-completion" | "class_completion" => Ok(CoinCategory::ClassCompletion),
            "homework" | "homework-submission" | "homework_submission" => {
                Ok(CoinCategory::HomeworkSubmission)
            }
            "game" | "game-completion" | "game_completion" => Ok(CoinCategory::GameCompletion),
            _ => Err(CoinCategoryParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoinCategoryParseError(pub String);

impl fmt::Display for CoinCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown coin category '{}' (expected class, homework or game)",
            self.0
        )
    }
}

impl std::error::Error for CoinCategoryParseError {}

/// Coin transaction as handed to the view layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinTransaction {
    /// Format: "coin::<category>::<sequence>"
    pub id: String,
    pub child_id: String,
    pub category: CoinCategory,
    pub points: u64,
    pub description: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Balance card data for a single child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub child_id: String,
    pub total_coins: u64,
    pub earned_today: u64,
    pub recent_transactions: Vec<CoinTransaction>,
}

/// A child linked to the signed-in parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub id: String,
    pub name: String,
    pub grade: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub profile: ParentProfile,
}

/// Lesson completion for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub subject: String,
    pub completed_lessons: u32,
    pub total_lessons: u32,
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProgress {
    pub child_id: String,
    pub subjects: Vec<SubjectProgress>,
    #[serde(default)]
    pub streak_days: u32,
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// A tutoring session booked for a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub child_id: String,
    pub subject: String,
    pub tutor_name: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub child_id: String,
    pub subject: String,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Pending,
    Submitted,
    Graded,
    Overdue,
}

impl HomeworkStatus {
    pub fn as_query(self) -> &'static str {
        match self {
            HomeworkStatus::Pending => "pending",
            HomeworkStatus::Submitted => "submitted",
            HomeworkStatus::Graded => "graded",
            HomeworkStatus::Overdue => "overdue",
        }
    }

    /// Submitted and graded work both count as done
    pub fn is_done(self) -> bool {
        matches!(self, HomeworkStatus::Submitted | HomeworkStatus::Graded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeworkAssignment {
    pub id: String,
    pub child_id: String,
    pub title: String,
    pub subject: String,
    pub due_date: NaiveDate,
    pub status: HomeworkStatus,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    #[default]
    Weekly,
    Monthly,
    AllTime,
}

impl LeaderboardPeriod {
    pub fn as_query(self) -> &'static str {
        match self {
            LeaderboardPeriod::Weekly => "weekly",
            LeaderboardPeriod::Monthly => "monthly",
            LeaderboardPeriod::AllTime => "all_time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub child_id: String,
    pub name: String,
    pub coins: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Billing,
    Technical,
    Scheduling,
    #[default]
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    pub subject: String,
    pub description: String,
    pub category: TicketCategory,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub description: String,
    pub category: TicketCategory,
}
