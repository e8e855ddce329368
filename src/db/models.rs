use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Conference {
    pub id: i64,
    pub name: String,
    pub topic: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Paper {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub topic: String,
    pub keyword: Option<String>,
    pub file_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub institute: Option<String>,
    pub co_authors: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub paper_id: i64,
    pub user_id: i64,
    pub author_info_id: i64,
    pub conference_id: Option<i64>,
    pub track: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub submitted_elsewhere: bool,
    pub original_submission: bool,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PaperAssignment {
    pub id: i64,
    pub paper_id: i64,
    pub reviewer_id: i64,
    pub assigned_by: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub paper_id: i64,
    pub reviewer_id: i64,
    pub recommendation: String,
    pub feedback: Option<String>,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Decision {
    pub id: i64,
    pub paper_id: i64,
    pub organizer_id: i64,
    pub decision: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle of a paper, mirrored from the latest decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperStatus {
    Pending,
    UnderReview,
    Accepted,
    Rejected,
    NeedsRevision,
}

impl PaperStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperStatus::Pending => "pending",
            PaperStatus::UnderReview => "under_review",
            PaperStatus::Accepted => "accepted",
            PaperStatus::Rejected => "rejected",
            PaperStatus::NeedsRevision => "needs_revision",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaperStatus::Pending),
            "under_review" => Some(PaperStatus::UnderReview),
            "accepted" => Some(PaperStatus::Accepted),
            "rejected" => Some(PaperStatus::Rejected),
            "needs_revision" => Some(PaperStatus::NeedsRevision),
            _ => None,
        }
    }
}

/// Lifecycle of a single reviewer assignment. No transition graph is
/// enforced; any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::InProgress => "in_progress",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AssignmentStatus::Pending),
            "in_progress" => Some(AssignmentStatus::InProgress),
            "completed" => Some(AssignmentStatus::Completed),
            "cancelled" => Some(AssignmentStatus::Cancelled),
            _ => None,
        }
    }
}

/// A reviewer's or organizer's verdict on a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
    Revise,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accept => "Accept",
            Verdict::Reject => "Reject",
            Verdict::Revise => "Revise",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Accept" => Some(Verdict::Accept),
            "Reject" => Some(Verdict::Reject),
            "Revise" => Some(Verdict::Revise),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_status_round_trips_through_strings() {
        for s in ["pending", "under_review", "accepted", "rejected", "needs_revision"] {
            assert_eq!(PaperStatus::parse(s).unwrap().as_str(), s);
        }
        assert_eq!(PaperStatus::parse("archived"), None);
    }

    #[test]
    fn verdict_strings_are_title_case() {
        assert_eq!(Verdict::parse("Accept"), Some(Verdict::Accept));
        assert_eq!(Verdict::parse("accept"), None);
    }
}
