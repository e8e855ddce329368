//! Supersede/conflict planning for bulk reviewer assignment.
//!
//! An assignment batch is versioned, ledger-style: the new batch cancels
//! every prior non-cancelled row for the paper and inserts a fresh
//! generation, rather than mutating rows in place. The plan is computed
//! here as a pure function and executed by the db layer inside a single
//! transaction.

use chrono::NaiveDate;

use crate::db::models::{AssignmentStatus, PaperAssignment};

pub const MAX_REVIEWERS_PER_PAPER: usize = 4;

/// A validated request to assign a batch of reviewers to one paper.
#[derive(Debug, Clone)]
pub struct AssignmentBatch {
    pub reviewer_ids: Vec<i64>,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
}

impl AssignmentBatch {
    /// Validate the batch against `today`. Returns every problem found as
    /// (field, message) pairs; an empty vec means the batch is acceptable.
    pub fn validate(&self, today: NaiveDate) -> Vec<(String, String)> {
        let mut errors = Vec::new();

        if self.reviewer_ids.is_empty() {
            errors.push((
                "reviewers".to_string(),
                "at least one reviewer is required".to_string(),
            ));
        }

        if self.reviewer_ids.len() > MAX_REVIEWERS_PER_PAPER {
            errors.push((
                "reviewers".to_string(),
                format!("at most {} reviewers may be assigned", MAX_REVIEWERS_PER_PAPER),
            ));
        }

        let mut seen = Vec::new();
        for id in &self.reviewer_ids {
            if seen.contains(id) {
                errors.push((
                    "reviewers".to_string(),
                    format!("reviewer {} listed more than once", id),
                ));
            } else {
                seen.push(*id);
            }
        }

        if self.due_date <= today {
            errors.push((
                "due_date".to_string(),
                "due date must be a future date".to_string(),
            ));
        }

        errors
    }
}

/// The write plan for one batch: cancel the previous generation entirely,
/// then insert one pending row per requested reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupersedePlan {
    /// Ids of existing rows to mark cancelled. Always the full set of the
    /// paper's non-cancelled assignments, not just the requested reviewers.
    pub cancel_ids: Vec<i64>,
    /// Reviewer ids to insert with status `pending`.
    pub insert_reviewer_ids: Vec<i64>,
}

/// Reviewers in the request that already hold a non-cancelled assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentConflict {
    pub reviewer_ids: Vec<i64>,
}

/// Compute the supersede plan for a batch, given the paper's existing
/// assignments.
///
/// The conflict check inspects only the reviewers being newly requested.
/// Reviewers absent from the request never conflict; their rows are simply
/// cancelled along with the rest of the prior generation. Calling assign
/// again with a disjoint reviewer set therefore silently replaces everyone
/// previously assigned.
pub fn plan_assignment(
    existing: &[PaperAssignment],
    requested: &[i64],
) -> Result<SupersedePlan, AssignmentConflict> {
    let active: Vec<&PaperAssignment> = existing
        .iter()
        .filter(|a| a.status != AssignmentStatus::Cancelled.as_str())
        .collect();

    let conflicting: Vec<i64> = active
        .iter()
        .filter(|a| requested.contains(&a.reviewer_id))
        .map(|a| a.reviewer_id)
        .collect();

    if !conflicting.is_empty() {
        return Err(AssignmentConflict {
            reviewer_ids: conflicting,
        });
    }

    Ok(SupersedePlan {
        cancel_ids: active.iter().map(|a| a.id).collect(),
        insert_reviewer_ids: requested.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn assignment(id: i64, reviewer_id: i64, status: &str) -> PaperAssignment {
        PaperAssignment {
            id,
            paper_id: 1,
            reviewer_id,
            assigned_by: 99,
            due_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            status: status.to_string(),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn batch(reviewers: &[i64], due: NaiveDate) -> AssignmentBatch {
        AssignmentBatch {
            reviewer_ids: reviewers.to_vec(),
            due_date: due,
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn future() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    // ── Batch validation ─────────────────────────────────────────────

    #[test]
    fn valid_batch_passes() {
        assert!(batch(&[10, 11], future()).validate(today()).is_empty());
    }

    #[test]
    fn empty_reviewer_list_is_rejected() {
        let errors = batch(&[], future()).validate(today());
        assert!(errors.iter().any(|(f, _)| f == "reviewers"));
    }

    #[test]
    fn more_than_four_reviewers_is_rejected() {
        let errors = batch(&[1, 2, 3, 4, 5], future()).validate(today());
        assert!(errors.iter().any(|(_, m)| m.contains("at most 4")));
    }

    #[test]
    fn duplicate_reviewer_in_request_is_rejected() {
        let errors = batch(&[10, 10], future()).validate(today());
        assert!(errors.iter().any(|(_, m)| m.contains("more than once")));
    }

    #[test]
    fn due_date_today_or_past_is_rejected() {
        let errors = batch(&[10], today()).validate(today());
        assert!(errors.iter().any(|(f, _)| f == "due_date"));

        let past = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let errors = batch(&[10], past).validate(today());
        assert!(errors.iter().any(|(f, _)| f == "due_date"));
    }

    // ── Supersede planning ───────────────────────────────────────────

    #[test]
    fn first_batch_plans_inserts_only() {
        let plan = plan_assignment(&[], &[10, 11]).unwrap();
        assert!(plan.cancel_ids.is_empty());
        assert_eq!(plan.insert_reviewer_ids, vec![10, 11]);
    }

    #[test]
    fn new_batch_supersedes_all_prior_assignments() {
        // {A=10, B=11} assigned, then {C=12} requested: A and B are both
        // cancelled even though neither appears in the new request.
        let existing = vec![assignment(1, 10, "pending"), assignment(2, 11, "in_progress")];
        let plan = plan_assignment(&existing, &[12]).unwrap();
        assert_eq!(plan.cancel_ids, vec![1, 2]);
        assert_eq!(plan.insert_reviewer_ids, vec![12]);
    }

    #[test]
    fn requested_reviewer_with_active_assignment_conflicts() {
        // A already assigned; re-requesting {A, B} aborts the whole batch.
        let existing = vec![assignment(1, 10, "pending")];
        let err = plan_assignment(&existing, &[10, 11]).unwrap_err();
        assert_eq!(err.reviewer_ids, vec![10]);
    }

    #[test]
    fn conflict_check_spans_all_non_cancelled_statuses() {
        for status in ["pending", "in_progress", "completed"] {
            let existing = vec![assignment(1, 10, status)];
            assert!(plan_assignment(&existing, &[10]).is_err(), "status {}", status);
        }
    }

    #[test]
    fn cancelled_rows_neither_conflict_nor_get_recancelled() {
        let existing = vec![assignment(1, 10, "cancelled"), assignment(2, 11, "pending")];
        let plan = plan_assignment(&existing, &[10]).unwrap();
        assert_eq!(plan.cancel_ids, vec![2]);
        assert_eq!(plan.insert_reviewer_ids, vec![10]);
    }
}
