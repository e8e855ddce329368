//! End-to-end tests over the review-and-decision workflow logic: the
//! assignment supersede ledger, the decision→status projection with the
//! reject override, and the author-facing display-status fallback.

use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

use symposia::db::models::{PaperAssignment, PaperStatus, Verdict};
use symposia::workflow::assignment::{plan_assignment, AssignmentBatch};
use symposia::workflow::dashboard::{fill_month_series, last_n_months, status_chart};
use symposia::workflow::decision::{display_status, paper_status_for, DecisionInput};

fn assignment(id: i64, reviewer_id: i64, status: &str) -> PaperAssignment {
    PaperAssignment {
        id,
        paper_id: 7,
        reviewer_id,
        assigned_by: 1,
        due_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        status: status.to_string(),
        notes: None,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Assignment supersede: assign {A, B}, then assign {C}
// ---------------------------------------------------------------------------

/// Assigning reviewers {A, B}, then later {C}, cancels A's and B's rows and
/// leaves exactly one fresh pending row for C.
#[test]
fn second_batch_replaces_the_first_generation_entirely() {
    let first = plan_assignment(&[], &[10, 11]).expect("first batch should plan cleanly");
    assert!(first.cancel_ids.is_empty());
    assert_eq!(first.insert_reviewer_ids, vec![10, 11]);

    // Rows as they would exist after executing the first plan.
    let existing = vec![assignment(1, 10, "pending"), assignment(2, 11, "pending")];

    let second = plan_assignment(&existing, &[12]).expect("disjoint batch should plan cleanly");
    assert_eq!(second.cancel_ids, vec![1, 2]);
    assert_eq!(second.insert_reviewer_ids, vec![12]);
}

/// Re-requesting a reviewer who already holds a non-cancelled assignment
/// rejects the entire batch: nothing to cancel, nothing to insert.
#[test]
fn conflicting_batch_is_rejected_wholesale() {
    let existing = vec![assignment(1, 10, "pending"), assignment(2, 11, "completed")];

    let err = plan_assignment(&existing, &[10, 12]).unwrap_err();
    assert_eq!(err.reviewer_ids, vec![10]);
}

/// Once a reviewer's row is cancelled they may be assigned again.
#[test]
fn cancelled_assignment_frees_the_reviewer() {
    let existing = vec![assignment(1, 10, "cancelled")];
    let plan = plan_assignment(&existing, &[10]).expect("cancelled rows do not conflict");
    assert!(plan.cancel_ids.is_empty());
    assert_eq!(plan.insert_reviewer_ids, vec![10]);
}

#[test]
fn batch_validation_enforces_size_and_future_due_date() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let batch = AssignmentBatch {
        reviewer_ids: vec![1, 2, 3, 4, 5],
        due_date: today,
        notes: None,
    };
    let errors = batch.validate(today);
    assert!(errors.iter().any(|(f, _)| f == "reviewers"));
    assert!(errors.iter().any(|(f, _)| f == "due_date"));
}

// ---------------------------------------------------------------------------
// Decision projection and reject override
// ---------------------------------------------------------------------------

/// "reject" is "accept" with the verdict overridden, so both paths project
/// the same paper status and carry the same comment.
#[test]
fn reject_route_input_matches_explicit_reject() {
    let via_reject = DecisionInput {
        verdict: Verdict::Accept,
        comment: Some("x".to_string()),
    }
    .forced_reject();

    let explicit = DecisionInput {
        verdict: Verdict::Reject,
        comment: Some("x".to_string()),
    };

    assert_eq!(via_reject.verdict, explicit.verdict);
    assert_eq!(via_reject.comment, explicit.comment);
    assert_eq!(
        paper_status_for(via_reject.verdict.as_str()),
        Some(PaperStatus::Rejected)
    );
}

#[test]
fn decision_projection_covers_all_verdicts_and_nothing_else() {
    assert_eq!(paper_status_for("Accept"), Some(PaperStatus::Accepted));
    assert_eq!(paper_status_for("Reject"), Some(PaperStatus::Rejected));
    assert_eq!(paper_status_for("Revise"), Some(PaperStatus::NeedsRevision));
    assert_eq!(paper_status_for("Withdraw"), None);
}

// ---------------------------------------------------------------------------
// Display-status fallback (decision → paper status → "Pending")
// ---------------------------------------------------------------------------

#[test]
fn display_status_prefers_decision_over_any_paper_status() {
    for stored in ["pending", "under_review", "accepted"] {
        assert_eq!(display_status(Some("Revise"), Some(stored)), "Revise");
    }
}

#[test]
fn display_status_falls_back_in_order() {
    assert_eq!(display_status(None, Some("accepted")), "accepted");
    assert_eq!(display_status(None, None), "Pending");
}

// ---------------------------------------------------------------------------
// Dashboard aggregation helpers
// ---------------------------------------------------------------------------

#[test]
fn six_month_series_is_anchored_and_zero_filled() {
    let anchor = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let months = last_n_months(anchor, 6);
    assert_eq!(months.first().map(String::as_str), Some("2024-08"));
    assert_eq!(months.last().map(String::as_str), Some("2025-01"));

    let mut counts = HashMap::new();
    counts.insert("2024-12".to_string(), 2);
    let series = fill_month_series(&months, &counts);
    assert_eq!(series.len(), 6);
    assert_eq!(series.iter().map(|p| p.count).sum::<i64>(), 2);
}

#[test]
fn status_chart_never_comes_back_empty() {
    // With status data: fixed five-label order.
    let mut statuses = HashMap::new();
    statuses.insert("rejected".to_string(), 1);
    assert_eq!(status_chart(&statuses, &[]).len(), 5);

    // Without status data: topic grouping.
    let topics = vec![("Databases".to_string(), 4)];
    let chart = status_chart(&HashMap::new(), &topics);
    assert_eq!(chart.len(), 1);
    assert_eq!(chart[0].label, "Databases");

    // Without any data at all: hardcoded zeroed series.
    let chart = status_chart(&HashMap::new(), &[]);
    assert_eq!(chart.len(), 5);
    assert!(chart.iter().all(|p| p.count == 0));
}
