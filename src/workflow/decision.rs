//! Editorial decision rules: the decision→status projection and the
//! display-status fallback used on author-facing pages.

use crate::db::models::{PaperStatus, Verdict};

/// Input to the decision write path. `reject` routes reuse the accept path
/// with the verdict forced, so both produce identical side effects.
#[derive(Debug, Clone)]
pub struct DecisionInput {
    pub verdict: Verdict,
    pub comment: Option<String>,
}

impl DecisionInput {
    /// Override the verdict to Reject, keeping everything else.
    pub fn forced_reject(mut self) -> Self {
        self.verdict = Verdict::Reject;
        self
    }
}

/// The fixed projection from a decision value onto the paper status mirror.
/// Unknown values project to `None`: the paper status is left unchanged.
pub fn paper_status_for(decision: &str) -> Option<PaperStatus> {
    match Verdict::parse(decision)? {
        Verdict::Accept => Some(PaperStatus::Accepted),
        Verdict::Reject => Some(PaperStatus::Rejected),
        Verdict::Revise => Some(PaperStatus::NeedsRevision),
    }
}

/// Status string shown to an author for a submission.
///
/// Three-level fallback, in this exact order: the decision value when a
/// decision row exists, else the paper's stored status, else "Pending".
pub fn display_status(decision: Option<&str>, paper_status: Option<&str>) -> String {
    if let Some(d) = decision {
        return d.to_string();
    }
    if let Some(s) = paper_status {
        return s.to_string();
    }
    "Pending".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_table_is_fixed() {
        assert_eq!(paper_status_for("Accept"), Some(PaperStatus::Accepted));
        assert_eq!(paper_status_for("Reject"), Some(PaperStatus::Rejected));
        assert_eq!(paper_status_for("Revise"), Some(PaperStatus::NeedsRevision));
    }

    #[test]
    fn unknown_decision_leaves_status_untouched() {
        assert_eq!(paper_status_for("Maybe"), None);
        assert_eq!(paper_status_for(""), None);
        assert_eq!(paper_status_for("accept"), None);
    }

    #[test]
    fn decision_wins_over_paper_status() {
        assert_eq!(display_status(Some("Accept"), Some("pending")), "Accept");
        assert_eq!(display_status(Some("Revise"), Some("accepted")), "Revise");
    }

    #[test]
    fn paper_status_wins_over_literal_pending() {
        assert_eq!(display_status(None, Some("under_review")), "under_review");
    }

    #[test]
    fn literal_pending_is_the_last_resort() {
        assert_eq!(display_status(None, None), "Pending");
    }

    #[test]
    fn forced_reject_overrides_only_the_verdict() {
        let input = DecisionInput {
            verdict: Verdict::Accept,
            comment: Some("x".to_string()),
        };
        let forced = input.forced_reject();
        assert_eq!(forced.verdict, Verdict::Reject);
        assert_eq!(forced.comment.as_deref(), Some("x"));
    }
}
