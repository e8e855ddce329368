//! Pure aggregation helpers for the dashboard payload: calendar-month
//! bucketing for the submission/registration series and the status chart's
//! fallback ordering.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::db::models::PaperStatus;

/// Fixed display order for the status chart.
pub const STATUS_DISPLAY_ORDER: [PaperStatus; 5] = [
    PaperStatus::Pending,
    PaperStatus::UnderReview,
    PaperStatus::Accepted,
    PaperStatus::Rejected,
    PaperStatus::NeedsRevision,
];

/// One labelled point in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub count: i64,
}

/// The last `n` calendar months ending at `anchor`'s month, oldest first,
/// as "YYYY-MM" keys.
pub fn last_n_months(anchor: NaiveDate, n: u32) -> Vec<String> {
    let mut year = anchor.year();
    let mut month = anchor.month() as i32;
    let mut keys = Vec::with_capacity(n as usize);
    for _ in 0..n {
        keys.push(format!("{:04}-{:02}", year, month));
        month -= 1;
        if month == 0 {
            month = 12;
            year -= 1;
        }
    }
    keys.reverse();
    keys
}

/// Zero-fill a month-keyed count map into an ordered series over `months`.
pub fn fill_month_series(months: &[String], counts: &HashMap<String, i64>) -> Vec<ChartPoint> {
    months
        .iter()
        .map(|m| ChartPoint {
            label: m.clone(),
            count: counts.get(m).copied().unwrap_or(0),
        })
        .collect()
}

/// Build the paper status chart.
///
/// Statuses render in [`STATUS_DISPLAY_ORDER`] with missing statuses
/// zero-filled. When no status data exists at all, fall back to the topic
/// grouping; when that is empty too, fall back to a zeroed series over the
/// fixed status labels so the chart always has axes to draw.
pub fn status_chart(
    status_counts: &HashMap<String, i64>,
    topic_counts: &[(String, i64)],
) -> Vec<ChartPoint> {
    if !status_counts.is_empty() {
        return STATUS_DISPLAY_ORDER
            .iter()
            .map(|s| ChartPoint {
                label: s.as_str().to_string(),
                count: status_counts.get(s.as_str()).copied().unwrap_or(0),
            })
            .collect();
    }

    if !topic_counts.is_empty() {
        return topic_counts
            .iter()
            .map(|(topic, count)| ChartPoint {
                label: topic.clone(),
                count: *count,
            })
            .collect();
    }

    STATUS_DISPLAY_ORDER
        .iter()
        .map(|s| ChartPoint {
            label: s.as_str().to_string(),
            count: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn six_months_from_midyear() {
        let months = last_n_months(date(2025, 8, 15), 6);
        assert_eq!(
            months,
            vec!["2025-03", "2025-04", "2025-05", "2025-06", "2025-07", "2025-08"]
        );
    }

    #[test]
    fn month_window_crosses_year_boundary() {
        let months = last_n_months(date(2025, 2, 1), 6);
        assert_eq!(
            months,
            vec!["2024-09", "2024-10", "2024-11", "2024-12", "2025-01", "2025-02"]
        );
    }

    #[test]
    fn series_is_zero_filled_for_quiet_months() {
        let months = last_n_months(date(2025, 8, 15), 3);
        let mut counts = HashMap::new();
        counts.insert("2025-07".to_string(), 4);
        let series = fill_month_series(&months, &counts);
        assert_eq!(series[0], ChartPoint { label: "2025-06".into(), count: 0 });
        assert_eq!(series[1], ChartPoint { label: "2025-07".into(), count: 4 });
        assert_eq!(series[2], ChartPoint { label: "2025-08".into(), count: 0 });
    }

    #[test]
    fn stray_months_outside_the_window_are_ignored() {
        let months = last_n_months(date(2025, 8, 15), 3);
        let mut counts = HashMap::new();
        counts.insert("2024-01".to_string(), 99);
        let series = fill_month_series(&months, &counts);
        assert!(series.iter().all(|p| p.count == 0));
    }

    #[test]
    fn status_chart_uses_fixed_order_and_zero_fills() {
        let mut counts = HashMap::new();
        counts.insert("accepted".to_string(), 3);
        counts.insert("pending".to_string(), 7);
        let chart = status_chart(&counts, &[]);
        let labels: Vec<&str> = chart.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["pending", "under_review", "accepted", "rejected", "needs_revision"]
        );
        assert_eq!(chart[0].count, 7);
        assert_eq!(chart[1].count, 0);
        assert_eq!(chart[2].count, 3);
    }

    #[test]
    fn status_chart_falls_back_to_topics_then_zeroes() {
        let topics = vec![("Systems".to_string(), 2), ("ML".to_string(), 5)];
        let chart = status_chart(&HashMap::new(), &topics);
        assert_eq!(chart[0], ChartPoint { label: "Systems".into(), count: 2 });
        assert_eq!(chart[1], ChartPoint { label: "ML".into(), count: 5 });

        let chart = status_chart(&HashMap::new(), &[]);
        assert_eq!(chart.len(), 5);
        assert!(chart.iter().all(|p| p.count == 0));
    }
}
