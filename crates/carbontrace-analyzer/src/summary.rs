//! Aggregates over logged activity records

use carbontrace_domain::{ActivityCategory, ActivityRecord};
use carbontrace_emissions::round3;
use serde::Serialize;

/// Seconds in one day
pub const SECONDS_PER_DAY: u64 = 86_400;

const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// CO₂e logged under one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// The category
    pub category: ActivityCategory,
    /// Number of records
    pub count: usize,
    /// Summed kg CO₂e
    pub co2e: f64,
}

/// Footprint statistics over a set of records
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintSummary {
    /// Number of records
    pub activity_count: usize,
    /// Summed kg CO₂e over all records
    pub total_co2e: f64,
    /// Records in `Committed` status
    pub committed_count: usize,
    /// One entry per category, in category order, zero-filled
    pub by_category: Vec<CategoryTotal>,
    /// kg CO₂e dated in the current week (Monday 00:00 UTC onwards)
    pub this_week_co2e: f64,
    /// kg CO₂e dated in the previous week
    pub last_week_co2e: f64,
    /// Percentage change from last week to this week
    pub weekly_change_percent: f64,
}

impl FootprintSummary {
    /// Summarize `records` as of `now` (Unix seconds)
    pub fn from_records(records: &[ActivityRecord], now: u64) -> Self {
        let this_week_start = week_start(now);
        let last_week_start = this_week_start.saturating_sub(SECONDS_PER_WEEK);

        let mut by_category: Vec<CategoryTotal> = ActivityCategory::ALL
            .iter()
            .map(|category| CategoryTotal {
                category: *category,
                count: 0,
                co2e: 0.0,
            })
            .collect();

        let mut total = 0.0;
        let mut this_week = 0.0;
        let mut last_week = 0.0;
        let mut committed_count = 0;

        for record in records {
            let co2e = record.co2e();
            total += co2e;

            if record.is_committed() {
                committed_count += 1;
            }

            if let Some(entry) = by_category
                .iter_mut()
                .find(|t| t.category == record.activity.activity.category)
            {
                entry.count += 1;
                entry.co2e += co2e;
            }

            if record.activity_date >= this_week_start {
                this_week += co2e;
            } else if record.activity_date >= last_week_start {
                last_week += co2e;
            }
        }

        for entry in &mut by_category {
            entry.co2e = round3(entry.co2e);
        }

        Self {
            activity_count: records.len(),
            total_co2e: round3(total),
            committed_count,
            by_category,
            this_week_co2e: round3(this_week),
            last_week_co2e: round3(last_week),
            weekly_change_percent: weekly_change(this_week, last_week),
        }
    }
}

/// Start of the Monday-based UTC week containing `timestamp`
fn week_start(timestamp: u64) -> u64 {
    let days = timestamp / SECONDS_PER_DAY;
    // 1970-01-01 was a Thursday
    let days_since_monday = (days + 3) % 7;
    days.saturating_sub(days_since_monday) * SECONDS_PER_DAY
}

fn weekly_change(this_week: f64, last_week: f64) -> f64 {
    if last_week > 0.0 {
        (this_week - last_week) / last_week * 100.0
    } else if this_week > 0.0 {
        100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbontrace_domain::{AnalyzedActivity, StructuredActivity, Unit};

    // Wednesday 2024-01-17 12:00:00 UTC
    const NOW: u64 = 1_705_492_800;
    // Monday 2024-01-15 00:00:00 UTC
    const THIS_MONDAY: u64 = 1_705_276_800;

    fn record(category: ActivityCategory, co2e: f64, activity_date: u64) -> ActivityRecord {
        let activity = StructuredActivity::new(category, "test", "item", 1.0, Unit::Serving);
        ActivityRecord::new(
            AnalyzedActivity::new(activity, co2e),
            "user-1",
            "test",
            activity_date,
            activity_date,
        )
    }

    #[test]
    fn test_week_start() {
        assert_eq!(week_start(NOW), THIS_MONDAY);
        assert_eq!(week_start(THIS_MONDAY), THIS_MONDAY);
        assert_eq!(week_start(THIS_MONDAY - 1), THIS_MONDAY - SECONDS_PER_WEEK);
        // Tuesday 1970-01-06 falls in the week of Monday 1970-01-05
        assert_eq!(week_start(5 * SECONDS_PER_DAY), 4 * SECONDS_PER_DAY);
        // The first days of the epoch clamp to zero
        assert_eq!(week_start(SECONDS_PER_DAY), 0);
    }

    #[test]
    fn test_empty() {
        let summary = FootprintSummary::from_records(&[], NOW);
        assert_eq!(summary.activity_count, 0);
        assert_eq!(summary.total_co2e, 0.0);
        assert_eq!(summary.weekly_change_percent, 0.0);
        assert_eq!(summary.by_category.len(), 5);
        assert!(summary.by_category.iter().all(|t| t.co2e == 0.0));
    }

    #[test]
    fn test_totals_and_categories() {
        let mut committed = record(ActivityCategory::ShoppingLifestyle, 33.4, NOW);
        committed.mark_committed("0xabc").unwrap();

        let records = vec![
            record(ActivityCategory::Transportation, 2.88, NOW),
            record(ActivityCategory::FoodConsumption, 1.38, NOW),
            record(ActivityCategory::Transportation, 4.635, NOW),
            committed,
        ];

        let summary = FootprintSummary::from_records(&records, NOW);
        assert_eq!(summary.activity_count, 4);
        assert_eq!(summary.total_co2e, 42.295);
        assert_eq!(summary.committed_count, 1);

        let transport = &summary.by_category[0];
        assert_eq!(transport.category, ActivityCategory::Transportation);
        assert_eq!(transport.count, 2);
        assert_eq!(transport.co2e, 7.515);
        assert_eq!(summary.by_category[1].count, 0);
    }

    #[test]
    fn test_weekly_change() {
        let records = vec![
            record(ActivityCategory::Other, 10.0, THIS_MONDAY - SECONDS_PER_DAY),
            record(ActivityCategory::Other, 15.0, THIS_MONDAY + 60),
            // Two weeks ago, outside both windows
            record(ActivityCategory::Other, 100.0, THIS_MONDAY - 10 * SECONDS_PER_DAY),
        ];

        let summary = FootprintSummary::from_records(&records, NOW);
        assert_eq!(summary.this_week_co2e, 15.0);
        assert_eq!(summary.last_week_co2e, 10.0);
        assert_eq!(summary.weekly_change_percent, 50.0);
    }

    #[test]
    fn test_weekly_change_from_zero() {
        let records = vec![record(ActivityCategory::Other, 3.0, NOW)];
        let summary = FootprintSummary::from_records(&records, NOW);
        assert_eq!(summary.weekly_change_percent, 100.0);
    }

    #[test]
    fn test_weekly_change_decrease() {
        let records = vec![
            record(ActivityCategory::Other, 20.0, THIS_MONDAY - SECONDS_PER_DAY),
            record(ActivityCategory::Other, 5.0, NOW),
        ];
        let summary = FootprintSummary::from_records(&records, NOW);
        assert_eq!(summary.weekly_change_percent, -75.0);
    }
}
