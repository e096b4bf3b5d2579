//! History command implementation.

use crate::cli::HistoryArgs;
use crate::config::Config;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::output::Formatter;
use carbontrace_domain::ActivityRecord;

/// Execute the history command.
pub async fn execute_history(args: HistoryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let ledger = Ledger::new(config.log_path()?);
    let records = newest_first(ledger.load()?, args.limit);
    println!("{}", formatter.format_records(&records)?);
    Ok(())
}

/// Order records newest first and apply the limit.
fn newest_first(mut records: Vec<ActivityRecord>, limit: Option<usize>) -> Vec<ActivityRecord> {
    records.sort_by(|a, b| {
        b.activity_date
            .cmp(&a.activity_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbontrace_domain::{ActivityCategory, AnalyzedActivity, StructuredActivity, Unit};

    fn record(activity_date: u64) -> ActivityRecord {
        let activity =
            StructuredActivity::new(ActivityCategory::Other, "test", "jeans", 1.0, Unit::Serving);
        ActivityRecord::new(
            AnalyzedActivity::new(activity, 33.4),
            "local",
            "jeans",
            activity_date,
            activity_date,
        )
    }

    #[test]
    fn test_newest_first_with_limit() {
        let records = vec![record(100), record(300), record(200)];
        let sorted = newest_first(records, Some(2));
        let dates: Vec<u64> = sorted.iter().map(|r| r.activity_date).collect();
        assert_eq!(dates, vec![300, 200]);
    }
}
