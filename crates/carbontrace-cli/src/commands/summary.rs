//! Summary command implementation.

use super::now_secs;
use crate::config::Config;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::output::Formatter;
use carbontrace_analyzer::FootprintSummary;

/// Execute the summary command.
pub async fn execute_summary(config: &Config, formatter: &Formatter) -> Result<()> {
    let ledger = Ledger::new(config.log_path()?);
    let records = ledger.load()?;
    let summary = FootprintSummary::from_records(&records, now_secs());
    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}
