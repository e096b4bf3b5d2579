//! Commit command implementation.

use crate::cli::CommitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ledger::Ledger;
use crate::output::Formatter;

/// Execute the commit command.
pub async fn execute_commit(args: CommitArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.tx_hash.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Transaction hash cannot be empty".to_string(),
        ));
    }

    let ledger = Ledger::new(config.log_path()?);
    let record = ledger.commit(args.id.trim(), args.tx_hash.trim())?;
    println!("{}", formatter.activity_committed(&record)?);
    Ok(())
}
