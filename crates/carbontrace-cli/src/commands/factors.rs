//! Factors command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the factors command.
pub async fn execute_factors(config: &Config, formatter: &Formatter) -> Result<()> {
    let table = config.factor_table()?;
    println!("{}", formatter.format_factors(&table)?);
    Ok(())
}
