//! Calculate command implementation.

use crate::cli::CalculateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use carbontrace_domain::{ActivityCategory, StructuredActivity};
use carbontrace_emissions::EmissionsCalculator;

/// Execute the calculate command.
pub async fn execute_calculate(
    args: CalculateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    if !args.quantity.is_finite() || args.quantity < 0.0 {
        return Err(CliError::InvalidInput(
            "Quantity must be a non-negative number".to_string(),
        ));
    }

    let item = args.item.trim();
    if item.is_empty() {
        return Err(CliError::InvalidInput("Item cannot be empty".to_string()));
    }

    let calculator = EmissionsCalculator::new(config.factor_table()?);
    let activity = StructuredActivity::new(
        ActivityCategory::Other,
        item,
        item,
        args.quantity,
        args.unit,
    );

    println!("{}", formatter.format_calculation(&calculator.calculate(&activity))?);

    Ok(())
}
