//! CLI command definitions and argument parsing.

use carbontrace_domain::Unit;
use carbontrace_extractor::canonical_unit;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CarbonTrace CLI - Turn activity descriptions into CO₂e estimates.
#[derive(Debug, Parser)]
#[command(name = "carbontrace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CARBONTRACE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (values or IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a free-text activity description
    Analyze(AnalyzeArgs),

    /// Calculate CO₂e for an already structured activity (offline)
    Calculate(CalculateArgs),

    /// List the active emission factors
    Factors,

    /// List logged activities, newest first
    History(HistoryArgs),

    /// Summarize the footprint of logged activities
    Summary,

    /// Mark a logged activity as committed
    Commit(CommitArgs),

    /// Enter interactive REPL mode
    Repl(ReplArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Activity description, e.g. "I drove 15km to work in my petrol car"
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub text: Vec<String>,

    /// Append the analyzed activity to the activity log
    #[arg(short, long)]
    pub save: bool,

    /// User id for the saved record (defaults to settings.user_id)
    #[arg(short, long)]
    pub user: Option<String>,

    /// The activity happened this many days ago
    #[arg(long, default_value_t = 0)]
    pub days_ago: u64,
}

impl AnalyzeArgs {
    /// The description as one string.
    pub fn description(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for the calculate command.
#[derive(Debug, Parser)]
pub struct CalculateArgs {
    /// Item keyword, e.g. "petrol car"
    #[arg(short, long)]
    pub item: String,

    /// Quantity, in `unit`
    #[arg(short, long)]
    pub quantity: f64,

    /// Unit (g, kg, km, mile, hour, kwh, serving, or a common spelling)
    #[arg(short, long, value_parser = parse_unit)]
    pub unit: Unit,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Maximum number of records
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the commit command.
#[derive(Debug, Parser)]
pub struct CommitArgs {
    /// Activity id
    pub id: String,

    /// Transaction hash to attach
    #[arg(long)]
    pub tx_hash: String,
}

/// Arguments for the REPL.
#[derive(Debug, Default, Parser)]
pub struct ReplArgs {
    /// Append every successful analysis to the activity log
    #[arg(short, long)]
    pub save: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

fn parse_unit(s: &str) -> Result<Unit, String> {
    canonical_unit(s).ok_or_else(|| {
        format!(
            "unknown unit '{}' (expected one of: g, kg, km, mile, hour, kwh, serving)",
            s
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_repl() {
        let cli = Cli::parse_from(["carbontrace"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "carbontrace",
            "analyze",
            "--save",
            "I",
            "drove",
            "15km",
        ]);
        match cli.command {
            Some(Command::Analyze(args)) => {
                assert!(args.save);
                assert_eq!(args.description(), "I drove 15km");
                assert_eq!(args.days_ago, 0);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_calculate_command() {
        let cli = Cli::parse_from([
            "carbontrace",
            "calculate",
            "--item",
            "petrol car",
            "--quantity",
            "15",
            "--unit",
            "miles",
        ]);
        match cli.command {
            Some(Command::Calculate(args)) => {
                assert_eq!(args.item, "petrol car");
                assert_eq!(args.quantity, 15.0);
                assert_eq!(args.unit, Unit::Mile);
            }
            _ => panic!("Expected Calculate command"),
        }
    }

    #[test]
    fn test_calculate_rejects_unknown_unit() {
        let result = Cli::try_parse_from([
            "carbontrace",
            "calculate",
            "--item",
            "petrol",
            "--quantity",
            "5",
            "--unit",
            "litre",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_commit_command() {
        let cli = Cli::parse_from(["carbontrace", "commit", "abc", "--tx-hash", "0x1"]);
        match cli.command {
            Some(Command::Commit(args)) => {
                assert_eq!(args.id, "abc");
                assert_eq!(args.tx_hash, "0x1");
            }
            _ => panic!("Expected Commit command"),
        }
    }

    #[test]
    fn test_global_format() {
        let cli = Cli::parse_from(["carbontrace", "factors", "--format", "json"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }
}
