//! Analyze command implementation.

use super::now_secs;
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ledger::Ledger;
use crate::output::Formatter;
use carbontrace_analyzer::{AnalysisResponse, Analyzer};
use carbontrace_domain::{ActivityRecord, AnalyzedActivity};
use carbontrace_extractor::Extractor;
use carbontrace_llm::Provider;

/// Analyzer wired to the configured provider and factor table.
pub type CliAnalyzer = Analyzer<Extractor<Provider>>;

/// Build the analyzer described by `config`.
pub fn build_analyzer(config: &Config) -> Result<CliAnalyzer> {
    let provider = config.build_provider()?;
    let table = config.factor_table()?;
    Ok(Analyzer::from_provider(
        provider,
        config.extractor.clone(),
        table,
    )?)
}

/// Where and as whom to log analyzed activities.
pub struct SaveTarget<'a> {
    /// Activity log
    pub ledger: &'a Ledger,
    /// User id stamped on the record
    pub user_id: &'a str,
}

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let ledger = Ledger::new(config.log_path()?);
    let user_id = args.user.as_deref().unwrap_or(&config.settings.user_id);

    let target = args.save.then_some(SaveTarget {
        ledger: &ledger,
        user_id,
    });

    analyze_and_report(&analyzer, &args.description(), args.days_ago, target, formatter).await?;
    Ok(())
}

/// Run one description through the pipeline, print the outcome and
/// optionally log it.
pub async fn analyze_and_report(
    analyzer: &CliAnalyzer,
    description: &str,
    days_ago: u64,
    save: Option<SaveTarget<'_>>,
    formatter: &Formatter,
) -> Result<AnalyzedActivity> {
    let response = analyzer.analyze(description).await;

    if formatter.is_json() {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    let activity = response_into_activity(response)?;

    if !formatter.is_json() {
        println!("{}", formatter.format_activity(&activity)?);
    }

    if let Some(target) = save {
        let now = now_secs();
        let activity_date =
            now.saturating_sub(days_ago.saturating_mul(carbontrace_analyzer::SECONDS_PER_DAY));
        let record = ActivityRecord::new(
            activity.clone(),
            target.user_id,
            description,
            activity_date,
            now,
        );
        target.ledger.append(&record)?;

        let saved = formatter.activity_saved(&record);
        if !saved.is_empty() {
            println!("{}", saved);
        }
    }

    Ok(activity)
}

fn response_into_activity(response: AnalysisResponse) -> Result<AnalyzedActivity> {
    response.into_result().map_err(CliError::Analysis)
}
