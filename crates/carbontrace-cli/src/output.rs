//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use carbontrace_analyzer::FootprintSummary;
use carbontrace_domain::{ActivityRecord, AnalyzedActivity, CommitStatus};
use carbontrace_emissions::{Calculation, CalculationOutcome, FactorTable};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analyzed activity.
    pub fn format_activity(&self, activity: &AnalyzedActivity) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(activity)?),
            OutputFormat::Quiet => Ok(format!("{}", activity.co2e)),
            OutputFormat::Table => {
                let inner = &activity.activity;
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Activity", inner.activity_name.as_str()]);
                builder.push_record(["Category", inner.category.label()]);
                builder.push_record(["Item", inner.item_name.as_str()]);
                builder.push_record([
                    "Quantity".to_string(),
                    format!("{} {}", inner.quantity, inner.unit),
                ]);
                builder.push_record(["CO₂e".to_string(), format_co2e(activity.co2e)]);
                if let Some(reasoning) = &inner.reasoning {
                    builder.push_record(["Reasoning", reasoning.as_str()]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a calculator result.
    pub fn format_calculation(&self, calculation: &Calculation) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(calculation)?),
            OutputFormat::Quiet => Ok(format!("{}", calculation.co2e)),
            OutputFormat::Table => {
                let detail = match &calculation.outcome {
                    CalculationOutcome::Computed {
                        factor_id,
                        normalized_quantity,
                    } => format!("factor '{}' applied to {}", factor_id, normalized_quantity),
                    CalculationOutcome::UnknownItem => {
                        return Ok(self.warning("No emission factor for this item; CO₂e is 0"))
                    }
                    CalculationOutcome::IncompatibleUnit { from, to } => {
                        return Ok(self.warning(&format!(
                            "Cannot convert {} into {}; CO₂e is 0",
                            from, to
                        )))
                    }
                    CalculationOutcome::OutOfRange { quantity } => {
                        return Ok(self.warning(&format!(
                            "Quantity {} is out of range; CO₂e is 0",
                            quantity
                        )))
                    }
                };
                Ok(self.success(&format!("{} ({})", format_co2e(calculation.co2e), detail)))
            }
        }
    }

    /// Format the factor table.
    pub fn format_factors(&self, table: &FactorTable) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let factors: Vec<_> = table.iter().collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "factors": factors,
                    "aliases": table.aliases(),
                }))?)
            }
            OutputFormat::Quiet => Ok(table.names().collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                if table.is_empty() {
                    return Ok(self.colorize("No emission factors.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "kg CO₂e", "Per", "Description"]);
                for factor in table.iter() {
                    builder.push_record([
                        factor.name.clone(),
                        factor.value.to_string(),
                        factor.unit.to_string(),
                        factor.description.clone(),
                    ]);
                }
                let mut output = self.render(builder);

                if !table.aliases().is_empty() {
                    output.push_str("\n\nAliases:");
                    for (alias, target) in table.aliases() {
                        output.push_str(&format!("\n  {} → {}", alias, target));
                    }
                }
                Ok(output)
            }
        }
    }

    /// Format logged records.
    pub fn format_records(&self, records: &[ActivityRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if records.is_empty() {
                    return Ok(self.colorize("No activities logged.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Activity", "Category", "Quantity", "CO₂e", "Status"]);
                for record in records {
                    let inner = &record.activity.activity;
                    let status = match record.status {
                        CommitStatus::Pending => "Pending",
                        CommitStatus::Committed => "Committed",
                    };
                    builder.push_record([
                        record.id.to_string()[..8].to_string(), // Truncate ID for readability
                        inner.activity_name.clone(),
                        inner.category.label().to_string(),
                        format!("{} {}", inner.quantity, inner.unit),
                        format_co2e(record.co2e()),
                        status.to_string(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a footprint summary.
    pub fn format_summary(&self, summary: &FootprintSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Quiet => Ok(format!("{}", summary.total_co2e)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                builder.push_record(["Activities".to_string(), summary.activity_count.to_string()]);
                builder.push_record(["Cumulative footprint".to_string(), format_co2e(summary.total_co2e)]);
                builder.push_record(["Committed".to_string(), summary.committed_count.to_string()]);
                builder.push_record(["This week".to_string(), format_co2e(summary.this_week_co2e)]);
                builder.push_record(["Last week".to_string(), format_co2e(summary.last_week_co2e)]);
                builder.push_record([
                    "Weekly change".to_string(),
                    format!("{:+.1}%", summary.weekly_change_percent),
                ]);
                for total in &summary.by_category {
                    builder.push_record([
                        total.category.label().to_string(),
                        format!("{} ({})", format_co2e(total.co2e), total.count),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the result of saving a record.
    pub fn activity_saved(&self, record: &ActivityRecord) -> String {
        match self.format {
            OutputFormat::Table => self.success(&format!("Activity logged: {}", record.id)),
            _ => String::new(),
        }
    }

    /// Format the result of committing a record.
    pub fn activity_committed(&self, record: &ActivityRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Quiet => Ok(record.id.to_string()),
            OutputFormat::Table => Ok(self.success(&format!(
                "Activity {} committed ({})",
                record.id,
                record.tx_hash.as_deref().unwrap_or_default()
            ))),
        }
    }

    /// Whether output is machine-readable.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Format a CO₂e value for display.
pub fn format_co2e(kg: f64) -> String {
    format!("{:.3} kg CO₂e", kg)
}
