//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{HistoryArgs, ReplArgs};
use crate::commands::{self, analyze::SaveTarget, build_analyzer, CliAnalyzer};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ledger::Ledger;
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive REPL.
///
/// Every line that is not a REPL command is analyzed as an activity
/// description.
pub async fn run_repl(args: ReplArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("CarbonTrace REPL - Describe an activity, or type 'help' for commands")
    );
    println!();

    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let analyzer = build_analyzer(config)?;
    let ledger = Ledger::new(config.log_path()?);
    let mut save = args.save;

    loop {
        let prompt = if save { "carbontrace [save]> " } else { "carbontrace> " };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    ReplCommand::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplCommand::Help => print_help(formatter),
                    ReplCommand::Save(on) => {
                        save = on;
                        let state = if on { "on" } else { "off" };
                        println!("{}", formatter.info(&format!("Saving is {}", state)));
                    }
                    command => {
                        let result =
                            execute_repl_command(command, &analyzer, &ledger, save, config, formatter)
                                .await;
                        if let Err(e) = result {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Save(bool),
    Factors,
    Summary,
    History(Option<usize>),
    Analyze(String),
}

/// Parse a REPL line. Anything that is not a command is a description.
fn parse_repl_command(line: &str) -> ReplCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        ["exit" | "quit" | "q"] => ReplCommand::Exit,
        ["help" | "?"] => ReplCommand::Help,
        ["save", "on"] => ReplCommand::Save(true),
        ["save", "off"] => ReplCommand::Save(false),
        ["factors"] => ReplCommand::Factors,
        ["summary"] => ReplCommand::Summary,
        ["history"] => ReplCommand::History(None),
        ["history", n] if n.parse::<usize>().is_ok() => ReplCommand::History(n.parse().ok()),
        _ => ReplCommand::Analyze(line.to_string()),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    command: ReplCommand,
    analyzer: &CliAnalyzer,
    ledger: &Ledger,
    save: bool,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        ReplCommand::Analyze(description) => {
            let user_id = config.settings.user_id.as_str();
            let target = save.then_some(SaveTarget { ledger, user_id });
            commands::analyze::analyze_and_report(analyzer, &description, 0, target, formatter)
                .await?;
        }
        ReplCommand::Factors => commands::execute_factors(config, formatter).await?,
        ReplCommand::Summary => commands::execute_summary(config, formatter).await?,
        ReplCommand::History(limit) => {
            commands::execute_history(HistoryArgs { limit }, config, formatter).await?
        }
        ReplCommand::Exit | ReplCommand::Help | ReplCommand::Save(_) => {}
    }

    Ok(())
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::app_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <description>       - Analyze an activity, e.g. I drove 15km to work");
    println!("  save on|off         - Log analyzed activities");
    println!("  history [n]         - Show logged activities, newest first");
    println!("  summary             - Summarize the logged footprint");
    println!("  factors             - List emission factors");
    println!("  help, ?             - Show this help");
    println!("  exit, quit, q       - Exit REPL");
    println!();
}
