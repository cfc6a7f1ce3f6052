//! CLI entry point for `rowscope`.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rowscope::gate::evaluator::SafetyEvaluator;
use rowscope::output::report::{self, StatementReport};
use rowscope::parser::sql_parser::{self, SqlDialect};
use rowscope::policy::config::SafetyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

#[derive(Parser)]
#[command(
    name = "rowscope",
    about = "Check SELECT statements for unrestricted reads of sensitive tables"
)]
struct Cli {
    /// Input SQL files (stdin when neither files nor --query are given)
    input: Vec<PathBuf>,

    /// SQL text to check
    #[arg(long)]
    query: Option<String>,

    /// JSON configuration with `safe_tables` and `ownership_columns`
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQL dialect: mysql, postgres or generic
    #[arg(long, default_value = "mysql")]
    dialect: SqlDialect,

    /// Caller identifier attached to denial records
    #[arg(long, default_value_t = 0)]
    caller_id: u32,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &cli.config {
        Some(path) => match SafetyConfig::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                process::exit(2);
            }
        },
        None => SafetyConfig::default(),
    };

    let evaluator = match SafetyEvaluator::from_config(&config) {
        Ok(evaluator) => evaluator,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    // Collect SQL from files, --query, or stdin
    let mut sql = String::new();
    for path in &cli.input {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                sql.push_str(&content);
                sql.push('\n');
            }
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(2);
            }
        }
    }
    if let Some(query) = &cli.query {
        sql.push_str(query);
        sql.push('\n');
    }
    if cli.input.is_empty() && cli.query.is_none() {
        if let Err(e) = std::io::stdin().read_to_string(&mut sql) {
            eprintln!("Error reading stdin: {e}");
            process::exit(2);
        }
    }

    let statements = match sql_parser::parse_statements(&sql, cli.dialect) {
        Ok(statements) => statements,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    if statements.is_empty() {
        eprintln!("No SQL statements provided");
        process::exit(2);
    }

    if cli.verbose {
        eprintln!(
            "Checking {} statements with {} safe tables and {} ownership patterns",
            statements.len(),
            config.safe_tables.len(),
            evaluator.policy().patterns().len()
        );
    }

    let reports: Vec<StatementReport> = statements
        .iter()
        .enumerate()
        .map(|(i, stmt)| StatementReport {
            index: i + 1,
            sql: stmt.to_string(),
            verdict: evaluator.evaluate(stmt, cli.caller_id),
        })
        .collect();

    let rendered = match cli.format {
        OutputFormat::Text => report::build_text_report(&reports),
        OutputFormat::Json => match report::build_json_report(&reports) {
            Ok(json) => json + "\n",
            Err(e) => {
                eprintln!("{e}");
                process::exit(2);
            }
        },
    };
    print!("{rendered}");

    // Exit code 1 when anything was denied
    if reports.iter().any(|r| !r.verdict.is_admitted()) {
        process::exit(1);
    }
}
