use clap::{Parser, ValueEnum};
use fund_ledger::application::engine::LedgerEngine;
use fund_ledger::domain::ports::{AccountStoreBox, NotificationServiceBox};
use fund_ledger::infrastructure::in_memory::InMemoryAccountStore;
use fund_ledger::infrastructure::notification::LoggingNotificationService;
use fund_ledger::interfaces::csv::account_writer::{AccountWriter, write_accounts_json};
use fund_ledger::interfaces::csv::operation_reader::OperationReader;
use fund_ledger::logging::init_logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file (`type, account, counterpart, amount`)
    input: PathBuf,

    /// Output format of the final ledger
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Log filter, overridden by RUST_LOG when set
    #[arg(long, env = "LEDGER_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.json_logs);

    let account_store: AccountStoreBox = Box::new(InMemoryAccountStore::new());
    let notifications: NotificationServiceBox = Box::new(LoggingNotificationService::new());
    let engine = LedgerEngine::new(account_store, notifications);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for (index, command) in reader.commands().enumerate() {
        let row = index + 1;
        match command {
            Ok(command) => {
                if let Err(e) = engine.execute(command).await {
                    tracing::warn!(row, "Error processing operation: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(row, "Error reading operation: {}", e);
            }
        }
    }

    let accounts = engine.into_results().await;

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => AccountWriter::new(stdout.lock())
            .write_accounts(accounts)
            .into_diagnostic()?,
        OutputFormat::Json => write_accounts_json(stdout.lock(), accounts).into_diagnostic()?,
    }

    Ok(())
}
