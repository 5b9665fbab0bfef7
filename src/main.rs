use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_records::application::batch::BatchRunner;
use payment_records::application::gateway::ChannelGateway;
use payment_records::application::ledger::PaymentLedger;
use payment_records::domain::ports::PaymentStoreBox;
use payment_records::infrastructure::in_memory::{DEFAULT_SHARDS, InMemoryPaymentStore};
#[cfg(feature = "storage-rocksdb")]
use payment_records::infrastructure::rocksdb::RocksDBStore;
use payment_records::interfaces::csv::record_writer::RecordWriter;
use payment_records::interfaces::json::command_reader::CommandReader;
use payment_records::telemetry;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file of payment commands, one JSON object per line
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Write every stored record to this CSV file once the batch is done
    #[arg(long)]
    export: Option<PathBuf>,

    /// Number of shards for the in-memory store
    #[arg(long, default_value_t = DEFAULT_SHARDS)]
    shards: usize,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn open_store(cli: &Cli) -> Result<PaymentStoreBox> {
    match &cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            info!(path = %path.display(), "using RocksDB storage");
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryPaymentStore::with_shards(cli.shards)))
        }
        None => Ok(Box::new(InMemoryPaymentStore::with_shards(cli.shards))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level);

    let store = open_store(&cli)?;
    let mut runner = BatchRunner::new(ChannelGateway::new(PaymentLedger::new(store)));

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = CommandReader::new(BufReader::new(file));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut processed = 0usize;
    let mut failed = 0usize;

    for (line, command) in reader.commands() {
        let command = match command {
            Ok(command) => command,
            Err(e) => {
                error!(line, error = %e, "Error reading command");
                failed += 1;
                continue;
            }
        };

        match runner.run(command).await {
            Ok(response) => {
                serde_json::to_writer(&mut out, &response).into_diagnostic()?;
                writeln!(out).into_diagnostic()?;
                processed += 1;
            }
            Err(e) => {
                error!(line, error = %e, "Error processing command");
                failed += 1;
            }
        }
    }
    out.flush().into_diagnostic()?;
    info!(processed, failed, "batch finished");

    if let Some(path) = cli.export {
        let records = runner
            .gateway()
            .ledger()
            .records()
            .await
            .into_diagnostic()?;
        let count = records.len();
        let file = File::create(&path).into_diagnostic()?;
        RecordWriter::new(file)
            .write_records(records)
            .into_diagnostic()?;
        info!(count, path = %path.display(), "records exported");
    }

    Ok(())
}
