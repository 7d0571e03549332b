use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use txquery::engine::TransactionQueryEngine;
use txquery::reader::{CsvTransactionReader, TransactionReader};
use txquery::writer::{QueryReport, ReportWriter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input transactions file (JSON array, or flat CSV for .csv files)
    input: PathBuf,

    /// Also report the total amount sent by this client
    #[arg(long)]
    sender: Option<String>,

    /// Also report whether this client has open compliance issues
    #[arg(long)]
    client: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(&cli.input).into_diagnostic()?;
    let transactions = if cli.input.extension().is_some_and(|ext| ext == "csv") {
        CsvTransactionReader::new(file).read_all().into_diagnostic()?
    } else {
        TransactionReader::new(file).read_all().into_diagnostic()?
    };

    let engine = TransactionQueryEngine::new(transactions);
    let mut report = QueryReport::build(&engine);
    if let Some(sender) = &cli.sender {
        report = report.with_sender_lookup(&engine, sender);
    }
    if let Some(client) = &cli.client {
        report = report.with_client_lookup(&engine, client);
    }

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(&report).into_diagnostic()?;

    Ok(())
}
