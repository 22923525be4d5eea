//! Process command - extract receipt columns from a single export.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use kvitto_core::{parse_emails, BatchExtractor, ReceiptColumns, RuleReceiptParser};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file, or `-` for standard input
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Suppress per-record diagnostics on stderr
    #[arg(long)]
    no_diagnostics: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;
    let content = super::read_input(&args.input)?;

    let source = if args.input == "-" { "stdin" } else { args.input.as_str() };
    info!("processing export from {}", source);

    // Total input-parse failure is fatal; the CLI exits non-zero here.
    let emails = parse_emails(&content)?;
    debug!("normalized {} email records", emails.len());

    let parser = RuleReceiptParser::from_config(&config);
    let columns = BatchExtractor::with_parser(parser).extract(&emails)?;

    if !args.no_diagnostics {
        for note in &columns.diagnostics {
            eprintln!("{} {}", style("!").yellow(), note);
        }
    }

    let output = format_columns(&columns, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_columns(columns: &ReceiptColumns, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(columns)?),
        OutputFormat::Csv => format_csv(columns),
        OutputFormat::Text => Ok(format_text(columns)),
    }
}

fn format_csv(columns: &ReceiptColumns) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "passenger", "attribution", "cost", "currency"])?;

    for i in 0..columns.len() {
        let date = columns.dates[i].map(|d| d.to_string()).unwrap_or_default();
        let (name, attribution) = match &columns.passengers[i] {
            Some(p) if p.is_known() => (p.name().to_string(), "known"),
            Some(p) => (p.name().to_string(), "unknown"),
            None => (String::new(), "unattributed"),
        };
        let cost = columns.costs[i].to_string();

        wtr.write_record([
            date.as_str(),
            name.as_str(),
            attribution,
            cost.as_str(),
            columns.currencies[i].as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(columns: &ReceiptColumns) -> String {
    let mut output = String::new();

    output.push_str(&format!("Receipts: {}\n", columns.len()));

    for i in 0..columns.len() {
        let date = columns.dates[i]
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());
        let passenger = columns.passengers[i]
            .as_ref()
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "  {} | {} | {} {}\n",
            date, passenger, columns.costs[i], columns.currencies[i]
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvitto_core::EmailRecord;

    fn sample_columns() -> ReceiptColumns {
        let emails = vec![
            EmailRecord::from_body("Totalt 150,50 kr 5 juli 2025 Tack för att du reser, Fredrik"),
            EmailRecord::from_body("Avbokningsavgift 25 kr Vi ses en annan gång, Leona"),
        ];
        BatchExtractor::new().extract(&emails).unwrap()
    }

    #[test]
    fn test_csv_output() {
        let csv = format_columns(&sample_columns(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "date,passenger,attribution,cost,currency");
        assert_eq!(lines.next().unwrap(), "2025-07-05,Fredrik,known,150.50,kr");
        assert_eq!(lines.next().unwrap(), ",Leona,known,25,kr");
    }

    #[test]
    fn test_json_output_is_aligned() {
        let json = format_columns(&sample_columns(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dates"].as_array().unwrap().len(), 2);
        assert_eq!(value["costs"].as_array().unwrap().len(), 2);
        assert_eq!(value["dates"][0], "2025-07-05");
        assert!(value["dates"][1].is_null());
    }

    #[test]
    fn test_text_output() {
        let text = format_columns(&sample_columns(), OutputFormat::Text).unwrap();
        assert!(text.contains("Receipts: 2"));
        assert!(text.contains("2025-07-05 | Fredrik | 150.50 kr"));
    }
}
