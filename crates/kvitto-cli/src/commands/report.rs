//! Report command - aggregate totals and passenger statistics.

use clap::Args;
use console::style;
use tracing::debug;

use kvitto_core::{parse_emails, BatchExtractor, ReceiptColumns, RuleReceiptParser};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Input file, or `-` for standard input
    #[arg(required = true)]
    input: String,

    /// Number of sample rows to print (0 disables the sample)
    #[arg(long, default_value = "5")]
    sample: usize,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let content = super::read_input(&args.input)?;

    let emails = parse_emails(&content)?;
    debug!("normalized {} email records", emails.len());

    let parser = RuleReceiptParser::from_config(&config);
    let columns = BatchExtractor::with_parser(parser).extract(&emails)?;

    print_report(&columns, args.sample);

    Ok(())
}

fn print_report(columns: &ReceiptColumns, sample: usize) {
    let attributed = columns.len() - columns.unattributed_count();

    println!(
        "{} Extracted {} receipts",
        style("✓").green(),
        columns.len()
    );
    println!(
        "   Attributed rides: {}, unattributed: {}",
        attributed,
        columns.unattributed_count()
    );

    let unknown = columns.unknown_names();
    if !unknown.is_empty() {
        println!(
            "{} Unknown passenger names: {}",
            style("!").yellow(),
            unknown.into_iter().collect::<Vec<_>>().join(", ")
        );
    }

    println!();
    println!("Totals by currency:");
    for (currency, total) in columns.total_by_currency() {
        println!("  {:.2} {}", total, currency);
    }

    let rides = columns.rides_by_passenger();
    if !rides.is_empty() {
        println!();
        println!("Rides by passenger:");
        for (name, count) in rides {
            println!("  {}: {}", name, count);
        }
    }

    if sample > 0 && !columns.is_empty() {
        println!();
        println!("Sample (first {} entries):", sample.min(columns.len()));
        for i in 0..sample.min(columns.len()) {
            let date = columns.dates[i]
                .map(|d| d.to_string())
                .unwrap_or_else(|| "----------".to_string());
            let passenger = columns.passengers[i]
                .as_ref()
                .map(|p| p.name().to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {} | {} | {} {}",
                date, passenger, columns.costs[i], columns.currencies[i]
            );
        }
    }

    if !columns.diagnostics.is_empty() {
        println!();
        println!("{}", style("Diagnostics:").yellow());
        for note in &columns.diagnostics {
            println!("  - {}", note);
        }
    }
}
