use std::time::Duration;

use serde::Serialize;

use crate::cli::{Cli, OutputFormat};
use crate::core::config::AlignmentConfig;
use crate::fetch::HttpTransport;
use crate::pipeline::{process_all, LocusOutcome};
use crate::utils::validation::validate_loci;

/// One line of the run summary
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    locus: &'a str,
    status: &'static str,
    cached: Option<bool>,
    alleles: Option<usize>,
    columns: Option<usize>,
    blocks: Option<usize>,
    unexpected_tags: Option<usize>,
    error: Option<String>,
}

impl<'a> From<&'a LocusOutcome> for SummaryRow<'a> {
    fn from(outcome: &'a LocusOutcome) -> Self {
        match &outcome.result {
            Ok(report) => Self {
                locus: &outcome.locus.name,
                status: "ok",
                cached: Some(report.cached),
                alleles: Some(report.alleles),
                columns: Some(report.columns),
                blocks: Some(report.blocks),
                unexpected_tags: Some(report.unexpected_tags),
                error: None,
            },
            Err(e) => Self {
                locus: &outcome.locus.name,
                status: "failed",
                cached: None,
                alleles: None,
                columns: None,
                blocks: None,
                unexpected_tags: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Process every locus and print a summary.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP client cannot be
/// built, or any locus failed. Loci that succeeded keep their output.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AlignmentConfig::new(&cli.output_dir)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_row_order(cli.row_order);
    validate_loci(&config.loci)?;

    if cli.verbose {
        eprintln!(
            "Processing {} loci into {}",
            config.loci.len(),
            config.output_dir.display()
        );
    }

    let transport = HttpTransport::new(config.timeout)?;
    let outcomes = process_all(&config, &transport);

    let rows: Vec<SummaryRow> = outcomes.iter().map(SummaryRow::from).collect();
    match cli.format {
        OutputFormat::Text => print_text_summary(&rows),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Tsv => print_tsv_summary(&rows),
    }

    let failed: Vec<&str> = rows
        .iter()
        .filter(|row| row.error.is_some())
        .map(|row| row.locus)
        .collect();
    if !failed.is_empty() {
        anyhow::bail!(
            "{} of {} loci failed: {}",
            failed.len(),
            rows.len(),
            failed.join(", ")
        );
    }

    Ok(())
}

fn print_text_summary(rows: &[SummaryRow]) {
    for row in rows {
        match &row.error {
            None => println!(
                "{:<6} {:>6} alleles {:>6} columns {:>4} blocks{}",
                row.locus,
                row.alleles.unwrap_or_default(),
                row.columns.unwrap_or_default(),
                row.blocks.unwrap_or_default(),
                if row.cached == Some(true) { " (cached)" } else { "" }
            ),
            Some(error) => println!("{:<6} FAILED: {error}", row.locus),
        }
    }
}

fn print_tsv_summary(rows: &[SummaryRow]) {
    fn field<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    println!("locus\tstatus\tcached\talleles\tcolumns\tblocks\tunexpected_tags\terror");
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.locus,
            row.status,
            field(row.cached),
            field(row.alleles),
            field(row.columns),
            field(row.blocks),
            field(row.unexpected_tags),
            row.error.as_deref().unwrap_or_default()
        );
    }
}
