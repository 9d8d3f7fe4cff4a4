//! `tz-checkr` — check procurement specification drafts (ТЗ) against 44-FZ
//! anti-competition rules.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load policy config ([`config::load_config`]).
//! 3. Load the draft document ([`document`]).
//! 4. Classify the goods type and rank alternatives ([`classify`]).
//! 5. Normalize spec wording unless `--raw` ([`normalize`]).
//! 6. Audit the rows into a scored report ([`audit`]).
//! 7. Render the requested report ([`report`]).
//! 8. Exit `0` (clean) or `1` (report is blocked).

mod audit;
mod classify;
mod cli;
mod config;
mod document;
mod models;
mod normalize;
mod report;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use audit::Auditor;
use classify::Classifier;
use cli::{Cli, ReportFormat};
use config::load_config;
use models::{ComplianceReport, GoodsType, TypeCandidate};
use normalize::Normalizer;

/// Everything `--report json` emits, in one object.
#[derive(Serialize)]
struct AuditOutput<'a> {
    product: &'a str,
    goods_type: GoodsType,
    detection_reason: &'a str,
    candidates: &'a [TypeCandidate],
    rows_corrected: usize,
    report: &'a ComplianceReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let doc = document::load_document(&cli.path)?;

    // Unknown or absent upstream codes fall back to the PC template.
    let fallback = GoodsType::from_code(&doc.goods_type).unwrap_or(GoodsType::Pc);

    let classifier = Classifier::new()?;
    let detection = classifier.detect(&doc.product, fallback);
    let candidates = classifier.build_candidates(&doc.product, detection.goods_type);

    let mut doc_out = doc.clone();
    let mut rows_corrected = 0;
    if !cli.raw {
        let normalizer = Normalizer::new(&config.normalize.extra_brands)?;
        for row in &mut doc_out.rows {
            row.specs = normalizer.post_process(&row.specs);
            rows_corrected += row.specs.iter().filter(|s| s.fixed).count();
        }
    }

    let min_score = cli.min_score.unwrap_or(config.audit.min_score);
    let auditor = Auditor::new(&config.normalize.extra_brands)?;
    let compliance = auditor.build_report(&doc_out.rows, min_score);

    if let Some(out_path) = &cli.out {
        document::save_document(out_path, &doc_out)?;
        if !cli.quiet {
            eprintln!(
                "  {} normalized document written to {}",
                "→".cyan(),
                out_path.display()
            );
        }
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(
                &cli.path,
                &detection,
                &candidates,
                &compliance,
                rows_corrected,
                cli.verbose,
                cli.quiet,
            )?;
        }
        ReportFormat::Json => {
            let output = AuditOutput {
                product: &doc.product,
                goods_type: detection.goods_type,
                detection_reason: &detection.reason,
                candidates: &candidates,
                rows_corrected,
                report: &compliance,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if compliance.blocked {
        std::process::exit(1);
    }

    Ok(())
}
