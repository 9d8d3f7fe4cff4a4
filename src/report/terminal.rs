use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::classify::Detection;
use crate::models::{ComplianceReport, Severity, TypeCandidate};

/// Render a colored terminal report.
pub fn render(
    path: &Path,
    detection: &Detection,
    candidates: &[TypeCandidate],
    report: &ComplianceReport,
    fixed_rows: usize,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        println!(
            "Score: {}/{}  Critical: {}  Major: {}  Minor: {}  Blocked: {}",
            report.score,
            report.min_score,
            report.critical_count.to_string().red(),
            report.major_count.to_string().yellow(),
            report.minor_count.to_string().cyan(),
            if report.blocked { "yes".red() } else { "no".green() },
        );
        return Ok(());
    }

    println!("\n {} v{}", "tz-checkr".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Checking: {}\n", path.display());

    let verdict = if report.blocked {
        "✗ BLOCKED".red().bold()
    } else {
        "✓ OK".green().bold()
    };

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!(
            "Goods type         : {} [{}]",
            detection.goods_type,
            detection.goods_type.code()
        )
    );
    println!(
        " │  {:<48} │",
        format!("Detected via       : {}", detection.reason)
    );
    println!(
        " │  {:<48} │",
        format!("Rows corrected     : {}", fixed_rows)
    );
    println!(
        " │  {:<48} │",
        format!("Score              : {} / {} min", report.score, report.min_score)
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Critical        : {:>4}",
            "✗".red(),
            report.critical_count
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Major           : {:>4}",
            "⚠".yellow(),
            report.major_count
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Minor           : {:>4}",
            "•".cyan(),
            report.minor_count
        )
    );
    println!(" │  {:<48} │", format!("Verdict            : {}", verdict));
    println!(" └────────────────────────────────────────────────────┘\n");

    if report.critical_count > 0 {
        println!(" {} Issues blocking export:\n", "[CRITICAL]".red().bold());
        render_issue_table(report, Severity::Critical);
        println!();
    }

    if report.major_count > 0 {
        println!(" {} Issues requiring rework:\n", "[MAJOR]".yellow().bold());
        render_issue_table(report, Severity::Major);
        println!();
    }

    if verbose && report.minor_count > 0 {
        println!(" {} Advisory issues:\n", "[MINOR]".cyan().bold());
        render_issue_table(report, Severity::Minor);
        println!();
    }

    if verbose && !candidates.is_empty() {
        println!(" Type candidates:\n");
        render_candidate_table(candidates);
        println!();
    }

    Ok(())
}

fn render_issue_table(report: &ComplianceReport, severity: Severity) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Row").add_attribute(Attribute::Bold),
            Cell::new("Характеристика").add_attribute(Attribute::Bold),
            Cell::new("Значение").add_attribute(Attribute::Bold),
            Cell::new("Причина").add_attribute(Attribute::Bold),
            Cell::new("Рекомендация").add_attribute(Attribute::Bold),
        ]);

    let severity_color = match severity {
        Severity::Critical => Color::Red,
        Severity::Major => Color::Yellow,
        Severity::Minor => Color::Cyan,
    };

    for issue in report.issues.iter().filter(|i| i.severity == severity) {
        table.add_row(vec![
            Cell::new(issue.row_id).set_alignment(CellAlignment::Right),
            Cell::new(&issue.spec_name),
            Cell::new(&issue.spec_value),
            Cell::new(&issue.reason).fg(severity_color),
            Cell::new(&issue.recommendation),
        ]);
    }

    println!("{}", table);
}

fn render_candidate_table(candidates: &[TypeCandidate]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Reason").add_attribute(Attribute::Bold),
        ]);

    for candidate in candidates {
        table.add_row(vec![
            Cell::new(candidate.goods_type.to_string()),
            Cell::new(candidate.score).set_alignment(CellAlignment::Right),
            Cell::new(&candidate.reason),
        ]);
    }

    println!("{}", table);
}
