//! Compliance audit: scans finished spec rows for wording that restricts
//! competition and produces a scored, gateable report.
//!
//! Every rule fires independently, so one spec can contribute several
//! issues. The score starts at 100 and loses a fixed weight per issue;
//! any critical issue or a score under the threshold blocks export.

use anyhow::Result;
use chrono::Utc;
use regex::Regex;

use crate::models::{ComplianceIssue, ComplianceReport, Severity, SpecRow};
use crate::normalize::tables::brand_regex;

/// Default policy threshold (44-FZ drafts below this need rework).
pub const DEFAULT_MIN_SCORE: u32 = 85;

const CRITICAL_WEIGHT: u32 = 22;
const MAJOR_WEIGHT: u32 = 8;
const MINOR_WEIGHT: u32 = 3;

pub struct Auditor {
    brand_re: Regex,
    article_keyword_re: Regex,
    model_name_re: Regex,
    article_code_re: Regex,
    resolution_re: Regex,
}

impl Auditor {
    pub fn new(extra_brands: &[String]) -> Result<Self> {
        Ok(Auditor {
            brand_re: brand_regex(extra_brands)?,
            article_keyword_re: Regex::new(r"(?i)артикул|парт[ -]?номер|part number|p/n")?,
            model_name_re: Regex::new(r"(?i)\bмодель\b|\bmodel\b")?,
            // Vendor article codes look like БП-1234 or MX-12345A: a short
            // letter prefix, hyphen, digit run, optional suffix.
            article_code_re: Regex::new(r"(?i)\b[a-zа-яё]{1,6}-\d{2,8}[a-z0-9а-яё]*\b")?,
            resolution_re: Regex::new(r"^\d{3,5}\s*[xх×]\s*\d{3,5}$")?,
        })
    }

    /// Audit a batch of rows. Only rows with status `done` and a non-empty
    /// spec list are scanned; everything else is skipped without penalty.
    /// Total over any input, malformed fields included.
    pub fn build_report(&self, rows: &[SpecRow], min_score: u32) -> ComplianceReport {
        let mut issues = Vec::new();

        for row in rows {
            if row.status != "done" || row.specs.is_empty() {
                continue;
            }
            for spec in &row.specs {
                self.check_spec(row, spec.name_str(), spec.value_str(), &mut issues);
            }
        }

        let critical_count = issues.iter().filter(|i| i.severity == Severity::Critical).count();
        let major_count = issues.iter().filter(|i| i.severity == Severity::Major).count();
        let minor_count = issues.iter().filter(|i| i.severity == Severity::Minor).count();

        let penalty = CRITICAL_WEIGHT * critical_count as u32
            + MAJOR_WEIGHT * major_count as u32
            + MINOR_WEIGHT * minor_count as u32;
        let score = 100u32.saturating_sub(penalty);
        let blocked = critical_count > 0 || score < min_score;

        ComplianceReport {
            issues,
            critical_count,
            major_count,
            minor_count,
            score,
            min_score,
            blocked,
            generated_at: Utc::now(),
        }
    }

    fn check_spec(
        &self,
        row: &SpecRow,
        name: &str,
        value: &str,
        issues: &mut Vec<ComplianceIssue>,
    ) {
        let text = format!("{} {}", name, value);
        let mut push = |severity: Severity, reason: &str, recommendation: String| {
            issues.push(ComplianceIssue {
                row_id: row.id,
                row_type: row.row_type.clone(),
                spec_name: name.to_string(),
                spec_value: value.to_string(),
                severity,
                reason: reason.to_string(),
                recommendation,
            });
        };

        if self.brand_re.is_match(&text) {
            push(
                Severity::Critical,
                "Упоминание товарного знака или производителя",
                "Замените на функциональные характеристики с оговоркой «или эквивалент», \
                 без указания товарного знака."
                    .to_string(),
            );
        }

        if self.article_keyword_re.is_match(&text)
            || self.model_name_re.is_match(name)
            || self.article_code_re.is_match(value)
        {
            push(
                Severity::Critical,
                "Возможное указание конкретной модели или артикула",
                "Удалите модель и артикул, оставьте только измеримые требования.".to_string(),
            );
        }

        if value.contains(['>', '<', '≥', '≤']) {
            push(
                Severity::Major,
                "Математический знак сравнения в значении характеристики",
                "Используйте формулировки «не менее» / «не более» вместо знаков сравнения."
                    .to_string(),
            );
        }

        if self.resolution_re.is_match(value.trim()) {
            push(
                Severity::Minor,
                "Точное разрешение без нижней границы",
                format!("Укажите нижнюю границу: «не менее {}».", value.trim()),
            );
        }
    }
}
