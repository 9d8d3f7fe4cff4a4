use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of procurable goods categories. Each category selects a
/// specification template upstream; classification never produces a value
/// outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoodsType {
    Pc,
    Laptop,
    Monitor,
    Printer,
    Mfp,
    Server,
    Switch,
    Router,
    Cable,
    Disc,
    Software,
}

impl GoodsType {
    /// Parse an upstream type code (e.g. `"pc"`, `"laptop"`).
    pub fn from_code(code: &str) -> Option<GoodsType> {
        match code.trim() {
            "pc" => Some(GoodsType::Pc),
            "laptop" => Some(GoodsType::Laptop),
            "monitor" => Some(GoodsType::Monitor),
            "printer" => Some(GoodsType::Printer),
            "mfp" => Some(GoodsType::Mfp),
            "server" => Some(GoodsType::Server),
            "switch" => Some(GoodsType::Switch),
            "router" => Some(GoodsType::Router),
            "cable" => Some(GoodsType::Cable),
            "disc" => Some(GoodsType::Disc),
            "software" => Some(GoodsType::Software),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GoodsType::Pc => "pc",
            GoodsType::Laptop => "laptop",
            GoodsType::Monitor => "monitor",
            GoodsType::Printer => "printer",
            GoodsType::Mfp => "mfp",
            GoodsType::Server => "server",
            GoodsType::Switch => "switch",
            GoodsType::Router => "router",
            GoodsType::Cable => "cable",
            GoodsType::Disc => "disc",
            GoodsType::Software => "software",
        }
    }
}

impl std::fmt::Display for GoodsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GoodsType::Pc => "Системный блок (ПК)",
            GoodsType::Laptop => "Ноутбук",
            GoodsType::Monitor => "Монитор",
            GoodsType::Printer => "Принтер",
            GoodsType::Mfp => "МФУ",
            GoodsType::Server => "Сервер",
            GoodsType::Switch => "Коммутатор",
            GoodsType::Router => "Маршрутизатор",
            GoodsType::Cable => "Кабель",
            GoodsType::Disc => "Оптический диск",
            GoodsType::Software => "Программное обеспечение",
        };
        write!(f, "{}", label)
    }
}

/// One ranked classification alternative. At most one candidate per type;
/// the highest score seen for that type wins.
#[derive(Debug, Clone, Serialize)]
pub struct TypeCandidate {
    #[serde(rename = "type")]
    pub goods_type: GoodsType,
    pub score: u32,
    pub reason: String,
}

/// One technical-characteristic row as produced by the upstream generation
/// step. All fields are optional; the loader coerces absent fields so the
/// core never sees anything but this shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Advisory text attached by the normalizer; never changes `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Set when the normalizer made a substantive correction: brand
    /// removal, operator flip, unit coercion, or a wording rewrite.
    /// Cosmetic cleanup (quote stripping, whitespace collapse) changes the
    /// text without setting it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fixed: bool,
}

impl SpecItem {
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// A document row holding a batch of spec items. Only rows with status
/// `done` and a non-empty spec list are audited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecRow {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub row_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub specs: Vec<SpecItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Major => write!(f, "major"),
            Severity::Minor => write!(f, "minor"),
        }
    }
}

/// One (spec row, violated rule) pair. A single spec can produce several
/// issues when it trips more than one rule.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceIssue {
    pub row_id: u64,
    pub row_type: String,
    pub spec_name: String,
    pub spec_value: String,
    pub severity: Severity,
    pub reason: String,
    pub recommendation: String,
}

/// Aggregate audit result for a batch of rows.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceReport {
    pub issues: Vec<ComplianceIssue>,
    pub critical_count: usize,
    pub major_count: usize,
    pub minor_count: usize,
    /// 0–100; starts at 100 and loses points per issue.
    pub score: u32,
    pub min_score: u32,
    /// Export must be gated when set.
    pub blocked: bool,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goods_type_code_round_trip() {
        for code in [
            "pc", "laptop", "monitor", "printer", "mfp", "server", "switch", "router", "cable",
            "disc", "software",
        ] {
            let t = GoodsType::from_code(code).unwrap();
            assert_eq!(t.code(), code);
        }
        assert_eq!(GoodsType::from_code("typewriter"), None);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
    }
}
