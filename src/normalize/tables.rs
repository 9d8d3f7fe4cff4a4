//! Data tables behind the normalization pipeline.

/// Brand and manufacturer tokens that must not appear in a specification
/// (44-FZ bans brand-specific requirements without an equivalence clause).
/// Latin and Cyrillic spellings; matched case-insensitively as whole words.
/// Multi-word tokens go first so the longer match wins inside the
/// alternation.
pub const BRAND_TOKENS: &[&str] = &[
    "core i3",
    "core i5",
    "core i7",
    "core i9",
    "ryzen 3",
    "ryzen 5",
    "ryzen 7",
    "ryzen 9",
    "intel",
    "amd",
    "nvidia",
    "geforce",
    "radeon",
    "apple",
    "samsung",
    "lg",
    "hp",
    "dell",
    "lenovo",
    "asus",
    "acer",
    "msi",
    "gigabyte",
    "huawei",
    "honor",
    "xiaomi",
    "logitech",
    "epson",
    "canon",
    "kyocera",
    "xerox",
    "brother",
    "pantum",
    "cisco",
    "d-link",
    "tp-link",
    "zyxel",
    "mikrotik",
    "аквариус",
    "гравитон",
    "байкал",
    "эльбрус",
    "ростех",
    "depo",
    "kraftway",
    "icl",
];

/// Imported measurement units localized to the Russian procurement register.
/// Exact, case-insensitive match on the `unit` field.
pub const UNIT_TABLE: &[(&str, &str)] = &[
    ("ghz", "ГГц"),
    ("mhz", "МГц"),
    ("hz", "Гц"),
    ("tb", "ТБ"),
    ("gb", "ГБ"),
    ("mb", "МБ"),
    ("kb", "КБ"),
    ("wh", "Вт·ч"),
    ("w", "Вт"),
    ("mah", "мА·ч"),
    ("v", "В"),
    ("a", "А"),
    ("inch", "дюйм"),
    ("kg", "кг"),
    ("g", "г"),
    ("mm", "мм"),
    ("cm", "см"),
    ("m", "м"),
    ("ppm", "стр/мин"),
    ("dpi", "точек/дюйм"),
];

/// Whole-word, case-insensitive matcher over [`BRAND_TOKENS`] plus any
/// config-supplied additions. Shared by the normalizer (step 1) and the
/// auditor (trademark rule).
pub fn brand_regex(extra_brands: &[String]) -> anyhow::Result<regex::Regex> {
    let mut alternation: Vec<String> = BRAND_TOKENS.iter().map(|t| regex::escape(t)).collect();
    alternation.extend(
        extra_brands
            .iter()
            .filter(|b| !b.trim().is_empty())
            .map(|b| regex::escape(b.trim())),
    );
    Ok(regex::Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        alternation.join("|")
    ))?)
}

/// Localize a single unit token; `None` when it is not in the table.
pub fn localize_unit(unit: &str) -> Option<&'static str> {
    let lowered = unit.trim().to_lowercase();
    UNIT_TABLE
        .iter()
        .find(|(from, _)| *from == lowered)
        .map(|(_, to)| *to)
}
