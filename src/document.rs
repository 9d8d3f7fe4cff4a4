//! Draft document I/O. The upstream generation step emits a JSON object
//! with the product description, a goods-type code, KTRU/OKPD2 codes in
//! `meta`, and the spec rows. Decoding is deliberately tolerant: every
//! field defaults, so a sparse or hand-edited draft still loads and the
//! core only ever sees the coerced shape.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::SpecRow;

/// Classification codes attached upstream; consumed for display only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub ktru_code: String,
    #[serde(default)]
    pub okpd2_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Free-text product description entered by the user.
    #[serde(default)]
    pub product: String,
    /// Upstream goods-type code (e.g. `"laptop"`); unknown codes fall back
    /// to `pc` at the call site.
    #[serde(default)]
    pub goods_type: String,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub rows: Vec<SpecRow>,
}

pub fn load_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    let doc: Document = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse draft {}", path.display()))?;
    Ok(doc)
}

pub fn save_document(path: &Path, doc: &Document) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
