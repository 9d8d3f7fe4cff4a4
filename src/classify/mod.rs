//! Goods-type classification.
//!
//! Free text goes through a fixed rule ladder: short-circuit regex rules
//! first, then the ordered token dictionary ([`tokens::TOKEN_DICT`]), then a
//! short-ambiguous check that keeps half-typed queries on the caller's
//! fallback type instead of a spurious dictionary hit.

pub mod tokens;

use anyhow::Result;
use regex::Regex;

use crate::models::{GoodsType, TypeCandidate};
use tokens::{is_short_ambiguous, normalize_query, token_score, TOKEN_DICT};

/// Classification outcome: the winning type plus a machine-readable reason
/// (`rule:<name>`, `token:<tok>`, `token_partial:<tok>`, `short_ambiguous`,
/// `fallback`, `empty`).
#[derive(Debug, Clone)]
pub struct Detection {
    pub goods_type: GoodsType,
    pub reason: String,
}

/// A short-circuit rule checked before the dictionary. `resolve` lets a rule
/// branch on the query itself (the «гравитон» brand spans three categories).
struct ShortCircuit {
    name: &'static str,
    pattern: Regex,
    resolve: fn(&str) -> GoodsType,
}

pub struct Classifier {
    rules: Vec<ShortCircuit>,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        // Priority order matters: DBMS vocabulary must win over any hardware
        // token that happens to appear in the same query.
        let rules = vec![
            ShortCircuit {
                name: "dbms",
                pattern: Regex::new(
                    r"субд|база данных|баз данных|postgres|постгре|oracle|mysql|mssql|clickhouse",
                )?,
                resolve: |_| GoodsType::Software,
            },
            ShortCircuit {
                name: "monitor",
                pattern: Regex::new(r"монитор|дисплей|monitor|display")?,
                resolve: |_| GoodsType::Monitor,
            },
            ShortCircuit {
                name: "desktop",
                pattern: Regex::new(
                    r"системный блок|сист блок|неттоп|nettop|моноблок|десктоп|desktop|микро пк|мини пк",
                )?,
                resolve: |_| GoodsType::Pc,
            },
            ShortCircuit {
                name: "graviton",
                pattern: Regex::new(r"гравитон|graviton")?,
                resolve: resolve_graviton,
            },
        ];
        Ok(Classifier { rules })
    }

    /// Map free text to a goods type. Total: any input yields a type from
    /// the closed set, falling back to `fallback` when nothing matches.
    pub fn detect(&self, text: &str, fallback: GoodsType) -> Detection {
        let query = normalize_query(text);
        if query.is_empty() {
            return Detection {
                goods_type: fallback,
                reason: "empty".to_string(),
            };
        }

        for rule in &self.rules {
            if rule.pattern.is_match(&query) {
                return Detection {
                    goods_type: (rule.resolve)(&query),
                    reason: format!("rule:{}", rule.name),
                };
            }
        }

        // First pass: strong matches only (exact or long-token containment).
        for (token, goods_type) in TOKEN_DICT {
            if token_score(&query, token) >= 6 {
                return Detection {
                    goods_type: *goods_type,
                    reason: format!("token:{}", token),
                };
            }
        }

        // Second pass: anything scoring at all counts as a partial match.
        // A short-ambiguous query skips this pass entirely: a half-typed
        // word is a substring of half the dictionary («гра» sits inside
        // «программное обеспечение»), and a score-2 hit must not override
        // the caller's fallback type.
        let short_ambiguous = is_short_ambiguous(&query);
        if !short_ambiguous {
            for (token, goods_type) in TOKEN_DICT {
                if token_score(&query, token) > 0 {
                    return Detection {
                        goods_type: *goods_type,
                        reason: format!("token_partial:{}", token),
                    };
                }
            }
        }

        let reason = if short_ambiguous {
            "short_ambiguous"
        } else {
            "fallback"
        };
        Detection {
            goods_type: fallback,
            reason: reason.to_string(),
        }
    }

    /// Build the ranked alternative list shown for manual type selection.
    /// Descending score, one entry per type (max score wins), at most 8.
    pub fn build_candidates(&self, text: &str, current: GoodsType) -> Vec<TypeCandidate> {
        let query = normalize_query(text);
        let mut candidates = vec![TypeCandidate {
            goods_type: current,
            score: 2,
            reason: "current".to_string(),
        }];
        if query.is_empty() {
            return candidates;
        }

        for (token, goods_type) in TOKEN_DICT {
            let score = token_score(&query, token);
            if score > 0 {
                merge(&mut candidates, *goods_type, score, format!("token:{}", token));
            }
        }

        let detected = self.detect(text, current);
        let is_fallback_reason =
            matches!(detected.reason.as_str(), "fallback" | "short_ambiguous" | "empty");
        if detected.goods_type != current || !is_fallback_reason {
            merge(
                &mut candidates,
                detected.goods_type,
                7,
                format!("detect:{}", detected.reason),
            );
        }

        // A half-typed query gives the dictionary nothing to work with, so
        // surface the common hardware categories for manual choice.
        if is_short_ambiguous(&query) {
            for (goods_type, score) in [
                (GoodsType::Pc, 6),
                (GoodsType::Laptop, 6),
                (GoodsType::Monitor, 5),
                (GoodsType::Printer, 5),
                (GoodsType::Mfp, 4),
                (GoodsType::Server, 4),
            ] {
                merge(&mut candidates, goods_type, score, "manual_choice".to_string());
            }
        }

        // Stable sort keeps insertion order between equal scores, which is
        // how dictionary precedence survives into the candidate list.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(8);
        candidates
    }
}

/// «Гравитон» ships desktops, laptops and servers under one brand name; the
/// rest of the query decides, desktop being the brand default.
fn resolve_graviton(query: &str) -> GoodsType {
    if query.contains("сервер") || query.contains("server") {
        GoodsType::Server
    } else if query.contains("ноутбук")
        || query.contains("laptop")
        || query.contains("н14")
        || query.contains("н15")
        || query.contains("н16")
    {
        GoodsType::Laptop
    } else {
        GoodsType::Pc
    }
}

fn merge(candidates: &mut Vec<TypeCandidate>, goods_type: GoodsType, score: u32, reason: String) {
    if let Some(existing) = candidates.iter_mut().find(|c| c.goods_type == goods_type) {
        if score > existing.score {
            existing.score = score;
            existing.reason = reason;
        }
    } else {
        candidates.push(TypeCandidate {
            goods_type,
            score,
            reason,
        });
    }
}
