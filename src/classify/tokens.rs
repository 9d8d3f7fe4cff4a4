use crate::models::GoodsType;

/// Ordered token → type dictionary. Order is part of the contract: ties in
/// score resolve to the first-registered token, so hardware tokens come
/// before the generic software vocabulary.
pub const TOKEN_DICT: &[(&str, GoodsType)] = &[
    ("ноутбук", GoodsType::Laptop),
    ("laptop", GoodsType::Laptop),
    ("нетбук", GoodsType::Laptop),
    ("ультрабук", GoodsType::Laptop),
    ("макбук", GoodsType::Laptop),
    ("macbook", GoodsType::Laptop),
    ("системный блок", GoodsType::Pc),
    ("компьютер", GoodsType::Pc),
    ("десктоп", GoodsType::Pc),
    ("рабочая станция", GoodsType::Pc),
    ("workstation", GoodsType::Pc),
    ("моноблок", GoodsType::Pc),
    ("пк", GoodsType::Pc),
    ("pc", GoodsType::Pc),
    ("монитор", GoodsType::Monitor),
    ("monitor", GoodsType::Monitor),
    ("дисплей", GoodsType::Monitor),
    ("мфу", GoodsType::Mfp),
    ("многофункциональное устройство", GoodsType::Mfp),
    ("mfp", GoodsType::Mfp),
    ("принтер", GoodsType::Printer),
    ("printer", GoodsType::Printer),
    ("сервер", GoodsType::Server),
    ("server", GoodsType::Server),
    ("коммутатор", GoodsType::Switch),
    ("свитч", GoodsType::Switch),
    ("switch", GoodsType::Switch),
    ("маршрутизатор", GoodsType::Router),
    ("роутер", GoodsType::Router),
    ("router", GoodsType::Router),
    ("кабель", GoodsType::Cable),
    ("патч корд", GoodsType::Cable),
    ("patch cord", GoodsType::Cable),
    ("витая пара", GoodsType::Cable),
    ("оптический диск", GoodsType::Disc),
    ("компакт диск", GoodsType::Disc),
    ("dvd", GoodsType::Disc),
    ("blu ray", GoodsType::Disc),
    ("программное обеспечение", GoodsType::Software),
    ("операционная система", GoodsType::Software),
    ("антивирус", GoodsType::Software),
    ("лицензия", GoodsType::Software),
    ("software", GoodsType::Software),
    ("софт", GoodsType::Software),
    ("субд", GoodsType::Software),
];

/// Canonical form of a user query: lowercase, `ё`→`е`, separators replaced
/// by spaces, whitespace collapsed.
pub fn normalize_query(text: &str) -> String {
    let lowered = text.to_lowercase().replace('ё', "е");
    let spaced: String = lowered
        .chars()
        .map(|c| match c {
            '-' | '_' | '/' | '.' | ',' | '+' | '(' | ')' => ' ',
            other => other,
        })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Match strength between a normalized query and a dictionary token.
///
/// 8 — exact equality; 6 — query contains a long token (3 for a short one);
/// 2 — token contains the query (query ≥3 chars); 0 — no relation.
/// Exact equality always outranks containment, which the score order encodes.
pub fn token_score(text: &str, token: &str) -> u32 {
    if text == token {
        return 8;
    }
    if text.contains(token) {
        return if token.chars().count() >= 6 { 6 } else { 3 };
    }
    if token.contains(text) && text.chars().count() >= 3 {
        return 2;
    }
    0
}

/// A short, low-information query: too few characters to classify, or a
/// letter prefix with at most two trailing digits (the shape of a partially
/// typed brand or model name).
pub fn is_short_ambiguous(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text.chars().count() <= 5 {
        return true;
    }
    let letters: Vec<char> = text.chars().take_while(|c| c.is_alphabetic()).collect();
    let rest: Vec<char> = text.chars().skip(letters.len()).collect();
    (2..=6).contains(&letters.len()) && rest.len() <= 2 && rest.iter().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Ноутбук-HP/ProBook  "), "ноутбук hp probook");
        assert_eq!(normalize_query("Зелёный"), "зеленый");
        assert_eq!(normalize_query("патч-корд"), "патч корд");
    }

    #[test]
    fn test_token_score_exact_beats_containment() {
        assert_eq!(token_score("ноутбук", "ноутбук"), 8);
        assert_eq!(token_score("ноутбук hp", "ноутбук"), 6);
        assert_eq!(token_score("пк hp", "пк"), 3);
        assert_eq!(token_score("марш", "маршрутизатор"), 2);
        assert_eq!(token_score("пк", "принтер"), 0);
    }

    #[test]
    fn test_short_ambiguous_shapes() {
        assert!(is_short_ambiguous("гр"));
        assert!(is_short_ambiguous("грави"));
        assert!(is_short_ambiguous("гравит"));
        assert!(is_short_ambiguous("мх23"));
        assert!(!is_short_ambiguous("гравито"));
        assert!(!is_short_ambiguous("гравитон"));
        assert!(!is_short_ambiguous(""));
        assert!(!is_short_ambiguous("abc1234"));
    }

    #[test]
    fn test_dictionary_registers_hardware_before_software() {
        let laptop = TOKEN_DICT.iter().position(|(t, _)| *t == "ноутбук").unwrap();
        let soft = TOKEN_DICT
            .iter()
            .position(|(_, ty)| *ty == GoodsType::Software)
            .unwrap();
        assert!(laptop < soft);
    }
}
