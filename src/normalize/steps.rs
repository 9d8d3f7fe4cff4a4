//! The per-row transforms composed by [`super::PIPELINE`]. Each step is a
//! pure rewrite over one [`SpecItem`]; order-sensitive effects (operator
//! flips before the final wording pass) live in the pipeline order, not
//! here.

use crate::models::SpecItem;

use super::Rules;

/// Step 1: remove brand/manufacturer tokens from `group`, `name` and
/// `value`, drop stray quotes, trim edge punctuation and collapse
/// whitespace. A value emptied by brand removal becomes the literal
/// «эквивалент».
pub(crate) fn strip_brands(rules: &Rules, item: &mut SpecItem) {
    let in_group = strip_field(rules, &mut item.group);
    let in_name = strip_field(rules, &mut item.name);
    let in_value = strip_field(rules, &mut item.value);

    if in_group || in_name || in_value {
        item.fixed = true;
    }
    if in_value && item.value.as_deref().is_some_and(str::is_empty) {
        item.value = Some("эквивалент".to_string());
    }
}

fn strip_field(rules: &Rules, field: &mut Option<String>) -> bool {
    let Some(text) = field.as_deref() else {
        return false;
    };
    let had_brand = rules.brand_re.is_match(text);
    let stripped = if had_brand {
        rules.brand_re.replace_all(text, " ").into_owned()
    } else {
        text.to_string()
    };
    let cleaned = tidy(&stripped);
    if cleaned != text {
        *field = Some(cleaned);
    }
    had_brand
}

fn tidy(text: &str) -> String {
    let without_quotes: String = text
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '«' | '»' | '“' | '”'))
        .collect();
    let collapsed = without_quotes.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '-') || c.is_whitespace())
        .to_string()
}

/// Step 2: a CPU-socket code in a socket-named row gets an advisory warning.
/// The value itself stays untouched.
pub(crate) fn socket_warning(rules: &Rules, item: &mut SpecItem) {
    if rules.socket_name_re.is_match(item.name_str())
        && rules.socket_value_re.is_match(item.value_str())
    {
        item.warning = Some(
            "Указание конкретного сокета может ограничивать конкуренцию (ст. 33 44-ФЗ). \
             Рекомендуется заменить на требования к производительности процессора."
                .to_string(),
        );
    }
}

/// Step 3: ceiling parameters (вес, толщина, высота, шум) must be bounded
/// from above; a not-less prefix is flipped to not-more.
pub(crate) fn flip_ceiling_operators(rules: &Rules, item: &mut SpecItem) {
    if !rules.ceiling_name_re.is_match(item.name_str()) {
        return;
    }
    let trimmed = item.value_str().trim_start();
    for (from, to) in [(">=", "<="), ("≥", "≤"), ("не менее", "не более")] {
        if trimmed.starts_with(from) {
            item.value = Some(item.value_str().replacen(from, to, 1));
            item.fixed = true;
            return;
        }
    }
}

/// Step 4: battery-capacity rows measured in watts get the energy unit
/// Вт·ч; a missing unit next to a numeric value defaults to Вт·ч.
pub(crate) fn battery_units(rules: &Rules, item: &mut SpecItem) {
    if !rules.battery_name_re.is_match(item.name_str()) {
        return;
    }
    let unit = item.unit.as_deref().unwrap_or("").trim();
    if rules.power_unit_re.is_match(unit) {
        item.unit = Some("Вт·ч".to_string());
        item.fixed = true;
    } else if unit.is_empty() && rules.leading_number_re.is_match(item.value_str()) {
        item.unit = Some("Вт·ч".to_string());
    }
}

/// Step 5: localize imported unit tokens (GHz → ГГц and friends).
pub(crate) fn localize_units(_rules: &Rules, item: &mut SpecItem) {
    if let Some(unit) = item.unit.as_deref() {
        if let Some(localized) = super::tables::localize_unit(unit) {
            if unit != localized {
                item.unit = Some(localized.to_string());
            }
        }
    }
}

/// Step 6: a bare RAM generation (DDR4, LPDDR5) becomes «<value> или выше».
pub(crate) fn ram_generation(rules: &Rules, item: &mut SpecItem) {
    let is_ram_row = rules.ram_name_re.is_match(item.name_str())
        || (rules.memory_group_re.is_match(item.group.as_deref().unwrap_or(""))
            && rules.type_name_re.is_match(item.name_str()));
    if !is_ram_row {
        return;
    }
    let value = item.value_str().trim();
    if rules.ram_value_re.is_match(value) {
        item.value = Some(format!("{} или выше", value));
        item.fixed = true;
    }
}

/// Step 7: bare panel technologies in matrix-type rows get an equivalence
/// clause; bare IPS gets the full viewing-angle phrasing.
pub(crate) fn matrix_type(rules: &Rules, item: &mut SpecItem) {
    if !rules.matrix_name_re.is_match(item.name_str()) {
        return;
    }
    let value = item.value_str().trim().to_string();
    if value.eq_ignore_ascii_case("ips") {
        item.value =
            Some("IPS или эквивалент (угол обзора не менее 178 градусов)".to_string());
        item.fixed = true;
    } else if rules.panel_value_re.is_match(&value) {
        item.value = Some(format!("{} или эквивалент", value));
        item.fixed = true;
    }
}

/// Step 8: an exact WIDTHxHEIGHT resolution becomes a lower bound.
pub(crate) fn screen_resolution(rules: &Rules, item: &mut SpecItem) {
    if !rules.resolution_name_re.is_match(item.name_str()) {
        return;
    }
    let value = item.value_str().trim().to_string();
    if rules.resolution_value_re.is_match(&value) {
        item.value = Some(format!("не менее {}", value));
        item.fixed = true;
    }
}

/// Step 9: a bare hour count in a battery-life row becomes a full sentence
/// with the measurement conditions spelled out.
pub(crate) fn battery_life(rules: &Rules, item: &mut SpecItem) {
    if !rules.uptime_name_re.is_match(item.name_str()) {
        return;
    }
    if let Some(caps) = rules.uptime_value_re.captures(item.value_str()) {
        let hours = caps[1].replace(',', ".");
        item.value = Some(format!(
            "не менее {} часов автономной работы при офисной нагрузке и яркости экрана 150 кд/м²",
            hours
        ));
        item.fixed = true;
    }
}

/// Step 10: final wording pass over `value`. Raw comparison operators become
/// «не менее»/«не более»; the bare words «более»/«менее» are swapped to the
/// bounded form. Existing «не менее»/«не более» phrases are masked first so
/// the swap never produces a double negative.
pub(crate) fn finalize_operators(rules: &Rules, item: &mut SpecItem) {
    let Some(value) = item.value.as_deref() else {
        return;
    };

    const MIN_MARK: char = '\u{E000}';
    const MAX_MARK: char = '\u{E001}';

    let mut text = value
        .replace(">=", "не менее ")
        .replace("<=", "не более ")
        .replace('≥', "не менее ")
        .replace('≤', "не более ");

    text = text
        .replace("не менее", &MIN_MARK.to_string())
        .replace("не более", &MAX_MARK.to_string());
    text = rules
        .bound_word_re
        .replace_all(&text, |caps: &regex::Captures| {
            match &caps[1] {
                "более" => MIN_MARK,
                _ => MAX_MARK,
            }
            .to_string()
        })
        .into_owned();
    text = text
        .replace(MIN_MARK, "не менее")
        .replace(MAX_MARK, "не более");

    let result = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if result != value {
        item.value = Some(result);
    }
}
