//! Label derivation for interactive nodes.
//!
//! Raw text on commercial pages concatenates the item name with price,
//! calorie and call-to-action noise with no separator ("Chicken$2.00
//! Responsibly raised220 calAdd"). The cascade below recovers the label
//! portion deterministically, tier by tier, without any language parsing.

use crate::dom::element::NAME_ATTRIBUTES;
use indexmap::IndexMap;

/// Maximum label length after normalization
pub const MAX_LABEL_CHARS: usize = 80;

/// Currency symbols that mark price fragments inside raw text
const CURRENCY_MARKERS: [char; 4] = ['$', '£', '€', '¥'];

/// Words a standalone label never starts with; they mark call-to-action
/// noise appended after the item name
const ACTION_PREFIXES: [&str; 4] = ["add", "build", "custom", "order"];

/// Collapse whitespace runs to single spaces, trim, truncate to
/// [`MAX_LABEL_CHARS`]. Total: never fails, empty in gives empty out.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_LABEL_CHARS).collect()
}

type LabelRule = fn(&str, &IndexMap<String, String>) -> Option<String>;

/// The cascade as an ordered rule table; first tier to produce a label wins.
const LABEL_RULES: [LabelRule; 4] = [
    attribute_name,
    clean_short_text,
    truncate_at_delimiter,
    leading_words,
];

/// Derive a human-meaningful label for a node from its attributes or raw
/// text. Falls back to the normalized raw text (possibly empty) when no
/// tier succeeds.
pub fn derive_label(raw_text: &str, attrs: &IndexMap<String, String>) -> String {
    let text = normalize(raw_text);
    for rule in LABEL_RULES {
        if let Some(label) = rule(&text, attrs) {
            return label;
        }
    }
    text
}

/// Tier 1: semantic-name attributes, in fixed priority order.
fn attribute_name(_text: &str, attrs: &IndexMap<String, String>) -> Option<String> {
    for key in NAME_ATTRIBUTES {
        if let Some(value) = attrs.get(key) {
            let value = normalize(value);
            if value.chars().count() > 1 {
                return Some(value);
            }
        }
    }
    None
}

/// Tier 2: short text that is already mostly alphanumeric and free of
/// price/measurement noise is usable as-is.
fn clean_short_text(text: &str, _attrs: &IndexMap<String, String>) -> Option<String> {
    let len = text.chars().count();
    if !(2..=50).contains(&len) {
        return None;
    }
    let clean = text.chars().filter(|c| c.is_alphanumeric() || *c == ' ').count();
    let clean_ratio = clean as f64 / len as f64;
    if clean_ratio > 0.7 && !has_price_markers(text) {
        Some(text.to_string())
    } else {
        None
    }
}

/// Tier 3: long text usually reads "<name>. <description> $<price>...";
/// keep what comes before the first period, dollar sign or newline.
fn truncate_at_delimiter(text: &str, _attrs: &IndexMap<String, String>) -> Option<String> {
    if text.chars().count() <= 50 {
        return None;
    }
    let cut = text.find(['.', '$', '\n']).unwrap_or(text.len());
    let prefix = text[..cut].trim();
    let len = prefix.chars().count();
    if (2..=30).contains(&len) {
        Some(normalize(prefix))
    } else {
        None
    }
}

/// Tier 4: try leading-word prefixes of 2, then 3, then 1 words. The
/// two-word prefix is checked first because menu items are most often two
/// words ("Chicken Bowl", "Fajita Veggies").
fn leading_words(text: &str, _attrs: &IndexMap<String, String>) -> Option<String> {
    if text.chars().count() <= 20 {
        return None;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }
    for word_count in [2, 3, 1] {
        if word_count > words.len() {
            continue;
        }
        let candidate = words[..word_count].join(" ");
        let len = candidate.chars().count();
        let lower = candidate.to_lowercase();
        if (2..=30).contains(&len)
            && !has_measurement_markers(&candidate)
            && !ACTION_PREFIXES.iter().any(|p| lower.starts_with(p))
        {
            return Some(normalize(&candidate));
        }
    }
    None
}

fn has_price_markers(text: &str) -> bool {
    text.contains(CURRENCY_MARKERS) || text.contains("cal")
}

fn has_measurement_markers(text: &str) -> bool {
    text.contains(['$', '℃', '%']) || text.contains("cal")
}
