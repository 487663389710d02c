//! Raw DOM conditioning: compression, content signature and structural
//! skeleton. These feed the snapshot pipeline in [`crate::dom`].

use crate::dom::element::NAME_ATTRIBUTES;
use regex::Regex;
use scraper::{Html, Selector};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// Tunables for one snapshot pipeline run.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Compressed DOM budget in chars
    pub dom_truncate_chars: usize,

    /// Extended budget used when the goal is picking a location/store;
    /// those pages list many near-identical cards and truncating early
    /// cuts off the right one
    pub dom_truncate_chars_location: usize,

    /// Cap on candidates packaged into a PageContext
    pub max_candidates: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dom_truncate_chars: 18_000,
            dom_truncate_chars_location: 70_000,
            max_candidates: 100,
        }
    }
}

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script[^>]*>.*?</script\s*>").expect("static regex"))
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style[^>]*>.*?</style\s*>").expect("static regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Strip script/style blocks, collapse whitespace and truncate to the
/// goal-aware budget.
pub fn compress_dom(raw_dom: &str, goal: &str, config: &SnapshotConfig) -> String {
    let max_chars = if wants_location(&goal.to_lowercase()) {
        config.dom_truncate_chars_location
    } else {
        config.dom_truncate_chars
    };

    let cleaned = script_re().replace_all(raw_dom, "");
    let cleaned = style_re().replace_all(&cleaned, "");
    let collapsed = whitespace_re().replace_all(&cleaned, " ");

    match collapsed.char_indices().nth(max_chars) {
        Some((idx, _)) => collapsed[..idx].to_string(),
        None => collapsed.into_owned(),
    }
}

fn wants_location(goal_lower: &str) -> bool {
    ["select", "choose", "pick", "nearest"].iter().any(|k| goal_lower.contains(k))
        && ["location", "restaurant", "store"].iter().any(|k| goal_lower.contains(k))
}

/// 16-hex-char content fingerprint for change detection between turns.
pub fn page_signature(dom: &str) -> String {
    let digest = Sha256::digest(dom.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex[..16].to_string()
}

/// Attributes preserved in skeleton lines
const SKELETON_ATTRS: [&str; 11] = [
    "id", "class", "name", "type", "value", "href", "placeholder", "title",
    "aria-label", "role", "data-testid",
];

/// Structural fingerprint of the page: one indented line per interactive
/// element, identifying attributes only. Insensitive to text and
/// whitespace churn, sensitive to the shape of the interactive surface.
pub fn dom_skeleton(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(interactive) = Selector::parse(
        "a[href], button, input, select, textarea, [role], [onclick], [tabindex], [aria-label], [data-testid], [data-qa-item-name], [data-qa-group-name]",
    ) else {
        return String::new();
    };

    let mut lines = Vec::new();
    for node in document.select(&interactive) {
        // depth relative to <html>; keeps nesting visible without
        // reproducing the whole container chain
        let depth = node.ancestors().count().saturating_sub(2).min(8);

        let mut parts = vec![node.value().name().to_string()];
        for key in SKELETON_ATTRS.iter().chain(NAME_ATTRIBUTES.iter()) {
            if let Some(value) = node.value().attr(key) {
                let value: String = value.chars().take(40).collect();
                parts.push(format!("{}=\"{}\"", key, value));
            }
        }
        lines.push(format!("{}<{}>", "  ".repeat(depth), parts.join(" ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_strips_scripts_and_styles() {
        let raw = r#"<body><script>var x = 1;</script><style>.a{color:red}</style>
            <button>Go</button></body>"#;
        let compressed = compress_dom(raw, "", &SnapshotConfig::default());

        assert!(!compressed.contains("var x"));
        assert!(!compressed.contains("color:red"));
        assert!(compressed.contains("<button>Go</button>"));
        // whitespace runs collapse
        assert!(!compressed.contains("\n"));
    }

    #[test]
    fn test_goal_aware_truncation_budget() {
        let config = SnapshotConfig {
            dom_truncate_chars: 10,
            dom_truncate_chars_location: 1000,
            max_candidates: 100,
        };
        let raw = "x".repeat(100);

        let tight = compress_dom(&raw, "click the order button", &config);
        let extended = compress_dom(&raw, "select the nearest store location", &config);

        assert_eq!(tight.chars().count(), 10);
        assert_eq!(extended.chars().count(), 100);
    }

    #[test]
    fn test_signature_format_and_stability() {
        let sig = page_signature("<body>hello</body>");
        assert_eq!(sig.len(), 16);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(sig, page_signature("<body>hello</body>"));
        assert_ne!(sig, page_signature("<body>other</body>"));
    }

    #[test]
    fn test_skeleton_keeps_interactive_shape() {
        let html = r#"<html><body>
            <div><button id="order-now" class="btn">Order Now</button></div>
            <script>ignored()</script>
            <a href="/menu">Menu</a>
        </body></html>"#;
        let skeleton = dom_skeleton(html);

        assert!(skeleton.contains(r#"<button id="order-now" class="btn">"#));
        assert!(skeleton.contains(r#"<a href="/menu">"#));
        assert!(!skeleton.contains("ignored"));
        // the nested button is indented deeper than the top-level anchor
        let button_line = skeleton.lines().find(|l| l.contains("button")).unwrap();
        let anchor_line = skeleton.lines().find(|l| l.contains("<a ")).unwrap();
        assert!(button_line.find('<') > anchor_line.find('<'));
    }

    #[test]
    fn test_skeleton_ignores_text_churn() {
        let a = dom_skeleton(r#"<body><button id="b">Count: 1</button></body>"#);
        let b = dom_skeleton(r#"<body><button id="b">Count: 2</button></body>"#);
        assert_eq!(a, b);
    }
}
