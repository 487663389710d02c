use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute names that carry a human-meaningful item/group name on
/// commercial pages, in lookup priority order.
pub const NAME_ATTRIBUTES: [&str; 7] = [
    "data-qa-item-name",
    "data-qa-group-name",
    "data-qa-name",
    "data-item-name",
    "data-label",
    "data-title",
    "data-name",
];

/// A detected interactive node, scored against the current goal and
/// (after assignment) addressable by its per-snapshot candidate id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    /// HTML tag name (e.g. "button", "a", "div")
    pub tag: String,

    /// Normalized display label (whitespace-collapsed, max 80 chars)
    pub text: String,

    /// Attributes with lower-cased keys, in document order
    #[serde(default)]
    pub attrs: IndexMap<String, String>,

    /// Selector expressions usable to re-locate this node, preferred first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,

    /// Relevance score against the current goal; recomputed per snapshot
    #[serde(default)]
    pub score: f64,

    /// 1-based id assigned by the candidate assigner. Only meaningful
    /// within the snapshot that assigned it; never reuse across snapshots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<u32>,
}

impl Element {
    /// Create a new Element with empty text and no attributes
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: String::new(),
            attrs: IndexMap::new(),
            selectors: Vec::new(),
            score: 0.0,
            candidate_id: None,
        }
    }

    /// Builder method: set the display label
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder method: set attributes
    pub fn with_attrs(mut self, attrs: IndexMap<String, String>) -> Self {
        self.attrs = attrs;
        self
    }

    /// Builder method: add one attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Builder method: set selector expressions
    pub fn with_selectors(mut self, selectors: Vec<String>) -> Self {
        self.selectors = selectors;
        self
    }

    /// Builder method: set the score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Get attribute value by key
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Check whether the class attribute contains the given token
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    /// First non-empty semantic-name attribute value, in
    /// [`NAME_ATTRIBUTES`] priority order.
    pub fn name_attribute(&self) -> Option<&str> {
        NAME_ATTRIBUTES
            .iter()
            .filter_map(|key| self.attr(key))
            .find(|v| !v.trim().is_empty())
    }

    /// Check if element is a specific tag (case-insensitive)
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let element = Element::new("button")
            .with_text("Order Now")
            .with_attr("id", "order-now")
            .with_attr("class", "btn primary")
            .with_selectors(vec!["#order-now".to_string()])
            .with_score(1.5);

        assert_eq!(element.tag, "button");
        assert_eq!(element.text, "Order Now");
        assert_eq!(element.attr("id"), Some("order-now"));
        assert_eq!(element.selectors, vec!["#order-now"]);
        assert_eq!(element.score, 1.5);
        assert_eq!(element.candidate_id, None);
    }

    #[test]
    fn test_has_class() {
        let element = Element::new("div").with_attr("class", "container main active");

        assert!(element.has_class("container"));
        assert!(element.has_class("active"));
        assert!(!element.has_class("act"));
        assert!(!Element::new("div").has_class("anything"));
    }

    #[test]
    fn test_name_attribute_priority() {
        let element = Element::new("div")
            .with_attr("data-title", "Later Tier")
            .with_attr("data-qa-item-name", "White Rice");

        // data-qa-item-name outranks data-title regardless of document order
        assert_eq!(element.name_attribute(), Some("White Rice"));
    }

    #[test]
    fn test_name_attribute_skips_empty() {
        let element = Element::new("div")
            .with_attr("data-qa-item-name", "  ")
            .with_attr("data-name", "Fallback");

        assert_eq!(element.name_attribute(), Some("Fallback"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let element = Element::new("a")
            .with_text("Menu")
            .with_attr("href", "/menu")
            .with_selectors(vec!["a[href*=\"/menu\"]".to_string()]);

        let json = serde_json::to_string(&element).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(element, back);

        // unassigned candidate_id is omitted from the wire form
        assert!(!json.contains("candidate_id"));
    }
}
