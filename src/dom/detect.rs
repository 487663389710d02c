//! Interactive node detection.
//!
//! The detector is a deliberately broad, high-recall filter: anything that
//! could plausibly be clicked or selected is emitted, and the goal-aware
//! scorer prunes the false positives downstream. Nodes are emitted in
//! document order, which the scorer and assigner preserve on score ties.

use crate::dom::element::{Element, NAME_ATTRIBUTES};
use crate::dom::label;
use indexmap::IndexMap;
use scraper::{Html, Selector};

/// Tags that are interactive by construction
pub const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "select", "textarea"];

/// ARIA roles treated as interactive
pub const INTERACTIVE_ROLES: [&str; 15] = [
    "button", "link", "dialog", "combobox", "textbox", "menuitem", "option", "tab",
    "switch", "checkbox", "radio", "menu", "menuitemcheckbox", "menuitemradio",
    "treeitem",
];

/// Class fragments that mark clickable containers on class-driven sites
const CLASS_TOKENS: [&str; 7] =
    ["btn", "button", "clickable", "selector", "card", "interactive", "link"];

/// data-testid fragments that mark store/location pickers
const TESTID_TOKENS: [&str; 2] = ["location", "restaurant"];

/// Tags that never produce candidates themselves
const SKIP_TAGS: [&str; 9] =
    ["html", "body", "head", "script", "style", "noscript", "meta", "link", "title"];

/// Scan serialized HTML and return every plausibly interactive node, in
/// document order, with label, candidate selectors and structural base
/// score populated. Total over malformed markup: the parser recovers and
/// unattributed nodes simply do not match.
pub fn detect(html: &str) -> Vec<Element> {
    let document = Html::parse_document(html);
    let Ok(every) = Selector::parse("*") else {
        return Vec::new();
    };

    let mut elements = Vec::new();
    for node in document.select(&every) {
        let tag = node.value().name().to_lowercase();
        if SKIP_TAGS.contains(&tag.as_str()) {
            continue;
        }

        let attrs: IndexMap<String, String> = node
            .value()
            .attrs()
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();

        if !is_interactive(&tag, &attrs) {
            continue;
        }

        let raw_text = node.text().collect::<Vec<_>>().join(" ");
        let text = label::derive_label(&raw_text, &attrs);
        let selectors = candidate_selectors(&tag, &attrs, &text);

        let mut element =
            Element::new(tag).with_text(text).with_attrs(attrs).with_selectors(selectors);
        element.score = structural_score(&element);
        elements.push(element);
    }

    log::debug!("detector emitted {} candidates", elements.len());
    elements
}

/// Structural interactivity predicate. Any single signal is enough.
fn is_interactive(tag: &str, attrs: &IndexMap<String, String>) -> bool {
    // hidden inputs carry form state, not interaction
    if tag == "input" && attrs.get("type").map(String::as_str) == Some("hidden") {
        return false;
    }

    if INTERACTIVE_TAGS.contains(&tag) {
        return true;
    }
    if attrs.contains_key("onclick") {
        return true;
    }
    if attrs.get("role").is_some_and(|r| INTERACTIVE_ROLES.contains(&r.as_str())) {
        return true;
    }
    if attrs.get("tabindex").is_some_and(|t| t != "-1") {
        return true;
    }
    if let Some(classes) = attrs.get("class") {
        let classes = classes.to_lowercase();
        if CLASS_TOKENS.iter().any(|t| classes.contains(t)) {
            return true;
        }
    }
    // data attributes whose *name* suggests a menu/item container
    if attrs.keys().any(|k| k.starts_with("data-") && (k.contains("item") || k.contains("menu"))) {
        return true;
    }
    if let Some(testid) = attrs.get("data-testid") {
        let testid = testid.to_lowercase();
        if TESTID_TOKENS.iter().any(|t| testid.contains(t)) {
            return true;
        }
    }
    NAME_ATTRIBUTES.iter().any(|k| attrs.contains_key(*k))
}

/// Goal-independent base score reflecting generic interactivity signals.
/// The scorer adds its keyword boost on top of this.
pub fn structural_score(element: &Element) -> f64 {
    let mut score: f64 = 0.0;

    if INTERACTIVE_TAGS.contains(&element.tag.as_str()) {
        score += 1.0;
    }
    if element.attr("role").is_some_and(|r| INTERACTIVE_ROLES.contains(&r)) {
        score += 0.5;
    }
    if element.attr("onclick").is_some() {
        score += 0.4;
    }
    if element.attr("data-testid").is_some() {
        score += 0.3;
    }
    {
        let classes = element.attr("class").unwrap_or("").to_lowercase();
        if classes.contains("btn") || classes.contains("button") {
            score += 0.5;
        }
    }
    if element.is_tag("a") {
        match element.attr("href") {
            Some(href) if href.starts_with("javascript:") => score -= 0.5,
            Some(_) => score += 0.2,
            None => score -= 0.3,
        }
    }
    // meaningful label beats an empty or rambling one
    let len = element.text.chars().count();
    if (3..=50).contains(&len) {
        score += 0.3;
    } else if len > 50 {
        score += 0.1;
    }

    score.max(0.0)
}

/// Build the ordered selector list for re-locating a node, primary first.
/// Only standard CSS is emitted; the host page evaluates these verbatim.
fn candidate_selectors(tag: &str, attrs: &IndexMap<String, String>, _text: &str) -> Vec<String> {
    fn esc(value: &str, limit: usize) -> String {
        value.chars().take(limit).collect::<String>().replace('\\', "\\\\").replace('"', "\\\"")
    }

    let mut selectors = Vec::new();

    if let Some(id) = attrs.get("id").filter(|v| !v.is_empty()) {
        selectors.push(format!("#{}", id));
    }
    // a semantic-name attribute is the most stable hook on menu pages
    for key in NAME_ATTRIBUTES {
        if let Some(value) = attrs.get(key).filter(|v| !v.is_empty()) {
            selectors.push(format!("[{}=\"{}\"]", key, esc(value, 48)));
            break;
        }
    }
    if let Some(classes) = attrs.get("class") {
        let simple: Vec<&str> = classes
            .split_whitespace()
            .filter(|c| !c.contains(['!', '[', ']', ':', '(', ')']))
            .take(2)
            .collect();
        if !simple.is_empty() {
            selectors.push(format!("{}.{}", tag, simple.join(".")));
        }
    }
    if let Some(role) = attrs.get("role").filter(|v| !v.is_empty()) {
        selectors.push(format!("[role=\"{}\"]", esc(role, 32)));
    }
    if let Some(aria) = attrs.get("aria-label").filter(|v| !v.is_empty()) {
        selectors.push(format!("{}[aria-label*=\"{}\"]", tag, esc(aria, 24)));
    }
    if let Some(name) = attrs.get("name").filter(|v| !v.is_empty()) {
        selectors.push(format!("{}[name*=\"{}\"]", tag, esc(name, 24)));
    }
    if let Some(placeholder) = attrs.get("placeholder").filter(|v| !v.is_empty()) {
        selectors.push(format!("{}[placeholder*=\"{}\"]", tag, esc(placeholder, 24)));
    }
    if tag == "a" {
        if let Some(href) = attrs.get("href").filter(|v| !v.is_empty()) {
            selectors.push(format!("a[href*=\"{}\"]", esc(href, 32)));
        }
    }

    // de-dupe while preserving order, keep the top entries short
    let mut unique = Vec::new();
    for sel in selectors {
        if !unique.contains(&sel) {
            unique.push(sel);
        }
    }
    unique.truncate(5);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_interactive_tags() {
        let html = r#"<html><body>
            <button id="go">Go</button>
            <a href="/menu">Menu</a>
            <input type="text" name="zipcode" placeholder="Enter ZIP code">
            <p>Just a paragraph</p>
        </body></html>"#;

        let elements = detect(html);
        let tags: Vec<&str> = elements.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["button", "a", "input"]);
    }

    #[test]
    fn test_skips_hidden_inputs() {
        let html = r#"<input type="hidden" name="csrf" value="tok"><input type="text" name="q">"#;
        let elements = detect(html);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].attr("name"), Some("q"));
    }

    #[test]
    fn test_detects_clickable_containers() {
        let html = r#"<html><body>
            <div class="meal-card-button">Carne Asada Bowl</div>
            <div role="link" tabindex="0">Find A Store</div>
            <div onclick="open()">Open</div>
            <div data-qa-group-name="Burrito Bowl">Burrito Bowl Order</div>
            <div class="plain-text">Not interactive</div>
            <span tabindex="-1">Skipped</span>
        </body></html>"#;

        let elements = detect(html);
        assert_eq!(elements.len(), 4);
    }

    #[test]
    fn test_link_class_token() {
        let html = r#"<div class="nav-link">Find a Store</div>"#;
        let elements = detect(html);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text, "Find a Store");
    }

    #[test]
    fn test_detects_item_and_menu_data_attributes() {
        let html = r#"<div data-menu-item="taco">Taco</div><li data-item-id="42">Salsa</li>"#;
        assert_eq!(detect(html).len(), 2);
    }

    #[test]
    fn test_testid_tokens() {
        let html = r#"<div data-testid="restaurant-card-3">Main St</div>
                      <div data-testid="promo-banner">Ad</div>"#;
        let elements = detect(html);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text, "Main St");
    }

    #[test]
    fn test_document_order_preserved() {
        let html = r#"<a href="/a">First</a><button>Second</button><a href="/c">Third</a>"#;
        let labels: Vec<String> = detect(html).into_iter().map(|e| e.text).collect();
        assert_eq!(labels, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_malformed_markup_does_not_fail() {
        let html = r#"<div class="btn"><button>Unclosed<a href=>Broken</div>"#;
        let elements = detect(html);
        assert!(!elements.is_empty());
    }

    #[test]
    fn test_label_derivation_applied() {
        let html = r#"<div data-qa-item-name="White Rice" class="item-card">
            White Rice 210 cal Included</div>"#;
        let elements = detect(html);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text, "White Rice");
    }

    #[test]
    fn test_selector_priority_order() {
        let html = r#"<div id="rice" data-qa-item-name="White Rice"
            class="item-card selected" role="button">White Rice</div>"#;
        let elements = detect(html);
        let sels = &elements[0].selectors;
        assert_eq!(sels[0], "#rice");
        assert_eq!(sels[1], "[data-qa-item-name=\"White Rice\"]");
        assert!(sels.contains(&"div.item-card.selected".to_string()));
        assert!(sels.len() <= 5);
    }

    #[test]
    fn test_selector_escaping() {
        let html = r#"<div data-qa-item-name='He said "hi"' class="x">Hi</div>"#;
        let elements = detect(html);
        assert_eq!(elements[0].selectors[0], "[data-qa-item-name=\"He said \\\"hi\\\"\"]");
    }

    #[test]
    fn test_structural_score_signals() {
        let button = Element::new("button").with_text("Order Now").with_attr("class", "btn");
        let card = Element::new("div").with_text("Some Card").with_attr("class", "card");
        let js_link = Element::new("a").with_text("Void").with_attr("href", "javascript:void(0)");

        assert!(structural_score(&button) > structural_score(&card));
        assert!(structural_score(&js_link) < structural_score(&button));
        // never negative
        assert!(structural_score(&Element::new("div")) >= 0.0);
    }
}
