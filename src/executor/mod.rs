//! Selector resolution and click execution against the live page.
//!
//! The planner hands back either a candidate id from the current
//! [`PageContext`](crate::dom::PageContext) or a raw selector expression.
//! This module turns that into a live element handle and performs the
//! click, tolerating the two failure modes that dominate real pages:
//! compound selectors where only a late-listed alternative matches, and
//! overlays intercepting pointer events at the target's position.

pub mod click;

pub use click::{ClickConfig, ClickExecutor};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Capabilities the host page must supply. The CDP implementation lives in
/// [`crate::browser::CdpPage`]; tests substitute a scripted driver.
///
/// All methods are observers except the two click dispatches; none of them
/// mutate snapshot state.
pub trait PageDriver {
    /// Opaque reference to a live element
    type Handle: Clone + PartialEq + std::fmt::Debug;

    /// Evaluate one (non-compound) selector, returning every match in
    /// document order. An empty result is not an error.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Handle>>;

    /// Whether another element would intercept pointer events at the
    /// target's screen position
    fn is_obstructed(&self, handle: &Self::Handle) -> Result<bool>;

    /// Scroll the element into the viewport
    fn scroll_into_view(&self, handle: &Self::Handle) -> Result<()>;

    /// Dispatch a real pointer click
    fn dispatch_click(&self, handle: &Self::Handle) -> Result<()>;

    /// Programmatic (non-pointer) activation of the element
    fn dispatch_click_js(&self, handle: &Self::Handle) -> Result<()>;
}

/// What the planner chose this turn: a candidate id minted by the current
/// snapshot, or a raw selector expression.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Target {
    /// Address a candidate from the current snapshot
    Candidate {
        /// 1-based id assigned by the candidate assigner
        candidate_id: u32,
    },
    /// Evaluate a selector expression against the live page
    Selector {
        /// CSS selector, possibly compound (comma-separated alternatives)
        selector: String,
    },
}

impl From<u32> for Target {
    fn from(candidate_id: u32) -> Self {
        Target::Candidate { candidate_id }
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector { selector: selector.to_string() }
    }
}

/// A resolved live element, plus how ambiguous the resolution was.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<H> {
    /// Handle of the first match in document order
    pub handle: H,

    /// The selector expression that produced the match
    pub selector: String,

    /// Total live matches across all alternatives; > 1 means the
    /// first-match policy applied
    pub matches: usize,
}

/// How a successful click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickMethod {
    /// Direct pointer click
    Pointer,
    /// JS activation after the obstruction retry budget ran out
    Programmatic,
}

/// Outcome of a successful click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickReport {
    /// Selector that located the element
    pub selector: String,

    /// How the click landed
    pub method: ClickMethod,

    /// Scroll-and-recheck cycles spent on obstruction
    pub retries: u32,

    /// Live matches the selector produced
    pub matches: usize,
}

impl ClickReport {
    /// Whether the programmatic fallback was needed
    pub fn fallback_used(&self) -> bool {
        self.method == ClickMethod::Programmatic
    }
}

/// Split a compound selector on top-level commas, respecting quotes,
/// brackets and parentheses (`:not(a, b)` stays intact).
pub(crate) fn split_compound(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(expr[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(expr[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_deserialization() {
        let by_id: Target = serde_json::from_value(serde_json::json!({"candidate_id": 4})).unwrap();
        assert_eq!(by_id, Target::Candidate { candidate_id: 4 });

        let by_selector: Target =
            serde_json::from_value(serde_json::json!({"selector": "#order"})).unwrap();
        assert_eq!(by_selector, Target::Selector { selector: "#order".to_string() });
    }

    #[test]
    fn test_split_compound_basic() {
        assert_eq!(
            split_compound("a[href*='menu'], button.order, #go"),
            vec!["a[href*='menu']", "button.order", "#go"]
        );
        assert_eq!(split_compound("#single"), vec!["#single"]);
    }

    #[test]
    fn test_split_compound_respects_quotes_and_brackets() {
        assert_eq!(
            split_compound(r#"[aria-label="a, b"], div:not(.x, .y), [data-x='1,2']"#),
            vec![r#"[aria-label="a, b"]"#, "div:not(.x, .y)", "[data-x='1,2']"]
        );
    }

    #[test]
    fn test_split_compound_drops_empty_parts() {
        assert_eq!(split_compound("a, , b,"), vec!["a", "b"]);
        assert!(split_compound("  ").is_empty());
    }
}
