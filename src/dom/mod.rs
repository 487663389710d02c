//! DOM snapshot pipeline.
//!
//! One navigation or mutation event flows through here exactly once:
//! raw DOM -> compression -> interactive node detection -> goal-aware
//! scoring -> candidate assignment -> [`PageContext`]. The resulting
//! context is read-only for the rest of the planning turn; the next
//! snapshot supersedes it.
//!
//! Everything in this module is pure and total: a node with broken markup
//! degrades to an empty label, it never fails the pipeline or its
//! siblings. Only the browser/executor layers return errors.

pub mod context;
pub mod detect;
pub mod element;
pub mod label;
pub mod lexicon;
pub mod score;
pub mod snapshot;

pub use context::PageContext;
pub use element::{Element, NAME_ATTRIBUTES};
pub use lexicon::GoalLexicon;
pub use snapshot::SnapshotConfig;

/// Run the full snapshot pipeline over serialized DOM text.
///
/// Scoring and assignment are deterministic: identical `(raw_dom, goal)`
/// input always produces the same candidate-id-to-element mapping.
pub fn build_page_context(
    url: &str,
    title: &str,
    raw_dom: &str,
    goal: &str,
    config: &SnapshotConfig,
    lexicon: &GoalLexicon,
) -> PageContext {
    let compressed = snapshot::compress_dom(raw_dom, goal, config);
    let signature = snapshot::page_signature(&compressed);
    let skeleton = snapshot::dom_skeleton(&compressed);

    let mut elements = detect::detect(&compressed);
    score::score_elements(&mut elements, goal, lexicon);

    PageContext::assign(url, title, compressed, skeleton, signature, elements, config.max_candidates)
}
