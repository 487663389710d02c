use crate::dom::element::Element;
use crate::error::{Result, ScoutError};
use serde::Serialize;
use std::cmp::Ordering;

/// One immutable snapshot of a page: conditioned DOM, fingerprints, and
/// the ranked candidate list with per-snapshot ids assigned.
///
/// A `PageContext` is superseded by the next snapshot, never mutated.
/// Candidate ids have meaning only within the snapshot that assigned them;
/// resolving an id against a later snapshot fails instead of silently
/// addressing a different node.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    url: String,
    title: String,
    raw_dom: String,
    skeleton: String,
    signature: String,
    interactive: Vec<Element>,
}

impl PageContext {
    /// Sort scored elements, assign dense 1-based candidate ids, and
    /// package the result. This is one atomic step: the sorted, id-tagged
    /// sequence is the only one a `PageContext` ever exposes, so an id can
    /// never point at a different element than the one ranked under it.
    pub fn assign(
        url: impl Into<String>,
        title: impl Into<String>,
        raw_dom: impl Into<String>,
        skeleton: impl Into<String>,
        signature: impl Into<String>,
        mut elements: Vec<Element>,
        max_candidates: usize,
    ) -> Self {
        // stable: score ties keep detector emission order
        elements.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        elements.truncate(max_candidates);
        for (index, element) in elements.iter_mut().enumerate() {
            element.candidate_id = Some(index as u32 + 1);
        }

        Self {
            url: url.into(),
            title: title.into(),
            raw_dom: raw_dom.into(),
            skeleton: skeleton.into(),
            signature: signature.into(),
            interactive: elements,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Compressed serialized DOM; opaque to downstream consumers
    pub fn raw_dom(&self) -> &str {
        &self.raw_dom
    }

    /// Structural fingerprint for page-shape comparison
    pub fn skeleton(&self) -> &str {
        &self.skeleton
    }

    /// Content fingerprint for change detection
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Ranked candidates, score-descending, ids `1..=n`
    pub fn interactive(&self) -> &[Element] {
        &self.interactive
    }

    /// Look up a candidate by the id this snapshot assigned. Fails with
    /// [`ScoutError::CandidateNotFound`] for ids from stale snapshots.
    pub fn candidate(&self, id: u32) -> Result<&Element> {
        self.interactive
            .iter()
            .find(|e| e.candidate_id == Some(id))
            .ok_or(ScoutError::CandidateNotFound(id))
    }
}
