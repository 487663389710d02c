//! # page-scout
//!
//! A Rust library for goal-directed web page exploration via Chrome DevTools Protocol (CDP):
//! it turns a live page into a ranked list of clickable candidates and executes clicks on them.
//!
//! ## Features
//!
//! - **Interactive Element Discovery**: Find everything clickable on a page, including
//!   div-soup cards that only markup attributes reveal as interactive
//! - **Label Derivation**: Distill a short human-readable label from each element's
//!   attributes and text
//! - **Goal-Aware Scoring**: Rank candidates by structural interactivity plus keyword
//!   overlap with a natural-language goal
//! - **Stable Candidate IDs**: Dense per-snapshot ids (`1..=n`) that a planner can hand
//!   back to address an element; stale ids fail instead of misfiring
//! - **Resilient Click Execution**: Compound-selector resolution, overlay detection,
//!   scroll-and-retry, and a programmatic click fallback
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use page_scout::{BrowserSession, LaunchOptions, Target};
//!
//! # fn main() -> page_scout::Result<()> {
//! // Launch a browser and open the page
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com/menu")?;
//! session.wait_for_navigation()?;
//!
//! // Snapshot the page against a goal
//! let ctx = session.snapshot("Select the Burrito Bowl option.")?;
//! for candidate in ctx.interactive() {
//!     println!("[{}] {} ({:.1})", candidate.candidate_id.unwrap_or(0), candidate.text, candidate.score);
//! }
//!
//! // Click the top-ranked candidate
//! let executor = session.executor()?;
//! let report = executor.click(&ctx, &Target::from(1))?;
//! println!("clicked via {} ({:?})", report.selector, report.method);
//! # Ok(())
//! # }
//! ```
//!
//! ## Offline Pipeline
//!
//! The snapshot pipeline is pure and runs without a browser, which is how most of the
//! test suite exercises it:
//!
//! ```rust
//! use page_scout::dom::{build_page_context, GoalLexicon, SnapshotConfig};
//!
//! let html = r#"<body><button class="btn">Order Now</button></body>"#;
//! let ctx = build_page_context(
//!     "https://example.com",
//!     "Menu",
//!     html,
//!     "order a bowl",
//!     &SnapshotConfig::default(),
//!     &GoalLexicon::default(),
//! );
//! assert_eq!(ctx.interactive().len(), 1);
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and the live-page driver
//! - [`dom`]: Snapshot pipeline (compression, detection, labeling, scoring, assignment)
//! - [`executor`]: Selector resolution and click execution
//! - [`error`]: Error types and result alias

pub mod browser;
pub mod dom;
pub mod error;
pub mod executor;

pub use browser::{BrowserSession, CdpPage, ConnectionOptions, LaunchOptions};
pub use dom::{build_page_context, Element, GoalLexicon, PageContext, SnapshotConfig};
pub use error::{Result, ScoutError};
pub use executor::{ClickConfig, ClickExecutor, ClickReport, PageDriver, Target};
