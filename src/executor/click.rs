use crate::dom::PageContext;
use crate::error::{Result, ScoutError};
use crate::executor::{
    split_compound, ClickMethod, ClickReport, PageDriver, Resolution, Target,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Retry and timing behavior of the click ladder.
#[derive(Debug, Clone)]
pub struct ClickConfig {
    /// Scroll-and-recheck cycles allowed before the programmatic fallback
    pub max_retries: u32,

    /// Pause between obstruction rechecks
    pub retry_delay_ms: u64,

    /// Hard deadline for the whole click attempt
    pub timeout_ms: u64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self { max_retries: 3, retry_delay_ms: 150, timeout_ms: 5_000 }
    }
}

/// Resolves planner targets against the live page and executes clicks.
///
/// Resolution policy: alternatives of a compound selector are evaluated
/// independently and merged in document order; with multiple matches the
/// first wins and a warning records the ambiguity. Click policy: obstructed
/// targets get scrolled into view and rechecked up to the retry budget,
/// then a programmatic click is attempted before giving up.
///
/// A per-executor lock serializes resolution and clicking, so two callers
/// can never interleave their queries against the same page mid-click.
pub struct ClickExecutor<D: PageDriver> {
    driver: D,
    config: ClickConfig,
    page_lock: Mutex<()>,
}

impl<D: PageDriver> ClickExecutor<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, ClickConfig::default())
    }

    pub fn with_config(driver: D, config: ClickConfig) -> Self {
        Self { driver, config, page_lock: Mutex::new(()) }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Resolve a target to a live element without clicking it.
    pub fn resolve(&self, context: &PageContext, target: &Target) -> Result<Resolution<D::Handle>> {
        let _guard = self.lock_page();
        self.resolve_locked(context, target)
    }

    /// Resolve and click in one serialized step.
    pub fn click(&self, context: &PageContext, target: &Target) -> Result<ClickReport> {
        let cancel = AtomicBool::new(false);
        self.click_cancellable(context, target, &cancel)
    }

    /// Like [`click`](Self::click), but checks `cancel` between retries and
    /// returns [`ScoutError::Cancelled`] once it is raised.
    pub fn click_cancellable(
        &self,
        context: &PageContext,
        target: &Target,
        cancel: &AtomicBool,
    ) -> Result<ClickReport> {
        let _guard = self.lock_page();
        let started = Instant::now();
        let resolution = self.resolve_locked(context, target)?;
        self.click_resolved(resolution, started, cancel)
    }

    fn lock_page(&self) -> std::sync::MutexGuard<'_, ()> {
        // a poisoned lock only means an earlier click panicked; the page
        // itself is still usable
        self.page_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn resolve_locked(
        &self,
        context: &PageContext,
        target: &Target,
    ) -> Result<Resolution<D::Handle>> {
        let selectors: Vec<String> = match target {
            Target::Candidate { candidate_id } => {
                context.candidate(*candidate_id)?.selectors.clone()
            }
            Target::Selector { selector } => vec![selector.clone()],
        };
        if selectors.is_empty() {
            return Err(ScoutError::ElementNotFound("candidate has no selectors".to_string()));
        }

        for expr in &selectors {
            let mut matches = self.query_compound(expr)?;
            if matches.is_empty() {
                continue;
            }
            if matches.len() > 1 {
                log::warn!(
                    "selector '{}' matched {} live elements; clicking the first in document order",
                    expr,
                    matches.len()
                );
            }
            let count = matches.len();
            return Ok(Resolution {
                handle: matches.swap_remove(0),
                selector: expr.clone(),
                matches: count,
            });
        }
        Err(ScoutError::ElementNotFound(selectors.join(" | ")))
    }

    /// Evaluate each alternative of a compound selector separately and
    /// merge the matches, deduplicated, keeping document order within each
    /// alternative. An alternative the page rejects is skipped, not fatal.
    fn query_compound(&self, expr: &str) -> Result<Vec<D::Handle>> {
        let mut merged: Vec<D::Handle> = Vec::new();
        for alternative in split_compound(expr) {
            match self.driver.query_all(alternative) {
                Ok(handles) => {
                    for handle in handles {
                        if !merged.contains(&handle) {
                            merged.push(handle);
                        }
                    }
                }
                Err(err) => {
                    log::debug!("selector alternative '{}' rejected: {}", alternative, err);
                }
            }
        }
        Ok(merged)
    }

    fn click_resolved(
        &self,
        resolution: Resolution<D::Handle>,
        started: Instant,
        cancel: &AtomicBool,
    ) -> Result<ClickReport> {
        let deadline = Duration::from_millis(self.config.timeout_ms);
        let mut retries = 0u32;

        loop {
            if cancel.load(Ordering::Relaxed) {
                return Err(ScoutError::Cancelled);
            }
            if started.elapsed() >= deadline {
                return Err(ScoutError::ClickTimeout {
                    selector: resolution.selector,
                    waited_ms: started.elapsed().as_millis() as u64,
                });
            }

            if !self.driver.is_obstructed(&resolution.handle)? {
                self.driver.dispatch_click(&resolution.handle)?;
                return Ok(ClickReport {
                    selector: resolution.selector,
                    method: ClickMethod::Pointer,
                    retries,
                    matches: resolution.matches,
                });
            }

            if retries >= self.config.max_retries {
                break;
            }
            log::debug!(
                "'{}' is obstructed, scrolling into view (attempt {}/{})",
                resolution.selector,
                retries + 1,
                self.config.max_retries
            );
            self.driver.scroll_into_view(&resolution.handle)?;
            retries += 1;
            std::thread::sleep(Duration::from_millis(self.config.retry_delay_ms));
        }

        // still covered after the retry budget: bypass the pointer path
        match self.driver.dispatch_click_js(&resolution.handle) {
            Ok(()) => Ok(ClickReport {
                selector: resolution.selector,
                method: ClickMethod::Programmatic,
                retries,
                matches: resolution.matches,
            }),
            Err(err) => {
                log::debug!("programmatic click fallback failed: {}", err);
                Err(ScoutError::ClickObstructed {
                    selector: resolution.selector,
                    attempts: retries + 1,
                })
            }
        }
    }
}
