use crate::error::{Result, ScoutError};
use crate::executor::PageDriver;
use headless_chrome::{Element, Tab};
use std::sync::Arc;

/// Returns true when another element would receive a pointer click aimed at
/// the center of this one
const HIT_TEST_JS: &str = r#"
    function() {
        const rect = this.getBoundingClientRect();
        if (rect.width === 0 || rect.height === 0) {
            return true;
        }
        const hit = document.elementFromPoint(
            rect.left + rect.width / 2,
            rect.top + rect.height / 2
        );
        if (hit === null) {
            return true;
        }
        return !(hit === this || this.contains(hit) || hit.contains(this));
    }
"#;

const JS_CLICK: &str = r#"
    function() {
        this.click();
        return true;
    }
"#;

/// [`PageDriver`] backed by a live CDP tab.
///
/// Handles are CDP node ids, valid until the next document mutation. The
/// executor resolves and clicks under one lock, so a handle is never used
/// across a navigation.
pub struct CdpPage {
    tab: Arc<Tab>,
}

impl CdpPage {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    fn element(&self, node_id: u32) -> Result<Element<'_>> {
        Element::new(&self.tab, node_id)
            .map_err(|e| ScoutError::DriverFailed(format!("Node {} is gone: {}", node_id, e)))
    }
}

impl PageDriver for CdpPage {
    type Handle = u32;

    fn query_all(&self, selector: &str) -> Result<Vec<u32>> {
        // headless_chrome reports zero matches as an error; both that and an
        // invalid selector mean this alternative has nothing to offer
        match self.tab.find_elements(selector) {
            Ok(elements) => Ok(elements.iter().map(|e| e.node_id).collect()),
            Err(e) => {
                log::debug!("query '{}' returned no nodes: {}", selector, e);
                Ok(Vec::new())
            }
        }
    }

    fn is_obstructed(&self, handle: &u32) -> Result<bool> {
        let element = self.element(*handle)?;
        let result = element
            .call_js_fn(HIT_TEST_JS, vec![], false)
            .map_err(|e| ScoutError::DriverFailed(format!("Hit test failed: {}", e)))?;
        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    fn scroll_into_view(&self, handle: &u32) -> Result<()> {
        self.element(*handle)?
            .scroll_into_view()
            .map_err(|e| ScoutError::DriverFailed(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    fn dispatch_click(&self, handle: &u32) -> Result<()> {
        self.element(*handle)?
            .click()
            .map_err(|e| ScoutError::DriverFailed(format!("Click failed: {}", e)))?;
        Ok(())
    }

    fn dispatch_click_js(&self, handle: &u32) -> Result<()> {
        self.element(*handle)?
            .call_js_fn(JS_CLICK, vec![], false)
            .map_err(|e| ScoutError::DriverFailed(format!("JS click failed: {}", e)))?;
        Ok(())
    }
}
