use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::browser::page::CdpPage;
use crate::dom::{self, GoalLexicon, PageContext, SnapshotConfig};
use crate::error::{Result, ScoutError};
use crate::executor::ClickExecutor;
use headless_chrome::{Browser, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

/// Browser session that manages a Chrome/Chromium instance and produces
/// page snapshots for the candidate pipeline
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Tunables for snapshot compression and candidate capping
    snapshot_config: SnapshotConfig,

    /// Goal vocabulary used by the candidate scorer
    lexicon: GoalLexicon,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Set the browser's idle timeout to 1 hour (default is 30 seconds) to prevent the session from closing too soon
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }
        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser =
            Browser::new(launch_opts).map_err(|e| ScoutError::LaunchFailed(e.to_string()))?;

        browser
            .new_tab()
            .map_err(|e| ScoutError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self {
            browser,
            snapshot_config: SnapshotConfig::default(),
            lexicon: GoalLexicon::default(),
        })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url)
            .map_err(|e| ScoutError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            browser,
            snapshot_config: SnapshotConfig::default(),
            lexicon: GoalLexicon::default(),
        })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    pub fn with_snapshot_config(mut self, config: SnapshotConfig) -> Self {
        self.snapshot_config = config;
        self
    }

    pub fn with_lexicon(mut self, lexicon: GoalLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Create a new tab and set it as active
    pub fn new_tab(&mut self) -> Result<Arc<Tab>> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| ScoutError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;
        Ok(tab)
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| ScoutError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // First pass: check for both visibility and focus (strongest signal)
        for tab in &tabs {
            let result =
                tab.evaluate("document.visibilityState === 'visible' && document.hasFocus()", false);
            match result {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(e) => {
                    log::debug!("Failed to check tab status: {}", e);
                    continue;
                }
            }
        }

        // Second pass: check just for visibility (weaker signal, but better than nothing)
        for tab in &tabs {
            let result = tab.evaluate("document.visibilityState === 'visible'", false);
            match result {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(_) => continue,
            }
        }

        Err(ScoutError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| ScoutError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| ScoutError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Capture the active tab and run the full candidate pipeline against
    /// the given goal. Each call produces a fresh [`PageContext`] with its
    /// own candidate ids; the previous one is stale from this point on.
    pub fn snapshot(&self, goal: &str) -> Result<PageContext> {
        let tab = self.tab()?;
        let raw_dom = tab
            .get_content()
            .map_err(|e| ScoutError::DomParseFailed(format!("Failed to read page content: {}", e)))?;
        let title = tab.get_title().unwrap_or_default();
        let url = tab.get_url();

        Ok(dom::build_page_context(&url, &title, &raw_dom, goal, &self.snapshot_config, &self.lexicon))
    }

    /// Driver view of the active tab, for use with a [`ClickExecutor`]
    pub fn page(&self) -> Result<CdpPage> {
        Ok(CdpPage::new(self.tab()?))
    }

    /// Click executor bound to the active tab
    pub fn executor(&self) -> Result<ClickExecutor<CdpPage>> {
        Ok(ClickExecutor::new(self.page()?))
    }

    /// Close the active tab
    pub fn close_active_tab(&mut self) -> Result<()> {
        self.tab()?
            .close(true)
            .map_err(|e| ScoutError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;

        Ok(())
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // The browser shuts down when the Browser instance is dropped;
        // closing the tabs is the strongest shutdown available here
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}
