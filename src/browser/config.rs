use std::path::PathBuf;

/// Options for launching a Chrome/Chromium instance
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window
    pub headless: bool,

    /// Viewport width in pixels
    pub window_width: u32,

    /// Viewport height in pixels
    pub window_height: u32,

    /// Path to the Chrome binary; autodetected when `None`
    pub chrome_path: Option<PathBuf>,

    /// Profile directory; a temporary one is used when `None`
    pub user_data_dir: Option<PathBuf>,

    /// Whether to run Chrome with its sandbox enabled
    pub sandbox: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

/// Options for attaching to an already-running browser
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// DevTools WebSocket URL, e.g. `ws://127.0.0.1:9222/devtools/browser/...`
    pub ws_url: String,
}

impl ConnectionOptions {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self { ws_url: ws_url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_defaults() {
        let options = LaunchOptions::default();
        assert!(options.headless);
        assert_eq!((options.window_width, options.window_height), (1920, 1080));
        assert!(options.chrome_path.is_none());
        assert!(options.sandbox);
    }

    #[test]
    fn test_launch_builder() {
        let options = LaunchOptions::default()
            .headless(false)
            .window_size(1280, 800)
            .chrome_path("/usr/bin/chromium")
            .sandbox(false);

        assert!(!options.headless);
        assert_eq!((options.window_width, options.window_height), (1280, 800));
        assert_eq!(options.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert!(!options.sandbox);
    }
}
