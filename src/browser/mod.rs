//! Chrome session management and the live-page driver.

pub mod config;
pub mod page;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use page::CdpPage;
pub use session::BrowserSession;
