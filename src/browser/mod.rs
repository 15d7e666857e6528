// src/browser/mod.rs
//! The seam between the scrape engine and a real browser.
//!
//! The engine only needs four things from a page: go to a URL, wait for an
//! element, list elements, and read text below an element. Keeping that
//! surface behind traits lets the engine run against a scripted page in tests
//! and against chromedriver (see [`webdriver`]) in production.

use std::time::Duration;

use async_trait::async_trait;

use crate::engine::types::Locator;
use crate::error::BrowserError;

pub mod webdriver;

pub use webdriver::{ChromeLauncher, WebDriverBrowser};

/// A handle to one rendered element.
#[async_trait]
pub trait Element: Send + Sync + Sized {
    /// All descendants matching `locator`, in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError>;

    /// Raw text of the first descendant matching `locator`.
    async fn child_text(&self, locator: &Locator) -> Result<String, BrowserError>;
}

/// One browser session, used serially.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Element;

    /// Navigate and return once the driver reports the load finished.
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Block until `locator` is present, polling every `poll`, or fail with
    /// [`BrowserError::Timeout`] once `timeout` has elapsed.
    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
        poll: Duration,
    ) -> Result<Self::Element, BrowserError>;

    /// All matching elements in the whole document, in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, BrowserError>;

    /// End the session. Must be called exactly once, on every exit path.
    async fn close(&self) -> Result<(), BrowserError>;
}

/// Acquires the browser for a run. Kept separate from [`Browser`] so that
/// nothing is started until the run's configuration has been validated.
#[async_trait]
pub trait Launcher: Send + Sync {
    type Browser: Browser;

    async fn launch(&self) -> Result<Self::Browser, BrowserError>;
}
