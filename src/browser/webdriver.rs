// src/browser/webdriver.rs
//! Chrome via chromedriver, driven with `thirtyfour`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use thirtyfour::prelude::*;
use tracing::{debug, warn};

use super::{Browser, Element, Launcher};
use crate::config::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::engine::types::Locator;
use crate::error::BrowserError;

fn by(locator: &Locator) -> By {
    match *locator {
        Locator::Css(s) => By::Css(s),
        Locator::XPath(s) => By::XPath(s),
        Locator::Tag(s) => By::Tag(s),
    }
}

fn driver_err(e: WebDriverError) -> BrowserError {
    BrowserError::Driver(e.to_string())
}

/* ---------------- Launching ---------------- */

/// Connects to a running chromedriver and opens a Chrome session.
#[derive(Clone, Debug)]
pub struct ChromeLauncher {
    pub server_url: String,
    pub headless: bool,
}

impl ChromeLauncher {
    pub fn new(server_url: impl Into<String>, headless: bool) -> Self {
        Self { server_url: server_url.into(), headless }
    }

    fn chrome_args(&self) -> Vec<String> {
        let mut args = vec![
            s!("--log-level=3"),
            s!("--disable-logging"),
            s!("--disable-gpu"),
            format!("--window-size={WINDOW_WIDTH},{WINDOW_HEIGHT}"),
        ];
        if self.headless {
            args.push(s!("--headless=new"));
        }
        args
    }
}

#[async_trait]
impl Launcher for ChromeLauncher {
    type Browser = WebDriverBrowser;

    async fn launch(&self) -> Result<WebDriverBrowser, BrowserError> {
        let mut caps = DesiredCapabilities::chrome();
        for arg in self.chrome_args() {
            caps.add_arg(&arg)
                .map_err(|e| BrowserError::Launch(format!("bad chrome arg '{arg}': {e}")))?;
        }

        debug!(server = %self.server_url, headless = self.headless, "connecting to chromedriver");
        let driver = WebDriver::new(self.server_url.as_str(), caps)
            .await
            .map_err(|e| BrowserError::Launch(format!("{e} (is chromedriver running at {}?)", self.server_url)))?;

        if !self.headless {
            if let Err(e) = driver.maximize_window().await {
                warn!("could not maximize window: {e}");
            }
        }
        Ok(WebDriverBrowser { driver })
    }
}

/* ---------------- Session ---------------- */

pub struct WebDriverBrowser {
    driver: WebDriver,
}

pub struct WebDriverElement {
    inner: WebElement,
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Element = WebDriverElement;

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.driver.goto(url).await.map_err(|e| BrowserError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
        poll: Duration,
    ) -> Result<WebDriverElement, BrowserError> {
        let started = Instant::now();
        match self.driver.query(by(locator)).wait(timeout, poll).first().await {
            Ok(inner) => Ok(WebDriverElement { inner }),
            // The query reports "no such element" once its deadline passes;
            // anything earlier is a real driver failure.
            Err(_) if started.elapsed() >= timeout => Err(BrowserError::Timeout(timeout)),
            Err(e) => Err(driver_err(e)),
        }
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<WebDriverElement>, BrowserError> {
        let found = self.driver.find_all(by(locator)).await.map_err(driver_err)?;
        Ok(found.into_iter().map(|inner| WebDriverElement { inner }).collect())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        debug!("quitting browser session");
        self.driver.clone().quit().await.map_err(driver_err)
    }
}

#[async_trait]
impl Element for WebDriverElement {
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError> {
        let found = self.inner.find_all(by(locator)).await.map_err(driver_err)?;
        Ok(found.into_iter().map(|inner| WebDriverElement { inner }).collect())
    }

    async fn child_text(&self, locator: &Locator) -> Result<String, BrowserError> {
        let child = self
            .inner
            .find(by(locator))
            .await
            .map_err(|_| BrowserError::NotFound(locator.to_string()))?;
        child.text().await.map_err(driver_err)
    }
}
