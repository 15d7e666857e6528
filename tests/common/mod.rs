// tests/common/mod.rs
//
// Scripted in-memory browser: pages are registered by URL, elements carry
// the text found under each locator. No network, no chromedriver.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use movie_scrape::browser::{Browser, Element, Launcher};
use movie_scrape::engine::types::Locator;
use movie_scrape::error::BrowserError;

#[derive(Clone, Debug, Default)]
pub struct FakeElement {
    texts: Vec<(Locator, String)>,
    children: Vec<FakeElement>,
}

impl FakeElement {
    pub fn new() -> Self { Self::default() }

    pub fn text(mut self, locator: Locator, text: &str) -> Self {
        self.texts.push((locator, text.to_string()));
        self
    }

    pub fn child(mut self, child: FakeElement) -> Self {
        self.children.push(child);
        self
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn find_all(&self, _locator: &Locator) -> Result<Vec<Self>, BrowserError> {
        Ok(self.children.clone())
    }

    async fn child_text(&self, locator: &Locator) -> Result<String, BrowserError> {
        self.texts
            .iter()
            .find(|(l, _)| l == locator)
            .map(|(_, t)| t.clone())
            .ok_or_else(|| BrowserError::NotFound(locator.to_string()))
    }
}

#[derive(Clone, Debug)]
pub enum FakePage {
    /// Loads, and the ready element shows up holding `container`; `items` is
    /// what a document-wide search returns.
    Ready { container: FakeElement, items: Vec<FakeElement> },
    /// Loads, but the ready element never appears.
    NeverReady,
    /// Navigation itself fails.
    Unreachable,
}

#[derive(Default)]
struct State {
    pages: HashMap<String, FakePage>,
    current: Option<String>,
    visited: Vec<String>,
    closed: usize,
}

#[derive(Clone, Default)]
pub struct FakeBrowser {
    state: Arc<Mutex<State>>,
}

impl FakeBrowser {
    pub fn new() -> Self { Self::default() }

    pub fn page(self, url: &str, page: FakePage) -> Self {
        self.state.lock().unwrap().pages.insert(url.to_string(), page);
        self
    }

    pub fn visited(&self) -> Vec<String> { self.state.lock().unwrap().visited.clone() }

    pub fn times_closed(&self) -> usize { self.state.lock().unwrap().closed }

    fn current_page(&self) -> Option<FakePage> {
        let st = self.state.lock().unwrap();
        st.current.as_ref().and_then(|u| st.pages.get(u).cloned())
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        let mut st = self.state.lock().unwrap();
        st.visited.push(url.to_string());
        match st.pages.get(url) {
            None | Some(FakePage::Unreachable) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".into(),
            }),
            Some(_) => {
                st.current = Some(url.to_string());
                Ok(())
            }
        }
    }

    async fn wait_for(
        &self,
        _locator: &Locator,
        timeout: Duration,
        _poll: Duration,
    ) -> Result<FakeElement, BrowserError> {
        match self.current_page() {
            Some(FakePage::Ready { container, .. }) => Ok(container),
            _ => {
                tokio::time::sleep(timeout).await;
                Err(BrowserError::Timeout(timeout))
            }
        }
    }

    async fn find_all(&self, _locator: &Locator) -> Result<Vec<FakeElement>, BrowserError> {
        match self.current_page() {
            Some(FakePage::Ready { items, .. }) => Ok(items),
            _ => Ok(Vec::new()),
        }
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.state.lock().unwrap().closed += 1;
        Ok(())
    }
}

/// Hands out clones of one [`FakeBrowser`] and counts launches.
#[derive(Clone)]
pub struct FakeLauncher {
    pub browser: FakeBrowser,
    launches: Arc<AtomicUsize>,
    fail: bool,
}

impl FakeLauncher {
    pub fn new(browser: FakeBrowser) -> Self {
        Self { browser, launches: Arc::new(AtomicUsize::new(0)), fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::new(FakeBrowser::new()) }
    }

    pub fn launches(&self) -> usize { self.launches.load(Ordering::SeqCst) }
}

#[async_trait]
impl Launcher for FakeLauncher {
    type Browser = FakeBrowser;

    async fn launch(&self) -> Result<FakeBrowser, BrowserError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BrowserError::Launch("connection refused".into()));
        }
        Ok(self.browser.clone())
    }
}

/* ---------------- Page builders matching the real sources ---------------- */

pub const IMDB_TITLE: Locator = Locator::Css("h3.ipc-title__text");
pub const IMDB_YEAR: Locator = Locator::Css("span.dli-title-metadata-item:nth-child(1)");
pub const IMDB_DURATION: Locator = Locator::Css("span.dli-title-metadata-item:nth-child(2)");
pub const RT_TITLE: Locator = Locator::Css("span.p--small");

pub fn imdb_item(title: &str, year: &str, duration: Option<&str>) -> FakeElement {
    let el = FakeElement::new().text(IMDB_TITLE, title).text(IMDB_YEAR, year);
    match duration {
        Some(d) => el.text(IMDB_DURATION, d),
        None => el,
    }
}

pub fn imdb_page(items: Vec<FakeElement>) -> FakePage {
    let container = items.into_iter().fold(FakeElement::new(), FakeElement::child);
    FakePage::Ready { container, items: Vec::new() }
}

pub fn rt_tile(title: Option<&str>) -> FakeElement {
    match title {
        Some(t) => FakeElement::new().text(RT_TITLE, t),
        None => FakeElement::new(),
    }
}

pub fn rt_page(tiles: Vec<FakeElement>) -> FakePage {
    FakePage::Ready { container: FakeElement::new(), items: tiles }
}

pub fn numbered_imdb_items(n: usize) -> Vec<FakeElement> {
    (1..=n)
        .map(|i| imdb_item(&format!("{i}. Movie {i}"), &format!("{}", 1950 + i), Some("1h 40m")))
        .collect()
}
