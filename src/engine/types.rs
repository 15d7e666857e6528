// src/engine/types.rs
use std::fmt;
use std::time::Duration;

/* ---------------- Locating things on a page ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    Css(&'static str),
    XPath(&'static str),
    Tag(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css={s}"),
            Locator::XPath(s) => write!(f, "xpath={s}"),
            Locator::Tag(s) => write!(f, "tag={s}"),
        }
    }
}

/// Where result items are enumerated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemScope {
    /// Children of the element the readiness wait returned.
    ReadyContainer,
    /// Anywhere in the document.
    Document,
}

/* ---------------- Field specs ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldSource {
    /// Text of the first child matching the locator.
    Child(Locator),
    /// The job's category label, e.g. "Sci-Fi".
    CategoryLabel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    None,
    StripRank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub source: FieldSource,
    pub fallback: Option<&'static str>,
    pub transform: Transform,
}

impl FieldSpec {
    pub const fn child(name: &'static str, locator: Locator) -> Self {
        Self { name, source: FieldSource::Child(locator), fallback: None, transform: Transform::None }
    }

    pub const fn category(name: &'static str) -> Self {
        Self { name, source: FieldSource::CategoryLabel, fallback: None, transform: Transform::None }
    }

    pub const fn or(mut self, fallback: &'static str) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub const fn strip_rank(mut self) -> Self {
        self.transform = Transform::StripRank;
        self
    }
}

/* ---------------- Timing ---------------- */

/// Pause between navigation and the readiness wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleDelay {
    None,
    Fixed(Duration),
    /// Uniformly random in `min..=max`.
    Jitter { min: Duration, max: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadyWait {
    pub timeout: Duration,
    pub poll: Duration,
}

/* ---------------- Output ---------------- */

/// One successfully extracted element: field name -> value, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    fields: Vec<(String, String)>,
}

impl ExtractedRecord {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ExtractedRecord {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect() }
    }
}

/// Records produced by one session against one category page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeBatch {
    pub source: &'static str,
    pub category: String,
    pub columns: Vec<String>,
    pub records: Vec<ExtractedRecord>,
}

impl ScrapeBatch {
    pub fn empty(source: &'static str, category: &str, columns: Vec<String>) -> Self {
        Self { source, category: category.to_string(), columns, records: Vec::new() }
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Rows in column order, ready for the CSV writer.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|r| self.columns.iter().map(|c| r.get(c).unwrap_or_default().to_string()).collect())
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PageLoading,
    AwaitingReady,
    Enumerating,
    PerElementExtracting,
    Completed,
    Failed,
}
