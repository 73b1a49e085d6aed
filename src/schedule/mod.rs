//! Schedule loading, categorization, lookup, and search.
//!
//! [`ScheduleService`] is the one stateful object: it owns the cached
//! document and the backing source, and is constructed explicitly and passed
//! to whoever needs it (the server, the CLI). Everything underneath it is a
//! pure function over the loaded document.

mod categorize;
mod search;
mod source;

pub use categorize::{categorize, Grouping, SessionAssignment, SessionGroup};
pub use search::{search_document, SearchHit};
pub use source::{source_from_spec, FileSource, HttpSource, ScheduleSource};

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{DaySchedule, ScheduleDocument, ScheduleEntry};

/// A schedule that could not be loaded.
///
/// Load failures are terminal for the page view: they are logged and
/// surfaced, never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read schedule file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch schedule from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("schedule payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the schedule document and answers queries over it.
///
/// The document is fetched once and memoized for the lifetime of the
/// service; `invalidate` forces the next `load` to fetch again.
pub struct ScheduleService {
    source: Box<dyn ScheduleSource>,
    assignments: HashMap<String, SessionAssignment>,
    cache: Mutex<Option<Arc<ScheduleDocument>>>,
}

impl ScheduleService {
    pub fn new(
        source: Box<dyn ScheduleSource>,
        assignments: HashMap<String, SessionAssignment>,
    ) -> Self {
        Self {
            source,
            assignments,
            cache: Mutex::new(None),
        }
    }

    /// Load the schedule, returning the cached document when present.
    ///
    /// The cache lock is held across the fetch, so concurrent callers that
    /// arrive before the first load completes share a single request.
    /// Failures are not cached; a later call fetches again.
    pub async fn load(&self) -> Result<Arc<ScheduleDocument>, LoadError> {
        let mut cached = self.cache.lock().await;
        if let Some(doc) = cached.as_ref() {
            return Ok(Arc::clone(doc));
        }

        let location = self.source.describe();
        let bytes = self.source.fetch().await.inspect_err(|err| {
            tracing::error!(source = %location, error = %err, "failed to load schedule");
        })?;

        let doc = match ScheduleDocument::from_json(&bytes) {
            Ok(doc) => Arc::new(doc),
            Err(err) => {
                tracing::error!(source = %location, error = %err, "schedule did not parse");
                return Err(err.into());
            }
        };

        tracing::info!(source = %location, "schedule loaded");
        *cached = Some(Arc::clone(&doc));
        Ok(doc)
    }

    /// Drop the cached document; the next `load` fetches fresh data.
    pub async fn invalidate(&self) {
        self.cache.lock().await.take();
    }

    /// Invalidate and load in one step.
    pub async fn reload(&self) -> Result<Arc<ScheduleDocument>, LoadError> {
        self.invalidate().await;
        self.load().await
    }

    pub async fn get_day(&self, key: &str) -> Result<Option<DaySchedule>, LoadError> {
        Ok(self.load().await?.day(key).cloned())
    }

    pub async fn get_entry(&self, day: &str, id: &str) -> Result<Option<ScheduleEntry>, LoadError> {
        Ok(self.load().await?.entry(day, id).cloned())
    }

    pub async fn search(
        &self,
        term: &str,
        day: Option<&str>,
    ) -> Result<Vec<SearchHit>, LoadError> {
        Ok(search_document(&*self.load().await?, term, day))
    }

    /// Workshop session assignment configured for a day, if any.
    pub fn assignment_for(&self, day: &str) -> Option<&SessionAssignment> {
        self.assignments.get(day)
    }
}
