use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ticket_core::{OfferExtractor, OfferList, OfferVocabulary};
use tokio::sync::mpsc;
use watch_logging::watch_info;

use crate::fetch::Fetcher;
use crate::task::{PollTask, TaskError};

/// Who watches which page. One owner may watch many pages and one page may
/// be watched by many owners, each through its own task.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchKey {
    pub owner: String,
    pub url: String,
}

impl WatchKey {
    pub fn new(owner: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for WatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.url, self.owner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("already watching {0}")]
    AlreadyWatching(WatchKey),
    #[error("not watching {0}")]
    NotWatching(WatchKey),
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Caller-held set of running poll tasks. Not shared between threads; the
/// owner serializes access.
pub struct WatchRegistry {
    fetcher: Arc<dyn Fetcher>,
    vocabulary: OfferVocabulary,
    tasks: BTreeMap<WatchKey, PollTask>,
}

impl WatchRegistry {
    pub fn new(fetcher: Arc<dyn Fetcher>, vocabulary: OfferVocabulary) -> Self {
        Self {
            fetcher,
            vocabulary,
            tasks: BTreeMap::new(),
        }
    }

    pub fn start_watch(
        &mut self,
        key: WatchKey,
        interval: Duration,
    ) -> Result<mpsc::Receiver<OfferList>, RegistryError> {
        if self.tasks.contains_key(&key) {
            return Err(RegistryError::AlreadyWatching(key));
        }
        let mut task = PollTask::new(
            key.url.clone(),
            self.fetcher.clone(),
            OfferExtractor::new(self.vocabulary.clone()),
        );
        let offers = task.start(interval)?;
        watch_info!("{} now watches {}", key.owner, key.url);
        self.tasks.insert(key, task);
        Ok(offers)
    }

    pub async fn stop_watch(&mut self, key: &WatchKey) -> Result<(), RegistryError> {
        let mut task = self
            .tasks
            .remove(key)
            .ok_or_else(|| RegistryError::NotWatching(key.clone()))?;
        task.stop().await;
        Ok(())
    }

    pub async fn stop_all(&mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        for (_, mut task) in tasks {
            task.stop().await;
        }
    }

    pub fn is_watching(&self, key: &WatchKey) -> bool {
        self.tasks.contains_key(key)
    }

    /// Pages watched by `owner`, in url order.
    pub fn watched_by<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tasks
            .keys()
            .filter(move |key| key.owner == owner)
            .map(|key| key.url.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
