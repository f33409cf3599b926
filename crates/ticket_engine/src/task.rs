use std::sync::Arc;
use std::time::Duration;

use ticket_core::{OfferExtractor, OfferList};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use watch_logging::{watch_debug, watch_error, watch_info, watch_warn};

use crate::fetch::Fetcher;
use crate::pipeline::fetch_offers;

/// At most this many offer lists wait for the consumer; the worker stalls
/// on the next one until the consumer catches up.
const OUTPUT_CAPACITY: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("poll task is already running")]
    AlreadyRunning,
    #[error("poll task was stopped and cannot be restarted")]
    Stopped,
    #[error("poll interval must be greater than zero")]
    ZeroInterval,
}

/// Polls one listing page on a fixed interval and publishes the
/// non-empty, price-sorted offer lists it finds.
///
/// `Idle -> Running -> Stopped`, one way. A stopped task stays stopped;
/// create a new one to watch again.
pub struct PollTask {
    url: String,
    fetcher: Arc<dyn Fetcher>,
    extractor: OfferExtractor,
    state: TaskState,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl PollTask {
    pub fn new(url: impl Into<String>, fetcher: Arc<dyn Fetcher>, extractor: OfferExtractor) -> Self {
        Self {
            url: url.into(),
            fetcher,
            extractor,
            state: TaskState::Idle,
            cancel: CancellationToken::new(),
            worker: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Spawns the worker on the current Tokio runtime and hands back the
    /// receiving end of its output channel. The channel closes once the
    /// worker exits.
    ///
    /// The first poll happens one `interval` after start.
    pub fn start(&mut self, interval: Duration) -> Result<mpsc::Receiver<OfferList>, TaskError> {
        match self.state {
            TaskState::Idle => {}
            TaskState::Running => return Err(TaskError::AlreadyRunning),
            TaskState::Stopped => return Err(TaskError::Stopped),
        }
        if interval.is_zero() {
            return Err(TaskError::ZeroInterval);
        }

        let (tx, rx) = mpsc::channel(OUTPUT_CAPACITY);
        let worker = PollWorker {
            url: self.url.clone(),
            fetcher: self.fetcher.clone(),
            extractor: self.extractor.clone(),
            cancel: self.cancel.clone(),
            interval,
            tx,
        };
        self.worker = Some(tokio::spawn(worker.run()));
        self.state = TaskState::Running;
        watch_info!("started watching {} every {:?}", self.url, interval);
        Ok(rx)
    }

    /// Cancels the worker and waits for it to exit.
    ///
    /// Safe to call in any state and any number of times. A list the worker
    /// was still trying to hand over when the stop arrived is dropped.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            if let Err(err) = worker.await {
                watch_error!("poll worker for {} ended abnormally: {}", self.url, err);
            }
            watch_info!("stopped watching {}", self.url);
        }
        self.state = TaskState::Stopped;
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct PollWorker {
    url: String,
    fetcher: Arc<dyn Fetcher>,
    extractor: OfferExtractor,
    cancel: CancellationToken,
    interval: Duration,
    tx: mpsc::Sender<OfferList>,
}

impl PollWorker {
    async fn run(self) {
        let PollWorker {
            url,
            fetcher,
            extractor,
            cancel,
            interval,
            tx,
        } = self;

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        // A slow consumer delays the schedule instead of causing a burst of polls.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let polled = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                polled = fetch_offers(fetcher.as_ref(), &url, &extractor) => polled,
            };

            let offers = match polled {
                Ok(offers) => offers,
                Err(err) => {
                    watch_warn!("skipping poll of {}: {}", url, err);
                    continue;
                }
            };
            watch_debug!("found {} offers at {}", offers.len(), url);
            if offers.is_empty() {
                continue;
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                sent = tx.send(offers) => {
                    if sent.is_err() {
                        watch_info!("consumer for {} went away", url);
                        break;
                    }
                }
            }
        }

        // Sole owner of the sender: dropping it closes the channel exactly once.
        drop(tx);
        watch_debug!("poll worker for {} exited", url);
    }
}
