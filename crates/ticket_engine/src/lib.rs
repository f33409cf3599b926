//! Ticket engine: fetching, tokenizing and the polling lifecycle.
mod config;
mod decode;
mod fetch;
mod pipeline;
mod registry;
mod task;
mod tokens;
mod types;

pub use config::{ConfigError, FetchConfig, WatchConfig};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use pipeline::{fetch_offers, fetch_tickets, scan_offers, scan_tickets, PollError};
pub use registry::{RegistryError, WatchKey, WatchRegistry};
pub use task::{PollTask, TaskError, TaskState};
pub use tokens::tokenize;
pub use types::{FailureKind, FetchError, RawPage};
