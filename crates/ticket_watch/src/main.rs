//! Watches a resale listing page and prints every offer list it finds.

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use ticket_core::{format_offers, OfferExtractor, TicketExtractor};
use ticket_engine::{fetch_tickets, PollTask, ReqwestFetcher, WatchConfig};
use watch_logging::{watch_info, watch_warn};

use crate::logging::LogDestination;

/// Resale ticket listing watcher
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Listing page to watch, or event page with --tickets
    url: String,

    /// RON configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,

    /// Print the ticket types of an event page once instead of watching
    #[arg(long)]
    tickets: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::initialize(args.log);

    let config = match &args.config {
        Some(path) => WatchConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => WatchConfig::default(),
    };
    let fetcher = Arc::new(
        ReqwestFetcher::new(config.fetch.to_settings()).context("building http client")?,
    );

    if args.tickets {
        let extractor = TicketExtractor::new(config.tickets.clone());
        let tickets = fetch_tickets(fetcher.as_ref(), &args.url, &extractor)
            .await
            .with_context(|| format!("reading ticket types from {}", args.url))?;
        for ticket in &tickets {
            println!("{ticket}");
        }
        return Ok(());
    }

    let mut task = PollTask::new(
        args.url.clone(),
        fetcher,
        OfferExtractor::new(config.offers.clone()),
    );
    let mut offers = task.start(config.poll_interval())?;
    watch_info!("press Ctrl-C to stop");

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    watch_warn!("cannot listen for Ctrl-C: {}", err);
                }
                break;
            }
            list = offers.recv() => match list {
                Some(list) => print!("{}", format_offers(&list)),
                None => break,
            },
        }
    }

    task.stop().await;
    Ok(())
}
