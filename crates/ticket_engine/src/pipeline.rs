use ticket_core::{
    sort_by_price, sort_by_title, ExtractError, OfferExtractor, OfferList, TicketExtractor,
    TicketList,
};
use tokio::task::{self, JoinError};

use crate::decode::{decode_page, DecodeError};
use crate::fetch::Fetcher;
use crate::tokens::tokenize;
use crate::FetchError;

/// Why one poll produced no offer list.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("scan did not finish: {0}")]
    Scan(#[from] JoinError),
}

/// Offers on a listing page, cheapest first.
pub fn scan_offers(html: &str, extractor: &OfferExtractor) -> Result<OfferList, ExtractError> {
    let mut offers = extractor.extract(tokenize(html))?;
    sort_by_price(&mut offers);
    Ok(offers)
}

/// Ticket types on an event page, by title.
pub fn scan_tickets(html: &str, extractor: &TicketExtractor) -> TicketList {
    let mut tickets = extractor.extract(tokenize(html));
    sort_by_title(&mut tickets);
    tickets
}

/// One fetch-decode-extract cycle for a listing page.
///
/// Tokenizing and extraction run on the blocking pool so a large page does
/// not stall the other poll tasks sharing the runtime.
pub async fn fetch_offers(
    fetcher: &dyn Fetcher,
    url: &str,
    extractor: &OfferExtractor,
) -> Result<OfferList, PollError> {
    let page = fetcher.fetch(url).await?;
    let html = decode_page(&page.bytes, page.content_type.as_deref())?.html;
    let extractor = extractor.clone();
    let offers = task::spawn_blocking(move || scan_offers(&html, &extractor)).await??;
    Ok(offers)
}

pub async fn fetch_tickets(
    fetcher: &dyn Fetcher,
    url: &str,
    extractor: &TicketExtractor,
) -> Result<TicketList, PollError> {
    let page = fetcher.fetch(url).await?;
    let html = decode_page(&page.bytes, page.content_type.as_deref())?.html;
    let extractor = extractor.clone();
    Ok(task::spawn_blocking(move || scan_tickets(&html, &extractor)).await?)
}
