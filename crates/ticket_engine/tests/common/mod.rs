#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ticket_engine::{FailureKind, FetchError, Fetcher, RawPage};

pub const LISTING_URL: &str = "https://www.ticketswap.com/event/rihanna/floor/4857";

pub struct Offer<'a> {
    pub title: &'a str,
    pub seller: &'a str,
    pub price: &'a str,
    pub href: &'a str,
}

pub fn offer<'a>(title: &'a str, price: &'a str, href: &'a str) -> Offer<'a> {
    Offer {
        title,
        seller: "Jan",
        price,
        href,
    }
}

/// Listing page with one `ad-list` section whose heading reads `status`.
pub fn listing_page(status: &str, offers: &[Offer]) -> String {
    let articles: String = offers
        .iter()
        .map(|o| {
            format!(
                r#"<article itemprop="tickets">
<a itemprop="offerurl" href="{href}">
<div class="ad-list-title">{title}</div>
<div class="name">{seller}</div>
<meta itemprop="quantity" content="1" />
<meta itemprop="price" content="{price}" />
<meta itemprop="currency" content="EUR" />
</a>
</article>
"#,
                href = o.href,
                title = o.title,
                seller = o.seller,
                price = o.price,
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html><head><title>Rihanna - Floor</title></head>
<body>
<section class="ad-list">
<h2>{status}</h2>
{articles}</section>
</body></html>"#
    )
}

pub fn available_page() -> String {
    listing_page(
        "Available",
        &[
            offer("Floor", "45.00", "/listing/rihanna/1"),
            offer("Floor", "20.00", "/listing/rihanna/2"),
        ],
    )
}

pub fn sold_out_page() -> String {
    listing_page("Sold", &[offer("Floor", "45.00", "/listing/rihanna/1")])
}

pub fn html_output(html: &str) -> RawPage {
    RawPage {
        bytes: html.as_bytes().to_vec(),
        content_type: Some("text/html; charset=utf-8".to_string()),
    }
}

type Respond = dyn Fn(usize) -> Result<RawPage, FetchError> + Send + Sync;

/// Fetcher answering from a closure of the zero-based call number.
pub struct StubFetcher {
    calls: AtomicUsize,
    respond: Box<Respond>,
}

impl StubFetcher {
    pub fn new(
        respond: impl Fn(usize) -> Result<RawPage, FetchError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            respond: Box::new(respond),
        })
    }

    pub fn serving(html: String) -> Arc<Self> {
        Self::new(move |_| Ok(html_output(&html)))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(|_| Err(FetchError::new(FailureKind::Network, "connection refused")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<RawPage, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(call)
    }
}
