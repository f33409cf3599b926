mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{available_page, listing_page, offer, sold_out_page, StubFetcher, LISTING_URL};
use pretty_assertions::assert_eq;
use ticket_core::{ExtractError, OfferExtractor, TicketExtractor};
use ticket_engine::{fetch_offers, scan_offers, scan_tickets, tokenize};

fn is_sorted(prices: &[f64]) -> bool {
    prices.windows(2).all(|pair| pair[0] <= pair[1])
}

#[test]
fn available_page_yields_offers_cheapest_first() {
    let offers = scan_offers(&available_page(), &OfferExtractor::default()).unwrap();

    let summary: Vec<_> = offers
        .iter()
        .map(|o| (o.price, o.link.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (20.0, "https://www.ticketswap.com/listing/rihanna/2"),
            (45.0, "https://www.ticketswap.com/listing/rihanna/1"),
        ]
    );
    assert!(offers.iter().all(|o| o.title == "Floor"
        && o.seller == "Jan"
        && o.currency == "EUR"
        && o.quantity == 1));
}

#[test]
fn sold_out_page_yields_nothing() {
    let offers = scan_offers(&sold_out_page(), &OfferExtractor::default()).unwrap();
    assert!(offers.is_empty());
}

#[test]
fn page_without_listing_yields_nothing() {
    let html = "<html><body><p>Available</p><article itemprop=\"tickets\"></article></body></html>";
    let offers = scan_offers(html, &OfferExtractor::default()).unwrap();
    assert!(offers.is_empty());
}

#[test]
fn many_offers_come_back_sorted() {
    let prices = ["80.00", "19.99", "120", "20", "19.98", "55.5"];
    let hrefs: Vec<String> = (0..prices.len()).map(|i| format!("/listing/{i}")).collect();
    let items: Vec<_> = prices
        .iter()
        .zip(&hrefs)
        .map(|(price, href)| offer("Floor", price, href))
        .collect();

    let offers = scan_offers(&listing_page("Available", &items), &OfferExtractor::default()).unwrap();
    let prices: Vec<f64> = offers.iter().map(|o| o.price).collect();
    assert_eq!(prices.len(), 6);
    assert!(is_sorted(&prices));
}

#[test]
fn non_numeric_price_fails_the_scan() {
    let html = listing_page("Available", &[offer("Floor", "on request", "/listing/1")]);
    assert!(scan_offers(&html, &OfferExtractor::default()).is_err());
}

#[test]
fn non_finite_prices_fail_the_scan() {
    let items = [
        offer("Floor", "NaN", "/listing/1"),
        offer("Floor", "5", "/listing/2"),
        offer("Floor", "inf", "/listing/3"),
        offer("Floor", "-3", "/listing/4"),
    ];
    let html = listing_page("Available", &items);
    assert!(matches!(
        scan_offers(&html, &OfferExtractor::default()),
        Err(ExtractError::InvalidPrice { ref value, .. }) if value == "NaN"
    ));
}

#[test]
fn layout_drift_in_heading_hides_offers() {
    // An extra wrapper moves the status text out of the probed position.
    let html = available_page().replace("<h2>Available</h2>", "<header><h2>Available</h2></header>");
    let offers = scan_offers(&html, &OfferExtractor::default()).unwrap();
    assert!(offers.is_empty());
}

#[test]
fn status_probe_lines_up_with_real_markup() {
    let events = tokenize(&available_page());
    let section = events
        .iter()
        .position(|e| matches!(e, ticket_core::TokenEvent::Open { name, .. } if name == "section"))
        .unwrap();
    let default_skip = ticket_core::OfferVocabulary::default().status_skip;
    assert_eq!(events[section + 1 + default_skip].as_text(), Some("Available"));
}

#[test]
fn ticket_overview_page_is_scanned() {
    let html = r#"<!DOCTYPE html>
<html><body>
<section class="type-list">
<article>
<a href="/event/rihanna/weekend/1">
<div class="type-list-title">Weekend</div>
<div class="type-list-date">Saturday, June 15, 2024</div>
<span class="tickets-count">3</span>
</a>
</article>
<article>
<a href="/event/rihanna/camping/2">
<div class="type-list-title">Camping</div>
<div class="type-list-date">soon</div>
<span class="tickets-count">0</span>
</a>
</article>
</section>
<section class="footer">
<article>
<a href="/elsewhere">
<div class="type-list-title">Ignored</div>
</a>
</article>
</section>
</body></html>"#;

    let tickets = scan_tickets(html, &TicketExtractor::default());
    let titles: Vec<_> = tickets.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Camping", "Weekend"]);

    let weekend = &tickets[1];
    assert_eq!(weekend.quantity, 3);
    assert_eq!(weekend.date.map(|d| d.to_string()), Some("2024-06-15".to_string()));
    assert_eq!(
        weekend.link.as_ref().map(|u| u.as_str()),
        Some("https://www.ticketswap.com/event/rihanna/weekend/1")
    );
    assert_eq!(tickets[0].date, None);
}

#[tokio::test(flavor = "current_thread")]
async fn large_page_scan_leaves_runtime_responsive() {
    let hrefs: Vec<String> = (0..4000).map(|i| format!("/listing/{i}")).collect();
    let items: Vec<_> = hrefs.iter().map(|href| offer("Floor", "12.50", href)).collect();
    let fetcher = StubFetcher::serving(listing_page("Available", &items));

    let beats = Arc::new(AtomicUsize::new(0));
    let heartbeat = tokio::spawn({
        let beats = beats.clone();
        async move {
            loop {
                beats.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
            }
        }
    });

    let offers = fetch_offers(fetcher.as_ref(), LISTING_URL, &OfferExtractor::default())
        .await
        .unwrap();
    let beats_during_scan = beats.load(Ordering::SeqCst);
    heartbeat.abort();

    assert_eq!(offers.len(), 4000);
    assert!(beats_during_scan > 0, "scan blocked the only runtime thread");
}
