//! Tag names, attribute keys and marker values the extractors recognize.
//!
//! Each record kind carries its own vocabulary so that drift in one page
//! layout never leaks into the other.
use serde::{Deserialize, Serialize};

use crate::TagMarker;

pub const DEFAULT_BASE_URL: &str = "https://www.ticketswap.com/";

/// Vocabulary for the offer listing page of a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferVocabulary {
    /// Offer hrefs are joined onto this URL.
    pub base_url: String,
    /// Outer container whose status text decides availability.
    pub listing: TagMarker,
    /// Events skipped after the container opens before the status text.
    pub status_skip: usize,
    /// Status text that marks the container as available.
    pub available_marker: String,
    pub item: TagMarker,
    pub link: TagMarker,
    pub link_attr: String,
    pub title: TagMarker,
    pub seller: TagMarker,
    /// Self-closing metadata tags, keyed by `meta_key`.
    pub meta_tag: String,
    pub meta_key: String,
    pub content_attr: String,
    pub quantity_prop: String,
    pub price_prop: String,
    pub currency_prop: String,
}

impl Default for OfferVocabulary {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing: TagMarker::new("section", "class", "ad-list"),
            status_skip: 2,
            available_marker: "Available".to_string(),
            item: TagMarker::new("article", "itemprop", "tickets"),
            link: TagMarker::new("a", "itemprop", "offerurl"),
            link_attr: "href".to_string(),
            title: TagMarker::new("div", "class", "ad-list-title"),
            seller: TagMarker::new("div", "class", "name"),
            meta_tag: "meta".to_string(),
            meta_key: "itemprop".to_string(),
            content_attr: "content".to_string(),
            quantity_prop: "quantity".to_string(),
            price_prop: "price".to_string(),
            currency_prop: "currency".to_string(),
        }
    }
}

/// Vocabulary for the event overview page listing dated ticket types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketVocabulary {
    pub base_url: String,
    /// Container that opens the gate; its closing tag shuts it again.
    pub listing: TagMarker,
    pub item_tag: String,
    /// Events skipped after the item opens before its anchor.
    pub link_skip: usize,
    pub link_tag: String,
    pub link_attr: String,
    pub title: TagMarker,
    pub date: TagMarker,
    /// chrono format of the date text, e.g. `Monday, January 2, 2006`.
    pub date_format: String,
    pub count: TagMarker,
}

impl Default for TicketVocabulary {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing: TagMarker::new("section", "class", "type-list"),
            item_tag: "article".to_string(),
            link_skip: 1,
            link_tag: "a".to_string(),
            link_attr: "href".to_string(),
            title: TagMarker::new("div", "class", "type-list-title"),
            date: TagMarker::new("div", "class", "type-list-date"),
            date_format: "%A, %B %-d, %Y".to_string(),
            count: TagMarker::new("span", "class", "tickets-count"),
        }
    }
}
