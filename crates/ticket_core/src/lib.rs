//! Ticket core: listing data model and the token-stream extractors.
//!
//! Everything here is pure; fetching and tokenizing live in `ticket_engine`.
mod event;
mod extract;
mod matcher;
mod ordering;
mod probe;
mod tickets;
mod types;
mod vocabulary;

pub use event::{Attribute, TokenEvent};
pub use extract::{ExtractError, OfferExtractor};
pub use matcher::{attr_value, has_attr, TagMarker};
pub use ordering::{sort_by_price, sort_by_title};
pub use probe::LookAhead;
pub use tickets::TicketExtractor;
pub use types::{format_offers, Offer, OfferList, Ticket, TicketList};
pub use vocabulary::{OfferVocabulary, TicketVocabulary, DEFAULT_BASE_URL};
