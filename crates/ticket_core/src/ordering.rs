use crate::{Offer, Ticket};

/// Cheapest first. Stable, so equal prices keep document order.
pub fn sort_by_price(offers: &mut [Offer]) {
    offers.sort_by(|a, b| a.price.total_cmp(&b.price));
}

/// Alphabetical by title. Stable.
pub fn sort_by_title(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| a.title.cmp(&b.title));
}
