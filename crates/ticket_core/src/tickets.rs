use chrono::NaiveDate;
use url::Url;

use crate::extract::next_text;
use crate::matcher::attr_value;
use crate::probe::LookAhead;
use crate::{Ticket, TicketList, TicketVocabulary, TokenEvent};

/// Scans an event overview page for its dated ticket types.
///
/// Unlike [`crate::OfferExtractor`] there is no status text: the listing
/// container alone opens the gate, and every closing container tag shuts
/// it, so each section on the page is judged on its own. Fields that fail
/// to parse fall back to `None`/zero; this extractor never errors.
#[derive(Debug, Clone, Default)]
pub struct TicketExtractor {
    vocabulary: TicketVocabulary,
}

impl TicketExtractor {
    pub fn new(vocabulary: TicketVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &TicketVocabulary {
        &self.vocabulary
    }

    pub fn extract<I>(&self, events: I) -> TicketList
    where
        I: IntoIterator<Item = TokenEvent>,
    {
        let vocab = &self.vocabulary;
        let base = Url::parse(&vocab.base_url).ok();
        let link_probe = LookAhead::new(vocab.link_skip);

        let mut events = events.into_iter();
        let mut tickets = TicketList::new();
        let mut in_listing = false;
        let mut draft: Option<Ticket> = None;

        while let Some(event) = events.next() {
            match event {
                TokenEvent::Open { name, attrs } => {
                    if vocab.listing.matches(&name, &attrs) {
                        in_listing = true;
                        continue;
                    }
                    if !in_listing {
                        continue;
                    }
                    if name == vocab.item_tag {
                        let link = match link_probe.skip_then_read(&mut events) {
                            Some(TokenEvent::Open { name, attrs }) if name == vocab.link_tag => {
                                let href = attr_value(&attrs, &vocab.link_attr).unwrap_or_default();
                                base.as_ref().and_then(|base| base.join(href).ok())
                            }
                            _ => None,
                        };
                        draft = Some(Ticket {
                            title: String::new(),
                            date: None,
                            quantity: 0,
                            link,
                        });
                    } else if vocab.title.matches(&name, &attrs) {
                        let title = next_text(&mut events);
                        if let Some(draft) = draft.as_mut() {
                            draft.title = title;
                        }
                    } else if vocab.date.matches(&name, &attrs) {
                        let text = next_text(&mut events);
                        if let Some(draft) = draft.as_mut() {
                            draft.date = NaiveDate::parse_from_str(&text, &vocab.date_format).ok();
                        }
                    } else if vocab.count.matches(&name, &attrs) {
                        let text = next_text(&mut events);
                        if let Some(draft) = draft.as_mut() {
                            draft.quantity = text.parse().unwrap_or(0);
                        }
                    }
                }
                TokenEvent::Close { name } => {
                    if in_listing && name == vocab.item_tag {
                        if let Some(ticket) = draft.take() {
                            tickets.push(ticket);
                        }
                    } else if name == vocab.listing.tag {
                        in_listing = false;
                    }
                }
                TokenEvent::SelfClosing { .. } | TokenEvent::Text(_) => {}
            }
        }

        tickets
    }
}
