use std::num::{ParseFloatError, ParseIntError};

use url::Url;

use crate::matcher::attr_value;
use crate::probe::LookAhead;
use crate::types::OfferDraft;
use crate::{OfferList, OfferVocabulary, TokenEvent};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid base url {base:?}: {source}")]
    InvalidBaseUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot resolve offer link {href:?}: {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },
    /// `source` is `None` for a leading `+`.
    #[error("invalid quantity {value:?}")]
    InvalidQuantity {
        value: String,
        #[source]
        source: Option<ParseIntError>,
    },
    /// `source` is `None` for NaN and infinities.
    #[error("invalid price {value:?}")]
    InvalidPrice {
        value: String,
        #[source]
        source: Option<ParseFloatError>,
    },
}

/// Scans a token stream for offers inside listing sections marked available.
///
/// - a listing container opens: probe its status text and set the gate
/// - gate closed: opening and self-closing tags are skipped
/// - gate open: item tags start a record, field tags fill it, the item's
///   closing tag flushes it into the output
///
/// The gate is never reset by a closing container tag; only the next
/// listing container can change it.
#[derive(Debug, Clone, Default)]
pub struct OfferExtractor {
    vocabulary: OfferVocabulary,
}

impl OfferExtractor {
    pub fn new(vocabulary: OfferVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &OfferVocabulary {
        &self.vocabulary
    }

    /// Consumes the whole stream. On error nothing of the partial result
    /// is returned.
    pub fn extract<I>(&self, events: I) -> Result<OfferList, ExtractError>
    where
        I: IntoIterator<Item = TokenEvent>,
    {
        let vocab = &self.vocabulary;
        let base = Url::parse(&vocab.base_url).map_err(|source| ExtractError::InvalidBaseUrl {
            base: vocab.base_url.clone(),
            source,
        })?;
        let status_probe = LookAhead::new(vocab.status_skip);

        let mut events = events.into_iter();
        let mut offers = OfferList::new();
        let mut available = false;
        let mut draft: Option<OfferDraft> = None;

        while let Some(event) = events.next() {
            match event {
                TokenEvent::Open { name, attrs } => {
                    if vocab.listing.matches(&name, &attrs) {
                        available = status_probe.status_is(&mut events, &vocab.available_marker);
                        continue;
                    }
                    if !available {
                        continue;
                    }
                    if vocab.item.matches(&name, &attrs) {
                        draft = Some(OfferDraft::new(&base));
                    } else if vocab.link.matches(&name, &attrs) {
                        let href = attr_value(&attrs, &vocab.link_attr).unwrap_or_default();
                        let link = base.join(href).map_err(|source| ExtractError::InvalidLink {
                            href: href.to_string(),
                            source,
                        })?;
                        if let Some(draft) = draft.as_mut() {
                            draft.link = link;
                        }
                    } else if vocab.title.matches(&name, &attrs) {
                        let title = next_text(&mut events);
                        if let Some(draft) = draft.as_mut() {
                            draft.title = title;
                        }
                    } else if vocab.seller.matches(&name, &attrs) {
                        let seller = next_text(&mut events);
                        if let Some(draft) = draft.as_mut() {
                            draft.seller = seller;
                        }
                    }
                }
                TokenEvent::SelfClosing { name, attrs } => {
                    if !available || name != vocab.meta_tag {
                        continue;
                    }
                    let Some(prop) = attr_value(&attrs, &vocab.meta_key) else {
                        continue;
                    };
                    let content = attr_value(&attrs, &vocab.content_attr).map(str::trim);
                    if prop == vocab.quantity_prop {
                        let quantity = parse_quantity(content)?;
                        if let Some(draft) = draft.as_mut() {
                            draft.quantity = quantity;
                        }
                    } else if prop == vocab.price_prop {
                        let price = parse_price(content)?;
                        if let Some(draft) = draft.as_mut() {
                            draft.price = price;
                        }
                    } else if prop == vocab.currency_prop {
                        if let Some(draft) = draft.as_mut() {
                            draft.currency = content.unwrap_or_default().to_string();
                        }
                    }
                }
                TokenEvent::Close { name } => {
                    if available && name == vocab.item.tag {
                        if let Some(draft) = draft.take() {
                            offers.push(draft.close());
                        }
                    }
                }
                TokenEvent::Text(_) => {}
            }
        }

        Ok(offers)
    }
}

/// Consumes the next event; its trimmed text, or empty if it is not text.
pub(crate) fn next_text<I>(events: &mut I) -> String
where
    I: Iterator<Item = TokenEvent>,
{
    events
        .next()
        .as_ref()
        .and_then(TokenEvent::as_text)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Unsigned decimal digits only; a sign is rejected even though `u8`
/// parsing would take `+`.
fn parse_quantity(content: Option<&str>) -> Result<u8, ExtractError> {
    let Some(value) = content else {
        return Ok(0);
    };
    let invalid = |source: Option<ParseIntError>| ExtractError::InvalidQuantity {
        value: value.to_string(),
        source,
    };
    if value.starts_with('+') {
        return Err(invalid(None));
    }
    value.parse::<u8>().map_err(|err| invalid(Some(err)))
}

/// Finite decimal only. NaN and infinities have no place in price order.
fn parse_price(content: Option<&str>) -> Result<f64, ExtractError> {
    let Some(value) = content else {
        return Ok(0.0);
    };
    let invalid = |source: Option<ParseFloatError>| ExtractError::InvalidPrice {
        value: value.to_string(),
        source,
    };
    let price = value.parse::<f64>().map_err(|err| invalid(Some(err)))?;
    if !price.is_finite() {
        return Err(invalid(None));
    }
    Ok(price)
}
