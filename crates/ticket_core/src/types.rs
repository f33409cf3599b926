use std::fmt;

use chrono::NaiveDate;
use url::Url;

/// One available resale offer taken from a listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub title: String,
    pub quantity: u8,
    pub price: f64,
    pub currency: String,
    pub seller: String,
    pub link: Url,
}

pub type OfferList = Vec<Offer>;

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {:.2} {} by {} {}",
            self.quantity, self.price, self.currency, self.seller, self.link
        )
    }
}

/// Renders one offer per line, each line newline terminated.
pub fn format_offers(offers: &[Offer]) -> String {
    offers.iter().map(|offer| format!("{offer}\n")).collect()
}

/// A dated ticket type from an event overview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub title: String,
    /// `None` when the date text did not match the configured format.
    pub date: Option<NaiveDate>,
    pub quantity: u16,
    pub link: Option<Url>,
}

pub type TicketList = Vec<Ticket>;

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(date) = self.date {
            write!(f, " on {date}")?;
        }
        write!(f, ": {} offered", self.quantity)?;
        if let Some(link) = &self.link {
            write!(f, " {link}")?;
        }
        Ok(())
    }
}

/// Offer fields filled in as tags are encountered. Never leaves the extractor.
#[derive(Debug)]
pub(crate) struct OfferDraft {
    pub title: String,
    pub quantity: u8,
    pub price: f64,
    pub currency: String,
    pub seller: String,
    pub link: Url,
}

impl OfferDraft {
    pub fn new(base: &Url) -> Self {
        Self {
            title: String::new(),
            quantity: 0,
            price: 0.0,
            currency: String::new(),
            seller: String::new(),
            link: base.clone(),
        }
    }

    pub fn close(self) -> Offer {
        Offer {
            title: self.title,
            quantity: self.quantity,
            price: self.price,
            currency: self.currency,
            seller: self.seller,
            link: self.link,
        }
    }
}
