use crate::TokenEvent;

/// Positional look-ahead: skip a fixed number of events, then read one.
///
/// The listing pages put their status text and item anchors at a fixed
/// distance from the opening container tag. Everything about that distance
/// lives here, so a layout change shows up as a failing probe test rather
/// than as silently empty results further down.
///
/// Skipped events and the event read are consumed from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAhead {
    skip: usize,
}

impl LookAhead {
    pub fn new(skip: usize) -> Self {
        Self { skip }
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    /// `None` if the stream ends first.
    pub fn skip_then_read<I>(&self, events: &mut I) -> Option<TokenEvent>
    where
        I: Iterator<Item = TokenEvent>,
    {
        events.nth(self.skip)
    }

    /// True iff the probed event is text equal to `marker` (surrounding
    /// whitespace ignored).
    pub fn status_is<I>(&self, events: &mut I, marker: &str) -> bool
    where
        I: Iterator<Item = TokenEvent>,
    {
        self.skip_then_read(events)
            .as_ref()
            .and_then(TokenEvent::as_text)
            .is_some_and(|text| text.trim() == marker)
    }
}
