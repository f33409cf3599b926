/// A single `key="value"` pair on a markup tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One structural event of a tokenized markup document.
///
/// Streams of these are produced in document order and consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenEvent {
    Open { name: String, attrs: Vec<Attribute> },
    SelfClosing { name: String, attrs: Vec<Attribute> },
    Close { name: String },
    Text(String),
}

impl TokenEvent {
    pub fn open(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        TokenEvent::Open {
            name: name.into(),
            attrs,
        }
    }

    pub fn self_closing(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        TokenEvent::SelfClosing {
            name: name.into(),
            attrs,
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        TokenEvent::Close { name: name.into() }
    }

    pub fn text(data: impl Into<String>) -> Self {
        TokenEvent::Text(data.into())
    }

    /// Text content, if this is a text event.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenEvent::Text(data) => Some(data),
            _ => None,
        }
    }
}
