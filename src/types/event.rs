use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of one element within a single event sequence. Every `Enter`
/// carries a unique id and the matching `Exit` refers back to it through its
/// `peer`. Ids are only meaningful within the sequence that allocated them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

/// Ordered `(name, value)` pairs, passed through untouched.
pub type Attributes = Vec<(String, String)>;

/// The opening half of a markup element.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub tag: String,
    pub attributes: Attributes,
}

impl Element {
    #[must_use]
    pub fn new(id: ElementId, tag: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id,
            tag: tag.into(),
            attributes,
        }
    }
}

/// A flat structural event as produced and consumed by a markup codec.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Enter(Element),
    Exit { peer: ElementId },
    Text(String),
    ProcessingInstruction(String),
    Comment(String),
}

impl Event {
    /// Number of characters this event contributes to the document text.
    #[must_use]
    pub fn text_length(&self) -> usize {
        match self {
            Event::Text(text) => text.chars().count(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool { matches!(self, Event::Text(_)) }
}
