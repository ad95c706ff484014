#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::event::{Element, ElementId, Event};

/// A markup boundary next to a text run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    /// Opens an element that wraps the following text.
    Enter(Element),

    /// Closes the element with the given id.
    Exit(ElementId),

    /// Self-contained zero-width markup (comments, processing instructions,
    /// elements without text). Always balanced, so it never competes with
    /// other boundaries.
    Spot(Vec<Event>),
}

impl Mark {
    #[must_use]
    pub fn is_spot(&self) -> bool { matches!(self, Mark::Spot(_)) }
}

/// The markup immediately surrounding one non-empty text run.
///
/// `prefix` holds `Enter` and `Spot` marks in document order (outermost
/// first), `suffix` holds `Exit` marks innermost first, possibly interleaved
/// with `Spot`s that sat between them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token {
    pub prefix: Vec<Mark>,
    pub text: String,
    pub suffix: Vec<Mark>,
}

impl Token {
    #[must_use]
    pub fn new(prefix: Vec<Mark>, text: String, suffix: Vec<Mark>) -> Self {
        Self {
            prefix,
            text,
            suffix,
        }
    }
}
