mod alignment;
mod fuse;
mod segmentation;
mod tokenizer;
mod types;
mod utils;

#[cfg(test)]
mod test_utils;

pub use alignment::FusedEvents;
pub use fuse::{
    Codec, FuseError, FuseOptions, NamespaceMap, TextMismatch, fuse, fuse_events, strip_top_tag,
};
pub use segmentation::{Segments, segment_text, text_of, text_offsets};
pub use tokenizer::{Tokens, tokenize};
pub use types::{
    event::{Attributes, Element, ElementId, Event},
    events_builder::EventsBuilder,
    token::{Mark, Token},
};
pub use utils::side::Side;
