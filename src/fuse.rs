mod codec;
mod fuse_error;
mod fuse_options;

use std::collections::BTreeSet;

pub use codec::Codec;
pub use fuse_error::{FuseError, TextMismatch};
pub use fuse_options::{FuseOptions, NamespaceMap};

use crate::{
    Side,
    alignment::{FusedEvents, align},
    segmentation::{segment_text, text_of, text_offsets},
    tokenizer::tokenize,
    types::event::Event,
    utils::well_formed::check_well_formed,
};

/// Given a `master` and a `slave` document with identical text, return a
/// document with the text and the markup of both.
///
/// The master's markup is preserved as is. Slave elements crossing a master
/// element are split into several elements so that the result is properly
/// nested. Documents are read and written by `codec`.
///
/// # Errors
///
/// Everything `fuse_events` reports, and `FuseError::Codec` if the codec
/// fails to scan either input or to serialize the result.
///
/// ```
/// # use markup_fuse::{Codec, Event, EventsBuilder, FuseOptions, NamespaceMap, fuse};
/// struct Events;
///
/// impl Codec for Events {
///     type Document = Vec<Event>;
///     type Error = std::convert::Infallible;
///
///     fn scan(&self, document: &Vec<Event>) -> Result<Vec<Event>, Self::Error> {
///         Ok(document.clone())
///     }
///
///     fn unscan<I: Iterator<Item = Event>>(
///         &self,
///         events: I,
///         _: Option<&NamespaceMap>,
///     ) -> Result<Vec<Event>, Self::Error> {
///         Ok(events.collect())
///     }
/// }
///
/// let master = EventsBuilder::default().enter("b").text("Hello").exit().text(", world").build();
/// let slave = EventsBuilder::default().enter("root").text("Hello, ").enter("i").text("world").build();
///
/// let fused = fuse(&Events, &master, &slave, &FuseOptions::default()).unwrap();
/// assert_eq!(
///     fused,
///     EventsBuilder::default()
///         .enter("b")
///         .text("Hello")
///         .exit()
///         .text(", ")
///         .enter("i")
///         .text("world")
///         .build()
/// );
/// ```
pub fn fuse<C>(
    codec: &C,
    master: &C::Document,
    slave: &C::Document,
    options: &FuseOptions,
) -> Result<C::Document, FuseError>
where
    C: Codec,
{
    let master = codec.scan(master).map_err(FuseError::codec)?;
    let mut slave = codec.scan(slave).map_err(FuseError::codec)?;

    if options.strip_slave_top_tag {
        slave = strip_top_tag(slave);
    }

    let events = fuse_events(master, slave, options)?;

    codec
        .unscan(events, options.namespaces.as_ref())
        .map_err(FuseError::codec)
}

/// Fuse two event sequences with identical text.
///
/// Both inputs are validated and compared eagerly, so every error surfaces
/// here. The returned iterator can't fail.
///
/// # Errors
///
/// - `FuseError::UnbalancedMarkup` if either input isn't a proper bracketing
/// - `FuseError::TextMismatch` if the texts differ
/// - `FuseError::ConflictingMarkup` if tags cross and `auto_segment` is off
///
/// ```
/// use markup_fuse::{EventsBuilder, FuseOptions, fuse_events, text_of};
///
/// let master = EventsBuilder::default().text("12").enter("b").text("345").build();
/// let slave = EventsBuilder::default().enter("i").text("1234").exit().text("5").build();
///
/// let fused = fuse_events(master, slave, &FuseOptions::default()).unwrap().collect::<Vec<_>>();
/// assert_eq!(text_of(&fused), "12345");
///
/// let conflict = fuse_events(
///     EventsBuilder::default().text("12").enter("b").text("345").build(),
///     EventsBuilder::default().enter("i").text("1234").exit().text("5").build(),
///     &FuseOptions::default().with_auto_segment(false),
/// );
/// assert!(conflict.is_err());
/// ```
pub fn fuse_events(
    master: Vec<Event>,
    slave: Vec<Event>,
    options: &FuseOptions,
) -> Result<FusedEvents, FuseError> {
    for (side, events) in [(Side::Master, &master), (Side::Slave, &slave)] {
        check_well_formed(events)
            .map_err(|reason| FuseError::UnbalancedMarkup { side, reason })?;
    }

    if let Some(mismatch) = TextMismatch::between(&text_of(&master), &text_of(&slave)) {
        return Err(mismatch.into());
    }

    let offsets = text_offsets(&master)
        .union(&text_offsets(&slave))
        .copied()
        .collect::<BTreeSet<_>>();

    log::debug!(
        "Fusing {} master and {} slave events at {} offsets",
        master.len(),
        slave.len(),
        offsets.len()
    );

    align(
        tokenize(segment_text(master, &offsets)),
        tokenize(segment_text(slave, &offsets)),
        options,
    )
}

/// Remove the first element and its matching `Exit`, keeping everything in
/// between and around.
#[must_use]
pub fn strip_top_tag(mut events: Vec<Event>) -> Vec<Event> {
    let Some(position) = events
        .iter()
        .position(|event| matches!(event, Event::Enter(_)))
    else {
        return events;
    };

    let Event::Enter(root) = events.remove(position) else {
        unreachable!("position points at an `Enter`");
    };

    if let Some(exit) = events
        .iter()
        .rposition(|event| matches!(event, Event::Exit { peer } if *peer == root.id))
    {
        events.remove(exit);
    }

    log::trace!("Stripped the top level <{}> element", root.tag);

    events
}
