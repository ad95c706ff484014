use crate::types::event::{Attributes, Element, ElementId, Event};

/// Builds a well-formed event sequence, allocating element ids and wiring
/// every `Exit` to the `Enter` it closes. This is what a codec does while
/// scanning a document.
///
/// ## Example
///
/// ```
/// use markup_fuse::{Event, EventsBuilder};
///
/// let events = EventsBuilder::default()
///     .enter("a")
///     .text("Hello, ")
///     .empty("br")
///     .exit()
///     .build();
///
/// assert_eq!(events.len(), 5);
/// assert!(matches!(events[4], Event::Exit { .. }));
/// ```
#[derive(Debug, Default)]
pub struct EventsBuilder {
    events: Vec<Event>,
    open: Vec<ElementId>,
    next_id: usize,
}

impl EventsBuilder {
    /// Open an element without attributes.
    #[must_use]
    pub fn enter(self, tag: &str) -> Self { self.enter_with(tag, Attributes::new()) }

    #[must_use]
    pub fn enter_with(mut self, tag: &str, attributes: Attributes) -> Self {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        self.open.push(id);
        self.events.push(Event::Enter(Element::new(id, tag, attributes)));
        self
    }

    /// Close the innermost open element.
    ///
    /// # Panics
    ///
    /// Panics if no element is open.
    #[must_use]
    pub fn exit(mut self) -> Self {
        let peer = self
            .open
            .pop()
            .expect("`exit` called without an open element");

        self.events.push(Event::Exit { peer });
        self
    }

    /// An element with nothing inside, like `<br/>`.
    #[must_use]
    pub fn empty(self, tag: &str) -> Self { self.enter(tag).exit() }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.events.push(Event::Text(text.to_owned()));
        self
    }

    #[must_use]
    pub fn comment(mut self, content: &str) -> Self {
        self.events.push(Event::Comment(content.to_owned()));
        self
    }

    #[must_use]
    pub fn processing_instruction(mut self, data: &str) -> Self {
        self.events.push(Event::ProcessingInstruction(data.to_owned()));
        self
    }

    /// Returns the events, closing any element left open.
    #[must_use]
    pub fn build(mut self) -> Vec<Event> {
        while let Some(peer) = self.open.pop() {
            self.events.push(Event::Exit { peer });
        }

        self.events
    }
}
