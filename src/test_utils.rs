use std::{fmt::Write, iter::Peekable};

use crate::types::event::Event;

/// Compact markup for asserting on event sequences. Elements closed right
/// after being opened are written as `<tag/>`. Nothing is escaped.
pub fn render(events: impl IntoIterator<Item = Event>) -> String {
    let mut events = events.into_iter().peekable();
    let mut open = Vec::new();
    let mut result = String::new();

    while let Some(event) = events.next() {
        match event {
            Event::Enter(element) => {
                let attributes = element
                    .attributes
                    .iter()
                    .fold(String::new(), |mut result, (name, value)| {
                        let _ = write!(result, " {name}=\"{value}\"");
                        result
                    });

                if closes_next(&mut events, element.id) {
                    events.next();
                    let _ = write!(result, "<{}{attributes}/>", element.tag);
                } else {
                    let _ = write!(result, "<{}{attributes}>", element.tag);
                    open.push((element.id, element.tag));
                }
            }
            Event::Exit { peer } => {
                let (id, tag) = open.pop().expect("exit without an open element");
                assert_eq!(id, peer, "exit doesn't close the innermost element");
                let _ = write!(result, "</{tag}>");
            }
            Event::Text(text) => result.push_str(&text),
            Event::ProcessingInstruction(data) => {
                let _ = write!(result, "<?{data}?>");
            }
            Event::Comment(content) => {
                let _ = write!(result, "<!--{content}-->");
            }
        }
    }

    result
}

fn closes_next<I>(events: &mut Peekable<I>, id: crate::ElementId) -> bool
where
    I: Iterator<Item = Event>,
{
    matches!(events.peek(), Some(Event::Exit { peer }) if *peer == id)
}
