use std::collections::{BTreeSet, VecDeque};

use crate::types::event::Event;

/// Concatenate the content of all text events.
pub fn text_of<'a>(events: impl IntoIterator<Item = &'a Event>) -> String {
    events
        .into_iter()
        .filter_map(|event| match event {
            Event::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Character offsets at which a text run starts, plus the end of the last
/// run. The total text length is therefore always the largest element.
pub fn text_offsets<'a>(events: impl IntoIterator<Item = &'a Event>) -> BTreeSet<usize> {
    let mut offsets = BTreeSet::new();

    let mut offset = 0;
    for event in events {
        if let Event::Text(text) = event {
            if text.is_empty() {
                continue;
            }

            offsets.insert(offset);
            offset += text.chars().count();
        }
    }
    offsets.insert(offset);

    offsets
}

/// Split every text event at the given global character offsets. Other events
/// pass through unchanged and empty text events are dropped.
pub fn segment_text<I>(events: I, offsets: &BTreeSet<usize>) -> Segments<I::IntoIter>
where
    I: IntoIterator<Item = Event>,
{
    Segments {
        events: events.into_iter(),
        offsets: offsets.iter().copied().filter(|&offset| offset > 0).collect(),
        offset: 0,
        remainder: None,
    }
}

/// Lazy iterator returned by [`segment_text`].
#[derive(Debug)]
pub struct Segments<I> {
    events: I,
    offsets: VecDeque<usize>,
    offset: usize,
    remainder: Option<String>,
}

impl<I> Segments<I> {
    fn split_off(&mut self, mut text: String) -> Event {
        while self
            .offsets
            .front()
            .is_some_and(|&offset| offset <= self.offset)
        {
            self.offsets.pop_front();
        }

        let length = text.chars().count();
        match self.offsets.front() {
            Some(&offset) if offset < self.offset + length => {
                let split_at = offset - self.offset;
                let byte_index = text
                    .char_indices()
                    .nth(split_at)
                    .map_or(text.len(), |(index, _)| index);

                self.remainder = Some(text.split_off(byte_index));
                self.offset = offset;
                self.offsets.pop_front();
            }
            _ => self.offset += length,
        }

        Event::Text(text)
    }
}

impl<I> Iterator for Segments<I>
where
    I: Iterator<Item = Event>,
{
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(text) = self.remainder.take() {
            return Some(self.split_off(text));
        }

        loop {
            match self.events.next()? {
                Event::Text(text) if text.is_empty() => {}
                Event::Text(text) => return Some(self.split_off(text)),
                event => return Some(event),
            }
        }
    }
}
