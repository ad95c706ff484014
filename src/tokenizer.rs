use std::collections::HashSet;

use crate::types::{
    event::{ElementId, Event},
    token::{Mark, Token},
};

/// Group a segmented event sequence into tokens, one per non-empty text run.
///
/// Markup before a run becomes the token's prefix, markup closing elements
/// after it becomes the suffix. Zero-width markup is folded into `Spot`s so
/// it travels with the neighbouring boundary.
///
/// ## Example
///
/// ```not_rust
/// <a>Hello, <i>worl</i>d</a> -> [a] "Hello, " []
///                                [i] "worl"    [/i]
///                                []  "d"       [/a]
/// ```
///
/// The input must be well-formed: every `Exit` closes the innermost open
/// element.
pub fn tokenize<I>(events: I) -> Tokens<I::IntoIter>
where
    I: IntoIterator<Item = Event>,
{
    Tokens {
        events: events.into_iter(),
        current: None,
        pending: Vec::new(),
        pending_open: Vec::new(),
        finished: false,
    }
}

/// Lazy iterator returned by [`tokenize`].
#[derive(Debug)]
pub struct Tokens<I> {
    events: I,

    // The last text run seen; its suffix may still grow.
    current: Option<Token>,

    // Markup seen since the last text run and the elements opened within it.
    pending: Vec<Event>,
    pending_open: Vec<ElementId>,

    finished: bool,
}

impl<I> Tokens<I> {
    fn start_token(&mut self, text: String) -> Option<Token> {
        let prefix = normalize_prefix(std::mem::take(&mut self.pending));
        self.pending_open.clear();

        self.current.replace(Token::new(prefix, text, Vec::new()))
    }

    fn close(&mut self, peer: ElementId) {
        if self.pending_open.last() == Some(&peer) {
            self.pending_open.pop();
            self.pending.push(Event::Exit { peer });
            return;
        }

        assert!(
            self.pending_open.is_empty(),
            "internal fault: exit of {peer} while {:?} are still open",
            self.pending_open
        );

        let current = self
            .current
            .as_mut()
            .unwrap_or_else(|| panic!("internal fault: exit of {peer} before any text"));

        if !self.pending.is_empty() {
            current
                .suffix
                .push(Mark::Spot(std::mem::take(&mut self.pending)));
        }
        current.suffix.push(Mark::Exit(peer));
    }

    fn finish(&mut self) -> Option<Token> {
        self.finished = true;

        let mut last = self.current.take();
        if !self.pending.is_empty() {
            let trailing = std::mem::take(&mut self.pending);
            match last.as_mut() {
                Some(token) => token.suffix.push(Mark::Spot(trailing)),
                None => log::warn!(
                    "dropping {} markup events from a document without text",
                    trailing.len()
                ),
            }
        }

        last
    }
}

impl<I> Iterator for Tokens<I>
where
    I: Iterator<Item = Event>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(event) = self.events.next() {
            match event {
                Event::Text(text) if text.is_empty() => {}
                Event::Text(text) => {
                    if let Some(previous) = self.start_token(text) {
                        return Some(previous);
                    }
                }
                Event::Exit { peer } => self.close(peer),
                Event::Enter(ref element) => {
                    self.pending_open.push(element.id);
                    self.pending.push(event);
                }
                Event::ProcessingInstruction(_) | Event::Comment(_) => self.pending.push(event),
            }
        }

        self.finish()
    }
}

/// Turn the markup preceding a text run into marks. Elements left open at
/// the end wrap the text and stay individual `Enter`s; every balanced run
/// between them is folded into a single `Spot`.
fn normalize_prefix(prefix: Vec<Event>) -> Vec<Mark> {
    let closed = prefix
        .iter()
        .filter_map(|event| match event {
            Event::Exit { peer } => Some(*peer),
            _ => None,
        })
        .collect::<HashSet<_>>();

    let mut result = Vec::new();
    let mut spot = Vec::new();

    for event in prefix {
        match event {
            Event::Enter(element) if !closed.contains(&element.id) => {
                if !spot.is_empty() {
                    result.push(Mark::Spot(std::mem::take(&mut spot)));
                }
                result.push(Mark::Enter(element));
            }
            Event::Text(_) => unreachable!("text is never part of a prefix"),
            event => spot.push(event),
        }
    }

    if !spot.is_empty() {
        result.push(Mark::Spot(spot));
    }

    result
}
