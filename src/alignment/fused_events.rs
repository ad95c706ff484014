use std::{collections::VecDeque, vec};

use super::sync_row::{Boundary, SyncRow};
use crate::{
    Side,
    types::{
        event::{Element, ElementId, Event},
        token::Mark,
    },
};

/// The fused event sequence, rendered lazily one text run at a time.
///
/// Elements of both inputs are re-identified on the way out: every emitted
/// `Enter` gets a fresh id, numbered in document order starting from zero,
/// and the matching `Exit` refers to it. An element split in two is emitted
/// as two distinct elements.
#[derive(Debug)]
pub struct FusedEvents {
    rows: vec::IntoIter<SyncRow>,
    buffer: VecDeque<Event>,

    // (side, id in its input, id in the output)
    open: Vec<(Side, ElementId, ElementId)>,
    next_id: usize,
}

impl FusedEvents {
    pub(crate) fn new(rows: Vec<SyncRow>) -> Self {
        Self {
            rows: rows.into_iter(),
            buffer: VecDeque::new(),
            open: Vec::new(),
            next_id: 0,
        }
    }

    fn fresh_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn render(&mut self, row: SyncRow) {
        for Boundary { side, mark } in row.prefix {
            match mark {
                Mark::Spot(events) => self.render_spot(events),
                Mark::Enter(element) => {
                    let id = self.fresh_id();
                    self.open.push((side, element.id, id));
                    self.buffer.push_back(Event::Enter(Element { id, ..element }));
                }
                Mark::Exit(peer) => {
                    panic!("internal fault: {side} {peer} is closed in front of a text run")
                }
            }
        }

        self.buffer.push_back(Event::Text(row.text));

        for Boundary { side, mark } in row.suffix {
            match mark {
                Mark::Spot(events) => self.render_spot(events),
                Mark::Exit(peer) => match self.open.pop() {
                    Some((open_side, original, id)) if open_side == side && original == peer => {
                        self.buffer.push_back(Event::Exit { peer: id });
                    }
                    innermost => panic!(
                        "internal fault: {side} {peer} is closed while {innermost:?} is the \
                         innermost open element"
                    ),
                },
                Mark::Enter(element) => {
                    panic!("internal fault: {side} {} is opened after a text run", element.id)
                }
            }
        }
    }

    /// Spots are balanced on their own, so a local stack is enough to
    /// re-identify the elements inside.
    fn render_spot(&mut self, events: Vec<Event>) {
        let mut open = Vec::new();

        for event in events {
            let event = match event {
                Event::Enter(element) => {
                    let id = self.fresh_id();
                    open.push(id);
                    Event::Enter(Element { id, ..element })
                }
                Event::Exit { peer } => Event::Exit {
                    peer: open.pop().unwrap_or_else(|| {
                        panic!("internal fault: {peer} is closed outside of its spot")
                    }),
                },
                event => event,
            };

            self.buffer.push_back(event);
        }
    }
}

impl Iterator for FusedEvents {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.buffer.pop_front() {
                return Some(event);
            }

            let row = self.rows.next()?;
            self.render(row);
        }
    }
}
