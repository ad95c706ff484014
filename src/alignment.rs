mod fused_events;
mod local_reduce;
mod sync_row;

use std::collections::HashMap;

pub use fused_events::FusedEvents;
use local_reduce::local_reduce;
use sync_row::{Boundary, SyncRow};

use crate::{
    FuseError, FuseOptions, Side,
    types::{
        event::{Element, ElementId},
        token::{Mark, Token},
    },
};

/// Merge the markup of two token sequences with identical text runs.
///
/// Tokens are paired up into rows. Every closing tag is then matched with
/// its opening tag by walking back from the row it follows, nesting the
/// boundaries of both documents around the shared text. The master's markup
/// is never split: when a slave element crosses a master element, the slave
/// element is closed and reopened around the crossing, or the call fails
/// with `FuseError::ConflictingMarkup` if `auto_segment` is off.
///
/// Rendering the result into events is lazy, see [`FusedEvents`].
///
/// # Errors
///
/// Returns `FuseError::ConflictingMarkup` for the first crossing found when
/// `auto_segment` is off.
///
/// # Panics
///
/// Panics if the token sequences don't have the same texts or aren't
/// tokenized from well-formed events.
pub fn align<M, S>(master: M, slave: S, options: &FuseOptions) -> Result<FusedEvents, FuseError>
where
    M: IntoIterator<Item = Token>,
    S: IntoIterator<Item = Token>,
{
    let mut aligner = Aligner::new(
        master.into_iter().collect(),
        slave.into_iter().collect(),
        options,
    );

    for index in 0..aligner.rows.len() {
        aligner.settle(index)?;
    }

    Ok(aligner.finish())
}

struct Aligner<'a> {
    rows: Vec<SyncRow>,
    elements: HashMap<(Side, ElementId), Element>,
    options: &'a FuseOptions,
}

impl<'a> Aligner<'a> {
    fn new(master: Vec<Token>, slave: Vec<Token>, options: &'a FuseOptions) -> Self {
        assert_eq!(
            master.len(),
            slave.len(),
            "internal fault: the documents were segmented into a different number of runs"
        );

        let mut elements = HashMap::new();
        for (side, tokens) in [(Side::Master, &master), (Side::Slave, &slave)] {
            for mark in tokens.iter().flat_map(|token| &token.prefix) {
                if let Mark::Enter(element) = mark {
                    elements.insert((side, element.id), element.clone());
                }
            }
        }

        let rows = master
            .into_iter()
            .zip(slave)
            .map(|(master, slave)| SyncRow::new(master, slave))
            .collect::<Vec<_>>();

        log::debug!(
            "Aligning {} text runs carrying {} elements",
            rows.len(),
            elements.len()
        );

        Self {
            rows,
            elements,
            options,
        }
    }

    /// Find opening tags for all closing tags following the text of row
    /// `index`. All earlier rows must already be settled.
    fn settle(&mut self, index: usize) -> Result<(), FuseError> {
        assert!(
            self.rows[..index].iter().all(SyncRow::is_settled),
            "internal fault: runs before {index} aren't settled"
        );

        for low in (0..=index).rev() {
            for side in self.options.reduction_order() {
                self.reduce_between(low, index, side);
            }

            if self.rows[index].is_settled() {
                return Ok(());
            }

            if !self.rows[low].has_pending_prefix() {
                continue;
            }

            if !self.options.auto_segment {
                return Err(self.conflict(low, index));
            }

            if self.rows[low].master.prefix.is_empty() {
                self.reopen_after(low, index);
            } else {
                self.close_before(low, index)?;
            }
        }

        panic!("internal fault: closing tags after run {index} were never opened")
    }

    fn reduce_between(&mut self, low: usize, high: usize, side: Side) {
        if low == high {
            let (pending, out_prefix, out_suffix) = self.rows[low].split(side);
            local_reduce(
                &mut pending.prefix,
                &mut pending.suffix,
                out_prefix,
                out_suffix,
                side,
            );
        } else {
            let (before, after) = self.rows.split_at_mut(high);
            let (opening, out_prefix, _) = before[low].split(side);
            let (closing, _, out_suffix) = after[0].split(side);
            local_reduce(
                &mut opening.prefix,
                &mut closing.suffix,
                out_prefix,
                out_suffix,
                side,
            );
        }
    }

    /// A master element opens at `low` while slave elements opened before
    /// it close after `index`: close those slave elements right before
    /// `low` and open them again inside.
    ///
    /// The new closing tags after run `low - 1` are settled like any other,
    /// so further master elements opened in between split them again.
    fn close_before(&mut self, low: usize, index: usize) -> Result<(), FuseError> {
        assert!(
            low > 0 && self.rows[low].slave.prefix.is_empty(),
            "internal fault: no slave element to split before run {low}"
        );

        let closing = std::mem::take(&mut self.rows[index].slave.suffix);
        let peers = closing
            .iter()
            .filter_map(|mark| match mark {
                Mark::Exit(peer) => Some(*peer),
                _ => None,
            })
            .collect::<Vec<_>>();

        log::trace!("Splitting slave elements {peers:?} between runs {} and {low}", low - 1);

        for peer in peers {
            let element = self.element(Side::Slave, peer);
            self.rows[low]
                .prefix
                .push_front(Boundary::new(Side::Slave, Mark::Enter(element)));
            self.rows[low - 1].slave.suffix.push_back(Mark::Exit(peer));
        }

        self.rows[index].suffix.extend(
            closing
                .into_iter()
                .map(|mark| Boundary::new(Side::Slave, mark)),
        );

        self.settle(low - 1)
    }

    /// Slave elements open at `low` while a master element opened before it
    /// closes after `index`: close those slave elements after `index` and
    /// open them again on the next run.
    fn reopen_after(&mut self, low: usize, index: usize) {
        let opening = std::mem::take(&mut self.rows[low].slave.prefix);
        let elements = opening
            .iter()
            .filter_map(|mark| match mark {
                Mark::Enter(element) => Some(element.clone()),
                _ => None,
            })
            .collect::<Vec<_>>();

        log::trace!(
            "Splitting {} slave elements between runs {index} and {}",
            elements.len(),
            index + 1
        );

        for mark in opening.into_iter().rev() {
            self.rows[low]
                .prefix
                .push_front(Boundary::new(Side::Slave, mark));
        }

        for element in elements.iter().rev() {
            self.rows[index]
                .suffix
                .push(Boundary::new(Side::Slave, Mark::Exit(element.id)));
        }

        let Some(next) = self.rows.get_mut(index + 1) else {
            panic!("internal fault: slave elements opened at run {low} are never closed");
        };

        for element in elements.into_iter().rev() {
            next.slave.prefix.push_front(Mark::Enter(element));
        }
    }

    fn conflict(&self, low: usize, index: usize) -> FuseError {
        let opening = &self.rows[low];
        let closing = &self.rows[index];

        let open_tag = [Side::Master, Side::Slave]
            .into_iter()
            .find_map(|side| match opening.pending(side).prefix.back() {
                Some(Mark::Enter(element)) => Some(element.tag.clone()),
                _ => None,
            })
            .unwrap_or_else(|| panic!("internal fault: nothing is open at run {low}"));

        let close_tag = [Side::Master, Side::Slave]
            .into_iter()
            .find_map(|side| match closing.pending(side).suffix.front() {
                Some(Mark::Exit(peer)) => Some(self.element(side, *peer).tag),
                _ => None,
            })
            .unwrap_or_else(|| panic!("internal fault: nothing is closed after run {index}"));

        FuseError::ConflictingMarkup {
            open_tag,
            before: opening.text.clone(),
            close_tag,
            after: closing.text.clone(),
        }
    }

    fn element(&self, side: Side, id: ElementId) -> Element {
        self.elements
            .get(&(side, id))
            .cloned()
            .unwrap_or_else(|| panic!("internal fault: unknown {side} element {id}"))
    }

    fn finish(self) -> FusedEvents {
        for (index, row) in self.rows.iter().enumerate() {
            assert!(
                row.master.is_empty() && row.slave.is_empty(),
                "internal fault: unmatched markup left at run {index}"
            );
        }

        FusedEvents::new(self.rows)
    }
}
