use std::collections::VecDeque;

use super::sync_row::Boundary;
use crate::{Side, types::token::Mark};

/// Match the innermost pending opening tags of an earlier row against the
/// pending closing tags of a later row, moving every matched pair into the
/// output. Spots next to the text are moved along unconditionally.
///
/// Stops at the first opening tag that isn't closed by the waiting closing
/// tag, or when either queue runs out.
///
/// # Panics
///
/// Panics if the innermost opening tag and the first closing tag aren't
/// peers, which is impossible for well-formed input.
pub fn local_reduce(
    prefix: &mut VecDeque<Mark>,
    suffix: &mut VecDeque<Mark>,
    out_prefix: &mut VecDeque<Boundary>,
    out_suffix: &mut Vec<Boundary>,
    side: Side,
) {
    loop {
        if prefix.back().is_some_and(Mark::is_spot) {
            if let Some(spot) = prefix.pop_back() {
                out_prefix.push_front(Boundary::new(side, spot));
            }
            continue;
        }

        if suffix.front().is_some_and(Mark::is_spot) {
            if let Some(spot) = suffix.pop_front() {
                out_suffix.push(Boundary::new(side, spot));
            }
            continue;
        }

        if prefix.is_empty() || suffix.is_empty() {
            break;
        }

        let (Some(opening), Some(closing)) = (prefix.pop_back(), suffix.pop_front()) else {
            unreachable!("both queues are non-empty");
        };

        assert!(
            matches!(
                (&opening, &closing),
                (Mark::Enter(element), Mark::Exit(peer)) if element.id == *peer
            ),
            "internal fault: {side} opening {opening:?} is not closed by {closing:?}"
        );

        out_prefix.push_front(Boundary::new(side, opening));
        out_suffix.push(Boundary::new(side, closing));
    }
}
