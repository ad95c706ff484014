use std::collections::HashSet;

use crate::types::event::Event;

/// Check that the events form a proper bracketing: ids are unique, every
/// `Exit` closes the innermost open element and nothing is left open.
pub fn check_well_formed(events: &[Event]) -> Result<(), String> {
    let mut seen = HashSet::new();
    let mut open = Vec::new();

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Enter(element) => {
                if !seen.insert(element.id) {
                    return Err(format!(
                        "element id {} is used twice (event {index})",
                        element.id
                    ));
                }
                open.push(element.id);
            }
            Event::Exit { peer } => match open.pop() {
                Some(innermost) if innermost == *peer => {}
                Some(innermost) => {
                    return Err(format!(
                        "event {index} closes {peer} while {innermost} is the innermost open \
                         element"
                    ));
                }
                None => return Err(format!("event {index} closes {peer} but nothing is open")),
            },
            Event::Text(_) | Event::ProcessingInstruction(_) | Event::Comment(_) => {}
        }
    }

    match open.last() {
        Some(id) => Err(format!("{id} is never closed")),
        None => Ok(()),
    }
}
