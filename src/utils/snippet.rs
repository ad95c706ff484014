const CONTEXT: usize = 20;

/// The characters within `CONTEXT` of `offset`, used to point at a location
/// in error messages.
pub fn snippet(text: &[char], offset: usize) -> String {
    let start = offset.saturating_sub(CONTEXT).min(text.len());
    let end = (offset + CONTEXT).min(text.len());

    text[start..end].iter().collect()
}
