/// Reduce raw keyboard input to a valid cell value.
///
/// Input is upper-cased with the full Unicode mapping (so `ß` becomes `SS`),
/// everything outside `A-Z` is dropped and only the first remaining letter is
/// kept. The result is either empty or a single uppercase ASCII letter.
#[must_use]
pub fn filter_cell(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_uppercase)
        .find(char::is_ascii_uppercase)
        .map(String::from)
        .unwrap_or_default()
}

#[must_use]
pub fn is_valid_cell(value: &str) -> bool {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => true,
        (Some(c), None) => c.is_ascii_uppercase(),
        _ => false,
    }
}
