use crate::global_constants::ENTRY_LABEL_ELLIPSIS;

/// Menu label for a history entry: the first `preview_size` characters with
/// whitespace runs collapsed to single spaces, plus an ellipsis when the
/// content was cut.
///
/// Counting is done on `char`s, so a grapheme made of several code points
/// can still be split.
pub fn format_entry_label(content: &str, preview_size: usize) -> String {
    let shortened: String = content.chars().take(preview_size).collect();
    let mut label = collapse_whitespace(&shortened);

    if content.chars().count() > preview_size {
        label.push_str(ENTRY_LABEL_ELLIPSIS);
    }

    label
}

fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for character in text.chars() {
        if character.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(character);
            in_whitespace = false;
        }
    }

    collapsed
}
