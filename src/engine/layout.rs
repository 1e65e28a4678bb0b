//! Text layout for the textbox.
//!
//! Pure helpers: they never draw and never fail. The textbox shows
//! `VISIBLE_LINES` lines; the caller tracks how many newlines have already
//! been typed and passes that count in as `lines_drawn`.

/// Number of text lines the textbox can show at once.
pub const VISIBLE_LINES: usize = 3;

/// Return the window of `text` that should currently be visible.
///
/// The window starts `VISIBLE_LINES - 1` lines before `lines_drawn` and spans
/// at most `VISIBLE_LINES` newline-delimited lines, so earlier lines scroll off
/// as new ones are typed. Offsets past the end clamp to the last line.
pub fn cut_text(text: &str, lines_drawn: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let start = lines_drawn
        .saturating_sub(VISIBLE_LINES - 1)
        .min(lines.len().saturating_sub(1));
    let end = (start + VISIBLE_LINES).min(lines.len());
    lines[start..end].join("\n")
}

/// `text[0..=char_index]`, counted in Unicode scalar values.
pub fn revealed_prefix(text: &str, char_index: usize) -> &str {
    text.char_indices()
        .nth(char_index + 1)
        .map(|(i, _)| &text[..i])
        .unwrap_or(text)
}

/// Truncate `line` to at most `columns` characters.
pub fn clip_to_width(line: &str, columns: usize) -> &str {
    line.char_indices()
        .nth(columns)
        .map(|(i, _)| &line[..i])
        .unwrap_or(line)
}

/// Word characters earn a blip; punctuation and whitespace are silent.
pub fn is_blip_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
