use crate::types::Style;

const KEY_STYLE: Style = Style { fg: None, bg: None, bold: true, dim: false };
const LABEL_STYLE: Style = Style { fg: None, bg: None, bold: false, dim: true };

/// Split a hint string into styled spans, bolding any text inside `[...]`
/// brackets. Text outside brackets is dim.
pub fn hint_spans(item: &str) -> Vec<(String, Style)> {
    let mut spans = Vec::new();
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            spans.push((rest.to_string(), LABEL_STYLE));
            break;
        };
        if open > 0 {
            spans.push((rest[..open].to_string(), LABEL_STYLE));
        }
        rest = &rest[open..];
        match rest.find(']') {
            Some(close) => {
                spans.push((rest[..=close].to_string(), KEY_STYLE));
                rest = &rest[close + 1..];
            }
            None => {
                spans.push((rest.to_string(), LABEL_STYLE));
                break;
            }
        }
    }
    spans
}
