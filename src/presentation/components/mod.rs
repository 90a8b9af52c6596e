mod fields;
mod footer;
mod schedule;

pub(crate) use fields::render_form;
pub(crate) use footer::render_footer;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad or truncate `text` to exactly `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        let pad = width - UnicodeWidthStr::width(text);
        return format!("{text}{}", " ".repeat(pad));
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
