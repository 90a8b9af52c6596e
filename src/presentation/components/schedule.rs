use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::{
    app::FocusTarget,
    form::{ADD_SLOT_LABEL, FieldPath, SCHEDULE_LABEL, ScheduleRow, SlotField, control},
};

use super::{fields::error_lines, fit};

const CELL_WIDTH: usize = 12;

pub(super) fn schedule_heading() -> Line<'static> {
    Line::from(Span::styled(
        SCHEDULE_LABEL,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

/// One schedule row: day, start and end cells followed by the remove
/// control, then the row's errors joined on a single line.
pub(super) fn schedule_row_lines(
    row: &ScheduleRow<'_>,
    focus: FocusTarget,
    width: usize,
) -> Vec<Line<'static>> {
    let mut spans = vec![Span::styled(
        format!("{:>2}. ", row.index + 1),
        Style::default().fg(Color::DarkGray),
    )];

    for field in SlotField::ALL {
        let path = FieldPath::slot(row.index, field);
        let value = row.value(field);
        let (text, mut style) = if value.is_empty() {
            let info = control(&path);
            (
                info.placeholder.unwrap_or(info.label),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (value, Style::default())
        };
        if row.error(field).is_some() {
            style = style.fg(Color::Red);
        }
        if focus == FocusTarget::Field(path) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("[{}]", fit(text, CELL_WIDTH)), style));
        spans.push(Span::raw(" "));
    }

    let (remove, mut remove_style) = if row.removable {
        ("[remove]", Style::default().fg(Color::Red))
    } else {
        ("(remove)", Style::default().fg(Color::DarkGray))
    };
    if focus == FocusTarget::RemoveSlot(row.index) {
        remove_style = remove_style.add_modifier(Modifier::REVERSED);
    }
    spans.push(Span::styled(remove, remove_style));

    let mut lines = vec![Line::from(spans)];
    let messages = SlotField::ALL
        .into_iter()
        .filter_map(|field| row.error(field))
        .map(|error| error.message())
        .collect::<Vec<_>>();
    if !messages.is_empty() {
        lines.extend(error_lines(&messages.join(" • "), width));
    }
    lines
}

pub(super) fn add_slot_line(focused: bool) -> Line<'static> {
    let mut style = Style::default().fg(Color::LightBlue);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::from(Span::styled(format!("[+ {ADD_SLOT_LABEL}]"), style))
}
