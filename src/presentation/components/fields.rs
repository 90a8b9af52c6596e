use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use textwrap::wrap;

use crate::{
    app::FocusTarget,
    form::{
        ControlInfo, ControlKind, CourseForm, FieldPath, FormMode, FormState, control,
        option_label, schedule_rows,
    },
};

use super::schedule::{add_slot_line, schedule_heading, schedule_row_lines};

/// Render every control of the form as one scrolling list, keeping the
/// focused control in view.
pub(crate) fn render_form(frame: &mut Frame<'_>, area: Rect, form: &CourseForm, focus: FocusTarget) {
    let state = form.state();
    let width = area.width.saturating_sub(4).max(8) as usize;
    let mut items = Vec::new();
    let mut selected = 0;

    for path in FieldPath::COURSE_FIELDS {
        let focused = focus == FocusTarget::Field(path);
        if focused {
            selected = items.len();
        }
        items.push(ListItem::new(field_lines(state, &path, focused, width)));
    }

    items.push(ListItem::new(schedule_heading()));
    for row in schedule_rows(state) {
        if focus.slot_index() == Some(row.index) {
            selected = items.len();
        }
        items.push(ListItem::new(schedule_row_lines(&row, focus, width)));
    }

    if focus == FocusTarget::AddSlot {
        selected = items.len();
    }
    items.push(ListItem::new(add_slot_line(focus == FocusTarget::AddSlot)));

    if focus == FocusTarget::Submit {
        selected = items.len();
    }
    items.push(ListItem::new(submit_line(form, focus == FocusTarget::Submit)));

    let title = match form.mode() {
        FormMode::Create => " New course ",
        FormMode::Edit => " Edit course ",
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_symbol("» ");
    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn field_lines(
    state: &FormState,
    path: &FieldPath,
    focused: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let info = control(path);
    let key = path.key();
    let mut lines = Vec::new();

    let mut label = info.label.to_string();
    if info.required {
        label.push_str(" *");
    }
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    let mut heading = vec![Span::styled(label, label_style)];
    if let ControlKind::Number { min, max } = info.kind {
        let hint = match max {
            Some(max) => format!("  ({min}-{max}, ←/→ to step)"),
            None => format!("  (min {min}, ←/→ to step)"),
        };
        heading.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(heading));

    let value_style = if focused {
        Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    let mut value_lines = match display_value(state, &key, &info) {
        Some(text) => wrap(&text, width)
            .into_iter()
            .map(|segment| Line::from(Span::styled(format!("  {segment}"), value_style)))
            .collect::<Vec<_>>(),
        None => vec![Line::from(Span::styled(
            format!("  {}", info.placeholder.unwrap_or_default()),
            Style::default().fg(Color::DarkGray),
        ))],
    };
    if let ControlKind::TextArea { min_rows } = info.kind {
        while value_lines.len() < usize::from(min_rows) {
            value_lines.push(Line::from("  "));
        }
    }
    lines.extend(value_lines);

    if let Some(error) = state.error(&key) {
        lines.extend(error_lines(error.message(), width));
    }
    lines
}

fn display_value(state: &FormState, key: &str, info: &ControlInfo) -> Option<String> {
    match info.kind {
        ControlKind::Number { .. } => state.integer(key).map(|number| number.to_string()),
        ControlKind::Select { options } => {
            let raw = state.text(key);
            (!raw.is_empty()).then(|| option_label(options, raw).unwrap_or(raw).to_string())
        }
        ControlKind::Text | ControlKind::TextArea { .. } | ControlKind::Time => {
            let raw = state.text(key);
            (!raw.is_empty()).then(|| raw.to_string())
        }
    }
}

pub(super) fn error_lines(message: &str, width: usize) -> Vec<Line<'static>> {
    wrap(message, width.saturating_sub(2).max(4))
        .into_iter()
        .map(|segment| {
            Line::from(Span::styled(
                format!("  {segment}"),
                Style::default().fg(Color::Red),
            ))
        })
        .collect()
}

fn submit_line(form: &CourseForm, focused: bool) -> Line<'static> {
    let mut style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let mut spans = vec![Span::styled(format!("[ {} ]", form.submit_label()), style)];
    if form.is_loading() {
        spans.push(Span::styled(
            "  ⟳ busy",
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}
