use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::{ControlKind, FieldPath, FieldValue, FieldWriteError, FormState, SelectOption, control};

/// Apply a key press to the control bound at `path`.
///
/// Returns `Ok(true)` when the stored value changed.
pub(crate) fn edit_field(
    state: &mut FormState,
    path: FieldPath,
    key: &KeyEvent,
) -> Result<bool, FieldWriteError> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Ok(false);
    }
    let current = state.value(&path.key()).cloned();
    let next = match control(&path).kind {
        ControlKind::Text | ControlKind::TextArea { .. } => {
            edit_text(current_text(&current), key, |_| true)
        }
        ControlKind::Time => edit_text(current_text(&current), key, |ch| {
            ch.is_ascii_digit() || ch == ':'
        }),
        ControlKind::Number { min, max } => {
            let number = current.as_ref().and_then(FieldValue::as_integer).unwrap_or(0);
            edit_number(number, key, min, max).map(FieldValue::Integer)
        }
        ControlKind::Select { options } => {
            cycle_option(current_text(&current), options, key).map(FieldValue::from)
        }
    };
    match next {
        Some(value) if Some(&value) != current.as_ref() => {
            state.write(path, value)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn current_text(current: &Option<FieldValue>) -> &str {
    current
        .as_ref()
        .and_then(FieldValue::as_text)
        .unwrap_or_default()
}

fn edit_text(buffer: &str, key: &KeyEvent, accept: impl Fn(char) -> bool) -> Option<FieldValue> {
    let mut next = buffer.to_string();
    match key.code {
        KeyCode::Char(ch) if !ch.is_control() && accept(ch) => next.push(ch),
        KeyCode::Backspace => {
            next.pop()?;
        }
        _ => return None,
    }
    Some(FieldValue::Text(next))
}

/// Typing clamps to the upper bound only; stepping with arrows clamps to
/// both bounds. A value below `min` can still be typed and is reported by
/// validation.
fn edit_number(number: i64, key: &KeyEvent, min: i64, max: Option<i64>) -> Option<i64> {
    let upper = max.unwrap_or(i64::MAX);
    let next = match key.code {
        KeyCode::Char(ch) => {
            let digit = ch.to_digit(10)?;
            number
                .checked_mul(10)?
                .checked_add(i64::from(digit))?
                .min(upper)
        }
        KeyCode::Backspace => number / 10,
        KeyCode::Left => number.saturating_sub(1).clamp(min, upper),
        KeyCode::Right => number.saturating_add(1).clamp(min, upper),
        _ => return None,
    };
    Some(next)
}

fn cycle_option(current: &str, options: &[SelectOption], key: &KeyEvent) -> Option<&'static str> {
    if options.is_empty() {
        return None;
    }
    let position = options.iter().position(|option| option.value == current);
    let last = options.len() - 1;
    let next = match (key.code, position) {
        (KeyCode::Right | KeyCode::Char(' '), None) => 0,
        (KeyCode::Left, None) => last,
        (KeyCode::Right | KeyCode::Char(' '), Some(index)) => {
            if index == last { 0 } else { index + 1 }
        }
        (KeyCode::Left, Some(index)) => {
            if index == 0 { last } else { index - 1 }
        }
        _ => return None,
    };
    Some(options[next].value)
}
