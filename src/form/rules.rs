//! Per-field validation rules.
//!
//! Every rule is a pure function of the field's own value; there are no
//! cross-field rules. [`validate_all`] runs every rule over the whole
//! working copy and never stops at the first failure.

use indexmap::IndexMap;

use crate::domain::{CourseStatus, WEEKDAYS};

use super::{
    error::FieldError,
    path::{FieldPath, SlotField},
    state::FormState,
    value::FieldValue,
};

/// Run the rule registered for `path` against `value`.
///
/// A missing value is judged the same way as an empty one.
pub fn check(path: &FieldPath, value: Option<&FieldValue>) -> Option<FieldError> {
    match path {
        FieldPath::Code => required_text(value, "Course code is required"),
        FieldPath::Name => required_text(value, "Course name is required"),
        FieldPath::Instructor => required_text(value, "Instructor is required"),
        FieldPath::Semester => required_text(value, "Semester is required"),
        FieldPath::Description => None,
        FieldPath::Credits => at_least_one(value, "Credits must be at least 1"),
        FieldPath::Capacity => at_least_one(value, "Capacity must be at least 1"),
        FieldPath::Status => {
            let known = value
                .and_then(FieldValue::as_text)
                .is_some_and(|raw| raw.parse::<CourseStatus>().is_ok());
            (!known).then(|| FieldError::required("Status is required"))
        }
        FieldPath::Schedule { field, .. } => match field {
            SlotField::Day => weekday(value, "Day is required"),
            SlotField::StartTime => required_text(value, "Start time is required"),
            SlotField::EndTime => required_text(value, "End time is required"),
        },
    }
}

/// Evaluate every rule over the current values, keyed by field path.
pub fn validate_all(state: &FormState) -> IndexMap<String, FieldError> {
    FieldPath::all(state.schedule_len())
        .into_iter()
        .filter_map(|path| {
            let key = path.key();
            check(&path, state.value(&key)).map(|error| (key, error))
        })
        .collect()
}

fn required_text(value: Option<&FieldValue>, message: &str) -> Option<FieldError> {
    let filled = value
        .and_then(FieldValue::as_text)
        .is_some_and(|text| !text.trim().is_empty());
    (!filled).then(|| FieldError::required(message))
}

/// A day outside the weekday options counts as no selection.
fn weekday(value: Option<&FieldValue>, message: &str) -> Option<FieldError> {
    let selected = value
        .and_then(FieldValue::as_text)
        .is_some_and(|day| WEEKDAYS.contains(&day));
    (!selected).then(|| FieldError::required(message))
}

fn at_least_one(value: Option<&FieldValue>, message: &str) -> Option<FieldError> {
    let number = value.and_then(FieldValue::as_integer).unwrap_or(0);
    (number < 1).then(|| FieldError::range(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(raw: &str) -> FieldValue {
        FieldValue::from(raw)
    }

    #[test]
    fn required_text_rejects_empty_and_whitespace() {
        assert_eq!(
            check(&FieldPath::Code, Some(&text(""))),
            Some(FieldError::required("Course code is required"))
        );
        assert_eq!(
            check(&FieldPath::Semester, Some(&text("   "))),
            Some(FieldError::required("Semester is required"))
        );
        assert_eq!(check(&FieldPath::Name, Some(&text("Intro"))), None);
    }

    #[test]
    fn description_is_optional() {
        assert_eq!(check(&FieldPath::Description, Some(&text(""))), None);
        assert_eq!(check(&FieldPath::Description, None), None);
    }

    #[test]
    fn numeric_fields_have_a_lower_bound_only() {
        assert_eq!(
            check(&FieldPath::Credits, Some(&FieldValue::Integer(0))),
            Some(FieldError::range("Credits must be at least 1"))
        );
        assert_eq!(
            check(&FieldPath::Capacity, Some(&FieldValue::Integer(-4))),
            Some(FieldError::range("Capacity must be at least 1"))
        );
        assert_eq!(check(&FieldPath::Credits, Some(&FieldValue::Integer(9))), None);
    }

    #[test]
    fn slot_fields_report_their_own_message() {
        let end = FieldPath::slot(3, SlotField::EndTime);
        assert_eq!(
            check(&end, Some(&text(""))).map(|error| error.to_string()),
            Some("End time is required".to_string())
        );
    }

    #[test]
    fn day_must_be_one_of_the_weekdays() {
        let day = FieldPath::slot(0, SlotField::Day);
        assert_eq!(check(&day, Some(&text("Wednesday"))), None);
        for raw in ["", "Funday", "monday"] {
            assert_eq!(
                check(&day, Some(&text(raw))),
                Some(FieldError::required("Day is required")),
                "{raw:?}"
            );
        }
    }
}
