use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::domain::{Course, CourseStatus, ScheduleSlot, UnknownStatus, WEEKDAYS};

use super::{
    error::{FieldError, FieldWriteError},
    path::{FieldPath, SlotField},
    rules,
    value::FieldValue,
};

/// The record a create-mode form starts from.
pub fn create_mode_defaults() -> Course {
    Course {
        code: String::new(),
        name: String::new(),
        description: String::new(),
        credits: 3,
        instructor: String::new(),
        semester: String::new(),
        capacity: 30,
        status: CourseStatus::Active,
        schedule: vec![ScheduleSlot::default()],
        extra: Map::new(),
    }
}

/// Working copy of one course, stored as flat path-keyed maps.
///
/// Values and errors are addressed by field path strings (`code`,
/// `schedule.1.day`). Every write is recorded in a change journal so a
/// renderer only has to redraw the controls that actually changed.
#[derive(Debug, Clone)]
pub struct FormState {
    pub(super) values: IndexMap<String, FieldValue>,
    pub(super) errors: IndexMap<String, FieldError>,
    pub(super) validated: HashSet<String>,
    pub(super) schedule_len: usize,
    pub(super) changes: IndexSet<String>,
    passthrough: Map<String, Value>,
    dirty: bool,
}

impl FormState {
    pub fn create_mode() -> Self {
        Self::from_course(&create_mode_defaults())
    }

    pub fn from_course(course: &Course) -> Self {
        let mut values = IndexMap::new();
        let text = |raw: &str| FieldValue::Text(raw.to_string());
        values.insert(FieldPath::Code.key(), text(&course.code));
        values.insert(FieldPath::Name.key(), text(&course.name));
        values.insert(FieldPath::Description.key(), text(&course.description));
        values.insert(FieldPath::Credits.key(), FieldValue::Integer(course.credits));
        values.insert(FieldPath::Instructor.key(), text(&course.instructor));
        values.insert(FieldPath::Semester.key(), text(&course.semester));
        values.insert(FieldPath::Capacity.key(), FieldValue::Integer(course.capacity));
        values.insert(FieldPath::Status.key(), text(course.status.as_str()));

        let mut state = Self {
            values,
            errors: IndexMap::new(),
            validated: HashSet::new(),
            schedule_len: 0,
            changes: IndexSet::new(),
            passthrough: course.extra.clone(),
            dirty: false,
        };
        if course.schedule.is_empty() {
            state.push_slot(&ScheduleSlot::default());
        }
        for slot in &course.schedule {
            state.push_slot(slot);
        }
        state.changes.clear();
        state
    }

    pub fn value(&self, path: &str) -> Option<&FieldValue> {
        self.values.get(path)
    }

    /// Text stored at `path`, or `""` for numeric or unknown paths.
    pub fn text(&self, path: &str) -> &str {
        self.value(path)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    pub fn integer(&self, path: &str) -> Option<i64> {
        self.value(path).and_then(FieldValue::as_integer)
    }

    pub fn error(&self, path: &str) -> Option<&FieldError> {
        self.errors.get(path)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(path, error)| (path.as_str(), error))
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn schedule_len(&self) -> usize {
        self.schedule_len
    }

    /// Write a value through its field path.
    ///
    /// If the field's rule has already run (explicit touch or a submit), only
    /// that rule runs again; untouched fields stay error-free until then.
    pub fn set_value(
        &mut self,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FieldWriteError> {
        let path = path.parse::<FieldPath>()?;
        self.write(path, value.into())
    }

    pub fn write(&mut self, path: FieldPath, value: FieldValue) -> Result<(), FieldWriteError> {
        self.ensure_exists(&path)?;
        check_kind(&path, &value)?;
        let key = path.key();
        self.values.insert(key.clone(), value);
        self.changes.insert(key.clone());
        self.dirty = true;
        if self.validated.contains(&key) {
            self.run_rule(&path);
        }
        Ok(())
    }

    /// Mark a field as touched and run its rule.
    pub fn touch(&mut self, path: &str) -> Result<(), FieldWriteError> {
        let path = path.parse::<FieldPath>()?;
        self.touch_path(&path)
    }

    pub fn touch_path(&mut self, path: &FieldPath) -> Result<(), FieldWriteError> {
        self.ensure_exists(path)?;
        self.validated.insert(path.key());
        self.run_rule(path);
        Ok(())
    }

    /// Run every rule and replace the error map with the result.
    ///
    /// Returns the number of fields in error.
    pub fn validate(&mut self) -> usize {
        let found = rules::validate_all(self);
        let stale: Vec<String> = self.errors.keys().cloned().collect();
        self.changes.extend(stale);
        self.changes.extend(found.keys().cloned());
        self.validated
            .extend(FieldPath::all(self.schedule_len).iter().map(FieldPath::key));
        self.errors = found;
        self.errors.len()
    }

    pub fn set_error(&mut self, path: &str, error: FieldError) {
        self.changes.insert(path.to_string());
        self.errors.insert(path.to_string(), error);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Paths written or re-validated since the previous call.
    pub fn drain_changes(&mut self) -> Vec<String> {
        self.changes.drain(..).collect()
    }

    /// Copy of the current values with `status` narrowed to its enumeration.
    pub fn snapshot(&self) -> Result<Course, UnknownStatus> {
        let owned = |path: FieldPath| self.text(&path.key()).to_string();
        let status = self.text(&FieldPath::Status.key()).parse::<CourseStatus>()?;
        Ok(Course {
            code: owned(FieldPath::Code),
            name: owned(FieldPath::Name),
            description: owned(FieldPath::Description),
            credits: self.integer(&FieldPath::Credits.key()).unwrap_or(0),
            instructor: owned(FieldPath::Instructor),
            semester: owned(FieldPath::Semester),
            capacity: self.integer(&FieldPath::Capacity.key()).unwrap_or(0),
            status,
            schedule: self.schedule(),
            extra: self.passthrough.clone(),
        })
    }

    pub(super) fn push_slot(&mut self, slot: &ScheduleSlot) -> usize {
        let index = self.schedule_len;
        self.schedule_len += 1;
        for (field, raw) in [
            (SlotField::Day, &slot.day),
            (SlotField::StartTime, &slot.start_time),
            (SlotField::EndTime, &slot.end_time),
        ] {
            let key = FieldPath::slot(index, field).key();
            self.values.insert(key.clone(), FieldValue::Text(raw.clone()));
            self.changes.insert(key);
        }
        index
    }

    pub(super) fn run_rule(&mut self, path: &FieldPath) {
        let key = path.key();
        match rules::check(path, self.values.get(&key)) {
            Some(error) => {
                self.errors.insert(key.clone(), error);
            }
            None => {
                self.errors.shift_remove(&key);
            }
        }
        self.changes.insert(key);
    }

    pub(super) fn touch_dirty(&mut self) {
        self.dirty = true;
    }

    fn ensure_exists(&self, path: &FieldPath) -> Result<(), FieldWriteError> {
        match path.slot_index() {
            Some(index) if index >= self.schedule_len => Err(FieldWriteError::SlotOutOfRange {
                index,
                len: self.schedule_len,
            }),
            _ => Ok(()),
        }
    }
}

fn check_kind(path: &FieldPath, value: &FieldValue) -> Result<(), FieldWriteError> {
    let mismatch = |expected| FieldWriteError::TypeMismatch {
        path: path.key(),
        expected,
    };
    match (path, value) {
        (FieldPath::Credits | FieldPath::Capacity, FieldValue::Integer(_)) => Ok(()),
        (FieldPath::Credits | FieldPath::Capacity, FieldValue::Text(_)) => Err(mismatch("an integer")),
        (_, FieldValue::Integer(_)) => Err(mismatch("a text")),
        (FieldPath::Status, FieldValue::Text(raw)) => match raw.parse::<CourseStatus>() {
            Ok(_) => Ok(()),
            Err(_) => Err(FieldWriteError::InvalidOption {
                path: path.key(),
                value: raw.clone(),
            }),
        },
        (
            FieldPath::Schedule {
                field: SlotField::Day,
                ..
            },
            FieldValue::Text(raw),
        ) if !raw.is_empty() && !WEEKDAYS.contains(&raw.as_str()) => {
            Err(FieldWriteError::InvalidOption {
                path: path.key(),
                value: raw.clone(),
            })
        }
        _ => Ok(()),
    }
}
