use crate::domain::{CourseStatus, WEEKDAYS};

use super::path::{FieldPath, SlotField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const STATUS_OPTIONS: [SelectOption; 3] = {
    let mut options = [SelectOption { value: "", label: "" }; 3];
    let mut index = 0;
    while index < CourseStatus::ALL.len() {
        let status = CourseStatus::ALL[index];
        options[index] = SelectOption {
            value: status.as_str(),
            label: status.label(),
        };
        index += 1;
    }
    options
};

pub const DAY_OPTIONS: [SelectOption; 7] = {
    let mut options = [SelectOption { value: "", label: "" }; 7];
    let mut index = 0;
    while index < WEEKDAYS.len() {
        options[index] = SelectOption {
            value: WEEKDAYS[index],
            label: WEEKDAYS[index],
        };
        index += 1;
    }
    options
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    TextArea { min_rows: u16 },
    Number { min: i64, max: Option<i64> },
    Select { options: &'static [SelectOption] },
    Time,
}

/// Presentation metadata for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlInfo {
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: ControlKind,
    pub required: bool,
}

impl ControlInfo {
    const fn new(label: &'static str, kind: ControlKind) -> Self {
        Self {
            label,
            placeholder: None,
            kind,
            required: true,
        }
    }

    const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

pub const ADD_SLOT_LABEL: &str = "Add Time Slot";
pub const SCHEDULE_LABEL: &str = "Schedule";

pub fn control(path: &FieldPath) -> ControlInfo {
    match path {
        FieldPath::Code => ControlInfo::new("Course Code", ControlKind::Text).placeholder("e.g., CS101"),
        FieldPath::Name => ControlInfo::new("Course Name", ControlKind::Text)
            .placeholder("e.g., Introduction to Programming"),
        FieldPath::Description => ControlInfo::new("Description", ControlKind::TextArea { min_rows: 3 })
            .placeholder("Course description")
            .optional(),
        FieldPath::Credits => ControlInfo::new(
            "Credits",
            ControlKind::Number {
                min: 1,
                max: Some(6),
            },
        ),
        FieldPath::Instructor => {
            ControlInfo::new("Instructor", ControlKind::Text).placeholder("e.g., Dr. Smith")
        }
        FieldPath::Semester => {
            ControlInfo::new("Semester", ControlKind::Text).placeholder("e.g., Fall 2023")
        }
        FieldPath::Capacity => {
            ControlInfo::new("Capacity", ControlKind::Number { min: 1, max: None })
        }
        FieldPath::Status => ControlInfo::new(
            "Status",
            ControlKind::Select {
                options: &STATUS_OPTIONS,
            },
        ),
        FieldPath::Schedule { field, .. } => match field {
            SlotField::Day => ControlInfo::new(
                "Day",
                ControlKind::Select {
                    options: &DAY_OPTIONS,
                },
            )
            .placeholder("Day"),
            SlotField::StartTime => {
                ControlInfo::new("Start Time", ControlKind::Time).placeholder("Start Time")
            }
            SlotField::EndTime => {
                ControlInfo::new("End Time", ControlKind::Time).placeholder("End Time")
            }
        },
    }
}

/// Label shown for a stored select value, falling back to the raw value.
pub fn option_label(options: &[SelectOption], value: &str) -> Option<&'static str> {
    options
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label)
}
