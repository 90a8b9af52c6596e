use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Weekday names offered by the schedule day selector, in display order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A course record as the caller owns it.
///
/// Fields this form does not edit (an `id`, timestamps, ...) are kept in
/// `extra` so that an edited record round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub credits: i64,
    pub instructor: String,
    pub semester: String,
    pub capacity: i64,
    pub status: CourseStatus,
    pub schedule: Vec<ScheduleSlot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One weekly recurring time block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleSlot {
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 3] = [
        CourseStatus::Active,
        CourseStatus::Inactive,
        CourseStatus::Completed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CourseStatus::Active => "active",
            CourseStatus::Inactive => "inactive",
            CourseStatus::Completed => "completed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CourseStatus::Active => "Active",
            CourseStatus::Inactive => "Inactive",
            CourseStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown course status '{0}' (expected active, inactive or completed)")]
pub struct UnknownStatus(pub String);

impl FromStr for CourseStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        CourseStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_record_and_keeps_unknown_fields() {
        let course: Course = serde_json::from_value(json!({
            "id": "c-42",
            "code": "CS101",
            "name": "Intro",
            "credits": 3,
            "instructor": "Dr. Smith",
            "semester": "Fall 2023",
            "capacity": 30,
            "status": "inactive",
            "schedule": [{"day": "Monday", "start_time": "09:00:00", "end_time": "10:00:00"}]
        }))
        .unwrap();
        assert_eq!(course.description, "");
        assert_eq!(course.status, CourseStatus::Inactive);
        assert_eq!(course.extra.get("id"), Some(&json!("c-42")));

        let back = serde_json::to_value(&course).unwrap();
        assert_eq!(back["id"], json!("c-42"));
        assert_eq!(back["status"], json!("inactive"));
    }

    #[test]
    fn status_parses_only_the_three_literals() {
        assert_eq!("completed".parse::<CourseStatus>(), Ok(CourseStatus::Completed));
        assert!("Completed".parse::<CourseStatus>().is_err());
        assert!("archived".parse::<CourseStatus>().is_err());
    }
}
