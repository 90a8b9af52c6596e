use std::{fmt, str::FromStr};

use super::error::PathParseError;

/// Fields of a single schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotField {
    Day,
    StartTime,
    EndTime,
}

impl SlotField {
    pub const ALL: [SlotField; 3] = [SlotField::Day, SlotField::StartTime, SlotField::EndTime];

    pub fn key(self) -> &'static str {
        match self {
            SlotField::Day => "day",
            SlotField::StartTime => "start_time",
            SlotField::EndTime => "end_time",
        }
    }

    fn from_key(raw: &str) -> Option<Self> {
        SlotField::ALL.into_iter().find(|field| field.key() == raw)
    }
}

/// Address of one editable value in the working copy.
///
/// The string form is what the store is keyed by: `code`, `credits`,
/// `schedule.2.start_time`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Code,
    Name,
    Description,
    Credits,
    Instructor,
    Semester,
    Capacity,
    Status,
    Schedule { index: usize, field: SlotField },
}

impl FieldPath {
    /// Top-level fields in display order.
    pub const COURSE_FIELDS: [FieldPath; 8] = [
        FieldPath::Code,
        FieldPath::Name,
        FieldPath::Description,
        FieldPath::Credits,
        FieldPath::Instructor,
        FieldPath::Semester,
        FieldPath::Capacity,
        FieldPath::Status,
    ];

    pub fn slot(index: usize, field: SlotField) -> Self {
        FieldPath::Schedule { index, field }
    }

    pub fn slot_fields(index: usize) -> [FieldPath; 3] {
        SlotField::ALL.map(|field| FieldPath::slot(index, field))
    }

    /// Every path of a working copy whose schedule holds `schedule_len` slots.
    pub fn all(schedule_len: usize) -> Vec<FieldPath> {
        let mut paths = FieldPath::COURSE_FIELDS.to_vec();
        paths.extend((0..schedule_len).flat_map(FieldPath::slot_fields));
        paths
    }

    pub fn slot_index(&self) -> Option<usize> {
        match self {
            FieldPath::Schedule { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn key(&self) -> String {
        self.to_string()
    }

    fn top_level_key(&self) -> Option<&'static str> {
        let key = match self {
            FieldPath::Code => "code",
            FieldPath::Name => "name",
            FieldPath::Description => "description",
            FieldPath::Credits => "credits",
            FieldPath::Instructor => "instructor",
            FieldPath::Semester => "semester",
            FieldPath::Capacity => "capacity",
            FieldPath::Status => "status",
            FieldPath::Schedule { .. } => return None,
        };
        Some(key)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Schedule { index, field } => write!(f, "schedule.{index}.{}", field.key()),
            other => f.write_str(other.top_level_key().unwrap_or_default()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = raw.strip_prefix("schedule.") {
            let (index, field) = rest
                .split_once('.')
                .ok_or_else(|| PathParseError::Unknown(raw.to_string()))?;
            let index = index
                .parse::<usize>()
                .map_err(|_| PathParseError::BadIndex(raw.to_string()))?;
            let field =
                SlotField::from_key(field).ok_or_else(|| PathParseError::Unknown(raw.to_string()))?;
            return Ok(FieldPath::slot(index, field));
        }
        FieldPath::COURSE_FIELDS
            .into_iter()
            .find(|path| path.top_level_key() == Some(raw))
            .ok_or_else(|| PathParseError::Unknown(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_paths_use_dotted_form() {
        let path = FieldPath::slot(2, SlotField::StartTime);
        assert_eq!(path.to_string(), "schedule.2.start_time");
        assert_eq!("schedule.2.start_time".parse::<FieldPath>(), Ok(path));
    }

    #[test]
    fn rejects_unknown_and_malformed_paths() {
        assert!(matches!(
            "schedule.x.day".parse::<FieldPath>(),
            Err(PathParseError::BadIndex(_))
        ));
        assert!(matches!(
            "schedule.0.room".parse::<FieldPath>(),
            Err(PathParseError::Unknown(_))
        ));
        assert!(matches!(
            "title".parse::<FieldPath>(),
            Err(PathParseError::Unknown(_))
        ));
    }

    #[test]
    fn all_lists_course_fields_then_slots_in_order() {
        let keys: Vec<String> = FieldPath::all(2).iter().map(FieldPath::key).collect();
        assert_eq!(keys.len(), 14);
        assert_eq!(keys[0], "code");
        assert_eq!(keys[7], "status");
        assert_eq!(keys[8], "schedule.0.day");
        assert_eq!(keys[13], "schedule.1.end_time");
    }
}
