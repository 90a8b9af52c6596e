use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::Course;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).context("failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).context("failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .context("failed to parse TOML document")
            .and_then(|table| {
                serde_json::to_value(table).context("failed to convert TOML to JSON")
            }),
    }
}

/// Parse a course record to seed an edit-mode form.
pub fn parse_course_str(contents: &str, format: DocumentFormat) -> Result<Course> {
    let value = parse_document_str(contents, format)?;
    course_from_value(value)
}

pub fn course_from_value(value: Value) -> Result<Course> {
    serde_json::from_value(value).context("document is not a valid course record")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CourseStatus;

    #[test]
    fn parses_json_course() {
        let course = parse_course_str(
            r#"{
                "code": "CS101", "name": "Intro", "credits": 4,
                "instructor": "Dr. Smith", "semester": "Fall 2023",
                "capacity": 25, "status": "completed",
                "schedule": [{"day": "Friday", "start_time": "09:00:00", "end_time": "10:30:00"}]
            }"#,
            DocumentFormat::Json,
        )
        .unwrap();
        assert_eq!(course.credits, 4);
        assert_eq!(course.status, CourseStatus::Completed);
        assert_eq!(course.schedule.len(), 1);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = parse_course_str(
            r#"{"code": "X", "name": "Y", "credits": 1, "instructor": "I",
                "semester": "S", "capacity": 1, "status": "archived", "schedule": []}"#,
            DocumentFormat::Json,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a valid course record"));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn parses_yaml_course() {
        let yaml = "code: CS101\nname: Intro\ncredits: 3\ninstructor: Dr. Smith\n\
                    semester: Fall 2023\ncapacity: 30\nstatus: active\n\
                    schedule:\n  - day: Monday\n    start_time: '09:00:00'\n    end_time: '10:00:00'\n";
        let course = parse_course_str(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(course.schedule[0].day, "Monday");
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_course_survives_a_round_trip() {
        use crate::io::{OutputOptions, serialize_course};

        let mut course = crate::form::create_mode_defaults();
        course.code = "CS101".into();
        course.name = "Intro".into();
        course.schedule[0] = crate::domain::ScheduleSlot::new("Monday", "09:00:00", "10:00:00");
        course.extra.insert("id".into(), serde_json::json!(7));

        let text = serialize_course(&course, &OutputOptions::new(DocumentFormat::Toml)).unwrap();
        let parsed = parse_course_str(&text, DocumentFormat::Toml).unwrap();
        assert_eq!(parsed, course);
        assert_eq!(parsed.extra.get("id"), Some(&serde_json::json!(7)));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn parses_toml_document_with_schedule_tables() {
        let source = "code = \"CS\"\nname = \"N\"\ncredits = 2\ninstructor = \"I\"\n\
                      semester = \"S\"\ncapacity = 5\nstatus = \"inactive\"\n\n\
                      [[schedule]]\nday = \"Tuesday\"\nstart_time = \"08:00:00\"\n\
                      end_time = \"09:00:00\"\n";
        let course = parse_course_str(source, DocumentFormat::Toml).unwrap();
        assert_eq!(course.status, CourseStatus::Inactive);
        assert_eq!(course.schedule[0].day, "Tuesday");
    }
}
