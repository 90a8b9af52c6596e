mod course;

pub use course::{Course, CourseStatus, ScheduleSlot, UnknownStatus, WEEKDAYS};
