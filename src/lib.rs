#![deny(rust_2018_idioms)]

pub mod domain;
pub mod form;
pub mod io;

mod app;
mod presentation;

pub use app::{CourseFormUi, UiOptions};
pub use domain::{Course, CourseStatus, ScheduleSlot};
pub use form::{CourseForm, CourseFormProps, FormMode, FormState, SubmitOutcome};

pub mod prelude {
    pub use super::{
        Course, CourseForm, CourseFormProps, CourseFormUi, CourseStatus, ScheduleSlot,
        SubmitOutcome, UiOptions,
    };
    pub use crate::io::{DocumentFormat, OutputDestination, OutputOptions, emit, parse_course_str};
}
