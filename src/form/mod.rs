mod error;
mod layout;
mod path;
mod rules;
mod schedule;
mod state;
mod submit;
mod value;

pub use error::{FieldError, FieldWriteError, PathParseError};
pub use layout::{
    ADD_SLOT_LABEL, ControlInfo, ControlKind, DAY_OPTIONS, SCHEDULE_LABEL, STATUS_OPTIONS,
    SelectOption, control, option_label,
};
pub use path::{FieldPath, SlotField};
pub use rules::{check, validate_all};
pub use schedule::{ScheduleRow, schedule_rows};
pub use state::{FormState, create_mode_defaults};
pub use submit::{CourseForm, CourseFormProps, FormMode, SubmitHandler, SubmitOutcome};
pub use value::FieldValue;
