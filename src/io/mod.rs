mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{course_from_value, parse_course_str, parse_document_str};
pub use output::{OutputDestination, OutputOptions, emit, serialize_course};
