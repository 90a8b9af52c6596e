mod course_form_ui;
mod editing;
mod focus;
mod keymap;
mod options;
mod runtime;
mod status;
mod terminal;

pub(crate) use focus::FocusTarget;
pub use course_form_ui::CourseFormUi;
pub use options::UiOptions;
