use std::fmt;

use tracing::{debug, info};

use crate::domain::Course;

use super::{error::FieldError, path::FieldPath, state::FormState};

/// Receives the validated payload. Called synchronously, once per
/// successful submit.
pub type SubmitHandler = Box<dyn FnMut(Course)>;

/// Construction inputs of a [`CourseForm`].
pub struct CourseFormProps {
    pub initial_values: Option<Course>,
    pub on_submit: SubmitHandler,
    pub is_loading: bool,
}

impl CourseFormProps {
    pub fn new(on_submit: impl FnMut(Course) + 'static) -> Self {
        Self {
            initial_values: None,
            on_submit: Box::new(on_submit),
            is_loading: false,
        }
    }

    pub fn with_initial_values(mut self, initial_values: Course) -> Self {
        self.initial_values = Some(initial_values);
        self
    }

    pub fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }
}

impl fmt::Debug for CourseFormProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseFormProps")
            .field("initial_values", &self.initial_values)
            .field("is_loading", &self.is_loading)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected { issues: usize },
}

/// One mounted course form: the working copy plus the caller's callback.
pub struct CourseForm {
    state: FormState,
    mode: FormMode,
    on_submit: SubmitHandler,
    is_loading: bool,
}

impl CourseForm {
    pub fn new(props: CourseFormProps) -> Self {
        let CourseFormProps {
            initial_values,
            on_submit,
            is_loading,
        } = props;
        let (state, mode) = seed(initial_values.as_ref());
        debug!(?mode, "course form mounted");
        Self {
            state,
            mode,
            on_submit,
            is_loading,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Busy marker for the submit control. Does not block submission.
    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create Course",
            FormMode::Edit => "Update Course",
        }
    }

    /// Discard the working copy and start over from new initial values.
    pub fn replace_initial_values(&mut self, initial_values: Option<Course>) {
        let (state, mode) = seed(initial_values.as_ref());
        self.state = state;
        self.mode = mode;
        debug!(?mode, "working copy replaced");
    }

    /// Validate everything and hand the payload to the callback if clean.
    ///
    /// The form is left as is afterwards; resetting it is up to the caller.
    pub fn submit(&mut self) -> SubmitOutcome {
        let issues = self.state.validate();
        if issues > 0 {
            debug!(issues, "submission suppressed");
            return SubmitOutcome::Rejected { issues };
        }
        match self.state.snapshot() {
            Ok(payload) => {
                info!(code = %payload.code, slots = payload.schedule.len(), "course submitted");
                (self.on_submit)(payload);
                SubmitOutcome::Submitted
            }
            Err(_) => {
                self.state.set_error(
                    &FieldPath::Status.key(),
                    FieldError::required("Status is required"),
                );
                SubmitOutcome::Rejected { issues: 1 }
            }
        }
    }
}

impl fmt::Debug for CourseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CourseForm")
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("is_loading", &self.is_loading)
            .finish_non_exhaustive()
    }
}

fn seed(initial_values: Option<&Course>) -> (FormState, FormMode) {
    match initial_values {
        Some(course) => (FormState::from_course(course), FormMode::Edit),
        None => (FormState::create_mode(), FormMode::Create),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::domain::{CourseStatus, ScheduleSlot};

    fn recording_form() -> (CourseForm, Rc<RefCell<Vec<Course>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let form = CourseForm::new(CourseFormProps::new(move |course| {
            sink.borrow_mut().push(course)
        }));
        (form, calls)
    }

    fn fill_required(state: &mut FormState) {
        state.set_value("code", "CS101").unwrap();
        state.set_value("name", "Intro").unwrap();
        state.set_value("instructor", "Dr. Smith").unwrap();
        state.set_value("semester", "Fall 2023").unwrap();
        state.set_value("schedule.0.day", "Monday").unwrap();
        state.set_value("schedule.0.start_time", "09:00:00").unwrap();
        state.set_value("schedule.0.end_time", "10:00:00").unwrap();
    }

    #[test]
    fn empty_create_form_is_rejected_without_callback() {
        let (mut form, calls) = recording_form();
        assert_eq!(form.submit(), SubmitOutcome::Rejected { issues: 7 });
        assert!(calls.borrow().is_empty());
        assert_eq!(
            form.state().error("code").map(FieldError::message),
            Some("Course code is required")
        );
    }

    #[test]
    fn range_errors_block_submission() {
        let (mut form, calls) = recording_form();
        fill_required(form.state_mut());
        form.state_mut().set_value("credits", 0_i64).unwrap();
        form.state_mut().set_value("capacity", 0_i64).unwrap();
        assert_eq!(form.submit(), SubmitOutcome::Rejected { issues: 2 });
        assert!(calls.borrow().is_empty());
        assert!(matches!(
            form.state().error("credits"),
            Some(FieldError::Range { .. })
        ));
        assert!(matches!(
            form.state().error("capacity"),
            Some(FieldError::Range { .. })
        ));
    }

    #[test]
    fn valid_create_form_submits_exact_values() {
        let (mut form, calls) = recording_form();
        fill_required(form.state_mut());
        assert_eq!(form.submit(), SubmitOutcome::Submitted);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        let payload = &calls[0];
        assert_eq!(payload.code, "CS101");
        assert_eq!(payload.name, "Intro");
        assert_eq!(payload.description, "");
        assert_eq!(payload.credits, 3);
        assert_eq!(payload.capacity, 30);
        assert_eq!(payload.status, CourseStatus::Active);
        assert_eq!(
            payload.schedule,
            vec![ScheduleSlot::new("Monday", "09:00:00", "10:00:00")]
        );
        assert_eq!(form.state().text("code"), "CS101", "form is not reset");
    }

    #[test]
    fn loading_flag_does_not_block_repeat_submission() {
        let (mut form, calls) = recording_form();
        fill_required(form.state_mut());
        form.set_loading(true);
        form.submit();
        form.submit();
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn replacing_initial_values_switches_mode_and_discards_edits() {
        let (mut form, _calls) = recording_form();
        assert_eq!(form.submit_label(), "Create Course");
        form.state_mut().set_value("code", "DRAFT").unwrap();

        let mut course = crate::form::create_mode_defaults();
        course.code = "MA200".to_string();
        form.replace_initial_values(Some(course));
        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.submit_label(), "Update Course");
        assert_eq!(form.state().text("code"), "MA200");
        assert!(!form.state().is_dirty());
    }
}
