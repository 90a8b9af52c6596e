use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{app::FocusTarget, form::CourseForm};

use super::components::{render_footer, render_form};

pub(crate) struct UiContext<'a> {
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub dirty: bool,
    pub error_count: usize,
    pub focus: FocusTarget,
}

pub(crate) fn draw(frame: &mut Frame<'_>, form: &CourseForm, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(frame.area());

    render_form(frame, chunks[0], form, ctx.focus);
    render_footer(frame, chunks[1], &ctx);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::{
        domain::ScheduleSlot,
        form::{CourseFormProps, FieldPath, create_mode_defaults},
    };

    fn render(form: &CourseForm, focus: FocusTarget) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 60)).unwrap();
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    form,
                    UiContext {
                        status_message: "Ready",
                        help: Some("Ctrl+S submit"),
                        dirty: form.state().is_dirty(),
                        error_count: form.state().error_count(),
                        focus,
                    },
                )
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn create_form_shows_placeholders_and_create_label() {
        let form = CourseForm::new(CourseFormProps::new(|_| {}));
        let screen = render(&form, FocusTarget::Field(FieldPath::Code));
        assert!(screen.contains("Course Code *"));
        assert!(screen.contains("e.g., CS101"));
        assert!(screen.contains("[ Create Course ]"));
        assert!(screen.contains("(remove)"), "single slot cannot be removed");
        assert!(screen.contains("Add Time Slot"));
    }

    #[test]
    fn errors_render_beside_their_fields_after_submit() {
        let mut form = CourseForm::new(CourseFormProps::new(|_| {}));
        form.submit();
        let screen = render(&form, FocusTarget::Submit);
        assert!(screen.contains("Course code is required"));
        assert!(screen.contains("Day is required • Start time is required • End time is required"));
        assert!(screen.contains("errors: 7"));
    }

    #[test]
    fn edit_mode_shows_values_busy_marker_and_enabled_remove() {
        let mut course = create_mode_defaults();
        course.code = "CS101".into();
        course.status = crate::domain::CourseStatus::Completed;
        course.schedule = vec![
            ScheduleSlot::new("Monday", "09:00:00", "10:00:00"),
            ScheduleSlot::new("Thursday", "14:00:00", "15:30:00"),
        ];
        let form = CourseForm::new(
            CourseFormProps::new(|_| {})
                .with_initial_values(course)
                .with_loading(true),
        );
        let screen = render(&form, FocusTarget::Submit);
        assert!(screen.contains("[ Update Course ]"));
        assert!(screen.contains("busy"));
        assert!(screen.contains("Completed"));
        assert!(screen.contains("Thursday"));
        assert!(screen.contains("[remove]"));
    }
}
