use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, trace};

use crate::{
    domain::ScheduleSlot,
    form::{CourseForm, FieldPath, SlotField, SubmitOutcome, control},
    presentation::{self, UiContext},
};

use super::{
    editing::edit_field,
    focus::{FocusTarget, focus_ring},
    keymap::{KeyAction, KeymapContext},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalSession,
};

pub(crate) struct App {
    form: CourseForm,
    options: UiOptions,
    status: StatusLine,
    focus: usize,
    exit_armed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(form: CourseForm, options: UiOptions) -> Self {
        Self {
            form,
            options,
            status: StatusLine::new(),
            focus: 0,
            exit_armed: false,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalSession::enter()?;
        let mut redraw = true;
        while !self.should_quit {
            if redraw {
                terminal.draw(|frame| self.draw(frame))?;
                redraw = false;
            }
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    self.handle_key(key);
                    redraw = true;
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        presentation::draw(
            frame,
            &self.form,
            UiContext {
                status_message: self.status.message(),
                help: help.as_deref(),
                dirty: self.form.state().is_dirty(),
                error_count: self.form.state().error_count(),
                focus: self.focused(),
            },
        );
    }

    fn ring(&self) -> Vec<FocusTarget> {
        focus_ring(self.form.state().schedule_len())
    }

    pub(crate) fn focused(&self) -> FocusTarget {
        let ring = self.ring();
        ring[self.focus.min(ring.len() - 1)]
    }

    fn keymap_context(&self) -> KeymapContext {
        if self.focused().slot_index().is_some() {
            KeymapContext::Schedule
        } else {
            KeymapContext::Default
        }
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        self.options.keymap_store.help_text(self.keymap_context())
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let action = self
            .options
            .keymap_store
            .classify(&key, self.keymap_context());
        match action {
            Some(action) => self.handle_action(action),
            None => self.handle_field_input(&key),
        }
        let changed = self.form.state_mut().drain_changes();
        if !changed.is_empty() {
            trace!(?changed, "working copy updated");
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => self.submit(),
            KeyAction::Quit => self.on_exit(),
            KeyAction::ResetStatus => {
                self.exit_armed = false;
                self.status.ready();
            }
            KeyAction::FieldStep(delta) => self.move_focus(delta),
            KeyAction::AddSlot => self.add_slot(),
            KeyAction::RemoveSlot => match self.focused().slot_index() {
                Some(index) => self.remove_slot(index),
                None => self
                    .status
                    .set_raw("Focus a schedule row before Ctrl+D remove"),
            },
            KeyAction::Activate => match self.focused() {
                FocusTarget::AddSlot => self.add_slot(),
                FocusTarget::RemoveSlot(index) => self.remove_slot(index),
                FocusTarget::Submit => self.submit(),
                FocusTarget::Field(_) => self.move_focus(1),
            },
        }
    }

    fn handle_field_input(&mut self, key: &KeyEvent) {
        let FocusTarget::Field(path) = self.focused() else {
            return;
        };
        match edit_field(self.form.state_mut(), path, key) {
            Ok(true) => {
                self.exit_armed = false;
                self.status.editing(control(&path).label);
            }
            Ok(false) => {}
            Err(err) => self.status.set_raw(err.to_string()),
        }
    }

    fn move_focus(&mut self, delta: i32) {
        let current = self.focused();
        if self.options.validate_on_blur
            && let FocusTarget::Field(path) = current
        {
            if let Err(err) = self.form.state_mut().touch_path(&path) {
                debug!(%err, "blur validation skipped");
            }
        }
        let len = self.ring().len() as i64;
        let position = self.focus.min(len as usize - 1) as i64;
        self.focus = (position + i64::from(delta)).rem_euclid(len) as usize;
    }

    fn focus_on(&mut self, target: FocusTarget) {
        if let Some(position) = self.ring().iter().position(|item| *item == target) {
            self.focus = position;
        }
    }

    fn add_slot(&mut self) {
        let index = self.form.state_mut().insert_slot(ScheduleSlot::default());
        self.exit_armed = false;
        self.focus_on(FocusTarget::Field(FieldPath::slot(index, SlotField::Day)));
        self.status.slot_added(index);
    }

    fn remove_slot(&mut self, index: usize) {
        if !self.form.state_mut().remove_slot(index) {
            self.status.set_raw("The last time slot cannot be removed");
            return;
        }
        self.exit_armed = false;
        let remaining = self.form.state().schedule_len();
        self.focus_on(FocusTarget::RemoveSlot(index.min(remaining - 1)));
        self.status.slot_removed(index);
    }

    fn submit(&mut self) {
        self.exit_armed = false;
        match self.form.submit() {
            SubmitOutcome::Submitted => {
                self.status.submitted(self.form.submit_label());
                self.form.state_mut().mark_clean();
            }
            SubmitOutcome::Rejected { issues } => {
                self.status.issues_remaining(issues);
                let first = self
                    .form
                    .state()
                    .errors()
                    .next()
                    .and_then(|(path, _)| path.parse::<FieldPath>().ok());
                if let Some(path) = first {
                    self.focus_on(FocusTarget::Field(path));
                }
            }
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.form.state().is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::domain::Course;
    use crate::form::CourseFormProps;

    fn app() -> (App, Rc<RefCell<Vec<Course>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let form = CourseForm::new(CourseFormProps::new(move |course| {
            sink.borrow_mut().push(course)
        }));
        (App::new(form, UiOptions::default()), calls)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn keyboard_session_submits_a_complete_course() {
        let (mut app, calls) = app();
        type_text(&mut app, "CS101");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Intro");
        press(&mut app, KeyCode::Tab); // description
        press(&mut app, KeyCode::Tab); // credits
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Dr. Smith");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Fall 2023");
        press(&mut app, KeyCode::Tab); // capacity
        press(&mut app, KeyCode::Tab); // status
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "09:00:00");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "10:00:00");
        ctrl(&mut app, 's');

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].instructor, "Dr. Smith");
        assert_eq!(calls[0].schedule[0].day, "Monday");
        assert!(!app.form.state().is_dirty());
    }

    #[test]
    fn failed_submit_focuses_first_invalid_field() {
        let (mut app, calls) = app();
        type_text(&mut app, "CS101");
        ctrl(&mut app, 's');
        assert!(calls.borrow().is_empty());
        assert_eq!(app.status.message(), "6 issue(s) remaining");
        assert_eq!(app.focused(), FocusTarget::Field(FieldPath::Name));
    }

    #[test]
    fn add_then_remove_slot_from_the_keyboard() {
        let (mut app, _calls) = app();
        ctrl(&mut app, 'n');
        assert_eq!(app.form.state().schedule_len(), 2);
        assert_eq!(
            app.focused(),
            FocusTarget::Field(FieldPath::slot(1, SlotField::Day))
        );
        assert_eq!(app.form.state().error_count(), 0);

        ctrl(&mut app, 'd');
        assert_eq!(app.form.state().schedule_len(), 1);
        assert_eq!(app.focused(), FocusTarget::RemoveSlot(0));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.state().schedule_len(), 1);
        assert_eq!(app.status.message(), "The last time slot cannot be removed");
    }

    #[test]
    fn remove_outside_schedule_is_not_bound() {
        let (mut app, _calls) = app();
        ctrl(&mut app, 'd');
        assert_eq!(app.form.state().schedule_len(), 1);
        assert_eq!(app.form.state().text("code"), "");
    }

    #[test]
    fn remove_bound_outside_schedule_reports_instead_of_removing() {
        let (mut app, _calls) = app();
        app.options = UiOptions::default()
            .with_keymap_json(
                r#"[{"id": "remove-slot", "description": "remove time slot",
                     "contexts": ["default", "schedule"],
                     "action": {"kind": "removeSlot"}, "combos": ["Ctrl+D"]}]"#,
            )
            .unwrap();
        app.add_slot();
        app.focus_on(FocusTarget::Field(FieldPath::Code));
        ctrl(&mut app, 'd');
        assert_eq!(app.form.state().schedule_len(), 2);
        assert_eq!(
            app.status.message(),
            "Focus a schedule row before Ctrl+D remove"
        );
    }

    #[test]
    fn dirty_form_needs_second_quit() {
        let (mut app, _calls) = app();
        type_text(&mut app, "X");
        ctrl(&mut app, 'q');
        assert!(!app.should_quit);
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
    }

    #[test]
    fn blur_validation_is_opt_in() {
        let (mut app, _calls) = app();
        press(&mut app, KeyCode::Tab);
        assert!(app.form.state().error("code").is_none());

        app.options = UiOptions::default().with_validate_on_blur(true);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Tab);
        assert!(app.form.state().error("name").is_some());
        assert!(app.form.state().error("code").is_some());
    }
}
