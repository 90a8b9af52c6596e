use std::{cell::RefCell, rc::Rc};

use anyhow::Result;

use crate::{
    domain::Course,
    form::{CourseForm, CourseFormProps},
};

use super::{options::UiOptions, runtime::App};

/// Interactive terminal session around a [`CourseForm`].
pub struct CourseFormUi {
    initial_values: Option<Course>,
    is_loading: bool,
    options: UiOptions,
    on_submit: Option<Box<dyn FnMut(&Course)>>,
}

impl CourseFormUi {
    pub fn new() -> Self {
        Self {
            initial_values: None,
            is_loading: false,
            options: UiOptions::default(),
            on_submit: None,
        }
    }

    /// Edit an existing course instead of creating one.
    pub fn with_initial_values(mut self, course: Course) -> Self {
        self.initial_values = Some(course);
        self
    }

    pub fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Observe every successful submission while the session runs.
    pub fn on_submit(mut self, handler: impl FnMut(&Course) + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    /// Run until the user quits. Returns the last submitted payload, if any.
    pub fn run(self) -> Result<Option<Course>> {
        let CourseFormUi {
            initial_values,
            is_loading,
            options,
            mut on_submit,
        } = self;

        let last = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last);
        let mut props = CourseFormProps::new(move |course: Course| {
            if let Some(handler) = on_submit.as_mut() {
                handler(&course);
            }
            *sink.borrow_mut() = Some(course);
        })
        .with_loading(is_loading);
        if let Some(course) = initial_values {
            props = props.with_initial_values(course);
        }

        let mut app = App::new(CourseForm::new(props), options);
        app.run()?;
        drop(app);
        let submitted = last.borrow_mut().take();
        Ok(submitted)
    }
}

impl Default for CourseFormUi {
    fn default() -> Self {
        Self::new()
    }
}
