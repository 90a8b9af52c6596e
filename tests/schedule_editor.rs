use courseform::{
    FormState, ScheduleSlot,
    form::{FieldPath, SlotField, schedule_rows},
};

fn three_slots() -> FormState {
    let mut course = courseform::form::create_mode_defaults();
    course.schedule = vec![
        ScheduleSlot::new("Monday", "09:00:00", "10:00:00"),
        ScheduleSlot::new("Wednesday", "", "12:00:00"),
        ScheduleSlot::new("Friday", "14:00:00", "15:00:00"),
    ];
    FormState::from_course(&course)
}

#[test]
fn single_slot_is_not_removable() {
    let mut state = FormState::create_mode();
    assert!(!state.can_remove_slot());
    assert!(!state.remove_slot(0));
    assert_eq!(state.schedule_len(), 1);
    assert!(schedule_rows(&state).iter().all(|row| !row.removable));
}

#[test]
fn inserted_slot_is_blank_and_error_free_even_after_submit() {
    let mut state = FormState::create_mode();
    state.validate();
    let index = state.insert_slot(ScheduleSlot::default());
    assert_eq!(index, 1);
    assert_eq!(state.slot(1), Some(ScheduleSlot::default()));
    assert!(state.error("schedule.1.day").is_none());
    assert!(state.error("schedule.0.day").is_some());
}

#[test]
fn removing_a_middle_row_moves_its_errors_with_later_rows() {
    let mut state = three_slots();
    state.validate();
    assert!(state.error("schedule.1.start_time").is_some());

    assert!(state.remove_slot(0));
    assert_eq!(state.schedule_len(), 2);
    assert_eq!(state.slot(0).map(|slot| slot.day), Some("Wednesday".into()));
    assert_eq!(
        state.error("schedule.0.start_time").map(|err| err.message()),
        Some("Start time is required")
    );
    assert!(state.error("schedule.1.start_time").is_none());
    assert!(state.error("schedule.2.start_time").is_none());
}

#[test]
fn out_of_range_paths_are_rejected() {
    let mut state = three_slots();
    assert!(state.set_value("schedule.3.day", "Monday").is_err());
    assert!(state.set_value("schedule.0.day", "Someday").is_err());
    assert!(!state.remove_slot(7));
    assert_eq!(state.schedule_len(), 3);
}

#[test]
fn rows_expose_values_by_field() {
    let state = three_slots();
    let rows = schedule_rows(&state);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.removable));
    assert_eq!(rows[2].value(SlotField::Day), "Friday");
    assert_eq!(
        FieldPath::slot(2, SlotField::EndTime).to_string(),
        "schedule.2.end_time"
    );
}
