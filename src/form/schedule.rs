use tracing::debug;

use crate::domain::ScheduleSlot;

use super::{
    error::FieldError,
    path::{FieldPath, SlotField},
    state::FormState,
};

impl FormState {
    /// Append a slot to the end of the schedule and return its index.
    ///
    /// The new slot is not validated: its errors appear on submit or when
    /// one of its fields is touched.
    pub fn insert_slot(&mut self, slot: ScheduleSlot) -> usize {
        let index = self.push_slot(&slot);
        self.touch_dirty();
        debug!(index, len = self.schedule_len, "schedule slot inserted");
        index
    }

    pub fn can_remove_slot(&self) -> bool {
        self.schedule_len > 1
    }

    /// Remove the slot at `index`, shifting later slots down by one.
    ///
    /// Values, errors and touched state move with their slot; the removed
    /// slot's errors are dropped. Returns `false` without changing anything
    /// when only one slot is left or `index` is out of range.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if !self.can_remove_slot() || index >= self.schedule_len {
            debug!(index, len = self.schedule_len, "schedule slot removal refused");
            return false;
        }
        let old_len = self.schedule_len;
        for position in index..old_len {
            for field in SlotField::ALL {
                let to = FieldPath::slot(position, field).key();
                if position + 1 < old_len {
                    let from = FieldPath::slot(position + 1, field).key();
                    if let Some(value) = self.values.shift_remove(&from) {
                        self.values.insert(to.clone(), value);
                    }
                    match self.errors.shift_remove(&from) {
                        Some(error) => {
                            self.errors.insert(to.clone(), error);
                        }
                        None => {
                            self.errors.shift_remove(&to);
                        }
                    }
                    if self.validated.remove(&from) {
                        self.validated.insert(to.clone());
                    } else {
                        self.validated.remove(&to);
                    }
                } else {
                    self.values.shift_remove(&to);
                    self.errors.shift_remove(&to);
                    self.validated.remove(&to);
                }
                self.changes.insert(to);
            }
        }
        self.schedule_len -= 1;
        self.touch_dirty();
        debug!(index, len = self.schedule_len, "schedule slot removed");
        true
    }

    pub fn slot(&self, index: usize) -> Option<ScheduleSlot> {
        if index >= self.schedule_len {
            return None;
        }
        let [day, start_time, end_time] =
            FieldPath::slot_fields(index).map(|path| self.text(&path.key()).to_string());
        Some(ScheduleSlot {
            day,
            start_time,
            end_time,
        })
    }

    pub fn schedule(&self) -> Vec<ScheduleSlot> {
        (0..self.schedule_len)
            .filter_map(|index| self.slot(index))
            .collect()
    }
}

/// Render model for one schedule row.
///
/// Rows are identified by position only: removing a row shifts the
/// content of every later row up by one.
#[derive(Debug, Clone)]
pub struct ScheduleRow<'a> {
    pub index: usize,
    values: [&'a str; 3],
    errors: [Option<&'a FieldError>; 3],
    pub removable: bool,
}

impl<'a> ScheduleRow<'a> {
    pub fn value(&self, field: SlotField) -> &'a str {
        self.values[slot_position(field)]
    }

    pub fn error(&self, field: SlotField) -> Option<&'a FieldError> {
        self.errors[slot_position(field)]
    }
}

pub fn schedule_rows(state: &FormState) -> Vec<ScheduleRow<'_>> {
    let removable = state.can_remove_slot();
    (0..state.schedule_len())
        .map(|index| {
            let keys = FieldPath::slot_fields(index).map(|path| path.key());
            ScheduleRow {
                index,
                values: [
                    state.text(&keys[0]),
                    state.text(&keys[1]),
                    state.text(&keys[2]),
                ],
                errors: [
                    state.error(&keys[0]),
                    state.error(&keys[1]),
                    state.error(&keys[2]),
                ],
                removable,
            }
        })
        .collect()
}

fn slot_position(field: SlotField) -> usize {
    match field {
        SlotField::Day => 0,
        SlotField::StartTime => 1,
        SlotField::EndTime => 2,
    }
}
