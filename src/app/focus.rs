use crate::form::FieldPath;

/// Something the keyboard focus can rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusTarget {
    Field(FieldPath),
    RemoveSlot(usize),
    AddSlot,
    Submit,
}

impl FocusTarget {
    pub(crate) fn slot_index(&self) -> Option<usize> {
        match self {
            FocusTarget::Field(path) => path.slot_index(),
            FocusTarget::RemoveSlot(index) => Some(*index),
            FocusTarget::AddSlot | FocusTarget::Submit => None,
        }
    }
}

/// Focus order: course fields, then each schedule row (day, start, end,
/// remove), then the add-slot control and finally submit.
pub(crate) fn focus_ring(schedule_len: usize) -> Vec<FocusTarget> {
    let mut ring: Vec<FocusTarget> = FieldPath::COURSE_FIELDS
        .into_iter()
        .map(FocusTarget::Field)
        .collect();
    for index in 0..schedule_len {
        ring.extend(FieldPath::slot_fields(index).map(FocusTarget::Field));
        ring.push(FocusTarget::RemoveSlot(index));
    }
    ring.push(FocusTarget::AddSlot);
    ring.push(FocusTarget::Submit);
    ring
}
