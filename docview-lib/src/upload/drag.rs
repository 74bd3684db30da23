/// Hover state of the drop zone.
///
/// Nested elements inside the drop zone fire their own enter/leave pairs,
/// so hover is tracked with a counter rather than a flag. The counter never
/// goes below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    counter: u32,
    is_over: bool,
}

impl DragState {
    /// Number of unmatched enter events.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Whether a drag is hovering over the drop zone.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// A drag entered the zone or one of its children.
    pub fn enter(&mut self) {
        self.counter = self.counter.saturating_add(1);
        self.is_over = true;
    }

    /// A drag left the zone or one of its children.
    pub fn leave(&mut self) {
        self.counter = self.counter.saturating_sub(1);
        self.is_over = self.counter > 0;
    }

    /// Clear the hover flag after a drop. The counter is left as is.
    pub fn clear_hover(&mut self) {
        self.is_over = false;
    }
}
