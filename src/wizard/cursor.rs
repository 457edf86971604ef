//! Step cursor: the currently active step index

/// Who owns the cursor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// The wizard owns the index and applies changes itself, recording each
    /// change so the host can observe it via [`StepCursor::take_change`].
    #[default]
    Owned,
    /// The host owns the index. `next`/`previous` only compute the requested
    /// target; the host applies it with [`StepCursor::set`].
    Hosted,
}

/// Bounded cursor over the registered steps.
///
/// Out-of-range movement is a silent no-op, never an error.
#[derive(Debug)]
pub struct StepCursor {
    index: usize,
    mode: CursorMode,
    changed: Option<usize>,
}

impl StepCursor {
    pub fn new(mode: CursorMode) -> Self {
        Self {
            index: 0,
            mode,
            changed: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn is_last(&self, step_count: usize) -> bool {
        step_count > 0 && self.index == step_count - 1
    }

    /// Move forward one step. Returns the target index, or None at the
    /// boundary. In hosted mode the move is requested, not applied.
    pub fn next(&mut self, step_count: usize) -> Option<usize> {
        if step_count == 0 || self.index >= step_count - 1 {
            return None;
        }
        let target = self.index + 1;
        if self.mode == CursorMode::Owned {
            self.apply(target);
        }
        Some(target)
    }

    /// Move back one step. Returns the target index, or None at index 0.
    pub fn previous(&mut self) -> Option<usize> {
        if self.index == 0 {
            return None;
        }
        let target = self.index - 1;
        if self.mode == CursorMode::Owned {
            self.apply(target);
        }
        Some(target)
    }

    /// External application of a cursor value, clamped into bounds.
    pub fn set(&mut self, index: usize, step_count: usize) {
        self.index = index.min(step_count.saturating_sub(1));
    }

    /// Clamp the index after the step list shrank.
    pub fn clamp(&mut self, step_count: usize) {
        if self.index >= step_count {
            self.index = step_count.saturating_sub(1);
        }
    }

    /// Back to the first step.
    pub fn reset(&mut self) {
        if self.index != 0 && self.mode == CursorMode::Owned {
            self.apply(0);
        } else {
            self.index = 0;
        }
    }

    /// Drain the last owned-mode change, for the host's change notification.
    pub fn take_change(&mut self) -> Option<usize> {
        self.changed.take()
    }

    fn apply(&mut self, index: usize) {
        self.index = index;
        self.changed = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_movement_stays_in_bounds() {
        let mut cursor = StepCursor::new(CursorMode::Owned);
        assert_eq!(cursor.previous(), None);
        assert_eq!(cursor.next(3), Some(1));
        assert_eq!(cursor.next(3), Some(2));
        // Boundary: repeated next at the last step never moves.
        assert_eq!(cursor.next(3), None);
        assert_eq!(cursor.next(3), None);
        assert_eq!(cursor.index(), 2);
        assert!(cursor.is_last(3));
    }

    #[test]
    fn test_hosted_mode_requests_without_applying() {
        let mut cursor = StepCursor::new(CursorMode::Hosted);
        assert_eq!(cursor.next(3), Some(1));
        assert_eq!(cursor.index(), 0);

        cursor.set(1, 3);
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.take_change(), None);
    }

    #[test]
    fn test_set_clamps_out_of_range() {
        let mut cursor = StepCursor::new(CursorMode::Hosted);
        cursor.set(10, 3);
        assert_eq!(cursor.index(), 2);
        cursor.set(1, 0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_owned_changes_are_observable() {
        let mut cursor = StepCursor::new(CursorMode::Owned);
        assert_eq!(cursor.take_change(), None);
        cursor.next(2);
        assert_eq!(cursor.take_change(), Some(1));
        assert_eq!(cursor.take_change(), None);
        cursor.reset();
        assert_eq!(cursor.take_change(), Some(0));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut cursor = StepCursor::new(CursorMode::Owned);
        cursor.next(3);
        cursor.next(3);
        cursor.clamp(2);
        assert_eq!(cursor.index(), 1);
        cursor.clamp(0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_empty_wizard_has_no_moves() {
        let mut cursor = StepCursor::new(CursorMode::Owned);
        assert_eq!(cursor.next(0), None);
        assert_eq!(cursor.previous(), None);
        assert!(!cursor.is_last(0));
    }
}
