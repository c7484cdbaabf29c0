//! Row selection that survives filtering and sorting
//!
//! Selection is keyed by row id, so a row keeps its checkbox state while it is
//! filtered out or moved by a sort. Shift-click ranges are computed over the
//! ids visible at the time of the click.

use std::collections::{BTreeSet, HashMap};

use depgrid_core::RowId;

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: HashMap<RowId, bool>,
    /// Anchor for shift-click ranges
    last_clicked: Option<RowId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    pub fn last_clicked(&self) -> Option<&RowId> {
        self.last_clicked.as_ref()
    }

    /// Handle a click on a row checkbox
    ///
    /// A plain click flips `id`. A shift-click sets every id between the
    /// previous click and `id` (inclusive, in `visible` order) to the flipped
    /// value of `id`; when either end is not visible it acts as a plain click.
    /// Returns false when nothing changed (placeholder rows).
    pub fn toggle(&mut self, id: &RowId, shift_held: bool, visible: &[RowId]) -> bool {
        if id.is_placeholder() {
            return false;
        }

        let new_value = !self.is_selected(id);
        let range = if shift_held {
            self.last_clicked
                .as_ref()
                .and_then(|anchor| visible.iter().position(|v| v == anchor))
                .zip(visible.iter().position(|v| v == id))
        } else {
            None
        };

        match range {
            Some((from, to)) => {
                let (start, end) = (from.min(to), from.max(to));
                tracing::trace!("Range toggle of {} rows to {}", end - start + 1, new_value);
                for visible_id in &visible[start..=end] {
                    if !visible_id.is_placeholder() {
                        self.selected.insert(visible_id.clone(), new_value);
                    }
                }
            }
            None => {
                tracing::trace!("Toggle {} to {}", id, new_value);
                self.selected.insert(id.clone(), new_value);
            }
        }

        self.last_clicked = Some(id.clone());
        true
    }

    /// Select every visible row, leaving hidden rows alone
    pub fn select_all(&mut self, visible: &[RowId]) {
        self.set_all(visible, true);
    }

    /// Deselect every visible row, leaving hidden rows alone
    pub fn deselect_all(&mut self, visible: &[RowId]) {
        self.set_all(visible, false);
    }

    fn set_all(&mut self, visible: &[RowId], value: bool) {
        for id in visible.iter().filter(|id| !id.is_placeholder()) {
            self.selected.insert(id.clone(), value);
        }
    }

    /// True iff at least one row is visible and all of them are selected
    pub fn all_selected(&self, visible: &[RowId]) -> bool {
        let mut ids = visible.iter().filter(|id| !id.is_placeholder()).peekable();
        ids.peek().is_some() && ids.all(|id| self.is_selected(id))
    }

    /// Every selected id, in id order
    pub fn selected_ids(&self) -> BTreeSet<RowId> {
        self.selected
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Forget all selection state and the shift-click anchor
    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_clicked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(names: &[&str]) -> Vec<RowId> {
        names.iter().map(|n| RowId::from(*n)).collect()
    }

    fn selected(tracker: &SelectionTracker) -> Vec<String> {
        tracker.selected_ids().iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_plain_toggle_flips() {
        let visible = ids(&["a", "b"]);
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&visible[0], false, &visible);
        assert!(tracker.is_selected(&visible[0]));
        tracker.toggle(&visible[0], false, &visible);
        assert!(!tracker.is_selected(&visible[0]));
        assert_eq!(tracker.last_clicked(), Some(&visible[0]));
    }

    #[test]
    fn test_shift_click_range() {
        let visible = ids(&["a", "b", "c", "d", "e"]);
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&visible[0], false, &visible);
        tracker.toggle(&visible[3], true, &visible);
        assert_eq!(selected(&tracker), vec!["a", "b", "c", "d"]);
        assert!(!tracker.is_selected(&visible[4]));
    }

    #[test]
    fn test_shift_click_backwards_deselects() {
        let visible = ids(&["a", "b", "c", "d", "e"]);
        let mut tracker = SelectionTracker::new();
        tracker.select_all(&visible);
        tracker.toggle(&visible[4], false, &visible);
        tracker.toggle(&visible[1], true, &visible);
        assert_eq!(selected(&tracker), vec!["a"]);
    }

    #[test]
    fn test_shift_click_without_anchor_is_plain() {
        let visible = ids(&["a", "b", "c"]);
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&visible[2], true, &visible);
        assert_eq!(selected(&tracker), vec!["c"]);
    }

    #[test]
    fn test_shift_click_with_hidden_anchor_is_plain() {
        let all = ids(&["a", "b", "c", "d"]);
        let mut tracker = SelectionTracker::new();
        tracker.toggle(&all[0], false, &all);

        let visible = ids(&["b", "c", "d"]);
        tracker.toggle(&visible[2], true, &visible);
        assert_eq!(selected(&tracker), vec!["a", "d"]);
    }

    #[test]
    fn test_select_all_only_touches_visible() {
        let mut tracker = SelectionTracker::new();
        let hidden = RowId::from("z");
        tracker.toggle(&hidden, false, &[hidden.clone()]);

        let visible = ids(&["a", "b"]);
        tracker.select_all(&visible);
        assert!(tracker.all_selected(&visible));
        tracker.deselect_all(&visible);
        assert!(!tracker.is_selected(&visible[0]));
        assert!(tracker.is_selected(&hidden));
    }

    #[test]
    fn test_all_selected_needs_a_visible_row() {
        let tracker = SelectionTracker::new();
        assert!(!tracker.all_selected(&[]));
        assert!(!tracker.all_selected(&[RowId::Placeholder]));
    }

    #[test]
    fn test_placeholder_is_never_selected() {
        let mut tracker = SelectionTracker::new();
        assert!(!tracker.toggle(&RowId::Placeholder, false, &[RowId::Placeholder]));
        tracker.select_all(&[RowId::Placeholder]);
        assert!(tracker.selected_ids().is_empty());
    }
}
