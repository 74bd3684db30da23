//! Multi-selection over the displayed document list.
//!
//! Selection is ordered: the first selected document is the anchor for
//! shift-range selection. Membership is decided by [`DocumentId`], so a
//! refetched copy of a document counts as the same document.

use std::collections::HashSet;

use crate::model::Document;
use crate::model::DocumentId;

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control (or Command) key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
    };

    /// Control only
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };

    /// Shift only
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
    };

    /// Check if any modifier is active
    pub fn any(&self) -> bool {
        self.ctrl || self.shift
    }
}

/// Result of a selection operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    /// Selected ids after the operation, in selection order.
    pub selected: Vec<DocumentId>,
    /// Ids that became selected.
    pub added: Vec<DocumentId>,
    /// Ids that stopped being selected.
    pub removed: Vec<DocumentId>,
}

impl SelectionChange {
    /// Check if the operation changed nothing
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Ordered, duplicate-free selection of documents.
///
/// # Example
///
/// ```
/// use docview_lib::model::Document;
/// use docview_lib::{Modifiers, SelectionEngine};
///
/// let list: Vec<Document> = ["a", "b", "c"].into_iter().map(Document::new).collect();
/// let mut selection = SelectionEngine::new();
///
/// selection.handle_click(&list[0], Modifiers::NONE, &list);
/// selection.handle_click(&list[2], Modifiers::CTRL, &list);
///
/// assert_eq!(selection.len(), 2);
/// assert_eq!(selection.anchor().map(|d| d.id.as_str()), Some("a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selected: Vec<Document>,
}

impl SelectionEngine {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected documents in selection order.
    pub fn selected(&self) -> &[Document] {
        &self.selected
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> Vec<DocumentId> {
        self.selected.iter().map(|d| d.id.clone()).collect()
    }

    /// Number of selected documents.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The anchor for range selection: the first selected document.
    pub fn anchor(&self) -> Option<&Document> {
        self.selected.first()
    }

    /// Check if a document with this id is selected.
    pub fn is_selected(&self, id: &DocumentId) -> bool {
        self.selected.iter().any(|d| &d.id == id)
    }

    /// Append a document unless it is already selected.
    /// Returns `true` if it was added.
    pub fn select(&mut self, doc: &Document) -> bool {
        if self.is_selected(&doc.id) {
            return false;
        }
        self.selected.push(doc.clone());
        true
    }

    /// Remove a document by id.
    /// Returns `true` if it was selected.
    pub fn deselect(&mut self, id: &DocumentId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|d| &d.id != id);
        self.selected.len() != before
    }

    /// Clear all selection.
    /// Returns the ids that were deselected.
    pub fn clear(&mut self) -> Vec<DocumentId> {
        self.selected.drain(..).map(|d| d.id).collect()
    }

    /// Apply a click on `doc` with the given modifiers.
    ///
    /// - no modifier: `doc` becomes the only selected document
    /// - ctrl (wins over shift): toggle `doc`
    /// - shift: select `list[lo..hi]` between the anchor and `doc`. The
    ///   upper bound is exclusive, so the later of the two is not selected.
    ///
    /// If a shift click leaves nothing selected, `doc` is selected alone.
    pub fn handle_click(
        &mut self,
        doc: &Document,
        modifiers: Modifiers,
        list: &[Document],
    ) -> SelectionChange {
        let before = self.selected_ids();

        if !modifiers.any() {
            self.selected.clear();
            self.selected.push(doc.clone());
        } else if modifiers.ctrl {
            if !self.deselect(&doc.id) {
                self.selected.push(doc.clone());
            }
        } else {
            self.selected = self.range(doc, list);
            if self.selected.is_empty() {
                self.selected.push(doc.clone());
            }
        }

        self.diff(before)
    }

    /// Drop selected documents that are not in `list` and refresh the kept
    /// ones with their copies from `list`.
    /// Returns the ids that were pruned.
    pub fn reconcile(&mut self, list: &[Document]) -> Vec<DocumentId> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.selected.len());
        for doc in self.selected.drain(..) {
            match list.iter().find(|d| d.id == doc.id) {
                Some(fresh) => kept.push(fresh.clone()),
                None => removed.push(doc.id),
            }
        }
        self.selected = kept;
        removed
    }

    /// Documents between the anchor and `target`, upper bound exclusive.
    /// Empty when either is not in `list`.
    fn range(&self, target: &Document, list: &[Document]) -> Vec<Document> {
        let target_pos = list.iter().position(|d| d.id == target.id);
        let anchor_pos = self
            .anchor()
            .and_then(|anchor| list.iter().position(|d| d.id == anchor.id));

        match (anchor_pos, target_pos) {
            (Some(a), Some(t)) => {
                let (lo, hi) = if a <= t { (a, t) } else { (t, a) };
                list[lo..hi].to_vec()
            }
            _ => Vec::new(),
        }
    }

    fn diff(&self, before: Vec<DocumentId>) -> SelectionChange {
        let selected = self.selected_ids();
        let old: HashSet<&DocumentId> = before.iter().collect();
        let new: HashSet<&DocumentId> = selected.iter().collect();

        let added = selected.iter().filter(|id| !old.contains(id)).cloned().collect();
        let removed = before.iter().filter(|id| !new.contains(id)).cloned().collect();

        SelectionChange {
            selected,
            added,
            removed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(ids: &[&str]) -> Vec<Document> {
        ids.iter().map(|id| Document::new(*id)).collect()
    }

    fn ids(selection: &SelectionEngine) -> Vec<&str> {
        selection.selected().iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_plain_click_replaces_selection() {
        let list = docs(&["a", "b", "c"]);
        let mut sel = SelectionEngine::new();
        for doc in &list {
            sel.handle_click(doc, Modifiers::NONE, &list);
            assert_eq!(ids(&sel), vec![doc.id.as_str()]);
        }
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let list = docs(&["a", "b", "c"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[0], Modifiers::NONE, &list);

        let change = sel.handle_click(&list[2], Modifiers::CTRL, &list);
        assert_eq!(ids(&sel), vec!["a", "c"]);
        assert_eq!(change.added, vec![DocumentId::new("c")]);

        let change = sel.handle_click(&list[0], Modifiers::CTRL, &list);
        assert_eq!(ids(&sel), vec!["c"]);
        assert_eq!(change.removed, vec![DocumentId::new("a")]);
    }

    #[test]
    fn test_ctrl_click_can_empty_selection() {
        let list = docs(&["a"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[0], Modifiers::NONE, &list);
        sel.handle_click(&list[0], Modifiers::CTRL, &list);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_ctrl_wins_over_shift() {
        let list = docs(&["a", "b", "c", "d"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[0], Modifiers::NONE, &list);

        let both = Modifiers {
            ctrl: true,
            shift: true,
        };
        sel.handle_click(&list[3], both, &list);
        assert_eq!(ids(&sel), vec!["a", "d"]);
    }

    #[test]
    fn test_shift_range_excludes_upper_bound() {
        let list = docs(&["a", "b", "c", "d", "e"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[0], Modifiers::NONE, &list);
        sel.handle_click(&list[3], Modifiers::SHIFT, &list);
        assert_eq!(ids(&sel), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_shift_range_upwards_excludes_anchor() {
        let list = docs(&["a", "b", "c", "d", "e"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[4], Modifiers::NONE, &list);
        sel.handle_click(&list[1], Modifiers::SHIFT, &list);
        assert_eq!(ids(&sel), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_shift_without_anchor_selects_target() {
        let list = docs(&["a", "b", "c"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[2], Modifiers::SHIFT, &list);
        assert_eq!(ids(&sel), vec!["c"]);
    }

    #[test]
    fn test_shift_on_anchor_falls_back_to_target() {
        let list = docs(&["a", "b", "c"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[1], Modifiers::NONE, &list);
        sel.handle_click(&list[1], Modifiers::SHIFT, &list);
        assert_eq!(ids(&sel), vec!["b"]);
    }

    #[test]
    fn test_membership_is_by_id() {
        let list = docs(&["a", "b"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[0], Modifiers::NONE, &list);

        let copy = Document::new("a").with_title("renamed");
        assert!(sel.is_selected(&copy.id));
        assert!(!sel.select(&copy));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_reconcile_prunes_missing_documents() {
        let list = docs(&["a", "b", "c"]);
        let mut sel = SelectionEngine::new();
        sel.handle_click(&list[0], Modifiers::NONE, &list);
        sel.handle_click(&list[1], Modifiers::CTRL, &list);

        let fresh = vec![Document::new("b").with_title("new"), Document::new("c")];
        let removed = sel.reconcile(&fresh);

        assert_eq!(removed, vec![DocumentId::new("a")]);
        assert_eq!(ids(&sel), vec!["b"]);
        assert_eq!(sel.selected()[0].title.as_deref(), Some("new"));
    }

    #[test]
    fn test_clear_returns_removed() {
        let list = docs(&["a", "b"]);
        let mut sel = SelectionEngine::new();
        sel.select(&list[0]);
        sel.select(&list[1]);
        assert_eq!(sel.clear().len(), 2);
        assert!(sel.anchor().is_none());
    }
}
