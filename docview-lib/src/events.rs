//! Change notifications for view observers.
//!
//! The view publishes one [`ViewEvent`] per state change. Hosts subscribe to
//! recompute whatever they derive from the view (rendered rows, toolbar
//! state, drop-zone highlight).

use tokio::sync::broadcast;

use crate::model::DocumentId;
use crate::query::SortState;
use crate::selection::SelectionChange;
use crate::upload::DragState;

/// A change in the view's state.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The sort field or direction changed.
    SortChanged(SortState),
    /// A fetch was issued.
    FetchStarted,
    /// A fetch result replaced the document list.
    DocumentsReplaced {
        /// Number of documents in the new list.
        count: usize,
    },
    /// A fetch failed and the failure was applied.
    FetchFailed,
    /// The selection changed.
    SelectionChanged(SelectionChange),
    /// Drag counter or hover flag changed.
    DragChanged(DragState),
    /// The host switched between list and grid presentation.
    ViewModeChanged {
        /// `true` for the list presentation.
        list_view: bool,
    },
    /// The host changed which document is open in detail.
    SelectedDocumentChanged(Option<DocumentId>),
}

/// Broadcast channel for [`ViewEvent`]s.
///
/// Publishing never blocks and never fails; with no subscribers events are
/// dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ViewEvent>,
}

impl EventBus {
    /// Create a bus that buffers up to `capacity` events per slow subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: ViewEvent) {
        log::trace!("ViewEvent: {:?}", event);
        let _ = self.tx.send(event);
    }
}
