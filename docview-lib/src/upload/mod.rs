//! Drag-and-drop upload.
//!
//! Tracks drop-zone hover state, decides whether a drop is allowed, hands
//! the files to the [`UploadDelegate`] and reports the outcome. Upload
//! errors end here: they become a danger notification and are never
//! returned to the caller as `Err`.

mod drag;
mod event;

pub use drag::DragState;
pub use event::DragEvent;
pub use event::UploadFile;

use std::future::Future;
use std::sync::Arc;

use crate::config::MessageKeys;
use crate::error::UploadError;
use crate::query::FilterSet;
use crate::services::NotificationSink;
use crate::services::Translator;
use crate::services::UploadDelegate;
use crate::state::State;

/// What a drop did.
#[derive(Debug, Clone)]
pub enum DropOutcome {
    /// No category filter; the event was left to the host.
    Rejected,
    /// Files were uploaded and the list refreshed.
    Uploaded {
        /// Number of files uploaded.
        count: usize,
    },
    /// The delegate failed; nothing was refreshed.
    Failed {
        /// Number of files attempted.
        count: usize,
        /// The absorbed delegate error.
        error: UploadError,
    },
}

impl DropOutcome {
    /// Check if the drop was refused before any upload.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Drop-zone state machine and upload flow.
pub struct UploadOrchestrator {
    delegate: Arc<dyn UploadDelegate>,
    notifier: Arc<dyn NotificationSink>,
    translator: Arc<dyn Translator>,
    messages: MessageKeys,
    drag: State<DragState>,
}

impl UploadOrchestrator {
    /// Create an orchestrator.
    pub fn new(
        delegate: Arc<dyn UploadDelegate>,
        notifier: Arc<dyn NotificationSink>,
        translator: Arc<dyn Translator>,
        messages: MessageKeys,
    ) -> Self {
        Self {
            delegate,
            notifier,
            translator,
            messages,
            drag: State::default(),
        }
    }

    /// Current hover state.
    pub fn drag_state(&self) -> DragState {
        self.drag.get()
    }

    /// Whether these filters make the view a valid drop target.
    pub fn can_drop(filters: Option<&FilterSet>) -> bool {
        filters.and_then(FilterSet::category).is_some()
    }

    /// A drag entered the drop zone or a child of it.
    pub fn on_drag_enter(&self) -> DragState {
        self.mutate_drag(DragState::enter)
    }

    /// A drag left the drop zone or a child of it.
    pub fn on_drag_leave(&self) -> DragState {
        self.mutate_drag(DragState::leave)
    }

    /// A drag moved over the zone. Claims the event so the host does not
    /// open the dragged file itself.
    pub fn on_drag_over(&self, event: &mut DragEvent) {
        event.prevent_default();
        event.stop_propagation();
    }

    /// Files were dropped.
    ///
    /// Without a category filter the drop is ignored and `event` is left
    /// untouched. Otherwise the files are uploaded into the category; on
    /// success a success notification is shown and `refresh` is awaited, on
    /// failure a danger notification is shown. Either way the hover flag is
    /// cleared.
    pub async fn on_drop<F, Fut>(
        &self,
        event: &mut DragEvent,
        filters: Option<&FilterSet>,
        refresh: F,
    ) -> DropOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let Some(category) = filters.and_then(FilterSet::category) else {
            log::debug!("Drop ignored: no category filter");
            return DropOutcome::Rejected;
        };

        event.prevent_default();
        event.stop_propagation();

        let files = std::mem::take(&mut event.files);
        let count = files.len();
        log::debug!("Uploading {} file(s) to category {}", count, category);

        let outcome = match self.delegate.upload(&category, &files).await {
            Ok(()) => {
                log::info!("Uploaded {} file(s) to category {}", count, category);
                self.notifier
                    .success(self.translator.translate(&self.messages.upload_success, count));
                refresh().await;
                DropOutcome::Uploaded { count }
            }
            Err(error) => {
                log::warn!("Upload of {} file(s) to category {} failed: {}", count, category, error);
                self.notifier
                    .danger(self.translator.translate(&self.messages.upload_failed, count));
                DropOutcome::Failed { count, error }
            }
        };

        self.mutate_drag(DragState::clear_hover);
        outcome
    }

    fn mutate_drag(&self, f: impl FnOnce(&mut DragState)) -> DragState {
        self.drag.update(|drag| {
            f(drag);
            *drag
        })
    }
}
