//! The document view: sort, selection and upload behind one handle.

use std::sync::Arc;

use crate::config::ViewConfig;
use crate::controller::DocumentList;
use crate::controller::FetchOutcome;
use crate::controller::QueryController;
use crate::error::ViewError;
use crate::events::EventBus;
use crate::events::ViewEvent;
use crate::model::Document;
use crate::model::DocumentId;
use crate::query::FilterSet;
use crate::query::SortState;
use crate::resource::ResourceState;
use crate::selection::Modifiers;
use crate::selection::SelectionChange;
use crate::selection::SelectionEngine;
use crate::services::DocumentSource;
use crate::services::NotificationSink;
use crate::services::Translator;
use crate::services::UploadDelegate;
use crate::state::State;
use crate::upload::DragEvent;
use crate::upload::DragState;
use crate::upload::DropOutcome;
use crate::upload::UploadOrchestrator;

/// Collaborators a [`DocumentView`] talks to.
#[derive(Clone)]
pub struct Services {
    /// Where document lists come from.
    pub source: Arc<dyn DocumentSource>,
    /// Where dropped files go.
    pub uploader: Arc<dyn UploadDelegate>,
    /// Where notifications are shown.
    pub notifier: Arc<dyn NotificationSink>,
    /// How message keys become text.
    pub translator: Arc<dyn Translator>,
}

/// Interaction state of a sortable, selectable document list with
/// drag-and-drop upload.
///
/// Host inputs (filters, the open document id) are set from outside and
/// only read here. Every state change is published on the event bus; see
/// [`subscribe`](Self::subscribe).
///
/// After each applied fetch the selection is reconciled against the new
/// list, so it never refers to documents that are no longer displayed.
pub struct DocumentView {
    config: ViewConfig,
    controller: QueryController,
    selection: State<SelectionEngine>,
    upload: UploadOrchestrator,
    notifier: Arc<dyn NotificationSink>,
    translator: Arc<dyn Translator>,
    list_view: State<bool>,
    selected_document_id: State<Option<DocumentId>>,
    events: EventBus,
}

impl DocumentView {
    /// Create a view. Nothing is fetched until [`refresh`](Self::refresh).
    pub fn new(config: ViewConfig, services: Services) -> Self {
        let controller = QueryController::new(services.source, config.include.clone());
        let upload = UploadOrchestrator::new(
            services.uploader,
            Arc::clone(&services.notifier),
            Arc::clone(&services.translator),
            config.messages.clone(),
        );
        Self {
            controller,
            selection: State::default(),
            upload,
            notifier: services.notifier,
            translator: services.translator,
            list_view: State::new(config.list_view),
            selected_document_id: State::default(),
            events: EventBus::new(config.event_capacity),
            config,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    /// The configuration this view was built with.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Host inputs
    // -------------------------------------------------------------------------

    /// Current host filters.
    pub fn filters(&self) -> Option<FilterSet> {
        self.controller.filters()
    }

    /// Replace the host filters. Call [`refresh`](Self::refresh) to apply
    /// them to the list.
    pub fn set_filters(&self, filters: Option<FilterSet>) {
        self.controller.set_filters(filters);
    }

    /// Set which document the host has open in detail.
    pub fn set_selected_document_id(&self, id: Option<DocumentId>) {
        self.selected_document_id.set(id.clone());
        self.events.publish(ViewEvent::SelectedDocumentChanged(id));
    }

    /// The open document, looked up in the displayed list.
    ///
    /// `None` until a fetch has been applied or when the id is not in the
    /// list.
    pub fn selected_document(&self) -> Option<Document> {
        let id = self.selected_document_id.get()?;
        self.documents().iter().find(|d| d.id == id).cloned()
    }

    /// Whether the current filters allow dropping files.
    pub fn can_drop(&self) -> bool {
        self.controller
            .filters()
            .as_ref()
            .and_then(FilterSet::category)
            .is_some()
    }

    // -------------------------------------------------------------------------
    // Presentation
    // -------------------------------------------------------------------------

    /// Whether the list (rather than grid) presentation is active.
    pub fn is_list_view(&self) -> bool {
        self.list_view.get()
    }

    /// Switch between list and grid presentation.
    pub fn toggle_view(&self) -> bool {
        let list_view = self.list_view.update(|v| {
            *v = !*v;
            *v
        });
        self.events.publish(ViewEvent::ViewModeChanged { list_view });
        list_view
    }

    // -------------------------------------------------------------------------
    // Sorting and fetching
    // -------------------------------------------------------------------------

    /// Current sort state.
    pub fn sort(&self) -> SortState {
        self.controller.sort()
    }

    /// The displayed documents.
    pub fn documents(&self) -> DocumentList {
        self.controller.documents()
    }

    /// State of the latest applied fetch.
    pub fn fetch_state(&self) -> ResourceState<DocumentList> {
        self.controller.state()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.controller.is_pending()
    }

    /// Click on a sortable column, then refresh the list.
    pub async fn set_sort(&self, field: &str) -> SortState {
        let sort = self.controller.toggle_sort(field);
        self.events.publish(ViewEvent::SortChanged(sort.clone()));
        self.refresh().await;
        sort
    }

    /// Fetch the list and reconcile the selection against it.
    ///
    /// Errors are returned, not notified. Most callers want
    /// [`refresh`](Self::refresh).
    pub async fn fetch(&self) -> Result<FetchOutcome, ViewError> {
        self.events.publish(ViewEvent::FetchStarted);
        let outcome = match self.controller.fetch().await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.events.publish(ViewEvent::FetchFailed);
                return Err(err.into());
            }
        };
        if let Some(list) = outcome.applied() {
            self.events.publish(ViewEvent::DocumentsReplaced { count: list.len() });
            self.reconcile(list);
        }
        Ok(outcome)
    }

    /// Fetch the list; a failure becomes a danger notification.
    pub async fn refresh(&self) {
        if let Err(err) = self.fetch().await {
            log::warn!("Refresh failed: {}", err);
            self.notifier
                .danger(self.translator.translate(&self.config.messages.fetch_failed, 0));
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Handle a click on a document row.
    ///
    /// Only displayed documents can be clicked: a document that is not in
    /// the current list leaves the selection unchanged.
    pub fn handle_click(&self, doc: &Document, modifiers: Modifiers) -> SelectionChange {
        self.handle_click_id(&doc.id, modifiers).unwrap_or_default()
    }

    /// Handle a click on the displayed document with this id.
    ///
    /// Returns `None` if no such document is displayed.
    pub fn handle_click_id(&self, id: &DocumentId, modifiers: Modifiers) -> Option<SelectionChange> {
        let list = self.documents();
        let Some(doc) = list.iter().find(|d| &d.id == id) else {
            log::debug!("Click on {} ignored: not displayed", id);
            return None;
        };
        let change = self
            .selection
            .update(|selection| selection.handle_click(doc, modifiers, &list));
        self.publish_selection(&change);
        Some(change)
    }

    /// Whether a document is selected.
    pub fn is_selected(&self, id: &DocumentId) -> bool {
        self.selection.with(|selection| selection.is_selected(id))
    }

    /// Selected documents in selection order.
    pub fn selected_documents(&self) -> Vec<Document> {
        self.selection.with(|selection| selection.selected().to_vec())
    }

    /// Add a document to the selection.
    pub fn select_document(&self, doc: &Document) {
        self.mutate_selection(|selection| {
            selection.select(doc);
        });
    }

    /// Remove a document from the selection.
    pub fn deselect_document(&self, id: &DocumentId) {
        self.mutate_selection(|selection| {
            selection.deselect(id);
        });
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        self.mutate_selection(|selection| {
            selection.clear();
        });
    }

    /// Prune selected documents that are not in `list`.
    ///
    /// Called after every applied fetch; exposed for hosts that replace the
    /// list by other means.
    pub fn reconcile(&self, list: &[Document]) -> Vec<DocumentId> {
        let removed = self.selection.update(|selection| selection.reconcile(list));
        if !removed.is_empty() {
            log::debug!("Reconcile pruned {} selected document(s)", removed.len());
            let change = SelectionChange {
                selected: self.selection.with(SelectionEngine::selected_ids),
                added: Vec::new(),
                removed: removed.clone(),
            };
            self.publish_selection(&change);
        }
        removed
    }

    fn mutate_selection(&self, f: impl FnOnce(&mut SelectionEngine)) {
        let before = self.selection.with(SelectionEngine::selected_ids);
        let after = self.selection.update(|selection| {
            f(selection);
            selection.selected_ids()
        });

        let change = SelectionChange {
            added: after.iter().filter(|id| !before.contains(id)).cloned().collect(),
            removed: before.iter().filter(|id| !after.contains(id)).cloned().collect(),
            selected: after,
        };
        self.publish_selection(&change);
    }

    fn publish_selection(&self, change: &SelectionChange) {
        if !change.is_empty() {
            self.events.publish(ViewEvent::SelectionChanged(change.clone()));
        }
    }

    // -------------------------------------------------------------------------
    // Drag and drop
    // -------------------------------------------------------------------------

    /// Current drop-zone hover state.
    pub fn drag_state(&self) -> DragState {
        self.upload.drag_state()
    }

    /// A drag entered the drop zone or one of its children.
    pub fn on_drag_enter(&self) -> DragState {
        let state = self.upload.on_drag_enter();
        self.events.publish(ViewEvent::DragChanged(state));
        state
    }

    /// A drag left the drop zone or one of its children.
    pub fn on_drag_leave(&self) -> DragState {
        let state = self.upload.on_drag_leave();
        self.events.publish(ViewEvent::DragChanged(state));
        state
    }

    /// A drag moved over the drop zone.
    pub fn on_drag_over(&self, event: &mut DragEvent) {
        self.upload.on_drag_over(event);
    }

    /// Files were dropped on the view.
    ///
    /// Uploads into the category from the current filters and refreshes the
    /// list on success. Never fails; see [`DropOutcome`].
    pub async fn on_drop(&self, event: &mut DragEvent) -> DropOutcome {
        let filters = self.controller.filters();
        let outcome = self
            .upload
            .on_drop(event, filters.as_ref(), || self.refresh())
            .await;
        if !outcome.is_rejected() {
            self.events.publish(ViewEvent::DragChanged(self.upload.drag_state()));
        }
        outcome
    }
}
