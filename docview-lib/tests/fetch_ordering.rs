//! Out-of-order fetch completion.
//!
//! The source hands every query a gate; the test decides when and in which
//! order the gates open, so a slow older fetch can resolve after a newer one.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use futures::poll;
use tokio::sync::oneshot;

use docview_lib::error::{SourceError, UploadError};
use docview_lib::model::{CategoryRef, Document, DocumentId};
use docview_lib::notification::{KeyTranslator, Notifications};
use docview_lib::query::QueryDescriptor;
use docview_lib::services::{DocumentSource, UploadDelegate};
use docview_lib::upload::UploadFile;
use docview_lib::events::ViewEvent;
use docview_lib::{DocumentView, FetchOutcome, Modifiers, Services, ViewConfig};

type Gate = oneshot::Receiver<Result<Vec<Document>, SourceError>>;

#[derive(Default)]
struct GatedSource {
    gates: Mutex<VecDeque<Gate>>,
}

impl GatedSource {
    /// Queue a gate for the next query and return its opener.
    fn gate(&self) -> oneshot::Sender<Result<Vec<Document>, SourceError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl DocumentSource for GatedSource {
    async fn query(&self, _query: &QueryDescriptor) -> Result<Vec<Document>, SourceError> {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(SourceError::Transport("gate dropped".to_string()))),
            None => Err(SourceError::Transport("no gate queued".to_string())),
        }
    }
}

struct NoUpload;

#[async_trait]
impl UploadDelegate for NoUpload {
    async fn upload(&self, category: &CategoryRef, _files: &[UploadFile]) -> Result<(), UploadError> {
        Err(UploadError::UnknownCategory(category.to_string()))
    }
}

fn view(source: Arc<GatedSource>) -> (Arc<Notifications>, DocumentView) {
    let notifications = Arc::new(Notifications::new());
    let services = Services {
        source,
        uploader: Arc::new(NoUpload),
        notifier: notifications.clone(),
        translator: Arc::new(KeyTranslator),
    };
    (notifications, DocumentView::new(ViewConfig::default(), services))
}

fn docs(ids: &[&str]) -> Vec<Document> {
    ids.iter().map(|id| Document::new(*id)).collect()
}

fn listed(view: &DocumentView) -> Vec<String> {
    view.documents().iter().map(|d| d.id.to_string()).collect()
}

#[tokio::test]
async fn test_newer_fetch_wins_when_older_resolves_late() {
    let source = Arc::new(GatedSource::default());
    let (notifications, view) = view(source.clone());

    let first_gate = source.gate();
    let second_gate = source.gate();

    let mut first = Box::pin(view.set_sort("date"));
    let mut second = Box::pin(view.set_sort("date"));
    assert!(poll!(&mut first).is_pending());
    assert!(poll!(&mut second).is_pending());
    assert!(view.is_loading());

    second_gate.send(Ok(docs(&["new-1", "new-2"]))).unwrap();
    second.await;
    assert_eq!(listed(&view), vec!["new-1", "new-2"]);

    first_gate.send(Ok(docs(&["old-1"]))).unwrap();
    first.await;
    assert_eq!(listed(&view), vec!["new-1", "new-2"]);
    assert!(!view.is_loading());
    assert!(notifications.pending().is_empty());
}

#[tokio::test]
async fn test_in_order_completion_applies_latest() {
    let source = Arc::new(GatedSource::default());
    let (_, view) = view(source.clone());

    let first_gate = source.gate();
    let second_gate = source.gate();

    let mut first = Box::pin(view.refresh());
    let mut second = Box::pin(view.refresh());
    assert!(poll!(&mut first).is_pending());
    assert!(poll!(&mut second).is_pending());

    first_gate.send(Ok(docs(&["a"]))).unwrap();
    first.await;
    assert_eq!(listed(&view), vec!["a"]);

    second_gate.send(Ok(docs(&["b"]))).unwrap();
    second.await;
    assert_eq!(listed(&view), vec!["b"]);
}

#[tokio::test]
async fn test_stale_failure_is_not_reported() {
    let source = Arc::new(GatedSource::default());
    let (notifications, view) = view(source.clone());

    let first_gate = source.gate();
    let second_gate = source.gate();

    let mut first = Box::pin(view.fetch());
    let mut second = Box::pin(view.refresh());
    assert!(poll!(&mut first).is_pending());
    assert!(poll!(&mut second).is_pending());

    second_gate.send(Ok(docs(&["a"]))).unwrap();
    second.await;

    first_gate
        .send(Err(SourceError::Transport("late".to_string())))
        .unwrap();
    assert_eq!(first.await.unwrap(), FetchOutcome::Stale);

    assert!(view.fetch_state().is_ready());
    assert_eq!(listed(&view), vec!["a"]);
    assert!(notifications.pending().is_empty());
}

#[tokio::test]
async fn test_superseded_sort_failing_late_is_silent() {
    let source = Arc::new(GatedSource::default());
    let (notifications, view) = view(source.clone());
    let mut events = view.subscribe();

    let date_gate = source.gate();
    let title_gate = source.gate();

    let mut by_date = Box::pin(view.set_sort("date"));
    let mut by_title = Box::pin(view.set_sort("title"));
    assert!(poll!(&mut by_date).is_pending());
    assert!(poll!(&mut by_title).is_pending());

    title_gate.send(Ok(docs(&["a"]))).unwrap();
    by_title.await;

    date_gate
        .send(Err(SourceError::Transport("late".to_string())))
        .unwrap();
    by_date.await;

    assert!(view.fetch_state().is_ready());
    assert!(!view.is_loading());
    assert_eq!(listed(&view), vec!["a"]);
    assert!(notifications.pending().is_empty());

    let mut failures = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, ViewEvent::FetchFailed) {
            failures += 1;
        }
    }
    assert_eq!(failures, 0);
}

#[tokio::test]
async fn test_latest_failure_is_reported() {
    let source = Arc::new(GatedSource::default());
    let (notifications, view) = view(source.clone());

    let old_gate = source.gate();
    let new_gate = source.gate();
    let mut old = Box::pin(view.refresh());
    let mut new = Box::pin(view.refresh());
    assert!(poll!(&mut old).is_pending());
    assert!(poll!(&mut new).is_pending());

    old_gate.send(Ok(docs(&["a"]))).unwrap();
    old.await;
    new_gate
        .send(Err(SourceError::Transport("down".to_string())))
        .unwrap();
    new.await;

    assert!(view.fetch_state().is_error());
    assert_eq!(listed(&view), vec!["a"]);
    let notes = notifications.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "alexandria.errors.fetch-documents (0)");
}

#[tokio::test]
async fn test_stale_result_does_not_touch_selection() {
    let source = Arc::new(GatedSource::default());
    let (_, view) = view(source.clone());

    let gate = source.gate();
    gate.send(Ok(docs(&["a", "b"]))).unwrap();
    view.refresh().await;
    view.handle_click_id(&DocumentId::new("a"), Modifiers::NONE).unwrap();

    let old_gate = source.gate();
    let new_gate = source.gate();
    let mut old = Box::pin(view.refresh());
    let mut new = Box::pin(view.refresh());
    assert!(poll!(&mut old).is_pending());
    assert!(poll!(&mut new).is_pending());

    new_gate.send(Ok(docs(&["a", "c"]))).unwrap();
    new.await;
    old_gate.send(Ok(docs(&["b"]))).unwrap();
    old.await;

    assert!(view.is_selected(&DocumentId::new("a")));
    assert_eq!(listed(&view), vec!["a", "c"]);
}
