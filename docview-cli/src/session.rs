//! Runs commands against a document view and renders the result as text.

use std::path::Path;
use std::sync::Arc;

use docview_lib::memory::MemoryDocumentStore;
use docview_lib::model::Document;
use docview_lib::notification::{KeyTranslator, Level, Notifications};
use docview_lib::query::FilterSet;
use docview_lib::upload::{DragEvent, UploadFile};
use docview_lib::{DocumentView, DropOutcome, Services, ViewConfig};

use crate::commands::{Command, HELP};

/// Errors that stop the driver from starting.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read fixture {path}: {source}")]
    Fixture {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture: {0}")]
    FixtureFormat(#[from] serde_json::Error),
}

/// A document view over an in-memory store, plus the sink it reports to.
pub struct Session {
    view: DocumentView,
    notifications: Arc<Notifications>,
}

impl Session {
    /// Build a session from a list of documents.
    pub fn new(config: ViewConfig, documents: Vec<Document>) -> Self {
        let store = Arc::new(MemoryDocumentStore::with_documents(documents));
        let notifications = Arc::new(Notifications::new());
        let services = Services {
            source: store.clone(),
            uploader: store,
            notifier: notifications.clone(),
            translator: Arc::new(KeyTranslator),
        };
        Self {
            view: DocumentView::new(config, services),
            notifications,
        }
    }

    /// Load documents from a JSON array file.
    pub async fn load_fixture(path: &Path) -> Result<Vec<Document>, SessionError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SessionError::Fixture {
                path: path.display().to_string(),
                source,
            })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch the initial list.
    pub async fn start(&self) -> String {
        self.view.refresh().await;
        self.render()
    }

    /// Run one command. Returns the text to print, or `None` to quit.
    pub async fn run(&self, command: Command) -> Option<String> {
        let mut out = String::new();
        match command {
            Command::Quit => return None,
            Command::Help => out.push_str(HELP),
            Command::List => out.push_str(&self.render()),
            Command::Filter(category) => {
                let filters = category.map(|c| FilterSet::new().with(FilterSet::CATEGORY, c));
                self.view.set_filters(filters);
                self.view.refresh().await;
                out.push_str(&self.render());
            }
            Command::Sort(field) => {
                let sort = self.view.set_sort(&field).await;
                out.push_str(&format!("sort: {:?}\n", sort.token()));
                out.push_str(&self.render());
            }
            Command::Click(id, modifiers) => match self.view.handle_click_id(&id, modifiers) {
                Some(_) => out.push_str(&self.render()),
                None => out.push_str(&format!("no document '{}' in the list", id)),
            },
            Command::Open(id) => {
                self.view.set_selected_document_id(id);
                match self.view.selected_document() {
                    Some(doc) => out.push_str(&describe(&doc)),
                    None => out.push_str("no document open"),
                }
            }
            Command::Enter => {
                let drag = self.view.on_drag_enter();
                out.push_str(&format!("drag: over={} counter={}", drag.is_over(), drag.counter()));
            }
            Command::Leave => {
                let drag = self.view.on_drag_leave();
                out.push_str(&format!("drag: over={} counter={}", drag.is_over(), drag.counter()));
            }
            Command::Drop(paths) => out.push_str(&self.drop_files(&paths).await),
            Command::ToggleView => {
                let list_view = self.view.toggle_view();
                out.push_str(if list_view { "list view" } else { "grid view" });
            }
        }

        for note in self.notifications.drain() {
            let tag = match note.level {
                Level::Success => "ok",
                Level::Danger => "error",
            };
            out.push_str(&format!("\n[{}] {}", tag, note.message));
        }
        Some(out)
    }

    async fn drop_files(&self, paths: &[std::path::PathBuf]) -> String {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match tokio::fs::read(path).await {
                Ok(data) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    files.push(UploadFile::new(name, data));
                }
                Err(err) => return format!("cannot read {}: {}", path.display(), err),
            }
        }

        let mut over = DragEvent::new();
        self.view.on_drag_over(&mut over);

        let mut event = DragEvent::with_files(files);
        match self.view.on_drop(&mut event).await {
            DropOutcome::Rejected => "drop ignored: set a category filter first".to_string(),
            DropOutcome::Uploaded { count } => format!("uploaded {} file(s)\n{}", count, self.render()),
            DropOutcome::Failed { count, error } => format!("upload of {} file(s) failed: {}", count, error),
        }
    }

    fn render(&self) -> String {
        let documents = self.view.documents();
        let open = self.view.selected_document().map(|d| d.id);
        let mut out = String::new();

        if self.view.is_list_view() {
            for doc in documents.iter() {
                let mark = if self.view.is_selected(&doc.id) { '*' } else { ' ' };
                let cursor = if open.as_ref() == Some(&doc.id) { '>' } else { ' ' };
                out.push_str(&format!(
                    "{}{} {:<12} {}\n",
                    cursor,
                    mark,
                    doc.id,
                    doc.title.as_deref().unwrap_or("(untitled)")
                ));
            }
        } else {
            let cells: Vec<String> = documents
                .iter()
                .map(|doc| {
                    let mark = if self.view.is_selected(&doc.id) { "*" } else { "" };
                    format!("[{}{}]", mark, doc.id)
                })
                .collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }

        out.push_str(&format!(
            "{} document(s), {} selected",
            documents.len(),
            self.view.selected_documents().len()
        ));
        out
    }
}

fn describe(doc: &Document) -> String {
    let mut out = format!("{}: {}", doc.id, doc.title.as_deref().unwrap_or("(untitled)"));
    if let Some(category) = &doc.category {
        out.push_str(&format!("\n  category: {}", category));
    }
    if !doc.tags.is_empty() {
        let tags: Vec<&str> = doc.tags.iter().map(|t| t.as_str()).collect();
        out.push_str(&format!("\n  tags: {}", tags.join(", ")));
    }
    out.push_str(&format!("\n  files: {}", doc.files.len()));
    if let Some(latest) = doc.file_latest_created_at() {
        out.push_str(&format!("\n  latest file: {}", latest.to_rfc3339()));
    }
    if let Some(thumbnail) = doc.thumbnail() {
        out.push_str(&format!("\n  thumbnail: {}", thumbnail));
    }
    out
}
