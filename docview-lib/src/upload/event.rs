//! Drag event payloads.

/// A file carried by a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name as reported by the host.
    pub name: String,
    /// MIME type, if the host knows it.
    pub media_type: Option<String>,
    /// File contents.
    pub data: Vec<u8>,
}

impl UploadFile {
    /// Create a file from a name and its contents.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            data: data.into(),
        }
    }

    /// Set the MIME type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A drag-over or drop event as delivered by the host.
///
/// The two flags tell the host whether to suppress its own handling (for a
/// browser host: navigating to the dropped file) and whether to stop
/// bubbling to outer drop zones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragEvent {
    /// Files in the drag payload.
    pub files: Vec<UploadFile>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DragEvent {
    /// Create an event with no files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event carrying files.
    pub fn with_files(files: Vec<UploadFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    /// Suppress the host's default handling.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event reaching outer handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether default handling was suppressed.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether propagation was stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Whether the view took the event.
    pub fn is_consumed(&self) -> bool {
        self.default_prevented && self.propagation_stopped
    }
}
