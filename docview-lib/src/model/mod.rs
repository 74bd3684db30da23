//! Data model
//!
//! Plain records with id references between them. Nothing here talks to
//! storage.

mod document;
mod file;
mod refs;

pub use document::Document;
pub use file::DocumentFile;
pub use file::FileVariant;
pub use refs::CategoryRef;
pub use refs::DocumentId;
pub use refs::TagRef;
