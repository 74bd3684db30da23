//! Document view interaction core
//!
//! Headless state for a sortable document list with multi-selection and
//! drag-and-drop upload. Storage, transport, localization and rendering are
//! reached through the traits in [`services`].

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod memory;
pub mod model;
pub mod notification;
pub mod query;
pub mod resource;
pub mod selection;
pub mod services;
pub mod state;
pub mod upload;

mod view;

pub use config::ViewConfig;
pub use controller::{FetchOutcome, QueryController};
pub use selection::{Modifiers, SelectionChange, SelectionEngine};
pub use upload::{DropOutcome, UploadOrchestrator};
pub use view::*;
