//! A PDF viewer that opens one document from a URL and shows it a page at a
//! time, with zoom, rotation and fullscreen controls.

pub mod app;
pub mod commands;
pub mod engine;
pub mod error;
pub mod loader;
pub mod message;
pub mod models;
pub mod page_input;
pub mod pdf_engine;
pub mod render_guard;
pub mod storage;
pub mod toast;
pub mod ui;
pub mod ui_document;
pub mod update;
pub mod viewer;

pub use app::ViewerApp;
pub use error::{Result, ViewerError};
pub use message::Message;
pub use models::{Rotation, Scale};
pub use viewer::ViewerState;
