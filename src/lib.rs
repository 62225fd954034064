#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod editor;
pub mod error;
pub mod links;
pub mod title;

pub use config::Configuration;
pub use editor::{LinkTitleEngine, MemoryBuffer, TextBuffer};
pub use error::{LinkTitleError, Result};
