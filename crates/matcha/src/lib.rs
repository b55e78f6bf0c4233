//! **matcha** -- notebook-style widget models with one-way state sync.
//!
//! This is the umbrella crate that re-exports everything you need to build
//! and sync container widgets from a single dependency:
//!
//! ```toml
//! [dependencies]
//! matcha = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`matcha_core`] are available at the crate root
//!   ([`Widget`], [`WidgetCore`], [`Comm`], [`ChannelComm`], [`Output`],
//!   [`Layout`], etc.).
//! * The [`widgets`] module re-exports everything from [`matcha_widgets`]
//!   (boxes, carousels, accordions, and tabs).
//! * [`serde_json`] and [`tokio`] are re-exported so downstream crates do
//!   not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use matcha::widgets::{BoxContainer, SelectionContainer, TitleMode};
//! use matcha::{ChannelComm, OutputOptions};
//!
//! let (comm, mut updates) = ChannelComm::channel();
//!
//! let mut tabs = SelectionContainer::tab(comm.clone(), vec![]);
//! for page in tabs.iter_capture(
//!     1..=3,
//!     TitleMode::with(|n: &i32| format!("page {n}")),
//!     OutputOptions::default(),
//! ) {
//!     matcha::output::print(format!("rendering page {page}"));
//! }
//!
//! // `updates` now holds every `children`, `_titles`, and `outputs` push
//! // the renderer would receive.
//! while let Ok(update) = updates.try_recv() {
//!     println!("{} <- {}", update.field, update.value);
//! }
//! ```

pub use matcha_core::*;
pub mod widgets {
    pub use matcha_widgets::*;
}

// Re-export dependencies for use in downstream crates
pub use serde_json;
pub use tokio;
