//! Container widgets for the **matcha** notebook widget framework.
//!
//! Every widget here implements [`matcha_core::Widget`]: it owns an ordered
//! sequence of child widget references and syncs a small set of named fields
//! to the remote renderer.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`boxes`] | Plain, vertical, horizontal, and grid boxes |
//! | [`carousel`] | Scrollable row that grows by capturing output |
//! | [`selection`] | Accordion and tab containers with titled pages |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | The (model-tag, view-tag) pairs consumed by the renderer |
//!
//! # The replace-to-sync contract
//!
//! Container children change only by whole-sequence replacement.  Appending
//! builds a new sequence and rebinds the field; that rebind is what pushes
//! the `children` update.  Handing out `&mut Vec` would allow edits the
//! renderer never hears about, so no container does.

pub mod boxes;
pub mod carousel;
pub mod registry;
pub mod selection;

pub use boxes::{BoxContainer, BoxKind, BoxStyle, ParseBoxStyleError};
pub use carousel::Carousel;
pub use registry::{registrations, Registration};
pub use selection::{CaptureIter, SelectionContainer, SelectionError, SelectionKind, TitleMode};
