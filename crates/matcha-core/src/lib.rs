//! Core widget model layer for the **matcha** notebook widget framework.
//!
//! `matcha-core` provides the pieces every widget model is built from: an
//! identity, a one-directional state-sync channel toward a remote renderer,
//! a one-shot display-notification hook, and the output-capturing widget
//! used by container capture helpers.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Widget`] | Base trait: (model-tag, view-tag) pair plus wire-visible state |
//! | [`WidgetCore`] | Per-widget identity, comm handle, and display bookkeeping |
//! | [`Comm`] | Transport trait for pushing one named field at a time |
//! | [`ChannelComm`] | Comm backed by a tokio channel drained by the kernel loop |
//! | [`RecordingComm`](comm::RecordingComm) | Test double accumulating every update |
//! | [`Output`] | Widget collecting captured output, usable as a scoped resource |
//! | [`Layout`] | CSS-flavored layout properties synced under `layout` |
//!
//! # Model
//!
//! Widget models are single-threaded and synchronous.  Mutating a synced
//! field pushes that one field's full current value through the [`Comm`];
//! the renderer is a pure consumer and never writes back through this layer.
//! Capture scopes ([`output::enter_capture`]) are strictly nested guards:
//! while one is alive, [`output::print`] and [`output::eprint`] are
//! redirected into the scope's [`Output`] widget.

pub mod comm;
pub mod layout;
pub mod output;
pub mod testing;
pub mod widget;

pub use comm::{ChannelComm, Comm, CommHandle, NullComm, StateUpdate, WidgetId};
pub use layout::Layout;
pub use output::{CaptureScope, Output, OutputItem, OutputOptions, StreamName};
pub use widget::{children_refs, push_state, Widget, WidgetCore, WidgetRef};
