//! The state-sync primitive: one-directional push of named fields to a
//! remote renderer.
//!
//! Widgets never receive state over this channel; the renderer is the sole
//! consumer.  Everything here is single-threaded by design -- widget models
//! live on the kernel's main thread and a [`CommHandle`] is an `Rc`, not an
//! `Arc`.

use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Unique identity of a widget model instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WidgetId(Uuid);

impl WidgetId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The reference form used on the wire when one widget points at
    /// another, e.g. in a container's `children` list.
    pub fn reference(&self) -> String {
        format!("widget:{}", self.0)
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single named field's current value, pushed toward the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateUpdate {
    /// The widget whose field changed.
    pub widget: WidgetId,
    /// The wire name of the field, e.g. `children` or `selected_index`.
    pub field: String,
    /// The field's full current value (not a diff).
    pub value: Value,
}

/// Transport used by widgets to publish state updates.
///
/// Implementations must not block: widget mutation is synchronous and a slow
/// transport would stall the caller.
pub trait Comm {
    /// Push one field update toward the renderer.
    fn send(&self, update: StateUpdate);
}

/// Shared handle to a [`Comm`], cloned into every widget created against it.
pub type CommHandle = Rc<dyn Comm>;

/// A [`Comm`] that forwards updates into a tokio channel.
///
/// The kernel's event loop owns the receiving half and drains it
/// asynchronously; sending never blocks.  Updates sent after the receiver is
/// dropped are discarded.
pub struct ChannelComm {
    tx: UnboundedSender<StateUpdate>,
}

impl ChannelComm {
    /// Wrap an existing sender.
    pub fn new(tx: UnboundedSender<StateUpdate>) -> Self {
        Self { tx }
    }

    /// Create a fresh channel, returning the widget-side handle and the
    /// renderer-side receiver.
    pub fn channel() -> (CommHandle, UnboundedReceiver<StateUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Rc::new(Self::new(tx)), rx)
    }
}

impl Comm for ChannelComm {
    fn send(&self, update: StateUpdate) {
        if self.tx.send(update).is_err() {
            log::debug!("comm channel closed; dropping state update");
        }
    }
}

/// A [`Comm`] that records every update for later inspection.
///
/// This is the test double used throughout the workspace: create one, hand
/// clones of the handle to widgets, then assert on [`updates`](Self::updates)
/// or [`fields_sent`](Self::fields_sent).
#[derive(Default)]
pub struct RecordingComm {
    updates: RefCell<Vec<StateUpdate>>,
}

impl RecordingComm {
    /// Create a recording comm behind an `Rc` so tests can keep a handle to
    /// it after passing it to widgets.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Snapshot of every update sent so far, in order.
    pub fn updates(&self) -> Vec<StateUpdate> {
        self.updates.borrow().clone()
    }

    /// Drain the recorded updates, leaving the log empty.
    pub fn take_updates(&self) -> Vec<StateUpdate> {
        self.updates.borrow_mut().drain(..).collect()
    }

    /// The field names sent so far, in order.
    pub fn fields_sent(&self) -> Vec<String> {
        self.updates
            .borrow()
            .iter()
            .map(|u| u.field.clone())
            .collect()
    }

    /// The most recently sent value for `field`, if any.
    pub fn last_value(&self, field: &str) -> Option<Value> {
        self.updates
            .borrow()
            .iter()
            .rev()
            .find(|u| u.field == field)
            .map(|u| u.value.clone())
    }
}

impl Comm for RecordingComm {
    fn send(&self, update: StateUpdate) {
        self.updates.borrow_mut().push(update);
    }
}

/// A [`Comm`] that discards every update.  Useful for widgets built before a
/// transport exists.
pub struct NullComm;

impl NullComm {
    /// A ready-to-use handle.
    pub fn handle() -> CommHandle {
        Rc::new(NullComm)
    }
}

impl Comm for NullComm {
    fn send(&self, _update: StateUpdate) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(field: &str, value: Value) -> StateUpdate {
        StateUpdate {
            widget: WidgetId::new(),
            field: field.to_string(),
            value,
        }
    }

    #[test]
    fn widget_id_reference_form() {
        let id = WidgetId::new();
        assert_eq!(id.reference(), format!("widget:{id}"));
    }

    #[test]
    fn widget_ids_are_unique() {
        assert_ne!(WidgetId::new(), WidgetId::new());
    }

    #[test]
    fn channel_comm_delivers_in_order() {
        let (comm, mut rx) = ChannelComm::channel();
        comm.send(update("a", json!(1)));
        comm.send(update("b", json!(2)));
        assert_eq!(rx.try_recv().unwrap().field, "a");
        assert_eq!(rx.try_recv().unwrap().field, "b");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_comm_survives_closed_receiver() {
        let (comm, rx) = ChannelComm::channel();
        drop(rx);
        // Must not panic.
        comm.send(update("a", json!(1)));
    }

    #[test]
    fn recording_comm_records_in_order() {
        let comm = RecordingComm::new();
        comm.send(update("children", json!([])));
        comm.send(update("box_style", json!("info")));
        assert_eq!(comm.fields_sent(), vec!["children", "box_style"]);
    }

    #[test]
    fn recording_comm_last_value_wins() {
        let comm = RecordingComm::new();
        comm.send(update("selected_index", json!(0)));
        comm.send(update("selected_index", json!(2)));
        assert_eq!(comm.last_value("selected_index"), Some(json!(2)));
        assert_eq!(comm.last_value("missing"), None);
    }

    #[test]
    fn take_updates_drains() {
        let comm = RecordingComm::new();
        comm.send(update("a", json!(null)));
        assert_eq!(comm.take_updates().len(), 1);
        assert!(comm.updates().is_empty());
    }
}
