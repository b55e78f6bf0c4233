//! The base widget trait and the per-widget core shared by every model.
//!
//! A widget model is a plain Rust struct owning a [`WidgetCore`] (identity +
//! comm handle) plus whatever typed fields it syncs.  The renderer identifies
//! each model by its (model-tag, view-tag) pair and receives field values as
//! JSON through the core's [`send_state`](WidgetCore::send_state).

use crate::comm::{CommHandle, StateUpdate, WidgetId};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identity, transport, and display bookkeeping shared by all widgets.
pub struct WidgetCore {
    id: WidgetId,
    comm: CommHandle,
    displayed: Cell<bool>,
}

impl WidgetCore {
    /// Create a core bound to the given comm.
    pub fn new(comm: CommHandle) -> Self {
        Self {
            id: WidgetId::new(),
            comm,
            displayed: Cell::new(false),
        }
    }

    /// This widget's id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// A clone of the comm handle, for constructing child widgets that talk
    /// to the same renderer.
    pub fn comm(&self) -> CommHandle {
        Rc::clone(&self.comm)
    }

    /// Push one named field's current value to the renderer.
    pub fn send_state(&self, field: &str, value: Value) {
        log::debug!("send_state {} {}", self.id, field);
        self.comm.send(StateUpdate {
            widget: self.id,
            field: field.to_string(),
            value,
        });
    }

    /// Whether the one-shot display hook has already fired.
    pub fn is_displayed(&self) -> bool {
        self.displayed.get()
    }

    /// Mark the widget displayed.  Returns `true` only on the first call, so
    /// display hooks run exactly once.
    pub fn mark_displayed(&self) -> bool {
        !self.displayed.replace(true)
    }
}

/// A widget model synced to the remote renderer.
pub trait Widget {
    /// The shared core (identity, comm, display flag).
    fn core(&self) -> &WidgetCore;

    /// The model tag the renderer uses to pick a model class.
    fn model_name(&self) -> &'static str;

    /// The view tag the renderer uses to pick a view class.
    fn view_name(&self) -> &'static str;

    /// The full wire-visible state, field name to JSON value.
    fn state(&self) -> Map<String, Value>;

    /// One-shot hook fired after the widget becomes visible on the front
    /// end.  The default pushes the full state once; containers additionally
    /// forward the notification to their children.
    fn handle_displayed(&mut self) {
        if self.core().mark_displayed() {
            push_state(self);
        }
    }
}

/// Shared ownership reference to a widget.  Children are held by reference,
/// not by copy; the same widget may appear in several containers.
pub type WidgetRef = Rc<RefCell<dyn Widget>>;

/// Push every field of `widget`'s current state, one update per field.
pub fn push_state<W: Widget + ?Sized>(widget: &W) {
    let core = widget.core();
    for (field, value) in widget.state() {
        core.send_state(&field, value);
    }
}

/// Serialize an ordered child sequence to its wire form: a JSON array of
/// widget reference strings.
pub fn children_refs(children: &[WidgetRef]) -> Value {
    Value::Array(
        children
            .iter()
            .map(|c| Value::String(c.borrow().core().id().reference()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::RecordingComm;
    use crate::testing::Placeholder;
    use serde_json::json;

    #[test]
    fn mark_displayed_is_one_shot() {
        let core = WidgetCore::new(RecordingComm::new());
        assert!(!core.is_displayed());
        assert!(core.mark_displayed());
        assert!(!core.mark_displayed());
        assert!(core.is_displayed());
    }

    #[test]
    fn send_state_names_the_widget_and_field() {
        let comm = RecordingComm::new();
        let core = WidgetCore::new(comm.clone());
        core.send_state("label", json!("hi"));

        let updates = comm.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].widget, core.id());
        assert_eq!(updates[0].field, "label");
        assert_eq!(updates[0].value, json!("hi"));
    }

    #[test]
    fn default_handle_displayed_pushes_state_once() {
        let comm = RecordingComm::new();
        let mut w = Placeholder::labeled(comm.clone(), "a");
        w.handle_displayed();
        w.handle_displayed();
        assert_eq!(comm.fields_sent(), vec!["label"]);
    }

    #[test]
    fn children_refs_serializes_in_order() {
        let comm = RecordingComm::new();
        let a = Placeholder::widget_ref(comm.clone());
        let b = Placeholder::widget_ref(comm.clone());
        let ids: Vec<String> = [&a, &b]
            .iter()
            .map(|w| w.borrow().core().id().reference())
            .collect();

        assert_eq!(children_refs(&[a, b]), json!([ids[0], ids[1]]));
    }
}
