//! Test support: a minimal concrete widget for use as container children.
//!
//! Pairs with [`RecordingComm`](crate::comm::RecordingComm) the way a
//! headless harness pairs with a runtime: build widgets against a recording
//! comm, mutate them, then assert on the update log.

use crate::comm::CommHandle;
use crate::widget::{Widget, WidgetCore, WidgetRef};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A leaf widget with a single `label` field.  Stands in for any real child
/// widget in container tests.
pub struct Placeholder {
    core: WidgetCore,
    label: String,
}

impl Placeholder {
    /// An unlabeled placeholder.
    pub fn new(comm: CommHandle) -> Self {
        Self::labeled(comm, "")
    }

    /// A placeholder with the given label.
    pub fn labeled(comm: CommHandle, label: impl Into<String>) -> Self {
        Self {
            core: WidgetCore::new(comm),
            label: label.into(),
        }
    }

    /// The label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// A fresh placeholder behind a [`WidgetRef`], ready to append to a
    /// container.
    pub fn widget_ref(comm: CommHandle) -> WidgetRef {
        Rc::new(RefCell::new(Self::new(comm)))
    }
}

impl Widget for Placeholder {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn model_name(&self) -> &'static str {
        "PlaceholderModel"
    }

    fn view_name(&self) -> &'static str {
        "PlaceholderView"
    }

    fn state(&self) -> Map<String, Value> {
        let mut state = Map::new();
        state.insert("label".to_string(), Value::String(self.label.clone()));
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::RecordingComm;

    #[test]
    fn placeholder_state_is_just_the_label() {
        let w = Placeholder::labeled(RecordingComm::new(), "child");
        assert_eq!(w.state()["label"], "child");
        assert_eq!(w.label(), "child");
    }
}
