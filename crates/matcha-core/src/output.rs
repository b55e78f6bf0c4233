//! The output-capturing widget and its scoped redirection machinery.
//!
//! An [`Output`] collects stream text and display payloads; while a
//! [`CaptureScope`] is alive, free-function output ([`print`], [`eprint`])
//! is redirected into the innermost active `Output` instead of the process
//! streams.  The scope is a guard: it releases the redirection when dropped,
//! on every exit path.

use crate::comm::CommHandle;
use crate::layout::Layout;
use crate::widget::{Widget, WidgetCore};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Which process stream a captured text fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamName {
    Stdout,
    Stderr,
}

/// One captured output fragment, in its wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum OutputItem {
    /// Text written to stdout or stderr during a capture scope.
    Stream { name: StreamName, text: String },
    /// A rich display payload (MIME bundle).
    DisplayData { data: Value },
}

/// Options for output widgets created by capture helpers.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Layout for the created output; falls back to the capturing
    /// container's default when unset.
    pub layout: Option<Layout>,
}

impl OutputOptions {
    /// Options with an explicit layout.
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout: Some(layout),
        }
    }
}

/// A widget accumulating captured output.
///
/// Wire fields: `outputs` (ordered item list) and `layout`.
pub struct Output {
    core: WidgetCore,
    layout: Layout,
    outputs: Vec<OutputItem>,
}

impl Output {
    /// Create an empty output widget.
    pub fn new(comm: CommHandle) -> Self {
        Self {
            core: WidgetCore::new(comm),
            layout: Layout::default(),
            outputs: Vec::new(),
        }
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// The items captured so far, in order.
    pub fn outputs(&self) -> &[OutputItem] {
        &self.outputs
    }

    /// Append a stream fragment and push the `outputs` field.
    pub fn append_stream(&mut self, name: StreamName, text: impl Into<String>) {
        self.outputs.push(OutputItem::Stream {
            name,
            text: text.into(),
        });
        self.send_outputs();
    }

    /// Append a display payload and push the `outputs` field.
    pub fn append_display_data(&mut self, data: Value) {
        self.outputs.push(OutputItem::DisplayData { data });
        self.send_outputs();
    }

    /// Drop all captured items and push the now-empty `outputs` field.
    pub fn clear(&mut self) {
        self.outputs.clear();
        self.send_outputs();
    }

    fn send_outputs(&self) {
        self.core.send_state("outputs", outputs_value(&self.outputs));
    }
}

impl Widget for Output {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn model_name(&self) -> &'static str {
        "OutputModel"
    }

    fn view_name(&self) -> &'static str {
        "OutputView"
    }

    fn state(&self) -> Map<String, Value> {
        let mut state = Map::new();
        state.insert("outputs".to_string(), outputs_value(&self.outputs));
        state.insert("layout".to_string(), self.layout.to_value());
        state
    }
}

fn outputs_value(outputs: &[OutputItem]) -> Value {
    serde_json::to_value(outputs).unwrap_or(Value::Null)
}

thread_local! {
    // Innermost scope last.  Weak so a scope guard outliving its Output
    // (possible if a container drops the child early) degrades to a no-op
    // sink rather than keeping the widget alive.
    static CAPTURE_STACK: RefCell<Vec<Weak<RefCell<Output>>>> = RefCell::new(Vec::new());
}

/// Guard representing an active output redirection.
///
/// Created by [`enter_capture`]; the redirection ends when the guard drops.
/// Scopes must be strictly nested: the most recently entered scope is the
/// one that receives output and the one released first.
pub struct CaptureScope {
    _private: (),
}

/// Redirect [`print`]/[`eprint`] into `output` until the returned guard is
/// dropped.
pub fn enter_capture(output: &Rc<RefCell<Output>>) -> CaptureScope {
    log::trace!("enter capture scope {}", output.borrow().core().id());
    CAPTURE_STACK.with(|stack| stack.borrow_mut().push(Rc::downgrade(output)));
    CaptureScope { _private: () }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        CAPTURE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
        log::trace!("exit capture scope");
    }
}

/// Write a stdout fragment to the innermost active capture scope, or to the
/// process stdout when no scope is active.
pub fn print(text: impl AsRef<str>) {
    route(StreamName::Stdout, text.as_ref());
}

/// Write a stderr fragment to the innermost active capture scope, or to the
/// process stderr when no scope is active.
pub fn eprint(text: impl AsRef<str>) {
    route(StreamName::Stderr, text.as_ref());
}

fn route(name: StreamName, text: &str) {
    let sink = CAPTURE_STACK.with(|stack| stack.borrow().last().and_then(Weak::upgrade));
    match sink {
        Some(output) => output.borrow_mut().append_stream(name, text),
        None => match name {
            StreamName::Stdout => println!("{text}"),
            StreamName::Stderr => eprintln!("{text}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::RecordingComm;
    use serde_json::json;

    fn output(comm: &Rc<RecordingComm>) -> Rc<RefCell<Output>> {
        Rc::new(RefCell::new(Output::new(comm.clone())))
    }

    #[test]
    fn stream_item_wire_shape() {
        let item = OutputItem::Stream {
            name: StreamName::Stdout,
            text: "hi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"output_type": "stream", "name": "stdout", "text": "hi"})
        );
    }

    #[test]
    fn append_stream_pushes_outputs_field() {
        let comm = RecordingComm::new();
        let mut out = Output::new(comm.clone());
        out.append_stream(StreamName::Stderr, "oops");

        assert_eq!(
            comm.last_value("outputs"),
            Some(json!([{"output_type": "stream", "name": "stderr", "text": "oops"}]))
        );
    }

    #[test]
    fn print_inside_scope_is_captured() {
        let comm = RecordingComm::new();
        let out = output(&comm);
        {
            let _scope = enter_capture(&out);
            print("captured");
        }
        print("not captured");

        assert_eq!(
            out.borrow().outputs(),
            &[OutputItem::Stream {
                name: StreamName::Stdout,
                text: "captured".to_string(),
            }]
        );
    }

    #[test]
    fn nested_scopes_route_to_innermost() {
        let comm = RecordingComm::new();
        let outer = output(&comm);
        let inner = output(&comm);

        let _a = enter_capture(&outer);
        {
            let _b = enter_capture(&inner);
            print("in");
        }
        print("out");

        assert_eq!(inner.borrow().outputs().len(), 1);
        assert_eq!(outer.borrow().outputs().len(), 1);
    }

    #[test]
    fn scope_releases_on_unwind() {
        let comm = RecordingComm::new();
        let out = output(&comm);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = enter_capture(&out);
            panic!("boom");
        }));
        assert!(result.is_err());
        // The scope popped during unwinding, so output goes to stdout again
        // and the widget sees nothing new.
        print("after");
        assert!(out.borrow().outputs().is_empty());
    }

    #[test]
    fn dropped_output_degrades_to_passthrough() {
        let comm = RecordingComm::new();
        let out = output(&comm);
        let _scope = enter_capture(&out);
        drop(out);
        // Must not panic; the weak sink is gone.
        print("nowhere");
    }

    #[test]
    fn clear_empties_and_syncs() {
        let comm = RecordingComm::new();
        let mut out = Output::new(comm.clone());
        out.append_stream(StreamName::Stdout, "x");
        out.clear();
        assert!(out.outputs().is_empty());
        assert_eq!(comm.last_value("outputs"), Some(json!([])));
    }

    #[test]
    fn state_has_outputs_and_layout() {
        let comm = RecordingComm::new();
        let out = Output::new(comm.clone()).with_layout(Layout::new().with_width("50%"));
        let state = out.state();
        assert_eq!(state["outputs"], json!([]));
        assert_eq!(state["layout"], json!({"width": "50%"}));
        assert_eq!(out.model_name(), "OutputModel");
        assert_eq!(out.view_name(), "OutputView");
    }
}
