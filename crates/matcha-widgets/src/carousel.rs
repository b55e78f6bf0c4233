//! A horizontally scrolling box that grows by capturing output.
//!
//! Each call to [`Carousel::capture`] appends a fresh output widget and
//! redirects captured output into it for the duration of the closure.

use crate::boxes::BoxContainer;
use matcha_core::comm::CommHandle;
use matcha_core::layout::Layout;
use matcha_core::output::{enter_capture, Output, OutputOptions};
use matcha_core::widget::{Widget, WidgetCore, WidgetRef};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A box laid out as a single scrollable row of captured outputs.
///
/// Uses the plain box tag pair; only the default layout differs.
pub struct Carousel {
    inner: BoxContainer,
    output_layout: Layout,
}

impl Carousel {
    /// An empty carousel with the row/nowrap scroll layout.
    pub fn new(comm: CommHandle) -> Self {
        let layout = Layout::new()
            .with_flex_flow("row nowrap")
            .with_overflow_x("auto")
            .with_max_width("100%");
        Self {
            inner: BoxContainer::new(comm, Vec::new()).with_layout(layout),
            output_layout: Layout::default(),
        }
    }

    /// Set the default layout given to outputs created by
    /// [`capture`](Self::capture).
    pub fn with_output_layout(mut self, layout: Layout) -> Self {
        self.output_layout = layout;
        self
    }

    /// The current child sequence.
    pub fn children(&self) -> &[WidgetRef] {
        self.inner.children()
    }

    /// Replace the whole child sequence.  See
    /// [`BoxContainer::set_children`].
    pub fn set_children(&mut self, children: Vec<WidgetRef>) {
        self.inner.set_children(children);
    }

    /// Append a child via whole-sequence replacement.
    pub fn append(&mut self, child: WidgetRef) {
        self.inner.append(child);
    }

    /// Append a fresh output widget and capture output into it while `f`
    /// runs.
    ///
    /// The child is appended before `f` executes, so it remains in the
    /// carousel even when `f` returns an error; the error propagates to the
    /// caller.  The redirection is released on every exit path.
    pub fn capture<T, E>(
        &mut self,
        opts: OutputOptions,
        f: impl FnOnce(&Rc<RefCell<Output>>) -> Result<T, E>,
    ) -> Result<T, E> {
        let layout = opts
            .layout
            .unwrap_or_else(|| self.output_layout.clone());
        let out = Rc::new(RefCell::new(
            Output::new(self.inner.core().comm()).with_layout(layout),
        ));
        let child: WidgetRef = out.clone();
        self.append(child);
        let _scope = enter_capture(&out);
        f(&out)
    }
}

impl Widget for Carousel {
    fn core(&self) -> &WidgetCore {
        self.inner.core()
    }

    fn model_name(&self) -> &'static str {
        self.inner.model_name()
    }

    fn view_name(&self) -> &'static str {
        self.inner.view_name()
    }

    fn state(&self) -> Map<String, Value> {
        self.inner.state()
    }

    fn handle_displayed(&mut self) {
        self.inner.handle_displayed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcha_core::comm::RecordingComm;
    use matcha_core::output;

    #[test]
    fn carousel_uses_plain_box_tags() {
        let c = Carousel::new(RecordingComm::new());
        assert_eq!(c.model_name(), "BoxModel");
        assert_eq!(c.view_name(), "BoxView");
    }

    #[test]
    fn default_layout_scrolls_horizontally() {
        let c = Carousel::new(RecordingComm::new());
        let state = c.state();
        assert_eq!(state["layout"]["flex_flow"], "row nowrap");
        assert_eq!(state["layout"]["overflow_x"], "auto");
        assert_eq!(state["layout"]["max_width"], "100%");
    }

    #[test]
    fn capture_appends_and_redirects() {
        let comm = RecordingComm::new();
        let mut c = Carousel::new(comm.clone());

        let result: Result<(), ()> = c.capture(OutputOptions::default(), |out| {
            output::print("captured");
            assert_eq!(out.borrow().outputs().len(), 1);
            Ok(())
        });

        assert!(result.is_ok());
        assert_eq!(c.children().len(), 1);
    }

    #[test]
    fn capture_keeps_child_on_error() {
        let comm = RecordingComm::new();
        let mut c = Carousel::new(comm.clone());

        let result: Result<(), &str> = c.capture(OutputOptions::default(), |_out| Err("boom"));

        assert_eq!(result, Err("boom"));
        assert_eq!(c.children().len(), 1);
    }

    #[test]
    fn capture_layout_falls_back_to_output_layout() {
        let comm = RecordingComm::new();
        let mut c = Carousel::new(comm.clone())
            .with_output_layout(Layout::new().with_width("200px"));

        let _: Result<(), ()> = c.capture(OutputOptions::default(), |out| {
            assert_eq!(out.borrow().state()["layout"]["width"], "200px");
            Ok(())
        });

        let mut c2 = Carousel::new(comm.clone());
        let opts = OutputOptions::with_layout(Layout::new().with_width("50px"));
        let _: Result<(), ()> = c2.capture(opts, |out| {
            assert_eq!(out.borrow().state()["layout"]["width"], "50px");
            Ok(())
        });
    }
}
