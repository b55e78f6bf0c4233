//! Multipage containers: a box whose children are pages with titles and a
//! single selected index.
//!
//! [`SelectionContainer`] is the shared model behind accordions and tab
//! bars; the two differ only in the rendering-tag pair fixed by their
//! [`SelectionKind`].

use crate::boxes::BoxContainer;
use matcha_core::comm::CommHandle;
use matcha_core::output::{enter_capture, CaptureScope, Output, OutputOptions};
use matcha_core::widget::{push_state, Widget, WidgetCore, WidgetRef};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Which rendering-tag pair a [`SelectionContainer`] presents to the front
/// end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// Children rendered as collapsible sections (`AccordionModel`/`AccordionView`).
    Accordion,
    /// Children rendered as tab pages (`TabModel`/`TabView`).
    Tab,
}

impl SelectionKind {
    /// The model tag for this kind.
    pub fn model_name(self) -> &'static str {
        match self {
            SelectionKind::Accordion => "AccordionModel",
            SelectionKind::Tab => "TabModel",
        }
    }

    /// The view tag for this kind.
    pub fn view_name(self) -> &'static str {
        match self {
            SelectionKind::Accordion => "AccordionView",
            SelectionKind::Tab => "TabView",
        }
    }
}

/// Errors raised by selection writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The proposed selected index does not point at an existing child.
    #[error("invalid selection: index {index} out of bounds for {len} children")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// How a capture iteration derives a page title from each item.
///
/// Construct with [`none`](Self::none), [`item`](Self::item), or
/// [`with`](Self::with).
pub struct TitleMode<T>(Option<Box<dyn Fn(&T) -> String>>);

impl<T> TitleMode<T> {
    /// Set no titles.
    pub fn none() -> Self {
        Self(None)
    }

    /// Use each item's display form as its title.
    pub fn item() -> Self
    where
        T: fmt::Display,
    {
        Self(Some(Box::new(|item: &T| item.to_string())))
    }

    /// Derive each title by calling `f` with the item.
    pub fn with(f: impl Fn(&T) -> String + 'static) -> Self {
        Self(Some(Box::new(f)))
    }

    fn derive(&self, item: &T) -> Option<String> {
        self.0.as_ref().map(|f| f(item))
    }
}

/// A box whose children are pages, with per-page titles and one selected
/// page.
///
/// Titles are permissive: they may be set for indices past the current
/// child count (pages can be titled before they exist).  The selected
/// index is not: every write is validated against the current child count
/// and rejected with [`SelectionError::IndexOutOfBounds`] when it does not
/// fit.
pub struct SelectionContainer {
    inner: BoxContainer,
    kind: SelectionKind,
    titles: BTreeMap<usize, String>,
    selected_index: Option<usize>,
}

impl SelectionContainer {
    /// An accordion over the given children.
    pub fn accordion(comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self::with_kind(SelectionKind::Accordion, comm, children)
    }

    /// A tab container over the given children.
    pub fn tab(comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self::with_kind(SelectionKind::Tab, comm, children)
    }

    fn with_kind(kind: SelectionKind, comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self {
            inner: BoxContainer::new(comm, children),
            kind,
            titles: BTreeMap::new(),
            selected_index: None,
        }
    }

    /// This container's kind.
    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    /// The current child sequence.
    pub fn children(&self) -> &[WidgetRef] {
        self.inner.children()
    }

    /// Replace the whole child sequence and push the `children` field.
    ///
    /// A selection that no longer points at an existing child is cleared
    /// (and the cleared `selected_index` pushed), keeping the bounds
    /// invariant true on every observable state.
    pub fn set_children(&mut self, children: Vec<WidgetRef>) {
        self.inner.set_children(children);
        if let Some(index) = self.selected_index {
            if index >= self.children().len() {
                self.set_selected_unchecked(None);
            }
        }
    }

    /// Append a child with no title and no selection change.
    pub fn append(&mut self, child: WidgetRef) {
        self.append_with(child, None, false);
    }

    /// Append a child, optionally titling it and selecting it.
    ///
    /// Order matters: the append happens first so the new index exists,
    /// then the title (skipped when empty), then the selection.
    pub fn append_with(&mut self, child: WidgetRef, title: Option<&str>, selected: bool) {
        self.inner.append(child);
        let index = self.children().len() - 1;
        if let Some(title) = title {
            if !title.is_empty() {
                self.set_title(index, title);
            }
        }
        if selected {
            // In bounds by construction; bypass the validating setter.
            self.set_selected_unchecked(Some(index));
        }
    }

    /// Set the title of the page at `index` and push the `_titles` field.
    ///
    /// No bounds check: titles may be set for pages that do not exist yet.
    pub fn set_title(&mut self, index: usize, title: impl Into<String>) {
        self.titles.insert(index, title.into());
        self.send_titles();
    }

    /// The title of the page at `index`, if one was set.  Never fails for
    /// untitled indices.
    pub fn get_title(&self, index: usize) -> Option<&str> {
        self.titles.get(&index).map(String::as_str)
    }

    /// Remove the title at `index`, pushing `_titles` when something was
    /// actually removed.
    pub fn remove_title(&mut self, index: usize) {
        if self.titles.remove(&index).is_some() {
            self.send_titles();
        }
    }

    /// The currently selected page index, or `None` when nothing is
    /// selected.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Change the selected page, validating against the current child
    /// count.
    ///
    /// `None` always succeeds.  `Some(i)` must satisfy
    /// `i < children().len()`; otherwise the write is rejected and the
    /// prior selection is left untouched.
    pub fn set_selected_index(&mut self, index: Option<usize>) -> Result<(), SelectionError> {
        if let Some(index) = index {
            let len = self.children().len();
            if index >= len {
                return Err(SelectionError::IndexOutOfBounds { index, len });
            }
        }
        self.set_selected_unchecked(index);
        Ok(())
    }

    fn set_selected_unchecked(&mut self, index: Option<usize>) {
        self.selected_index = index;
        self.inner
            .core()
            .send_state("selected_index", selected_value(index));
    }

    fn send_titles(&self) {
        self.inner
            .core()
            .send_state("_titles", titles_value(&self.titles));
    }

    fn comm(&self) -> CommHandle {
        self.inner.core().comm()
    }

    /// Append a fresh output page and capture output into it while `f`
    /// runs.
    ///
    /// Routes through [`append_with`](Self::append_with), so the page is
    /// appended, titled, and selected before `f` executes; it stays in the
    /// container even when `f` returns an error.  The redirection is
    /// released on every exit path.
    pub fn capture<T, E>(
        &mut self,
        title: Option<&str>,
        selected: bool,
        opts: OutputOptions,
        f: impl FnOnce(&Rc<RefCell<Output>>) -> Result<T, E>,
    ) -> Result<T, E> {
        let out = new_output(&self.comm(), &opts);
        let child: WidgetRef = out.clone();
        self.append_with(child, title, selected);
        let _scope = enter_capture(&out);
        f(&out)
    }

    /// Lazily capture each item of `items` into its own output page.
    ///
    /// Single-pass and non-restartable: each pull appends one page, enters
    /// its capture scope, and yields the item; the scope stays open while
    /// the caller's loop body runs and closes on the next pull (or when
    /// the iterator is dropped), at which point the item's title is
    /// derived per `as_title` and applied.
    pub fn iter_capture<I>(
        &mut self,
        items: I,
        as_title: TitleMode<I::Item>,
        opts: OutputOptions,
    ) -> CaptureIter<'_, I>
    where
        I: Iterator,
    {
        CaptureIter {
            container: self,
            items,
            as_title,
            opts,
            interrupt: None,
            open: None,
            done: false,
        }
    }
}

impl Widget for SelectionContainer {
    fn core(&self) -> &WidgetCore {
        self.inner.core()
    }

    fn model_name(&self) -> &'static str {
        self.kind.model_name()
    }

    fn view_name(&self) -> &'static str {
        self.kind.view_name()
    }

    fn state(&self) -> Map<String, Value> {
        let mut state = self.inner.state();
        state.insert("_titles".to_string(), titles_value(&self.titles));
        state.insert(
            "selected_index".to_string(),
            selected_value(self.selected_index),
        );
        state
    }

    fn handle_displayed(&mut self) {
        if self.inner.core().mark_displayed() {
            push_state(self);
            self.inner.notify_children_displayed();
        }
    }
}

impl fmt::Debug for SelectionContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SelectionContainer");
        s.field("kind", &self.kind)
            .field("children", &self.children().len())
            .field("selected_index", &self.selected_index);
        // Titles appear only when set, keeping the listing reproducible.
        if !self.titles.is_empty() {
            s.field("titles", &self.titles);
        }
        s.finish()
    }
}

fn selected_value(index: Option<usize>) -> Value {
    match index {
        Some(i) => Value::from(i),
        None => Value::Null,
    }
}

// JSON object keys are strings, so page indices go on the wire in decimal
// string form.
fn titles_value(titles: &BTreeMap<usize, String>) -> Value {
    let mut map = Map::new();
    for (index, title) in titles {
        map.insert(index.to_string(), Value::String(title.clone()));
    }
    Value::Object(map)
}

fn new_output(comm: &CommHandle, opts: &OutputOptions) -> Rc<RefCell<Output>> {
    let layout = opts.layout.clone().unwrap_or_default();
    Rc::new(RefCell::new(Output::new(comm.clone()).with_layout(layout)))
}

struct OpenCapture<T> {
    scope: CaptureScope,
    index: usize,
    item: T,
}

/// Iterator created by [`SelectionContainer::iter_capture`].
///
/// Holds `&mut` on the container for its whole lifetime, so a second pull
/// cannot happen while a capture scope from the same iterator is open.
pub struct CaptureIter<'a, I: Iterator> {
    container: &'a mut SelectionContainer,
    items: I,
    as_title: TitleMode<I::Item>,
    opts: OutputOptions,
    interrupt: Option<Arc<AtomicBool>>,
    open: Option<OpenCapture<I::Item>>,
    done: bool,
}

impl<I: Iterator> CaptureIter<'_, I> {
    /// Observe `flag` at each pull; when set (e.g. from a signal handler),
    /// the stream ends cleanly instead of raising an error.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    // Close the previous item's scope: derive its title while the scope is
    // still active (title-derivation output lands in the page), apply it,
    // then release the redirection.
    fn close_open(&mut self) {
        if let Some(open) = self.open.take() {
            if let Some(title) = self.as_title.derive(&open.item) {
                if !title.is_empty() {
                    self.container.set_title(open.index, title);
                }
            }
            drop(open.scope);
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl<I> Iterator for CaptureIter<'_, I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.close_open();
        if self.done {
            return None;
        }
        if self.interrupted() {
            log::debug!("capture iteration interrupted; ending stream");
            self.done = true;
            return None;
        }
        let item = match self.items.next() {
            Some(item) => item,
            None => {
                self.done = true;
                return None;
            }
        };

        let out = new_output(&self.container.comm(), &self.opts);
        let child: WidgetRef = out.clone();
        self.container.append(child);
        let index = self.container.children().len() - 1;
        let scope = enter_capture(&out);
        self.open = Some(OpenCapture {
            scope,
            index,
            item: item.clone(),
        });
        Some(item)
    }
}

impl<I: Iterator> Drop for CaptureIter<'_, I> {
    fn drop(&mut self) {
        self.close_open();
    }
}
