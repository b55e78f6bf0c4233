//! Box containers: group child widgets under a shared style tag.
//!
//! The four kinds (plain, vertical, horizontal, grid) differ only in the
//! rendering-tag pair they present to the front end; behavior is identical.

use matcha_core::comm::CommHandle;
use matcha_core::layout::Layout;
use matcha_core::widget::{children_refs, push_state, Widget, WidgetCore, WidgetRef};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which rendering-tag pair a [`BoxContainer`] presents to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxKind {
    /// Plain box (`BoxModel`/`BoxView`).
    #[default]
    Box,
    /// Vertical flexbox (`VBoxModel`/`VBoxView`).
    Vertical,
    /// Horizontal flexbox (`HBoxModel`/`HBoxView`).
    Horizontal,
    /// Grid (`GridBoxModel`/`GridBoxView`).
    Grid,
}

impl BoxKind {
    /// The model tag for this kind.
    pub fn model_name(self) -> &'static str {
        match self {
            BoxKind::Box => "BoxModel",
            BoxKind::Vertical => "VBoxModel",
            BoxKind::Horizontal => "HBoxModel",
            BoxKind::Grid => "GridBoxModel",
        }
    }

    /// The view tag for this kind.
    pub fn view_name(self) -> &'static str {
        match self {
            BoxKind::Box => "BoxView",
            BoxKind::Vertical => "VBoxView",
            BoxKind::Horizontal => "HBoxView",
            BoxKind::Grid => "GridBoxView",
        }
    }
}

/// Predefined visual styling for a box.  Serializes to the empty string when
/// unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    /// No predefined style.
    #[default]
    Default,
    Success,
    Info,
    Warning,
    Danger,
}

impl BoxStyle {
    /// The wire form: `""`, `"success"`, `"info"`, `"warning"`, `"danger"`.
    pub fn as_str(self) -> &'static str {
        match self {
            BoxStyle::Default => "",
            BoxStyle::Success => "success",
            BoxStyle::Info => "info",
            BoxStyle::Warning => "warning",
            BoxStyle::Danger => "danger",
        }
    }
}

impl fmt::Display for BoxStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized box style tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown box style: {0:?}")]
pub struct ParseBoxStyleError(pub String);

impl FromStr for BoxStyle {
    type Err = ParseBoxStyleError;

    /// Case-insensitive, matching the tags accepted by the renderer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" => Ok(BoxStyle::Default),
            "success" => Ok(BoxStyle::Success),
            "info" => Ok(BoxStyle::Info),
            "warning" => Ok(BoxStyle::Warning),
            "danger" => Ok(BoxStyle::Danger),
            _ => Err(ParseBoxStyleError(s.to_string())),
        }
    }
}

/// A container holding an ordered sequence of child widgets.
///
/// # Mutation contract
///
/// The child sequence changes only by whole-sequence replacement:
/// [`set_children`](Self::set_children) rebinds the field and pushes the
/// `children` update, and [`append`](Self::append) routes through it.  There
/// is deliberately no `&mut` access to the underlying vec; an in-place edit
/// would not be observed by the rendering layer.
pub struct BoxContainer {
    core: WidgetCore,
    kind: BoxKind,
    children: Vec<WidgetRef>,
    box_style: BoxStyle,
    layout: Layout,
}

impl BoxContainer {
    /// A plain box over the given children.
    pub fn new(comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self::with_kind(BoxKind::Box, comm, children)
    }

    /// A vertical box (`VBox`).
    pub fn vertical(comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self::with_kind(BoxKind::Vertical, comm, children)
    }

    /// A horizontal box (`HBox`).
    pub fn horizontal(comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self::with_kind(BoxKind::Horizontal, comm, children)
    }

    /// A grid box (`GridBox`).  Column structure comes from the layout's
    /// `grid_template_columns`.
    pub fn grid(comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self::with_kind(BoxKind::Grid, comm, children)
    }

    fn with_kind(kind: BoxKind, comm: CommHandle, children: Vec<WidgetRef>) -> Self {
        Self {
            core: WidgetCore::new(comm),
            kind,
            children,
            box_style: BoxStyle::Default,
            layout: Layout::default(),
        }
    }

    /// Set the box style.
    pub fn with_box_style(mut self, style: BoxStyle) -> Self {
        self.box_style = style;
        self
    }

    /// Set the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// This box's kind.
    pub fn kind(&self) -> BoxKind {
        self.kind
    }

    /// The current child sequence.
    pub fn children(&self) -> &[WidgetRef] {
        &self.children
    }

    /// The current box style.
    pub fn box_style(&self) -> BoxStyle {
        self.box_style
    }

    /// The current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Replace the whole child sequence and push the `children` field.
    pub fn set_children(&mut self, children: Vec<WidgetRef>) {
        self.children = children;
        self.core
            .send_state("children", children_refs(&self.children));
    }

    /// Append a child: builds the old sequence plus `child` and routes
    /// through [`set_children`](Self::set_children).
    pub fn append(&mut self, child: WidgetRef) {
        let mut next = Vec::with_capacity(self.children.len() + 1);
        next.extend(self.children.iter().cloned());
        next.push(child);
        self.set_children(next);
    }

    /// Change the box style and push the `box_style` field.
    pub fn set_box_style(&mut self, style: BoxStyle) {
        self.box_style = style;
        self.core
            .send_state("box_style", Value::String(style.as_str().to_string()));
    }

    /// Change the layout and push the `layout` field.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.core.send_state("layout", self.layout.to_value());
    }

    /// Forward the display notification to every child, in order.
    pub(crate) fn notify_children_displayed(&self) {
        for child in &self.children {
            child.borrow_mut().handle_displayed();
        }
    }
}

impl Widget for BoxContainer {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn model_name(&self) -> &'static str {
        self.kind.model_name()
    }

    fn view_name(&self) -> &'static str {
        self.kind.view_name()
    }

    fn state(&self) -> Map<String, Value> {
        let mut state = Map::new();
        state.insert("children".to_string(), children_refs(&self.children));
        state.insert(
            "box_style".to_string(),
            Value::String(self.box_style.as_str().to_string()),
        );
        state.insert("layout".to_string(), self.layout.to_value());
        state
    }

    fn handle_displayed(&mut self) {
        if self.core.mark_displayed() {
            push_state(self);
            self.notify_children_displayed();
        }
    }
}

impl fmt::Debug for BoxContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxContainer")
            .field("kind", &self.kind)
            .field("children", &self.children.len())
            .field("box_style", &self.box_style)
            .finish()
    }
}
