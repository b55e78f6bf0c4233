//! CSS-flavored layout configuration attached to widgets.
//!
//! Only the handful of properties the containers actually set are modeled;
//! unset properties are omitted from the wire entirely.

use serde::Serialize;
use serde_json::Value;

/// Layout properties synced under a widget's `layout` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// CSS `flex-flow` shorthand, e.g. `"row nowrap"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_flow: Option<String>,
    /// CSS `overflow-x`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_x: Option<String>,
    /// CSS `width`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// CSS `height`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// CSS `max-width`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    /// CSS `grid-template-columns`, honored by grid boxes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,
}

impl Layout {
    /// An empty layout (everything unset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `flex-flow`.
    pub fn with_flex_flow(mut self, value: impl Into<String>) -> Self {
        self.flex_flow = Some(value.into());
        self
    }

    /// Set `overflow-x`.
    pub fn with_overflow_x(mut self, value: impl Into<String>) -> Self {
        self.overflow_x = Some(value.into());
        self
    }

    /// Set `width`.
    pub fn with_width(mut self, value: impl Into<String>) -> Self {
        self.width = Some(value.into());
        self
    }

    /// Set `height`.
    pub fn with_height(mut self, value: impl Into<String>) -> Self {
        self.height = Some(value.into());
        self
    }

    /// Set `max-width`.
    pub fn with_max_width(mut self, value: impl Into<String>) -> Self {
        self.max_width = Some(value.into());
        self
    }

    /// Set `grid-template-columns`.
    pub fn with_grid_template_columns(mut self, value: impl Into<String>) -> Self {
        self.grid_template_columns = Some(value.into());
        self
    }

    /// The wire form of this layout.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_layout_serializes_to_empty_object() {
        assert_eq!(Layout::new().to_value(), json!({}));
    }

    #[test]
    fn only_set_properties_appear_on_the_wire() {
        let layout = Layout::new()
            .with_flex_flow("row nowrap")
            .with_max_width("100%");
        assert_eq!(
            layout.to_value(),
            json!({"flex_flow": "row nowrap", "max_width": "100%"})
        );
    }

    #[test]
    fn grid_template_columns_round_trips() {
        let layout = Layout::new().with_grid_template_columns("1fr 1fr");
        assert_eq!(
            layout.to_value(),
            json!({"grid_template_columns": "1fr 1fr"})
        );
    }
}
