use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of a document node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Document node kinds visible at the capability boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Text,
    Sticky,
    ShapeWithText,
    Frame,
}

impl NodeKind {
    /// True for the only kind whose content the synchronizer may replace.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// A document-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Style resource required before content assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub family: String,
    pub style: String,
}

impl StyleSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self::new("Inter", "Medium")
    }
}

impl fmt::Display for StyleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// Severity flag for the single-shot advisory notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Error,
}

/// Node descriptor returned by lookup and creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Point,
}

/// Union of the selection's bounding boxes.
///
/// `top` is the minimum top edge and `right` the maximum right edge across
/// every selected node that has a valid box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionBounds {
    pub top: f64,
    pub right: f64,
}

#[cfg(test)]
mod tests {
    use super::{NodeId, NodeKind, Point, Severity, StyleSpec};

    #[test]
    fn node_id_round_trips_through_serde_as_a_bare_string() {
        let id = NodeId::new("0:42");
        let json = serde_json::to_string(&id).expect("serialize node id");
        assert_eq!(json, "\"0:42\"");

        let back: NodeId = serde_json::from_str(&json).expect("deserialize node id");
        assert_eq!(back, id);
    }

    #[test]
    fn only_text_nodes_accept_synchronized_content() {
        assert!(NodeKind::Text.is_text());
        assert!(!NodeKind::Sticky.is_text());
        assert!(!NodeKind::ShapeWithText.is_text());
        assert!(!NodeKind::Frame.is_text());
    }

    #[test]
    fn default_style_is_the_canvas_text_style() {
        let style = StyleSpec::default();
        assert_eq!(style.family, "Inter");
        assert_eq!(style.style, "Medium");
        assert_eq!(style.to_string(), "Inter Medium");
    }

    #[test]
    fn origin_is_the_fallback_position() {
        assert_eq!(Point::ORIGIN, Point::new(0.0, 0.0));
    }

    #[test]
    fn severity_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Severity::Error).expect("serialize severity"),
            "\"error\""
        );
        assert_eq!(
            serde_json::to_string(&Severity::Normal).expect("serialize severity"),
            "\"normal\""
        );
    }
}
