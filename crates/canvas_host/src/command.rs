use serde::{Deserialize, Serialize};

use crate::types::{NodeId, NodeInfo, Point, SelectionBounds, Severity, StyleSpec};

/// One operation shipped across the capability boundary.
///
/// Every value the host needs is carried here explicitly so the command can
/// be marshaled into the host's isolated context without shared memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostCommand {
    LookupNode { id: NodeId },
    CreateTextNode { position: Point },
    LoadStyle { style: StyleSpec },
    SetContent { id: NodeId, text: String },
    RenderedExtent { id: NodeId },
    RefreshViewport { ids: Vec<NodeId> },
    CollectSelectionText,
    SelectionBounds,
    Notify { message: String, severity: Severity },
}

/// Host answer to one [`HostCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum HostReply {
    Node { node: Option<NodeInfo> },
    Created { node: NodeInfo },
    Done,
    Extent { value: f64 },
    SelectionText { fragments: Vec<String> },
    SelectionBounds { bounds: Option<SelectionBounds> },
}
