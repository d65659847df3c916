//! Deterministic in-memory implementation of the `canvas_host` contract.
//!
//! This crate contains no document or transport logic and is intended for
//! local development and contract-level integration testing. Rendered extent
//! is a pure function of line count so layout-dependent behavior is
//! reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use canvas_host::{
    channel, serve, HostBackend, HostBridge, HostCommand, HostError, HostReply, NodeId, NodeInfo,
    NodeKind, Point, SelectionBounds, Severity, StyleSpec,
};

/// Line height used by the deterministic extent model.
pub const LINE_HEIGHT: f64 = 14.0;

/// Axis-aligned bounding box of a selected node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One node in the scripted selection tree.
#[derive(Debug, Clone)]
pub struct SelectionNode {
    kind: NodeKind,
    text: Option<String>,
    bounding_box: Option<BoundingBox>,
    children: Vec<SelectionNode>,
}

impl SelectionNode {
    #[must_use]
    pub fn text_layer(text: impl Into<String>, bounding_box: Option<BoundingBox>) -> Self {
        Self {
            kind: NodeKind::Text,
            text: Some(text.into()),
            bounding_box,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn sticky(text: impl Into<String>, bounding_box: Option<BoundingBox>) -> Self {
        Self {
            kind: NodeKind::Sticky,
            text: Some(text.into()),
            bounding_box,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn shape_with_text(text: impl Into<String>, bounding_box: Option<BoundingBox>) -> Self {
        Self {
            kind: NodeKind::ShapeWithText,
            text: Some(text.into()),
            bounding_box,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn frame(children: Vec<SelectionNode>, bounding_box: Option<BoundingBox>) -> Self {
        Self {
            kind: NodeKind::Frame,
            text: None,
            bounding_box,
            children,
        }
    }

    /// Own text contribution: text-bearing kinds with non-empty content.
    fn text_content(&self) -> Option<String> {
        match self.kind {
            NodeKind::Text | NodeKind::Sticky | NodeKind::ShapeWithText => self
                .text
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(ToOwned::to_owned),
            NodeKind::Frame => None,
        }
    }
}

#[derive(Debug, Clone)]
struct MockNode {
    kind: NodeKind,
    position: Point,
    text: String,
}

#[derive(Debug, Default)]
struct CanvasState {
    nodes: BTreeMap<NodeId, MockNode>,
    next_node_serial: u64,
    selection: Vec<SelectionNode>,
    loaded_styles: BTreeSet<String>,
    failing_styles: BTreeSet<String>,
    style_load_requests: usize,
    refreshes: Vec<Vec<NodeId>>,
    notices: Vec<(String, Severity)>,
}

/// Shared-state mock canvas; clones service the same document.
#[derive(Debug, Clone, Default)]
pub struct MockCanvas {
    state: Arc<Mutex<CanvasState>>,
}

impl MockCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns the service loop and returns the connected bridge.
    ///
    /// Requires an active tokio runtime.
    pub fn serve(&self, capacity: usize) -> HostBridge {
        let (bridge, requests) = channel(capacity);
        tokio::spawn(serve(self.clone(), requests));
        bridge
    }

    pub fn set_selection(&self, selection: Vec<SelectionNode>) {
        self.lock().selection = selection;
    }

    /// Scripts the next load of `style` to fail.
    pub fn fail_style_load(&self, style: &StyleSpec) {
        self.lock().failing_styles.insert(style.to_string());
    }

    /// Inserts a node of an arbitrary kind, as an outside editor would.
    pub fn insert_foreign_node(&self, kind: NodeKind, position: Point) -> NodeId {
        let mut state = self.lock();
        let id = next_node_id(&mut state);
        state.nodes.insert(
            id.clone(),
            MockNode {
                kind,
                position,
                text: String::new(),
            },
        );
        id
    }

    /// Deletes a node, as an outside editor would.
    pub fn delete_node(&self, id: &NodeId) {
        self.lock().nodes.remove(id);
    }

    pub fn node_count(&self) -> usize {
        self.lock().nodes.len()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.lock().nodes.keys().cloned().collect()
    }

    pub fn node_text(&self, id: &NodeId) -> Option<String> {
        self.lock().nodes.get(id).map(|node| node.text.clone())
    }

    pub fn node_position(&self, id: &NodeId) -> Option<Point> {
        self.lock().nodes.get(id).map(|node| node.position)
    }

    pub fn refresh_count(&self) -> usize {
        self.lock().refreshes.len()
    }

    pub fn refreshes(&self) -> Vec<Vec<NodeId>> {
        self.lock().refreshes.clone()
    }

    pub fn style_load_requests(&self) -> usize {
        self.lock().style_load_requests
    }

    pub fn loaded_styles(&self) -> Vec<String> {
        self.lock().loaded_styles.iter().cloned().collect()
    }

    pub fn notices(&self) -> Vec<(String, Severity)> {
        self.lock().notices.clone()
    }

    fn lock(&self) -> MutexGuard<'_, CanvasState> {
        lock_unpoisoned(&self.state)
    }
}

impl HostBackend for MockCanvas {
    fn handle(&mut self, command: HostCommand) -> Result<HostReply, HostError> {
        let mut state = self.lock();

        match command {
            HostCommand::LookupNode { id } => Ok(HostReply::Node {
                node: state.nodes.get(&id).map(|node| NodeInfo {
                    id: id.clone(),
                    kind: node.kind,
                    position: node.position,
                }),
            }),
            HostCommand::CreateTextNode { position } => {
                let id = next_node_id(&mut state);
                state.nodes.insert(
                    id.clone(),
                    MockNode {
                        kind: NodeKind::Text,
                        position,
                        text: String::new(),
                    },
                );
                Ok(HostReply::Created {
                    node: NodeInfo {
                        id,
                        kind: NodeKind::Text,
                        position,
                    },
                })
            }
            HostCommand::LoadStyle { style } => {
                let key = style.to_string();
                if state.failing_styles.contains(&key) {
                    return Err(HostError::StyleLoad(format!("{key} is unavailable")));
                }
                state.style_load_requests += 1;
                state.loaded_styles.insert(key);
                Ok(HostReply::Done)
            }
            HostCommand::SetContent { id, text } => {
                let node = state
                    .nodes
                    .get_mut(&id)
                    .ok_or_else(|| HostError::Backend(format!("unknown node {id}")))?;
                node.text = text;
                Ok(HostReply::Done)
            }
            HostCommand::RenderedExtent { id } => {
                let node = state
                    .nodes
                    .get(&id)
                    .ok_or_else(|| HostError::Backend(format!("unknown node {id}")))?;
                Ok(HostReply::Extent {
                    value: rendered_extent(&node.text),
                })
            }
            HostCommand::RefreshViewport { ids } => {
                state.refreshes.push(ids);
                Ok(HostReply::Done)
            }
            HostCommand::CollectSelectionText => Ok(HostReply::SelectionText {
                fragments: collect_selection_text(&state.selection),
            }),
            HostCommand::SelectionBounds => Ok(HostReply::SelectionBounds {
                bounds: selection_bounds(&state.selection),
            }),
            HostCommand::Notify { message, severity } => {
                state.notices.push((message, severity));
                Ok(HostReply::Done)
            }
        }
    }
}

fn next_node_id(state: &mut CanvasState) -> NodeId {
    state.next_node_serial += 1;
    NodeId::new(format!("0:{}", state.next_node_serial))
}

/// Rendered height as a pure function of line count.
fn rendered_extent(text: &str) -> f64 {
    let lines = 1 + text.matches('\n').count();
    LINE_HEIGHT * lines as f64
}

/// Collects embedded text in selection order: each selected container
/// contributes its text-bearing descendants depth-first, then the selected
/// node's own text.
fn collect_selection_text(selection: &[SelectionNode]) -> Vec<String> {
    let mut fragments = Vec::new();

    for node in selection {
        descendant_texts(node, &mut fragments);
        if let Some(text) = node.text_content() {
            fragments.push(text);
        }
    }

    fragments
}

fn descendant_texts(node: &SelectionNode, fragments: &mut Vec<String>) {
    for child in &node.children {
        if let Some(text) = child.text_content() {
            fragments.push(text);
        }
        descendant_texts(child, fragments);
    }
}

/// Bounding-box union over the selection: minimum top edge and maximum right
/// edge across nodes that have a box; `None` when no node has one.
fn selection_bounds(selection: &[SelectionNode]) -> Option<SelectionBounds> {
    let mut union: Option<SelectionBounds> = None;

    for node in selection {
        let Some(bounding_box) = node.bounding_box else {
            continue;
        };

        let right = bounding_box.x + bounding_box.width;
        union = Some(match union {
            Some(current) => SelectionBounds {
                top: current.top.min(bounding_box.y),
                right: current.right.max(right),
            },
            None => SelectionBounds {
                top: bounding_box.y,
                right,
            },
        });
    }

    union
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use canvas_host::{NodeId, NodeKind, Point, Severity, StyleSpec};

    use super::{BoundingBox, MockCanvas, SelectionNode, LINE_HEIGHT};

    #[tokio::test]
    async fn created_nodes_are_looked_up_by_identity() {
        let canvas = MockCanvas::new();
        let bridge = canvas.serve(8);

        let created = bridge
            .create_text_node(Point::new(148.0, 20.0))
            .await
            .expect("create");
        let found = bridge
            .lookup_node(&created.id)
            .await
            .expect("lookup")
            .expect("created node should resolve");

        assert_eq!(found.id, created.id);
        assert_eq!(found.kind, NodeKind::Text);
        assert_eq!(found.position, Point::new(148.0, 20.0));
        assert_eq!(
            bridge.lookup_node(&NodeId::new("0:999")).await.expect("lookup"),
            None
        );
    }

    #[tokio::test]
    async fn extent_tracks_line_count() {
        let canvas = MockCanvas::new();
        let bridge = canvas.serve(8);
        let node = bridge
            .create_text_node(Point::ORIGIN)
            .await
            .expect("create");

        assert_eq!(
            bridge.rendered_extent(&node.id).await.expect("empty"),
            LINE_HEIGHT
        );

        bridge
            .set_content(&node.id, "one line")
            .await
            .expect("set content");
        assert_eq!(
            bridge.rendered_extent(&node.id).await.expect("one line"),
            LINE_HEIGHT
        );

        bridge
            .set_content(&node.id, "two\nlines")
            .await
            .expect("set content");
        assert_eq!(
            bridge.rendered_extent(&node.id).await.expect("two lines"),
            LINE_HEIGHT * 2.0
        );
    }

    #[tokio::test]
    async fn style_loads_are_idempotent_and_scriptable() {
        let canvas = MockCanvas::new();
        let bridge = canvas.serve(8);
        let style = StyleSpec::default();

        bridge.load_style(&style).await.expect("first load");
        bridge.load_style(&style).await.expect("repeat load");
        assert_eq!(canvas.style_load_requests(), 2);
        assert_eq!(canvas.loaded_styles(), vec!["Inter Medium".to_owned()]);

        let broken = StyleSpec::new("Missing", "Bold");
        canvas.fail_style_load(&broken);
        let error = bridge
            .load_style(&broken)
            .await
            .expect_err("scripted failure");
        assert!(matches!(error, canvas_host::HostError::StyleLoad(_)));
    }

    #[tokio::test]
    async fn selection_text_collects_descendants_before_own_text() {
        let canvas = MockCanvas::new();
        canvas.set_selection(vec![
            SelectionNode::frame(
                vec![
                    SelectionNode::text_layer("first", None),
                    SelectionNode::frame(
                        vec![SelectionNode::sticky("nested", None)],
                        None,
                    ),
                ],
                None,
            ),
            SelectionNode::shape_with_text("last", None),
        ]);
        let bridge = canvas.serve(8);

        assert_eq!(
            bridge
                .collect_selection_text()
                .await
                .expect("selection text"),
            vec!["first".to_owned(), "nested".to_owned(), "last".to_owned()]
        );
    }

    #[tokio::test]
    async fn selection_text_skips_empty_content() {
        let canvas = MockCanvas::new();
        canvas.set_selection(vec![
            SelectionNode::text_layer("", None),
            SelectionNode::frame(Vec::new(), None),
        ]);
        let bridge = canvas.serve(8);

        assert!(bridge
            .collect_selection_text()
            .await
            .expect("selection text")
            .is_empty());
    }

    #[tokio::test]
    async fn selection_bounds_union_spans_boxed_nodes_only() {
        let canvas = MockCanvas::new();
        canvas.set_selection(vec![
            SelectionNode::text_layer("a", Some(BoundingBox::new(20.0, 20.0, 80.0, 30.0))),
            SelectionNode::text_layer("b", None),
            SelectionNode::sticky("c", Some(BoundingBox::new(10.0, 45.0, 40.0, 10.0))),
        ]);
        let bridge = canvas.serve(8);

        let bounds = bridge
            .selection_bounds()
            .await
            .expect("bounds")
            .expect("boxed nodes should produce a union");
        assert_eq!(bounds.top, 20.0);
        assert_eq!(bounds.right, 100.0);
    }

    #[tokio::test]
    async fn selection_bounds_are_none_without_any_box() {
        let canvas = MockCanvas::new();
        canvas.set_selection(vec![SelectionNode::text_layer("a", None)]);
        let bridge = canvas.serve(8);

        assert_eq!(bridge.selection_bounds().await.expect("bounds"), None);
    }

    #[tokio::test]
    async fn notices_and_refreshes_are_recorded() {
        let canvas = MockCanvas::new();
        let bridge = canvas.serve(8);
        let node = bridge
            .create_text_node(Point::ORIGIN)
            .await
            .expect("create");

        bridge
            .refresh_viewport(std::slice::from_ref(&node.id))
            .await
            .expect("refresh");
        bridge
            .notify("something happened", Severity::Error)
            .await
            .expect("notify");

        assert_eq!(canvas.refresh_count(), 1);
        assert_eq!(canvas.refreshes(), vec![vec![node.id]]);
        assert_eq!(
            canvas.notices(),
            vec![("something happened".to_owned(), Severity::Error)]
        );
    }
}
