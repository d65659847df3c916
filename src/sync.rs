use canvas_host::{HostBridge, NodeId, Point, StyleSpec};

use crate::error::SessionError;

/// Applies accumulated text to a canvas node with create-or-update
/// semantics.
///
/// Node identity is threaded explicitly: the caller passes back the identity
/// returned by the previous call, starting from `None`. The synchronizer
/// exclusively owns the target node for the duration of one streaming
/// session; it never deletes it.
#[derive(Debug)]
pub struct NodeSynchronizer<'a> {
    host: &'a HostBridge,
    style: StyleSpec,
}

impl<'a> NodeSynchronizer<'a> {
    #[must_use]
    pub fn new(host: &'a HostBridge) -> Self {
        Self::with_style(host, StyleSpec::default())
    }

    #[must_use]
    pub fn with_style(host: &'a HostBridge, style: StyleSpec) -> Self {
        Self { host, style }
    }

    /// Synchronizes one chunk's worth of accumulated text into the target
    /// node.
    ///
    /// `accumulated` is always the full value, never a delta; content
    /// assignment is a full replace, which makes repeated calls at the same
    /// value no-ops. The viewport is refreshed only when the node's rendered
    /// extent changed, to avoid per-chunk flicker.
    ///
    /// Returns the node identity to pass into the next call, or `None` when
    /// the resolved node is not text-capable: an outside editor may have
    /// swapped the node's kind, so that chunk is skipped rather than failing
    /// the session, and the next call creates a fresh node.
    pub async fn sync_chunk(
        &self,
        node_id: Option<&NodeId>,
        accumulated: &str,
        anchor: Option<Point>,
    ) -> Result<Option<NodeId>, SessionError> {
        let node = match node_id {
            Some(id) => self.host.lookup_node(id).await?,
            None => None,
        };
        let node = match node {
            Some(node) => node,
            None => {
                let position = anchor.unwrap_or(Point::ORIGIN);
                self.host.create_text_node(position).await?
            }
        };

        if !node.kind.is_text() {
            tracing::debug!(node = %node.id, kind = ?node.kind, "target is not text-capable; skipping chunk");
            return Ok(None);
        }

        // Extent is captured before any mutation; the style load itself may
        // reflow the node.
        let old_extent = self.host.rendered_extent(&node.id).await?;

        // Style must be resolved before content assignment or the host
        // renders the text with stale style state.
        self.host.load_style(&self.style).await?;
        self.host.set_content(&node.id, accumulated).await?;

        let new_extent = self.host.rendered_extent(&node.id).await?;
        if new_extent != old_extent {
            tracing::debug!(node = %node.id, old_extent, new_extent, "extent changed; refreshing viewport");
            self.host
                .refresh_viewport(std::slice::from_ref(&node.id))
                .await?;
        }

        Ok(Some(node.id))
    }
}
