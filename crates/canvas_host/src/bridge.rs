use tokio::sync::{mpsc, oneshot};

use crate::command::{HostCommand, HostReply};
use crate::error::HostError;
use crate::types::{NodeId, NodeInfo, Point, SelectionBounds, Severity, StyleSpec};

/// One in-flight capability call: the command plus its reply slot.
#[derive(Debug)]
pub struct HostRequest {
    pub command: HostCommand,
    pub reply: oneshot::Sender<Result<HostReply, HostError>>,
}

/// Caller-side handle to the host capability boundary.
///
/// Every method suspends until the host has processed the command and
/// replied; a dropped or closed host surfaces as [`HostError::Disconnected`].
#[derive(Debug, Clone)]
pub struct HostBridge {
    commands: mpsc::Sender<HostRequest>,
}

/// Creates a connected bridge/receiver pair.
///
/// The receiver is typically handed to [`serve`] together with a
/// [`HostBackend`] implementation.
pub fn channel(capacity: usize) -> (HostBridge, mpsc::Receiver<HostRequest>) {
    let (commands, requests) = mpsc::channel(capacity);
    (HostBridge { commands }, requests)
}

impl HostBridge {
    async fn call(&self, command: HostCommand) -> Result<HostReply, HostError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(HostRequest { command, reply })
            .await
            .map_err(|_| HostError::Disconnected)?;
        response.await.map_err(|_| HostError::Disconnected)?
    }

    pub async fn lookup_node(&self, id: &NodeId) -> Result<Option<NodeInfo>, HostError> {
        match self.call(HostCommand::LookupNode { id: id.clone() }).await? {
            HostReply::Node { node } => Ok(node),
            reply => Err(protocol_mismatch("lookup_node", &reply)),
        }
    }

    pub async fn create_text_node(&self, position: Point) -> Result<NodeInfo, HostError> {
        match self.call(HostCommand::CreateTextNode { position }).await? {
            HostReply::Created { node } => Ok(node),
            reply => Err(protocol_mismatch("create_text_node", &reply)),
        }
    }

    /// Ensures the style resource is loaded. Loading an already-loaded
    /// resource is a safe no-op on the host side.
    pub async fn load_style(&self, style: &StyleSpec) -> Result<(), HostError> {
        match self
            .call(HostCommand::LoadStyle {
                style: style.clone(),
            })
            .await?
        {
            HostReply::Done => Ok(()),
            reply => Err(protocol_mismatch("load_style", &reply)),
        }
    }

    /// Replaces the node's content with `text` in full.
    pub async fn set_content(&self, id: &NodeId, text: &str) -> Result<(), HostError> {
        match self
            .call(HostCommand::SetContent {
                id: id.clone(),
                text: text.to_owned(),
            })
            .await?
        {
            HostReply::Done => Ok(()),
            reply => Err(protocol_mismatch("set_content", &reply)),
        }
    }

    pub async fn rendered_extent(&self, id: &NodeId) -> Result<f64, HostError> {
        match self.call(HostCommand::RenderedExtent { id: id.clone() }).await? {
            HostReply::Extent { value } => Ok(value),
            reply => Err(protocol_mismatch("rendered_extent", &reply)),
        }
    }

    pub async fn refresh_viewport(&self, ids: &[NodeId]) -> Result<(), HostError> {
        match self
            .call(HostCommand::RefreshViewport { ids: ids.to_vec() })
            .await?
        {
            HostReply::Done => Ok(()),
            reply => Err(protocol_mismatch("refresh_viewport", &reply)),
        }
    }

    /// Collects all embedded text in the current selection, in order.
    pub async fn collect_selection_text(&self) -> Result<Vec<String>, HostError> {
        match self.call(HostCommand::CollectSelectionText).await? {
            HostReply::SelectionText { fragments } => Ok(fragments),
            reply => Err(protocol_mismatch("collect_selection_text", &reply)),
        }
    }

    /// Queries the bounding-box union of the current selection.
    pub async fn selection_bounds(&self) -> Result<Option<SelectionBounds>, HostError> {
        match self.call(HostCommand::SelectionBounds).await? {
            HostReply::SelectionBounds { bounds } => Ok(bounds),
            reply => Err(protocol_mismatch("selection_bounds", &reply)),
        }
    }

    /// Emits a single-shot advisory message; no acknowledgement is expected.
    pub async fn notify(&self, message: &str, severity: Severity) -> Result<(), HostError> {
        match self
            .call(HostCommand::Notify {
                message: message.to_owned(),
                severity,
            })
            .await?
        {
            HostReply::Done => Ok(()),
            reply => Err(protocol_mismatch("notify", &reply)),
        }
    }
}

/// Host-side handler for capability commands.
///
/// Handling is synchronous from the backend's perspective; suspension is the
/// channel crossing itself.
pub trait HostBackend {
    fn handle(&mut self, command: HostCommand) -> Result<HostReply, HostError>;
}

/// Drives a backend until every bridge clone is dropped.
pub async fn serve<B: HostBackend>(mut backend: B, mut requests: mpsc::Receiver<HostRequest>) {
    while let Some(request) = requests.recv().await {
        let outcome = backend.handle(request.command);
        // The caller may have given up on the reply; that is not an error.
        let _ = request.reply.send(outcome);
    }
}

fn protocol_mismatch(method: &str, reply: &HostReply) -> HostError {
    HostError::Protocol(format!("{method} received unexpected reply {reply:?}"))
}
