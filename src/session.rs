use canvas_host::{HostBridge, NodeId, Severity};
use completion_api::{CompletionApiError, CompletionClient, CompletionRequest};
use futures_util::{Stream, StreamExt};

use crate::display::DisplaySink;
use crate::error::SessionError;
use crate::placement::resolve_anchor;
use crate::sync::NodeSynchronizer;

/// Advisory shown when the selection contains no text.
pub const NO_SELECTION_NOTICE: &str =
    "Please select a layer with text in it to generate from.";

/// Streams a completion for the current selection into the display sink.
///
/// The empty selection is recovered locally: an error-severity advisory is
/// emitted and the gateway is never contacted. Any later failure terminates
/// the session, surfaces on the notification channel, and leaves the sink at
/// its last successfully rendered value.
pub async fn stream_to_display(
    client: &CompletionClient,
    host: &HostBridge,
    sink: &mut dyn DisplaySink,
) -> Result<(), SessionError> {
    let Some(request) = framed_selection_request(host).await? else {
        return Ok(());
    };

    let outcome = match client.open_stream(&request).await {
        Ok(chunks) => run_display_session(chunks, sink).await.map(|_| ()),
        Err(error) => Err(error.into()),
    };
    report_failure(host, outcome).await
}

/// Streams a completion for the current selection onto the canvas.
///
/// The target node is created on the first chunk, next to the selection when
/// it has a bounding box, and updated in place afterwards. Returns the final
/// node identity, or `None` when the stream produced no chunks or the last
/// applied chunk was skipped.
pub async fn stream_to_canvas(
    client: &CompletionClient,
    host: &HostBridge,
) -> Result<Option<NodeId>, SessionError> {
    let Some(request) = framed_selection_request(host).await? else {
        return Ok(None);
    };

    let outcome = match client.open_stream(&request).await {
        Ok(chunks) => run_canvas_session(chunks, host).await,
        Err(error) => Err(error.into()),
    };
    report_failure(host, outcome).await
}

/// Drives one display session over an already-open chunk stream.
///
/// Returns the final accumulated text: the concatenation of every chunk in
/// arrival order.
pub async fn run_display_session<S>(
    mut chunks: S,
    sink: &mut dyn DisplaySink,
) -> Result<String, SessionError>
where
    S: Stream<Item = Result<String, CompletionApiError>> + Unpin,
{
    let mut accumulated = String::new();

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        accumulated.push_str(&chunk);
        sink.replace(&accumulated);
    }

    tracing::debug!(chars = accumulated.len(), "display session completed");
    Ok(accumulated)
}

/// Drives one canvas session over an already-open chunk stream.
///
/// The anchor is resolved once, before the first chunk; node identity starts
/// at `None` and is reassigned from every synchronization call. Each
/// iteration fully applies its chunk before the next chunk is pulled, so
/// chunks land on the node strictly in arrival order.
pub async fn run_canvas_session<S>(
    mut chunks: S,
    host: &HostBridge,
) -> Result<Option<NodeId>, SessionError>
where
    S: Stream<Item = Result<String, CompletionApiError>> + Unpin,
{
    let anchor = resolve_anchor(host).await?;
    let synchronizer = NodeSynchronizer::new(host);

    let mut accumulated = String::new();
    let mut node_id: Option<NodeId> = None;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        accumulated.push_str(&chunk);
        node_id = synchronizer
            .sync_chunk(node_id.as_ref(), &accumulated, anchor)
            .await?;
    }

    tracing::debug!(chars = accumulated.len(), node = ?node_id, "canvas session completed");
    Ok(node_id)
}

/// Extracts and frames the selection, or emits the no-selection advisory.
async fn framed_selection_request(
    host: &HostBridge,
) -> Result<Option<CompletionRequest>, SessionError> {
    let fragments = host.collect_selection_text().await?;
    if fragments.is_empty() {
        tracing::debug!("selection has no text; session not started");
        host.notify(NO_SELECTION_NOTICE, Severity::Error).await?;
        return Ok(None);
    }

    Ok(Some(CompletionRequest::from_fragments(fragments)))
}

/// Surfaces a session failure on the notification channel, then returns it.
async fn report_failure<T>(
    host: &HostBridge,
    outcome: Result<T, SessionError>,
) -> Result<T, SessionError> {
    if let Err(error) = &outcome {
        tracing::warn!(%error, "synchronization session failed");
        let notice = format!("Generation failed: {error}");
        // Failing to notify must not mask the session error itself.
        let _ = host.notify(&notice, Severity::Error).await;
    }

    outcome
}
