//! Incremental streaming text synchronizer.
//!
//! Streams text from the completion gateway and renders it into one of two
//! targets: a transient display buffer, or a persistent canvas text node
//! created or updated in place as chunks arrive.
//!
//! One user action drives one synchronization session: selection text is
//! extracted through the host capability boundary, framed into a completion
//! request, and the resulting chunk stream is applied to the active sink in
//! strict arrival order. The canvas path threads node identity explicitly
//! through every [`sync::NodeSynchronizer::sync_chunk`] call because each
//! host mutation executes in an isolated context with no shared memory.
//!
//! Sessions are never retried and never cancelled from this layer: a stream
//! ends by exhaustion or error, and a re-triggered action starts an
//! independent session with its own accumulator. Partial content from a
//! failed stream is preserved in whichever sink was active.

pub mod display;
pub mod error;
pub mod placement;
pub mod session;
pub mod sync;

pub use display::{DisplayBuffer, DisplaySink};
pub use error::SessionError;
pub use placement::resolve_anchor;
pub use session::{
    run_canvas_session, run_display_session, stream_to_canvas, stream_to_display,
};
pub use sync::NodeSynchronizer;
