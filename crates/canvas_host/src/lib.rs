//! Shared contract for the host document capability boundary.
//!
//! This crate intentionally defines only the capability surface the node
//! synchronizer consumes: node lookup/creation, style loading, content
//! assignment, extent query, viewport control, selection reads, and the
//! advisory notification channel. It excludes transport details and any
//! concrete document implementation.
//!
//! Mutations execute in the host's isolated context, reached by message
//! passing: a [`HostCommand`] carrying every needed value as an explicit,
//! serializable argument is sent across a channel and the reply is awaited.
//! Nothing crosses the boundary by closure capture.

pub mod bridge;
pub mod command;
pub mod error;
pub mod types;

pub use bridge::{channel, serve, HostBackend, HostBridge, HostRequest};
pub use command::{HostCommand, HostReply};
pub use error::HostError;
pub use types::{NodeId, NodeInfo, NodeKind, Point, SelectionBounds, Severity, StyleSpec};
