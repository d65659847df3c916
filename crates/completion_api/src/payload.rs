use serde::{Deserialize, Serialize};

/// Canonical request payload shape for the completion endpoint.
///
/// `layers` carries one bulleted line per extracted content block; the
/// gateway consumes the list verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub layers: Vec<String>,
}

impl CompletionRequest {
    pub fn new(layers: Vec<String>) -> Self {
        Self { layers }
    }

    /// Frames extracted text fragments into the request shape, prefixing each
    /// fragment with a bullet marker.
    pub fn from_fragments<I>(fragments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            layers: fragments
                .into_iter()
                .map(|fragment| format!("* {}", fragment.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
