/// Sink for the transient display target.
///
/// Every chunk triggers a full replace with the accumulated value; there is
/// no identity management and no recovery beyond the last successfully
/// rendered value persisting if a later chunk errors.
pub trait DisplaySink {
    fn replace(&mut self, text: &str);
}

/// In-memory accumulator exposed to a UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    text: String,
}

impl DisplayBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully rendered value.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl DisplaySink for DisplayBuffer {
    fn replace(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayBuffer, DisplaySink};

    #[test]
    fn replace_overwrites_the_whole_value() {
        let mut buffer = DisplayBuffer::new();
        assert!(buffer.is_empty());

        buffer.replace("Roses");
        buffer.replace("Roses are red,\n");
        assert_eq!(buffer.text(), "Roses are red,\n");
    }

    #[test]
    fn replace_is_idempotent_at_a_fixed_value() {
        let mut buffer = DisplayBuffer::new();
        buffer.replace("stable");
        buffer.replace("stable");
        assert_eq!(buffer.text(), "stable");
    }
}
