//! Streaming support: re-extraction over a growing result string.
//!
//! A step's output can arrive incrementally. The accumulator appends each
//! delta and re-runs extraction over the full accumulated text; there is
//! no incremental re-parse across appends, so a stream of n deltas costs
//! O(n²) total over text sized for rendered chat output.

use crate::blocks::ContentBlock;
use crate::extract::extract_blocks;
use crate::format::OutputFormat;

/// Accumulates streamed step output and keeps the current block view.
#[derive(Debug, Default)]
pub struct BlockAccumulator {
    format: Option<OutputFormat>,
    text: String,
    blocks: Vec<ContentBlock>,
}

impl BlockAccumulator {
    pub fn new(format: Option<OutputFormat>) -> Self {
        Self {
            format,
            text: String::new(),
            blocks: Vec::new(),
        }
    }

    /// Appends one streamed delta and returns the refreshed block view.
    pub fn push_delta(&mut self, delta: &str) -> &[ContentBlock] {
        self.text.push_str(delta);
        self.blocks = extract_blocks(&self.text, self.format);
        &self.blocks
    }

    /// Current block view; empty until the first non-blank delta arrives.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Full accumulated text, exactly as the deltas arrived.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_refreshes_view_per_delta() {
        let mut accumulator = BlockAccumulator::new(None);
        assert!(accumulator.is_empty());

        let view = accumulator.push_delta("Hello");
        assert_eq!(view, [ContentBlock::text("Hello")]);

        accumulator.push_delta(" world");
        assert_eq!(accumulator.blocks(), [ContentBlock::text("Hello world")]);
        assert_eq!(accumulator.text(), "Hello world");
    }

    #[test]
    fn accumulator_applies_format_hint_every_pass() {
        let mut accumulator = BlockAccumulator::new(Some(OutputFormat::Map));
        accumulator.push_delta("[125.6, 10.1]");
        assert_eq!(
            accumulator.blocks(),
            [ContentBlock::geojson("data.geojson", "[125.6, 10.1]")]
        );
    }
}
