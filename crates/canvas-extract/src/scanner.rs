//! Balanced-region scanner: exact extraction of a `{...}` region embedded
//! in free text, skipping brace characters inside quoted strings. A regex
//! cannot express this once the object's string values themselves contain
//! braces or escaped quotes, so the scanner is the ground truth the
//! extractor falls back to.

/// Forward scan state over one candidate object.
#[derive(Clone, Copy, Debug, Default)]
struct ScanState {
    depth: usize,
    in_string: bool,
    escape_pending: bool,
}

impl ScanState {
    /// Consumes one byte; returns true when this byte closed the outermost
    /// brace.
    fn advance(&mut self, byte: u8) -> bool {
        if self.escape_pending {
            self.escape_pending = false;
            return false;
        }
        if self.in_string {
            match byte {
                b'\\' => self.escape_pending = true,
                b'"' => self.in_string = false,
                _ => {}
            }
            return false;
        }
        match byte {
            b'"' => self.in_string = true,
            b'{' => self.depth += 1,
            b'}' => {
                self.depth = self.depth.saturating_sub(1);
                return self.depth == 0;
            }
            _ => {}
        }
        false
    }
}

/// Returns the substring spanning the balanced `{...}` region beginning at
/// `start`, inclusive of both braces, or `None` when the input ends before
/// the region closes.
///
/// `text` at `start` must be an opening brace; call sites check the byte
/// before calling.
pub fn extract_balanced_object(text: &str, start: usize) -> Option<&str> {
    debug_assert!(
        text.as_bytes().get(start) == Some(&b'{'),
        "balanced-object scan must start at an opening brace"
    );
    if text.as_bytes().get(start) != Some(&b'{') {
        return None;
    }

    let mut state = ScanState::default();
    for (offset, byte) in text.as_bytes()[start..].iter().copied().enumerate() {
        if state.advance(byte) {
            // Both braces are ASCII, so the slice bounds sit on char
            // boundaries.
            return Some(&text[start..=start + offset]);
        }
    }
    None
}
