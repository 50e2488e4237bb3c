//! Body size ceiling enforcement.

/// Hard ceiling on accumulated sanitized output length, in characters.
pub const BODY_LIMIT: usize = 50_000;

/// Copies body lines into the sanitized output until the output reaches
/// [`BODY_LIMIT`], then emits a single truncation marker and drops the rest.
///
/// The limit applies to the *sanitized output* length, not the input length,
/// and the marker reports the original message size. At most one marker is
/// emitted per message.
pub struct BodyGuard {
    original_size: usize,
    truncated: bool,
}

impl BodyGuard {
    /// Create a guard for a message of the given original length.
    pub fn new(original_size: usize) -> Self {
        Self {
            original_size,
            truncated: false,
        }
    }

    /// Append one body line to `out`, or the truncation marker if `out` has
    /// already reached the ceiling.
    pub fn push_line(&mut self, line: &str, out: &mut String) {
        if out.len() < BODY_LIMIT {
            out.push_str(line);
            out.push('\n');
        } else if !self.truncated {
            self.truncated = true;
            out.push_str(&format!(
                "\n[TRUNCATED - Request body exceeds size limit. Original size: {} bytes]\n",
                self.original_size
            ));
        }
    }

    /// Whether the truncation marker has been emitted.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}
