//! HTTP message sanitization.
//!
//! [`sanitize`] takes one raw captured message (request or response), strips
//! or describes credential-bearing headers, enforces a body size ceiling, and
//! returns the sanitized text together with a [`ProcessingMetadata`] record
//! of exactly what was changed. The caller runs it once for the request and
//! once for the response; the two passes are independent and share nothing.
//!
//! Segmentation is intentionally simple: the first line is the start/status
//! line and is copied verbatim, headers run until the first blank line, and
//! everything after is body regardless of content. Folded headers and chunk
//! markers are not handled; the captured text is treated as plain lines.

pub mod body;
pub mod cookie;
pub mod header;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ScrubLensError;

pub use body::BODY_LIMIT;
pub use header::{HeaderPolicy, SENSITIVE_HEADERS};

/// The type of security analysis requested. Selects both the header-handling
/// policy and the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// General vulnerability review of the exchange.
    VulnerabilityScan,
    /// Header-configuration review; sensitive headers are preserved
    /// (annotated) because the real header set is the subject of analysis.
    SecurityHeadersCheck,
    /// Free-form security review.
    CustomPrompt,
}

impl AnalysisMode {
    /// The header policy this mode selects.
    pub fn header_policy(self) -> HeaderPolicy {
        match self {
            AnalysisMode::SecurityHeadersCheck => HeaderPolicy::PreserveAnnotate,
            _ => HeaderPolicy::RedactDescribe,
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = ScrubLensError;

    /// Accepts the CLI labels (`vulnerability-scan`, `security-headers-check`,
    /// `custom-prompt`) and the display labels. Anything else is an error;
    /// unknown modes never silently default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vulnerability-scan" | "Vulnerability Scan" => Ok(AnalysisMode::VulnerabilityScan),
            "security-headers-check" | "Security Headers Check" => {
                Ok(AnalysisMode::SecurityHeadersCheck)
            }
            "custom-prompt" | "Custom Prompt" => Ok(AnalysisMode::CustomPrompt),
            other => Err(ScrubLensError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnalysisMode::VulnerabilityScan => "Vulnerability Scan",
            AnalysisMode::SecurityHeadersCheck => "Security Headers Check",
            AnalysisMode::CustomPrompt => "Custom Prompt",
        };
        f.write_str(label)
    }
}

/// Record of the modifications one [`sanitize`] call made.
///
/// Owned by a single sanitize pass and read once by the report builder, then
/// discarded. `header_values` holds original values only long enough to
/// generate content descriptions; it is never persisted or logged verbatim.
#[derive(Debug, Clone)]
pub struct ProcessingMetadata {
    /// Canonical (lowercase) names of sensitive headers encountered, in
    /// input order, one entry per occurrence.
    pub redacted_headers: Vec<String>,
    /// Case-normalized header name → original value.
    pub header_values: HashMap<String, String>,
    /// Whether the body truncation marker was emitted.
    pub body_truncated: bool,
    /// Input length before processing, in characters.
    pub original_size: usize,
    /// Output length after processing, in characters.
    pub processed_size: usize,
    /// The header policy that was active for this pass.
    pub policy: HeaderPolicy,
}

impl ProcessingMetadata {
    pub fn new(policy: HeaderPolicy) -> Self {
        Self {
            redacted_headers: Vec::new(),
            header_values: HashMap::new(),
            body_truncated: false,
            original_size: 0,
            processed_size: 0,
            policy,
        }
    }

    /// Record that a sensitive header was encountered.
    pub(crate) fn record_redaction(&mut self, name: &str, value: &str) {
        self.redacted_headers.push(name.to_string());
        self.header_values.insert(name.to_string(), value.to_string());
    }

    /// Whether this pass redacted (or flagged) any headers.
    pub fn has_redactions(&self) -> bool {
        !self.redacted_headers.is_empty()
    }
}

/// Sanitize one raw HTTP message for the given analysis mode.
///
/// Pure with respect to its inputs: the same message and mode always yield
/// the same output and metadata. Never fails; an empty or all-whitespace
/// message produces empty output and a logged warning.
pub fn sanitize(message: &str, mode: AnalysisMode) -> (String, ProcessingMetadata) {
    let mut metadata = ProcessingMetadata::new(mode.header_policy());

    if message.trim().is_empty() {
        tracing::warn!("empty message received; nothing to sanitize");
        return (String::new(), metadata);
    }

    metadata.original_size = message.len();
    let mut out = String::new();
    let mut guard = body::BodyGuard::new(message.len());
    let mut in_headers = true;

    let mut lines = message.split('\n');

    // Start/status line is copied verbatim, never inspected.
    if let Some(first) = lines.next() {
        out.push_str(first);
        out.push('\n');
    }

    for raw_line in lines {
        let line = raw_line.trim();

        if line.is_empty() {
            // First blank line ends the header region permanently.
            in_headers = false;
            out.push('\n');
            continue;
        }

        if in_headers {
            header::process_line(line, &mut metadata, &mut out);
        } else {
            guard.push_line(line, &mut out);
        }
    }

    metadata.body_truncated = guard.truncated();
    metadata.processed_size = out.len();
    (out, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = "POST /login HTTP/1.1\n\
        Host: example.com\n\
        Cookie: session_id=abcdef1234567890; auth_token=eyJhbGciOiJIUzI1NiJ9\n\
        Authorization: Bearer secret-token-value\n\
        Content-Type: application/x-www-form-urlencoded\n\
        \n\
        username=admin&password=hunter2";

    #[test]
    fn mode_labels_parse() {
        assert_eq!(
            "vulnerability-scan".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::VulnerabilityScan
        );
        assert_eq!(
            "Security Headers Check".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::SecurityHeadersCheck
        );
    }

    #[test]
    fn unknown_mode_fails_fast() {
        let err = "Fuzzing Sweep".parse::<AnalysisMode>().unwrap_err();
        assert!(matches!(err, ScrubLensError::UnknownMode(m) if m == "Fuzzing Sweep"));
    }

    #[test]
    fn start_line_copied_verbatim() {
        let (out, _) = sanitize(REQUEST, AnalysisMode::VulnerabilityScan);
        assert!(out.starts_with("POST /login HTTP/1.1\n"));
    }

    #[test]
    fn sensitive_values_absent_in_redact_mode() {
        let (out, meta) = sanitize(REQUEST, AnalysisMode::VulnerabilityScan);
        assert!(!out.contains("abcdef1234567890"));
        assert!(!out.contains("eyJhbGciOiJIUzI1NiJ9"));
        assert!(!out.contains("secret-token-value"));
        assert_eq!(meta.redacted_headers, vec!["cookie", "authorization"]);
    }

    #[test]
    fn security_headers_check_preserves_lines() {
        let (out, meta) = sanitize(REQUEST, AnalysisMode::SecurityHeadersCheck);
        // Original lines byte-for-byte present, plus annotation suffix.
        assert!(out.contains(&format!(
            "Cookie: session_id=abcdef1234567890; auth_token=eyJhbGciOiJIUzI1NiJ9{}",
            header::ANNOTATION
        )));
        assert!(out.contains(&format!(
            "Authorization: Bearer secret-token-value{}",
            header::ANNOTATION
        )));
        // Asymmetry: still recorded as redacted for the audit trail.
        assert_eq!(meta.redacted_headers, vec!["cookie", "authorization"]);
    }

    #[test]
    fn body_passes_through_untouched() {
        let (out, _) = sanitize(REQUEST, AnalysisMode::VulnerabilityScan);
        assert!(out.contains("username=admin&password=hunter2"));
    }

    #[test]
    fn header_region_ends_permanently_at_blank_line() {
        // A cookie-looking line in the body must not be redacted.
        let msg = "GET / HTTP/1.1\nHost: a\n\nCookie: sid=realvalue\n";
        let (out, meta) = sanitize(msg, AnalysisMode::VulnerabilityScan);
        assert!(out.contains("Cookie: sid=realvalue"));
        assert!(meta.redacted_headers.is_empty());
    }

    #[test]
    fn empty_message_short_circuits() {
        let (out, meta) = sanitize("", AnalysisMode::VulnerabilityScan);
        assert_eq!(out, "");
        assert!(meta.redacted_headers.is_empty());
        assert!(!meta.body_truncated);
        assert_eq!(meta.original_size, 0);
        assert_eq!(meta.processed_size, 0);

        let (out, _) = sanitize("   \n  \n", AnalysisMode::CustomPrompt);
        assert_eq!(out, "");
    }

    #[test]
    fn sizes_recorded() {
        let (out, meta) = sanitize(REQUEST, AnalysisMode::VulnerabilityScan);
        assert_eq!(meta.original_size, REQUEST.len());
        assert_eq!(meta.processed_size, out.len());
    }

    #[test]
    fn oversized_body_truncated_once() {
        let body: String = (0..60).map(|_| format!("{}\n", "z".repeat(999))).collect();
        let msg = format!("POST /upload HTTP/1.1\nHost: example.com\n\n{}", body);
        let (out, meta) = sanitize(&msg, AnalysisMode::VulnerabilityScan);
        assert!(meta.body_truncated);
        assert_eq!(out.matches("[TRUNCATED").count(), 1);
        assert!(out.contains(&format!("Original size: {} bytes", msg.len())));
    }

    #[test]
    fn lone_oversized_line_copied_without_marker() {
        // The ceiling gates line starts, not line contents: a single body
        // line that begins under the limit is copied in full.
        let msg = format!(
            "POST /upload HTTP/1.1\nHost: example.com\n\n{}",
            "z".repeat(60_000)
        );
        let (out, meta) = sanitize(&msg, AnalysisMode::VulnerabilityScan);
        assert!(!meta.body_truncated);
        assert!(!out.contains("[TRUNCATED"));
        assert!(out.ends_with(&format!("{}\n", "z".repeat(60_000))));
    }

    #[test]
    fn sanitize_is_pure() {
        let a = sanitize(REQUEST, AnalysisMode::VulnerabilityScan);
        let b = sanitize(REQUEST, AnalysisMode::VulnerabilityScan);
        assert_eq!(a.0, b.0);
        assert_eq!(a.1.redacted_headers, b.1.redacted_headers);
        assert_eq!(a.1.processed_size, b.1.processed_size);
    }

    #[test]
    fn resanitizing_output_changes_nothing_sensitive() {
        let (first, _) = sanitize(REQUEST, AnalysisMode::VulnerabilityScan);
        let (second, meta) = sanitize(&first, AnalysisMode::VulnerabilityScan);
        // The cookie description line is no longer a real header; only a
        // re-match on the "Cookie:" token occurs, which still carries no
        // literal values. Body and ordering are unchanged.
        assert!(meta.header_values.values().all(|v| !v.contains("abcdef1234567890")));
        assert!(second.contains("username=admin&password=hunter2"));
    }
}
