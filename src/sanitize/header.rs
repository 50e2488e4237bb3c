//! Sensitive-header classification and redaction.
//!
//! A fixed set of header names carries credentials or session material:
//! `cookie`, `authorization`, `proxy-authorization`, `x-csrf-token`.
//! What happens to a matching line depends on the active [`HeaderPolicy`];
//! either way the match is recorded in the metadata so the disclosure
//! summary can flag it.

use super::cookie;
use super::ProcessingMetadata;

/// Headers whose values must not reach an external analysis service.
/// Matched case-insensitively against the line's leading token, in this
/// order; first match wins.
pub const SENSITIVE_HEADERS: [&str; 4] = [
    "cookie",
    "authorization",
    "proxy-authorization",
    "x-csrf-token",
];

/// Marker appended to preserved sensitive headers in
/// [`HeaderPolicy::PreserveAnnotate`] mode.
pub const ANNOTATION: &str = " [Contains sensitive data - included for security analysis]";

/// How sensitive header values are represented in sanitized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Keep the original line verbatim, with an annotation suffix.
    /// Used for header-configuration analysis, where the real header set is
    /// the subject of the review. The header is still recorded as redacted
    /// in the metadata: audit bookkeeping always happens, value suppression
    /// is mode-dependent.
    PreserveAnnotate,
    /// Remove the value and replace it with a content description.
    RedactDescribe,
}

/// Short fixed description of what a sensitive header's value contained.
/// Never includes literal content; the cookie description is a count only.
pub fn describe_content(name: &str, value: &str) -> String {
    match name {
        "cookie" => format!("{} cookies present", value.split(';').count()),
        "authorization" => "Bearer token or credentials present".to_string(),
        "proxy-authorization" => "Proxy credentials present".to_string(),
        _ => "Sensitive data".to_string(),
    }
}

/// Match a header line against the sensitive set.
/// Returns the canonical (lowercase) sensitive name and the trimmed value.
fn match_sensitive(line: &str) -> Option<(&'static str, &str)> {
    let lower = line.to_lowercase();
    for sensitive in SENSITIVE_HEADERS {
        if lower.starts_with(&format!("{}:", sensitive)) {
            let value = line[line.find(':').map(|i| i + 1).unwrap_or(line.len())..].trim();
            return Some((sensitive, value));
        }
    }
    None
}

/// Process one header line: append its sanitized representation to `out` and
/// record any redaction in `metadata`. Non-sensitive lines pass through
/// unchanged.
pub fn process_line(line: &str, metadata: &mut ProcessingMetadata, out: &mut String) {
    let Some((name, value)) = match_sensitive(line) else {
        out.push_str(line);
        out.push('\n');
        return;
    };

    metadata.record_redaction(name, value);

    match metadata.policy {
        HeaderPolicy::PreserveAnnotate => {
            out.push_str(line);
            out.push_str(ANNOTATION);
            out.push('\n');
        }
        HeaderPolicy::RedactDescribe => {
            if name == "cookie" {
                out.push_str(&cookie::describe_cookie_header(value));
            } else {
                out.push_str(&format!(
                    "{}: [REDACTED - {}]",
                    name,
                    describe_content(name, value)
                ));
            }
            out.push('\n');
        }
    }
}
